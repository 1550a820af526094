//! Built-in sample mission shown when the host has nothing else to import.
//!
//! Flight groups are built in each platform's native layout and go through
//! the regular import adapters.

use crate::mission::import::{
    self, TieFlightGroup, XvtFlightGroup, XwaFlightGroup, XwaOrder, TIE_WAYPOINTS, XVT_WAYPOINTS,
};
use crate::mission::{Coordinate3, Craft, Platform, Waypoint, ORDER_WAYPOINTS, START_POINTS};

struct Sample {
    name: &'static str,
    craft_type: usize,
    iff: u8,
    /// Start point, in klicks.
    start: (i16, i16, i16),
    /// Heading of the patrol route, in klicks per waypoint.
    step: (i16, i16, i16),
}

const SAMPLES: [Sample; 4] = [
    Sample { name: "Red", craft_type: 1, iff: 0, start: (-6, -4, 0), step: (2, 1, 0) },
    Sample { name: "Alpha", craft_type: 4, iff: 1, start: (8, 6, 1), step: (-1, -2, 0) },
    Sample { name: "Convoy", craft_type: 12, iff: 2, start: (0, 10, -2), step: (1, 0, 1) },
    Sample { name: "Platform 1", craft_type: 20, iff: 3, start: (-10, 8, 0), step: (0, 0, 0) },
];

fn at(klicks: (i16, i16, i16), step: (i16, i16, i16), n: i16) -> Coordinate3 {
    Coordinate3::from_klicks(klicks.0 + step.0 * n, klicks.1 + step.1 * n, klicks.2 + step.2 * n)
}

/// Flat layout shared by TIE and XvT: one start point, a short patrol
/// route, then a hyperspace exit and one briefing position.
fn flat_waypoints(sample: &Sample, len: usize) -> Vec<Waypoint> {
    let mut waypoints = vec![Waypoint::default(); len];
    waypoints[0] = Waypoint::new(at(sample.start, sample.step, 0), true);
    let moving = sample.step != (0, 0, 0);
    for n in 0..3 {
        waypoints[4 + n] = Waypoint::new(at(sample.start, sample.step, n as i16 + 1), moving);
    }
    waypoints[13] = Waypoint::new(at(sample.start, sample.step, 6), moving);
    waypoints[14] = Waypoint::new(at(sample.start, (0, 0, 0), 0), true);
    waypoints
}

fn xwa_group(sample: &Sample) -> XwaFlightGroup {
    let mut start_points = vec![Waypoint::default(); START_POINTS];
    start_points[0] = Waypoint::new(at(sample.start, sample.step, 0), true);
    let moving = sample.step != (0, 0, 0);
    let orders = std::array::from_fn(|region| {
        std::array::from_fn(|order| {
            let mut waypoints = vec![Waypoint::default(); ORDER_WAYPOINTS];
            if region == 0 && order == 0 {
                for (n, waypoint) in waypoints.iter_mut().take(3).enumerate() {
                    *waypoint = Waypoint::new(at(sample.start, sample.step, n as i16 + 1), moving);
                }
            }
            XwaOrder { waypoints }
        })
    });
    XwaFlightGroup {
        name: sample.name.to_string(),
        craft_type: sample.craft_type,
        iff: sample.iff,
        start_points,
        orders,
    }
}

pub fn sample_crafts(platform: Platform) -> Vec<Craft> {
    match platform {
        Platform::Tie => {
            let groups: Vec<_> = SAMPLES
                .iter()
                .map(|s| TieFlightGroup {
                    name: s.name.to_string(),
                    craft_type: s.craft_type,
                    iff: s.iff,
                    waypoints: flat_waypoints(s, TIE_WAYPOINTS),
                })
                .collect();
            import::import_tie(&groups)
        }
        Platform::Xvt => {
            let groups: Vec<_> = SAMPLES
                .iter()
                .map(|s| XvtFlightGroup {
                    name: s.name.to_string(),
                    craft_type: s.craft_type,
                    iff: s.iff,
                    waypoints: flat_waypoints(s, XVT_WAYPOINTS),
                })
                .collect();
            import::import_xvt(&groups)
        }
        Platform::Xwa => {
            let groups: Vec<_> = SAMPLES.iter().map(xwa_group).collect();
            import::import_xwa(&groups)
        }
    }
}
