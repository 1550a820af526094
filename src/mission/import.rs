//! Import adapters, one per platform.
//!
//! Each adapter turns a platform's native flight-group records into the
//! normalized [`Craft`] layout. Malformed records (wrong waypoint counts,
//! IFF out of range) are contract violations and panic.

use super::{Craft, Waypoint, ORDERS, ORDER_WAYPOINTS, REGIONS, START_POINTS};

pub const TIE_WAYPOINTS: usize = 15;
pub const XVT_WAYPOINTS: usize = 22;
const MAX_IFF: u8 = 5;

#[derive(Clone, Debug)]
pub struct TieFlightGroup {
    pub name: String,
    pub craft_type: usize,
    pub iff: u8,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug)]
pub struct XvtFlightGroup {
    pub name: String,
    pub craft_type: usize,
    pub iff: u8,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug)]
pub struct XwaOrder {
    pub waypoints: Vec<Waypoint>,
}

#[derive(Clone, Debug)]
pub struct XwaFlightGroup {
    pub name: String,
    pub craft_type: usize,
    pub iff: u8,
    /// Start points; each carries the region it starts in.
    pub start_points: Vec<Waypoint>,
    /// Orders indexed `[region][order]`.
    pub orders: [[XwaOrder; ORDERS]; REGIONS],
}

fn check_iff(name: &str, iff: u8) {
    assert!(iff <= MAX_IFF, "flight group {name:?} has IFF {iff}, expected 0..={MAX_IFF}");
}

fn check_len(name: &str, what: &str, len: usize, expected: usize) {
    assert_eq!(len, expected, "flight group {name:?} has {len} {what}, expected {expected}");
}

pub fn import_tie(flight_groups: &[TieFlightGroup]) -> Vec<Craft> {
    flight_groups
        .iter()
        .map(|fg| {
            check_iff(&fg.name, fg.iff);
            check_len(&fg.name, "waypoints", fg.waypoints.len(), TIE_WAYPOINTS);
            Craft {
                name: fg.name.clone(),
                craft_type: fg.craft_type,
                iff: fg.iff,
                groups: vec![fg.waypoints.clone()],
            }
        })
        .collect()
}

pub fn import_xvt(flight_groups: &[XvtFlightGroup]) -> Vec<Craft> {
    flight_groups
        .iter()
        .map(|fg| {
            check_iff(&fg.name, fg.iff);
            check_len(&fg.name, "waypoints", fg.waypoints.len(), XVT_WAYPOINTS);
            Craft {
                name: fg.name.clone(),
                craft_type: fg.craft_type,
                iff: fg.iff,
                groups: vec![fg.waypoints.clone()],
            }
        })
        .collect()
}

/// Group 0 receives the start points, group `region * 4 + order + 1` the
/// waypoints of that order.
pub fn import_xwa(flight_groups: &[XwaFlightGroup]) -> Vec<Craft> {
    flight_groups
        .iter()
        .map(|fg| {
            check_iff(&fg.name, fg.iff);
            check_len(&fg.name, "start points", fg.start_points.len(), START_POINTS);
            let mut groups = Vec::with_capacity(1 + REGIONS * ORDERS);
            groups.push(fg.start_points.clone());
            for region in &fg.orders {
                for order in region {
                    check_len(&fg.name, "order waypoints", order.waypoints.len(), ORDER_WAYPOINTS);
                    groups.push(order.waypoints.clone());
                }
            }
            Craft {
                name: fg.name.clone(),
                craft_type: fg.craft_type,
                iff: fg.iff,
                groups,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Coordinate3;
    use pretty_assertions::assert_eq;

    fn order_with_marker(marker: i16) -> XwaOrder {
        let mut waypoints = vec![Waypoint::default(); ORDER_WAYPOINTS];
        waypoints[0] = Waypoint::new(Coordinate3::new(marker, 0, 0), true);
        XwaOrder { waypoints }
    }

    #[test]
    fn xwa_orders_land_in_region_major_groups() {
        let orders = std::array::from_fn(|region| {
            std::array::from_fn(|order| order_with_marker((region * 4 + order) as i16))
        });
        let fg = XwaFlightGroup {
            name: "Alpha".into(),
            craft_type: 3,
            iff: 1,
            start_points: vec![Waypoint::default(); START_POINTS],
            orders,
        };
        let craft = import_xwa(&[fg]);
        assert_eq!(craft[0].groups.len(), 17);
        // region 2, order 1
        assert_eq!(craft[0].groups[10][0].position.x, 9);
    }

    #[test]
    fn tie_import_keeps_a_single_group() {
        let fg = TieFlightGroup {
            name: "Red".into(),
            craft_type: 1,
            iff: 0,
            waypoints: vec![Waypoint::default(); TIE_WAYPOINTS],
        };
        let craft = import_tie(&[fg]);
        assert_eq!(craft[0].groups.len(), 1);
        assert_eq!(craft[0].groups[0].len(), TIE_WAYPOINTS);
    }

    #[test]
    #[should_panic(expected = "IFF 6")]
    fn out_of_range_iff_is_rejected() {
        let fg = XvtFlightGroup {
            name: "Bad".into(),
            craft_type: 0,
            iff: 6,
            waypoints: vec![Waypoint::default(); XVT_WAYPOINTS],
        };
        import_xvt(&[fg]);
    }
}
