//! # Waypoint Addressing
//!
//! Exposes every craft's waypoints through the uniform slot numbers 0-21,
//! whatever layout the platform stores them in. Rendering and hit-testing
//! only ever go through [`WaypointAddressing::visible_waypoint`], so they
//! never branch on the schema.
//!
//! Slot tables are built once per craft. On the region/order schema,
//! slots 4-11 resolve through the currently selected cell, so resolution
//! takes the [`ToggleState`] as well.

use super::toggles::{ToggleState, SLOT_COUNT};
use crate::mission::{Coordinate3, Craft, Platform, Schema, Waypoint, START_POINTS};

/// Live address of one waypoint inside the craft collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaypointHandle {
    pub craft: usize,
    pub group: usize,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotSource {
    /// Always the same waypoint.
    Fixed { group: usize, index: usize },
    /// `index` within the selected region/order cell.
    SelectedCell { index: usize },
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SlotTable {
    sources: [SlotSource; SLOT_COUNT],
}

impl SlotTable {
    fn build(schema: Schema, craft: &Craft) -> Self {
        let sources = std::array::from_fn(|slot| match schema {
            Schema::Flat { .. } if slot < craft.groups[0].len() => SlotSource::Fixed { group: 0, index: slot },
            Schema::Flat { .. } => SlotSource::Unavailable,
            Schema::RegionOrder if slot < START_POINTS => SlotSource::Fixed { group: 0, index: slot },
            Schema::RegionOrder if slot < 12 => SlotSource::SelectedCell { index: slot - START_POINTS },
            Schema::RegionOrder => SlotSource::Unavailable,
        });
        Self { sources }
    }
}

pub struct WaypointAddressing {
    platform: Platform,
    crafts: Vec<Craft>,
    tables: Vec<SlotTable>,
}

impl WaypointAddressing {
    pub fn new(platform: Platform, crafts: Vec<Craft>) -> Self {
        let schema = platform.schema();
        let tables = crafts.iter().map(|craft| SlotTable::build(schema, craft)).collect();
        log::debug!("Addressing {} craft for {}", crafts.len(), platform.name());
        Self {
            platform,
            crafts,
            tables,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn crafts(&self) -> &[Craft] {
        &self.crafts
    }

    pub fn craft(&self, craft: usize) -> &Craft {
        &self.crafts[craft]
    }

    /// Handle for `slot` of `craft`, or `None` if the schema has no such slot.
    pub fn resolve(&self, craft: usize, slot: usize, toggles: &ToggleState) -> Option<WaypointHandle> {
        assert!(slot < SLOT_COUNT, "slot {slot} out of range");
        let (group, index) = match self.tables[craft].sources[slot] {
            SlotSource::Fixed { group, index } => (group, index),
            SlotSource::SelectedCell { index } => (toggles.selected_cell(), index),
            SlotSource::Unavailable => return None,
        };
        let exists = self.crafts[craft].groups.get(group).is_some_and(|waypoints| index < waypoints.len());
        exists.then_some(WaypointHandle { craft, group, index })
    }

    /// Channel is on and, on the region/order schema, a start point lies in
    /// the selected region. Slots 4-11 already resolve inside the selected
    /// cell.
    pub fn is_visible(&self, craft: usize, slot: usize, toggles: &ToggleState) -> bool {
        if !toggles.channel(slot) {
            return false;
        }
        match self.resolve(craft, slot, toggles) {
            Some(handle) => !self.filters_regions() || slot >= START_POINTS || self.waypoint(handle).region == toggles.region(),
            None => false,
        }
    }

    /// The waypoint drawn for `slot`, if it is visible and enabled.
    pub fn visible_waypoint(&self, craft: usize, slot: usize, toggles: &ToggleState) -> Option<(WaypointHandle, &Waypoint)> {
        if !self.is_visible(craft, slot, toggles) {
            return None;
        }
        let handle = self.resolve(craft, slot, toggles)?;
        let waypoint = self.waypoint(handle);
        waypoint.enabled.then_some((handle, waypoint))
    }

    pub fn waypoint(&self, handle: WaypointHandle) -> &Waypoint {
        &self.crafts[handle.craft].groups[handle.group][handle.index]
    }

    /// Write a new position straight into the waypoint behind `handle`.
    pub fn set_coordinate(&mut self, handle: WaypointHandle, position: Coordinate3) {
        self.crafts[handle.craft].groups[handle.group][handle.index].position = position;
    }

    fn filters_regions(&self) -> bool {
        self.platform.schema() == Schema::RegionOrder
    }
}
