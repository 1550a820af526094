//! # Mission Data
//!
//! Normalized craft and waypoint records consumed by the map.
//!
//! ## Submodules
//! - [`import`]: Adapters from each platform's flight-group layout
//!
//! Coordinates are stored in raw fixed-point units, 160 per klick.

pub mod import;

use serde::{Deserialize, Serialize};

/// Raw units per klick.
pub const RAW_PER_KLICK: i32 = 160;

/// The three supported mission platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Platform {
    /// 15 flat waypoints per craft.
    #[default]
    Tie,
    /// 22 flat waypoints per craft.
    Xvt,
    /// Start points plus a region/order matrix of waypoint lists.
    Xwa,
}

impl Platform {
    pub fn schema(self) -> Schema {
        match self {
            Platform::Tie => Schema::Flat { slots: 15 },
            Platform::Xvt => Schema::Flat { slots: 22 },
            Platform::Xwa => Schema::RegionOrder,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Tie => "TIE",
            Platform::Xvt => "XvT",
            Platform::Xwa => "XWA",
        }
    }
}

/// Layout of a craft's waypoint groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// A single group holding `slots` waypoints.
    Flat { slots: usize },
    /// Group 0 holds the start points, groups 1..=16 hold the
    /// region/order cells (`region * 4 + order + 1`).
    RegionOrder,
}

pub const REGIONS: usize = 4;
pub const ORDERS: usize = 4;
pub const START_POINTS: usize = 4;
pub const ORDER_WAYPOINTS: usize = 8;

/// A 3D position in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Coordinate3 {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Build from whole klicks.
    pub fn from_klicks(x: i16, y: i16, z: i16) -> Self {
        let raw = |k: i16| (k as i32 * RAW_PER_KLICK) as i16;
        Self::new(raw(x), raw(y), raw(z))
    }

    pub fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: i16) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Coordinate3,
    pub enabled: bool,
    /// Region a start point belongs to. Only meaningful for XWA start points.
    #[serde(default)]
    pub region: u8,
}

impl Waypoint {
    pub fn new(position: Coordinate3, enabled: bool) -> Self {
        Self {
            position,
            enabled,
            region: 0,
        }
    }

    pub fn in_region(mut self, region: u8) -> Self {
        self.region = region;
        self
    }
}

/// A flight group as the map sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub name: String,
    /// Index into the sprite atlas.
    pub craft_type: usize,
    /// Friend/foe classification, 0..=5.
    pub iff: u8,
    pub groups: Vec<Vec<Waypoint>>,
}
