//! Visibility channels and display toggles.
//!
//! Every waypoint slot has one visibility channel. The channel table is
//! fixed and indexed by slot number.

use crate::mission::{Platform, ORDERS, REGIONS};

/// Number of waypoint slots (and channels) per craft.
pub const SLOT_COUNT: usize = 22;
/// Channel that, when switched on, hides all lower channels.
pub const BRIEFING_ALL: usize = 14;

/// What a slot represents; drives how it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Start,
    Waypoint,
    Rendezvous,
    Hyperspace,
    Briefing,
}

#[derive(Clone, Copy, Debug)]
pub struct Channel {
    pub slot: usize,
    pub label: &'static str,
    pub kind: SlotKind,
}

impl Channel {
    /// Checkbox and tag label. XWA's fourth start point is its hyperspace
    /// arrival point.
    pub fn label(&self, platform: Platform) -> &'static str {
        if platform == Platform::Xwa && self.slot == 3 {
            "HYP"
        } else {
            self.label
        }
    }

    pub fn is_available(&self, platform: Platform) -> bool {
        self.slot < available_slots(platform)
    }
}

const fn channel(slot: usize, label: &'static str, kind: SlotKind) -> Channel {
    Channel { slot, label, kind }
}

pub const CHANNELS: [Channel; SLOT_COUNT] = [
    channel(0, "SP1", SlotKind::Start),
    channel(1, "SP2", SlotKind::Start),
    channel(2, "SP3", SlotKind::Start),
    channel(3, "SP4", SlotKind::Start),
    channel(4, "WP1", SlotKind::Waypoint),
    channel(5, "WP2", SlotKind::Waypoint),
    channel(6, "WP3", SlotKind::Waypoint),
    channel(7, "WP4", SlotKind::Waypoint),
    channel(8, "WP5", SlotKind::Waypoint),
    channel(9, "WP6", SlotKind::Waypoint),
    channel(10, "WP7", SlotKind::Waypoint),
    channel(11, "WP8", SlotKind::Waypoint),
    channel(12, "RDV", SlotKind::Rendezvous),
    channel(13, "HYP", SlotKind::Hyperspace),
    channel(14, "BRF", SlotKind::Briefing),
    channel(15, "BRF2", SlotKind::Briefing),
    channel(16, "BRF3", SlotKind::Briefing),
    channel(17, "BRF4", SlotKind::Briefing),
    channel(18, "BRF5", SlotKind::Briefing),
    channel(19, "BRF6", SlotKind::Briefing),
    channel(20, "BRF7", SlotKind::Briefing),
    channel(21, "BRF8", SlotKind::Briefing),
];

/// Channels `0..n` exist on the platform; the rest stay off.
pub fn available_slots(platform: Platform) -> usize {
    match platform {
        Platform::Tie => 15,
        Platform::Xvt => SLOT_COUNT,
        Platform::Xwa => 12,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleState {
    platform: Platform,
    channels: [bool; SLOT_COUNT],
    pub show_tags: bool,
    pub show_traces: bool,
    region: u8,
    order: u8,
}

impl ToggleState {
    /// All channels off.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            channels: [false; SLOT_COUNT],
            show_tags: false,
            show_traces: false,
            region: 0,
            order: 0,
        }
    }

    /// Seed channels from a bitmask (bit `i` = slot `i`). Bits for channels
    /// the platform lacks are ignored.
    pub fn from_mask(platform: Platform, mask: u32, show_tags: bool, show_traces: bool) -> Self {
        let mut state = Self::new(platform);
        for slot in 0..available_slots(platform) {
            state.channels[slot] = mask & (1 << slot) != 0;
        }
        state.show_tags = show_tags;
        state.show_traces = show_traces;
        state
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn channel(&self, slot: usize) -> bool {
        self.channels[slot]
    }

    pub fn mask(&self) -> u32 {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0, |mask, (slot, _)| mask | 1 << slot)
    }

    /// Switch a channel. Turning on [`BRIEFING_ALL`] turns off every lower
    /// channel; the reverse never happens. Unavailable channels stay off.
    pub fn set_channel(&mut self, slot: usize, on: bool) {
        assert!(slot < SLOT_COUNT, "slot {slot} out of range");
        if on && !CHANNELS[slot].is_available(self.platform) {
            return;
        }
        self.channels[slot] = on;
        if slot == BRIEFING_ALL && on {
            self.channels[..BRIEFING_ALL].fill(false);
        }
    }

    /// Selected region, 0-based.
    pub fn region(&self) -> u8 {
        self.region
    }

    /// Selected order, 0-based.
    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn set_region(&mut self, region: i32) {
        self.region = region.clamp(0, REGIONS as i32 - 1) as u8;
    }

    pub fn set_order(&mut self, order: i32) {
        self.order = order.clamp(0, ORDERS as i32 - 1) as u8;
    }

    /// Waypoint group shown for slots 4-11 on the region/order schema.
    pub fn selected_cell(&self) -> usize {
        self.region as usize * ORDERS + self.order as usize + 1
    }
}
