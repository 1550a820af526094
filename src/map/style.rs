//! Map styling.
//!
//! Colours for everything the map draws except craft icons, whose tint is
//! fixed by IFF.

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Visual styling configuration for the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub background: Color32,
    /// Minor and major grid lines.
    pub grid: Color32,
    /// Cross-hairs through the world origin.
    pub origin: Color32,
    pub trace: Color32,
    pub tag: Color32,
    pub font_size: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: Color32::BLACK,
            grid: Color32::from_rgb(139, 0, 0),
            origin: Color32::RED,
            trace: Color32::from_rgb(128, 128, 128),
            tag: Color32::from_rgb(105, 105, 105),
            font_size: 11.0,
        }
    }
}
