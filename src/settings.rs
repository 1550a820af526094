use crate::map::style::MapStyle;
use crate::mission::Platform;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "map_settings.json";

/// Start point 1 plus waypoints 1-8.
const DEFAULT_WAYPOINTS: u32 = 0b1111_1111_0001;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub platform: Platform,
    /// Craft sprite strip. Defaults to `images/craft_<platform>.png`.
    pub atlas_path: Option<PathBuf>,
    /// Initial channels, bit `i` = slot `i`.
    pub waypoints: u32,
    pub show_tags: bool,
    pub show_traces: bool,
    pub history_max_records: usize,
    pub style: MapStyle,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            atlas_path: None,
            waypoints: DEFAULT_WAYPOINTS,
            show_tags: true,
            show_traces: true,
            history_max_records: 1000,
            style: MapStyle::default(),
        }
    }
}

impl MapSettings {
    /// Read [`SETTINGS_FILE`] from the working directory. A missing file
    /// yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn atlas_path(&self) -> PathBuf {
        self.atlas_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("images/craft_{}.png", self.platform.name())))
    }
}
