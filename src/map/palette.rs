//! # Craft Icon Palette
//!
//! Turns greyscale craft sprites into IFF-tinted icons.
//!
//! ## Tinting
//! Each channel becomes `intensity * tint / 255` (truncating), so the
//! sprite's brightness modulates the IFF colour. Pixels that end up black
//! are made transparent afterwards.
//!
//! ## Pixel order
//! Sprites are normalized to RGB when they are ingested. Raw buffers
//! stored blue-first are swapped via [`PixelOrder::Bgr`] before any tint is
//! applied.

use super::error::MapError;
use crate::mission::{Craft, Platform};
use image::{Rgb, Rgba, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Edge length of a craft icon in pixels.
pub const ICON_SIZE: u32 = 16;

/// IFF tint for a craft. Classifications 3 and 5 differ on TIE. Panics on
/// an IFF above 5.
///
/// # Colors
/// - 0: Lime green
/// - 1: Crimson
/// - 2: Royal blue
/// - 3: Dark orchid (TIE), yellow otherwise
/// - 4: Red
/// - 5: Fuchsia (TIE), dark orchid otherwise
pub fn iff_color(iff: u8, platform: Platform) -> Rgb<u8> {
    const LIME_GREEN: Rgb<u8> = Rgb([50, 205, 50]);
    const CRIMSON: Rgb<u8> = Rgb([220, 20, 60]);
    const ROYAL_BLUE: Rgb<u8> = Rgb([65, 105, 225]);
    const DARK_ORCHID: Rgb<u8> = Rgb([153, 50, 204]);
    const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const FUCHSIA: Rgb<u8> = Rgb([255, 0, 255]);

    let tie = platform == Platform::Tie;
    match iff {
        0 => LIME_GREEN,
        1 => CRIMSON,
        2 => ROYAL_BLUE,
        3 if tie => DARK_ORCHID,
        3 => YELLOW,
        4 => RED,
        5 if tie => FUCHSIA,
        5 => DARK_ORCHID,
        _ => unreachable!("IFF {iff} out of range"),
    }
}

/// Byte order of a raw 24-bit sprite buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelOrder {
    Rgb,
    Bgr,
}

/// Build an opaque sprite from packed 3-byte pixels.
pub fn sprite_from_raw(width: u32, height: u32, data: &[u8], order: PixelOrder) -> RgbaImage {
    assert_eq!(data.len(), (width * height * 3) as usize, "sprite buffer size");
    let mut sprite = RgbaImage::new(width, height);
    for (pixel, bytes) in sprite.pixels_mut().zip(data.chunks_exact(3)) {
        *pixel = match order {
            PixelOrder::Rgb => Rgba([bytes[0], bytes[1], bytes[2], 255]),
            PixelOrder::Bgr => Rgba([bytes[2], bytes[1], bytes[0], 255]),
        };
    }
    sprite
}

fn tint_channel(intensity: u8, tint: u8) -> u8 {
    (intensity as u16 * tint as u16 / 255) as u8
}

/// Tint a sprite. Already transparent pixels stay transparent; pixels that
/// come out black become transparent.
pub fn colorize(sprite: &RgbaImage, tint: Rgb<u8>) -> RgbaImage {
    let mut icon = RgbaImage::new(sprite.width(), sprite.height());
    for (src, dst) in sprite.pixels().zip(icon.pixels_mut()) {
        let [r, g, b, a] = src.0;
        if a == 0 {
            *dst = Rgba([0, 0, 0, 0]);
            continue;
        }
        let tinted = [
            tint_channel(r, tint[0]),
            tint_channel(g, tint[1]),
            tint_channel(b, tint[2]),
        ];
        *dst = if tinted == [0, 0, 0] {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([tinted[0], tinted[1], tinted[2], 255])
        };
    }
    icon
}

/// Greyscale craft sprites indexed by craft type.
pub trait SpriteAtlas {
    fn sprite_for(&self, craft_type: usize) -> Option<&RgbaImage>;
}

/// Sprites cut from a horizontal strip of square tiles.
pub struct StripAtlas {
    sprites: Vec<RgbaImage>,
}

impl StripAtlas {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let strip = image::open(path)
            .map_err(|source| MapError::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let atlas = Self::from_strip(&strip)?;
        log::info!("Loaded {} craft sprites from {}", atlas.sprites.len(), path.display());
        Ok(atlas)
    }

    pub fn from_strip(strip: &RgbaImage) -> Result<Self, MapError> {
        let (width, height) = strip.dimensions();
        if height == 0 || width % height != 0 {
            return Err(MapError::InvalidAtlas { width, height });
        }
        let sprites = (0..width / height)
            .map(|i| image::imageops::crop_imm(strip, i * height, 0, height, height).to_image())
            .collect();
        Ok(Self { sprites })
    }

    pub fn from_sprites(sprites: Vec<RgbaImage>) -> Self {
        Self { sprites }
    }
}

impl SpriteAtlas for StripAtlas {
    fn sprite_for(&self, craft_type: usize) -> Option<&RgbaImage> {
        self.sprites.get(craft_type)
    }
}

/// Identifies one colourised icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub craft_type: usize,
    pub tint: [u8; 3],
}

/// Colourised icons, built on first use and kept for the session.
pub struct CraftIconPalette {
    platform: Platform,
    atlas: Box<dyn SpriteAtlas>,
    icons: HashMap<IconKey, RgbaImage>,
    missing: HashSet<usize>,
}

impl CraftIconPalette {
    pub fn new(platform: Platform, atlas: Box<dyn SpriteAtlas>) -> Self {
        Self {
            platform,
            atlas,
            icons: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    pub fn tint_for(&self, craft: &Craft) -> Rgb<u8> {
        iff_color(craft.iff, self.platform)
    }

    /// Key of the craft's icon, colourising it on first request. `None` if
    /// the atlas has no sprite for the craft type.
    pub fn icon_for(&mut self, craft: &Craft) -> Option<IconKey> {
        let key = IconKey {
            craft_type: craft.craft_type,
            tint: self.tint_for(craft).0,
        };
        if self.icons.contains_key(&key) {
            return Some(key);
        }
        let Some(sprite) = self.atlas.sprite_for(craft.craft_type) else {
            if self.missing.insert(craft.craft_type) {
                log::warn!("No sprite for craft type {} ({})", craft.craft_type, craft.name);
            }
            return None;
        };
        self.icons.insert(key, colorize(sprite, Rgb(key.tint)));
        Some(key)
    }

    pub fn icon(&self, key: &IconKey) -> Option<&RgbaImage> {
        self.icons.get(key)
    }
}
