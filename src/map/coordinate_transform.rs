//! Coordinate transformation utilities for the map.
//!
//! Handles conversions between raw world coordinates and screen pixels
//! for the three orthographic planes. Screen Y grows downward while world
//! Y/Z grow upward, so the vertical axis is inverted.

use crate::mission::{Axis, Coordinate3, RAW_PER_KLICK};
use serde::{Deserialize, Serialize};

/// Integer screen position in pixels, relative to the map's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn to_pos2(self, canvas_offset: egui::Pos2) -> egui::Pos2 {
        canvas_offset + egui::vec2(self.x as f32, self.y as f32)
    }
}

/// Orthographic projection plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    /// Top view.
    #[default]
    XY,
    /// Front view.
    XZ,
    /// Side view.
    YZ,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// World axis drawn along screen X.
    pub fn horizontal(self) -> Axis {
        match self {
            Plane::XY | Plane::XZ => Axis::X,
            Plane::YZ => Axis::Y,
        }
    }

    /// World axis drawn along screen Y (inverted).
    pub fn vertical(self) -> Axis {
        match self {
            Plane::XY => Axis::Y,
            Plane::XZ | Plane::YZ => Axis::Z,
        }
    }

    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Plane::XY => ("X:", "Y:"),
            Plane::XZ => ("X:", "Z:"),
            Plane::YZ => ("Y:", "Z:"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Plane::XY => "Top (XY)",
            Plane::XZ => "Front (XZ)",
            Plane::YZ => "Side (YZ)",
        }
    }
}

/// Screen position of a single raw world value along one axis.
///
/// # Arguments
/// * `raw` - World value in raw units
/// * `origin` - Screen pixel where world 0 sits on this axis
/// * `zoom` - Pixels per klick
/// * `inverted` - `true` for the vertical axis
pub fn axis_to_screen(raw: i16, origin: i32, zoom: i32, inverted: bool) -> i32 {
    let scaled = if inverted { -zoom * raw as i32 } else { zoom * raw as i32 };
    scaled / RAW_PER_KLICK + origin
}

/// Raw world value at a screen pixel along one axis. Truncates toward zero.
pub fn axis_from_screen(pixel: i32, origin: i32, zoom: i32, inverted: bool) -> i16 {
    let delta = if inverted { origin - pixel } else { pixel - origin };
    (delta as f64 / zoom as f64 * RAW_PER_KLICK as f64) as i16
}

/// Convert a world coordinate to screen coordinates.
///
/// # Arguments
/// * `pos` - Position in raw world units
/// * `plane` - Active projection
/// * `origin` - Screen position of the world origin for the plane's two axes
/// * `zoom` - Pixels per klick
pub fn to_screen(pos: Coordinate3, plane: Plane, origin: ScreenPoint, zoom: i32) -> ScreenPoint {
    ScreenPoint::new(
        axis_to_screen(pos.axis(plane.horizontal()), origin.x, zoom, false),
        axis_to_screen(pos.axis(plane.vertical()), origin.y, zoom, true),
    )
}

/// Convert a screen position back to world coordinates.
///
/// Only the two in-plane axes are written; the out-of-plane axis of `base`
/// is returned unchanged.
pub fn from_screen(
    screen_pos: ScreenPoint,
    plane: Plane,
    origin: ScreenPoint,
    zoom: i32,
    base: Coordinate3,
) -> Coordinate3 {
    let mut pos = base;
    pos.set_axis(plane.horizontal(), axis_from_screen(screen_pos.x, origin.x, zoom, false));
    pos.set_axis(plane.vertical(), axis_from_screen(screen_pos.y, origin.y, zoom, true));
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn vertical_axis_is_inverted() {
        let origin = ScreenPoint::new(400, 300);
        let p = to_screen(Coordinate3::from_klicks(10, 20, 0), Plane::XY, origin, 40);
        assert_eq!(p, ScreenPoint::new(800, -500));
    }

    #[test]
    fn plane_selects_axes() {
        let pos = Coordinate3::from_klicks(1, 2, 3);
        let origin = ScreenPoint::new(0, 0);
        assert_eq!(to_screen(pos, Plane::XZ, origin, 10), ScreenPoint::new(10, -30));
        assert_eq!(to_screen(pos, Plane::YZ, origin, 10), ScreenPoint::new(20, -30));
    }

    #[test]
    fn out_of_plane_axis_is_untouched() {
        let base = Coordinate3::new(11, 22, 33);
        let pos = from_screen(ScreenPoint::new(50, 50), Plane::YZ, ScreenPoint::new(0, 100), 10, base);
        assert_eq!(pos.x, 11);
        assert_eq!(pos.y, 800);
        assert_eq!(pos.z, 800);
    }

    #[test]
    fn klick_aligned_points_round_trip_exactly() {
        let origin = ScreenPoint::new(317, 211);
        for zoom in [5, 7, 40, 123, 500] {
            for plane in Plane::ALL {
                for (a, b) in [(0, 0), (-150, 150), (17, -3), (150, -150)] {
                    let mut world = Coordinate3::default();
                    world.set_axis(plane.horizontal(), (a * RAW_PER_KLICK) as i16);
                    world.set_axis(plane.vertical(), (b * RAW_PER_KLICK) as i16);
                    let screen = to_screen(world, plane, origin, zoom);
                    assert_eq!(from_screen(screen, plane, origin, zoom, world), world);
                }
            }
        }
    }

    #[test]
    fn arbitrary_points_round_trip_within_one_pixel() {
        let origin = ScreenPoint::new(400, 300);
        for zoom in [5, 40, 333, 500] {
            let tolerance = RAW_PER_KLICK / zoom + 1;
            for raw in [-24000i16, -1601, -1, 0, 1, 79, 161, 12345, 24000] {
                let world = Coordinate3::new(raw, raw / 2, 0);
                let screen = to_screen(world, Plane::XY, origin, zoom);
                let back = from_screen(screen, Plane::XY, origin, zoom, world);
                assert!((back.x as i32 - world.x as i32).abs() <= tolerance, "x at zoom {zoom}, raw {raw}");
                assert!((back.y as i32 - world.y as i32).abs() <= tolerance, "y at zoom {zoom}, raw {raw}");
            }
        }
    }
}
