//! # World View
//!
//! Zoom, pan and projection-plane state for the map, plus every
//! operation that changes them.
//!
//! Each world axis keeps its own screen origin (the pixel where world 0
//! sits). The active [`Plane`] picks which two origins are in use. Origins
//! are clamped after every change so that world ±150 klicks stays
//! reachable: `origin / zoom <= 150` and `(origin - extent) / zoom >= -150`,
//! using truncating integer division.

use super::coordinate_transform::{self, Plane, ScreenPoint};
use crate::mission::{Axis, Coordinate3};

pub const MIN_ZOOM: i32 = 5;
pub const MAX_ZOOM: i32 = 500;
pub const DEFAULT_ZOOM: i32 = 40;
/// Furthest world coordinate, in klicks, that panning must keep reachable.
pub const WORLD_LIMIT: i32 = 150;
/// Zoom change per mouse-wheel notch.
pub const WHEEL_STEP: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisOrigins {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AxisOrigins {
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorldView {
    zoom: i32,
    origins: AxisOrigins,
    plane: Plane,
    width: i32,
    height: i32,
}

impl WorldView {
    /// A view of the given viewport size, centred on the world origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            origins: AxisOrigins {
                x: width / 2,
                y: height / 2,
                z: height / 2,
            },
            plane: Plane::XY,
            width,
            height,
        }
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn origins(&self) -> AxisOrigins {
        self.origins
    }

    /// Screen position of the world origin in the active plane.
    pub fn screen_origin(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.origins.get(self.plane.horizontal()),
            self.origins.get(self.plane.vertical()),
        )
    }

    pub fn project(&self, pos: Coordinate3) -> ScreenPoint {
        coordinate_transform::to_screen(pos, self.plane, self.screen_origin(), self.zoom)
    }

    /// Inverse of [`project`](Self::project) for the two in-plane axes; the
    /// remaining axis is taken from `base`.
    pub fn unproject(&self, screen: ScreenPoint, base: Coordinate3) -> Coordinate3 {
        coordinate_transform::from_screen(screen, self.plane, self.screen_origin(), self.zoom, base)
    }

    /// World position, in klicks, under the centre of the viewport.
    pub fn center_coord(&self) -> (f64, f64) {
        let zoom = self.zoom as f64;
        let origin = self.screen_origin();
        (
            (self.width / 2 - origin.x) as f64 / zoom,
            (origin.y - self.height / 2) as f64 / zoom,
        )
    }

    /// Pointer position in klicks for the coordinate readout, rounded to
    /// two decimals.
    pub fn cursor_klicks(&self, screen: ScreenPoint) -> (f64, f64) {
        let zoom = self.zoom as f64;
        let origin = self.screen_origin();
        let round = |v: f64| (v * 100.0).round() / 100.0;
        (
            round((screen.x - origin.x) as f64 / zoom),
            round((origin.y - screen.y) as f64 / zoom),
        )
    }

    /// Move the view so that `center` (klicks) sits in the middle of the viewport.
    pub fn recenter(&mut self, center: (f64, f64)) {
        let zoom = self.zoom as f64;
        let h = (self.width / 2) as f64 - center.0 * zoom;
        let v = (self.height / 2) as f64 + center.1 * zoom;
        *self.origins.get_mut(self.plane.horizontal()) = h.round_ties_even() as i32;
        *self.origins.get_mut(self.plane.vertical()) = v.round_ties_even() as i32;
        self.clamp_origins();
    }

    /// Centre the view on a screen position.
    pub fn recenter_on(&mut self, screen: ScreenPoint) {
        self.pan(self.width / 2 - screen.x, self.height / 2 - screen.y);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        *self.origins.get_mut(self.plane.horizontal()) += dx;
        *self.origins.get_mut(self.plane.vertical()) += dy;
        self.clamp_origins();
    }

    /// Set the zoom, keeping the world point under the viewport centre fixed.
    pub fn set_zoom(&mut self, zoom: i32) {
        let center = self.center_coord();
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom != self.zoom {
            log::debug!("Zoom {} -> {}", self.zoom, zoom);
        }
        self.zoom = zoom;
        self.recenter(center);
    }

    /// Apply one mouse-wheel notch in the direction of `delta`.
    pub fn wheel(&mut self, delta: i32) {
        let zoom = if self.zoom < MIN_ZOOM + WHEEL_STEP && delta < 0 {
            MIN_ZOOM
        } else if self.zoom > MAX_ZOOM - WHEEL_STEP && delta > 0 {
            MAX_ZOOM
        } else {
            self.zoom + WHEEL_STEP * delta.signum()
        };
        self.set_zoom(zoom);
    }

    /// Double the zoom, capped at [`MAX_ZOOM`]. Returns `false` at the cap.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom == MAX_ZOOM {
            return false;
        }
        self.set_zoom(if self.zoom < MAX_ZOOM / 2 { self.zoom * 2 } else { MAX_ZOOM });
        true
    }

    /// Switch projection. Moving into or out of the side view moves the Y
    /// axis between screen rows and columns, so its origin is mirrored
    /// across the viewport centre to keep the same Y value centred.
    pub fn switch_plane(&mut self, plane: Plane) -> bool {
        if plane == self.plane {
            return false;
        }
        if plane == Plane::YZ || self.plane == Plane::YZ {
            self.origins.y = self.width / 2 + self.height / 2 - self.origins.y;
        }
        log::debug!("Plane {:?} -> {:?}", self.plane, plane);
        self.plane = plane;
        self.clamp_origins();
        true
    }

    /// Resize the viewport, keeping the centred world point. Returns `true`
    /// if the size changed.
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        let center = self.center_coord();
        self.width = width;
        self.height = height;
        self.recenter(center);
        true
    }

    /// Put the world origin in the middle of the viewport at the default zoom.
    pub fn reset(&mut self) {
        self.origins = AxisOrigins {
            x: self.width / 2,
            y: self.height / 2,
            z: self.height / 2,
        };
        self.set_zoom(DEFAULT_ZOOM);
    }

    /// Screen extent along which `axis` is currently laid out. Axes outside
    /// the active plane keep their home extent (X across, Y and Z down).
    fn extent(&self, axis: Axis) -> i32 {
        if axis == self.plane.horizontal() {
            self.width
        } else if axis == self.plane.vertical() {
            self.height
        } else if axis == Axis::X {
            self.width
        } else {
            self.height
        }
    }

    fn clamp_origins(&mut self) {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let extent = self.extent(axis);
            let origin = self.origins.get_mut(axis);
            *origin = clamp_origin(*origin, extent, self.zoom);
        }
    }
}

/// Clamp one axis origin. When the whole ±150 klick range fits inside the
/// viewport both bounds cannot hold at once, and the origin is centred.
pub fn clamp_origin(origin: i32, extent: i32, zoom: i32) -> i32 {
    if extent > 2 * WORLD_LIMIT * zoom {
        return extent / 2;
    }
    let mut origin = origin;
    if origin / zoom > WORLD_LIMIT {
        origin = WORLD_LIMIT * zoom;
    }
    if (origin - extent) / zoom < -WORLD_LIMIT {
        origin = -WORLD_LIMIT * zoom + extent;
    }
    origin
}
