//! # Interaction Controller
//!
//! Turns pointer events into view changes and waypoint moves.
//!
//! - Primary down picks the first visible waypoint within
//!   [`HIT_TOLERANCE`] pixels (craft order, then slot order) and starts
//!   dragging it
//! - Primary up while dragging moves that waypoint to the release point;
//!   the out-of-plane axis is kept
//! - Secondary down centres the view on the pointer
//! - Tertiary down resets the view
//! - Losing focus mid-drag commits at the last known pointer position

use super::addressing::{WaypointAddressing, WaypointHandle};
use super::coordinate_transform::ScreenPoint;
use super::renderer::RenderMode;
use super::toggles::{ToggleState, SLOT_COUNT};
use super::world_view::WorldView;
use crate::history::{UndoStack, WaypointMove};

/// Largest distance, per axis, at which a click still hits a waypoint.
pub const HIT_TOLERANCE: i32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Select and drag.
    Primary,
    /// Centre on pointer.
    Secondary,
    /// Reset view.
    Tertiary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        craft: usize,
        slot: usize,
        handle: WaypointHandle,
    },
}

/// A waypoint under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub craft: usize,
    pub slot: usize,
    pub handle: WaypointHandle,
}

/// First visible waypoint whose projected point lies within
/// [`HIT_TOLERANCE`] of `pos` on both axes.
pub fn hit_test(
    pos: ScreenPoint,
    view: &WorldView,
    toggles: &ToggleState,
    addressing: &WaypointAddressing,
) -> Option<Hit> {
    (0..addressing.crafts().len()).find_map(|craft| {
        (0..SLOT_COUNT).find_map(|slot| {
            let (handle, waypoint) = addressing.visible_waypoint(craft, slot, toggles)?;
            let p = view.project(waypoint.position);
            let near = (p.x - pos.x).abs() <= HIT_TOLERANCE && (p.y - pos.y).abs() <= HIT_TOLERANCE;
            near.then_some(Hit { craft, slot, handle })
        })
    })
}

#[derive(Default)]
pub struct InteractionController {
    drag: DragState,
    last_pointer: Option<ScreenPoint>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Returns the kind of redraw the event calls for, if any.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        pos: ScreenPoint,
        view: &mut WorldView,
        toggles: &ToggleState,
        addressing: &WaypointAddressing,
    ) -> Option<RenderMode> {
        self.last_pointer = Some(pos);
        match button {
            PointerButton::Secondary => {
                view.recenter_on(pos);
                Some(RenderMode::Transient)
            }
            PointerButton::Tertiary => {
                view.reset();
                Some(RenderMode::Transient)
            }
            PointerButton::Primary => {
                self.drag = match hit_test(pos, view, toggles, addressing) {
                    Some(Hit { craft, slot, handle }) => {
                        log::debug!("Dragging craft {craft} slot {slot}");
                        DragState::Dragging { craft, slot, handle }
                    }
                    None => DragState::Idle,
                };
                None
            }
        }
    }

    /// Pointer moves never change data; the position is kept for a
    /// focus-loss commit.
    pub fn pointer_move(&mut self, pos: ScreenPoint) {
        self.last_pointer = Some(pos);
    }

    pub fn pointer_up(
        &mut self,
        button: PointerButton,
        pos: ScreenPoint,
        view: &WorldView,
        addressing: &mut WaypointAddressing,
        history: &mut UndoStack,
    ) -> Option<RenderMode> {
        self.last_pointer = Some(pos);
        if button != PointerButton::Primary {
            return None;
        }
        self.commit(pos, view, addressing, history)
    }

    /// Window focus went away. A drag in progress is committed at the last
    /// known pointer position.
    pub fn focus_lost(
        &mut self,
        view: &WorldView,
        addressing: &mut WaypointAddressing,
        history: &mut UndoStack,
    ) -> Option<RenderMode> {
        match self.last_pointer {
            Some(pos) => self.commit(pos, view, addressing, history),
            None => {
                self.drag = DragState::Idle;
                None
            }
        }
    }

    fn commit(
        &mut self,
        pos: ScreenPoint,
        view: &WorldView,
        addressing: &mut WaypointAddressing,
        history: &mut UndoStack,
    ) -> Option<RenderMode> {
        let DragState::Dragging { craft, slot, handle } = std::mem::take(&mut self.drag) else {
            return None;
        };
        let before = addressing.waypoint(handle).position;
        let after = view.unproject(pos, before);
        addressing.set_coordinate(handle, after);
        history.push(WaypointMove { handle, before, after });
        log::info!(
            "Moved {} slot {} from {:?} to {:?}",
            addressing.craft(craft).name,
            slot,
            before,
            after
        );
        Some(RenderMode::Persistent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::import::{import_tie, TieFlightGroup, TIE_WAYPOINTS};
    use crate::mission::{Coordinate3, Platform, Waypoint};
    use pretty_assertions::assert_eq;

    struct Session {
        view: WorldView,
        toggles: ToggleState,
        addressing: WaypointAddressing,
        history: UndoStack,
        controller: InteractionController,
    }

    /// One TIE craft with a single enabled start point at (10, 20, 0)
    /// klicks, zoom 40, origin at the centre of an 800x600 viewport.
    fn session() -> Session {
        let mut waypoints = vec![Waypoint::default(); TIE_WAYPOINTS];
        waypoints[0] = Waypoint::new(Coordinate3::from_klicks(10, 20, 0), true);
        let crafts = import_tie(&[TieFlightGroup {
            name: "Red".into(),
            craft_type: 0,
            iff: 0,
            waypoints,
        }]);
        Session {
            view: WorldView::new(800, 600),
            toggles: ToggleState::from_mask(Platform::Tie, 0b1, false, false),
            addressing: WaypointAddressing::new(Platform::Tie, crafts),
            history: UndoStack::default(),
            controller: InteractionController::new(),
        }
    }

    impl Session {
        fn down(&mut self, button: PointerButton, x: i32, y: i32) -> Option<RenderMode> {
            self.controller
                .pointer_down(button, ScreenPoint::new(x, y), &mut self.view, &self.toggles, &self.addressing)
        }

        fn up(&mut self, x: i32, y: i32) -> Option<RenderMode> {
            self.controller.pointer_up(
                PointerButton::Primary,
                ScreenPoint::new(x, y),
                &self.view,
                &mut self.addressing,
                &mut self.history,
            )
        }

        fn start_point(&self) -> Coordinate3 {
            self.addressing.craft(0).groups[0][0].position
        }
    }

    #[test]
    fn drag_moves_start_point_end_to_end() {
        let mut s = session();
        assert_eq!(s.view.project(s.start_point()), ScreenPoint::new(800, -500));
        assert_eq!(s.down(PointerButton::Primary, 800, -500), None);
        assert_eq!(
            s.controller.drag_state(),
            DragState::Dragging {
                craft: 0,
                slot: 0,
                handle: WaypointHandle { craft: 0, group: 0, index: 0 },
            }
        );
        assert_eq!(s.up(760, 340), Some(RenderMode::Persistent));
        // ((760 - 400) / 40, (300 - 340) / 40) klicks
        assert_eq!(s.start_point(), Coordinate3::new(9 * 160, -160, 0));
        assert_eq!(s.controller.drag_state(), DragState::Idle);
        assert_eq!(s.history.history.len(), 1);
    }

    #[test]
    fn hit_tolerance_is_six_pixels() {
        let s = session();
        for (dx, dy) in [(6, 6), (-6, -6), (6, -6), (0, -6), (-6, 0)] {
            let hit = hit_test(ScreenPoint::new(800 + dx, -500 + dy), &s.view, &s.toggles, &s.addressing);
            assert_eq!(hit.map(|h| h.slot), Some(0), "offset ({dx}, {dy})");
        }
        for (dx, dy) in [(7, 0), (-7, 0), (0, 7), (0, -7), (7, 7)] {
            let hit = hit_test(ScreenPoint::new(800 + dx, -500 + dy), &s.view, &s.toggles, &s.addressing);
            assert_eq!(hit, None, "offset ({dx}, {dy})");
        }
    }

    #[test]
    fn hidden_channels_are_not_hit() {
        let mut s = session();
        s.toggles.set_channel(0, false);
        assert_eq!(hit_test(ScreenPoint::new(800, -500), &s.view, &s.toggles, &s.addressing), None);
    }

    #[test]
    fn release_without_drag_changes_nothing() {
        let mut s = session();
        s.down(PointerButton::Primary, 10, 10);
        assert_eq!(s.up(20, 20), None);
        assert_eq!(s.start_point(), Coordinate3::from_klicks(10, 20, 0));
        assert!(s.history.history.is_empty());
    }

    #[test]
    fn out_of_plane_axis_survives_drag() {
        let mut s = session();
        s.addressing.set_coordinate(
            WaypointHandle { craft: 0, group: 0, index: 0 },
            Coordinate3::from_klicks(1, 2, 3),
        );
        s.view.switch_plane(crate::map::coordinate_transform::Plane::XZ);
        let p = s.view.project(s.start_point());
        s.down(PointerButton::Primary, p.x, p.y);
        s.up(p.x + 40, p.y);
        assert_eq!(s.start_point(), Coordinate3::from_klicks(2, 2, 3));
    }

    #[test]
    fn secondary_recentres_and_tertiary_resets() {
        let mut s = session();
        assert_eq!(s.down(PointerButton::Secondary, 480, 300), Some(RenderMode::Transient));
        assert_eq!(s.view.center_coord(), (2.0, 0.0));
        s.view.set_zoom(200);
        assert_eq!(s.down(PointerButton::Tertiary, 0, 0), Some(RenderMode::Transient));
        assert_eq!(s.view.zoom(), 40);
        assert_eq!(s.view.screen_origin(), ScreenPoint::new(400, 300));
    }

    #[test]
    fn focus_loss_commits_at_last_pointer() {
        let mut s = session();
        s.down(PointerButton::Primary, 800, -500);
        s.controller.pointer_move(ScreenPoint::new(440, 300));
        assert_eq!(s.start_point(), Coordinate3::from_klicks(10, 20, 0));
        let redraw = s.controller.focus_lost(&s.view, &mut s.addressing, &mut s.history);
        assert_eq!(redraw, Some(RenderMode::Persistent));
        assert_eq!(s.start_point(), Coordinate3::from_klicks(1, 0, 0));
        assert!(!s.controller.is_dragging());
    }
}
