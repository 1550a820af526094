//! # Waypoint Map Module
//!
//! Interactive 2-D map of mission craft and their waypoints.
//!
//! ## Submodules
//! - [`world_view`]: Zoom, pan and projection-plane state
//! - [`coordinate_transform`]: World/screen conversion
//! - [`toggles`]: Visibility channels and display switches
//! - [`addressing`]: Uniform slot numbering over every waypoint layout
//! - [`palette`]: IFF-tinted craft icons
//! - [`renderer`]: Composes frames from the above
//! - [`interaction`]: Pointer selection and drag commits
//! - [`frame_painter`]: Replays frames onto an egui painter
//! - [`style`]: Colours and font size
//! - [`error`]: Failure types
//!
//! ## Usage
//! ```ignore
//! let mut map = MapEditor::new(&settings, crafts)?;
//! map.show(ui);
//! ```

pub mod addressing;
pub mod coordinate_transform;
pub mod error;
pub mod frame_painter;
pub mod interaction;
pub mod palette;
pub mod renderer;
pub mod style;
pub mod toggles;
pub mod world_view;

use crate::history::UndoStack;
use crate::mission::Craft;
use crate::settings::MapSettings;
use addressing::WaypointAddressing;
use coordinate_transform::{Plane, ScreenPoint};
use egui::{Stroke, TextureHandle};
use error::MapError;
use interaction::{InteractionController, PointerButton};
use palette::{CraftIconPalette, IconKey, SpriteAtlas, StripAtlas, ICON_SIZE};
use renderer::{Frame, MapRenderer, RenderMode, Scene};
use std::collections::HashMap;
use style::MapStyle;
use toggles::ToggleState;
use world_view::WorldView;

const BUTTONS: [(egui::PointerButton, PointerButton); 3] = [
    (egui::PointerButton::Primary, PointerButton::Primary),
    (egui::PointerButton::Secondary, PointerButton::Secondary),
    (egui::PointerButton::Middle, PointerButton::Tertiary),
];

/// Initial viewport until the widget is first laid out.
const INITIAL_SIZE: (i32, i32) = (800, 600);

/// The map widget. Owns the craft collection and all view state for the
/// session.
pub struct MapEditor {
    view: WorldView,
    toggles: ToggleState,
    addressing: WaypointAddressing,
    palette: CraftIconPalette,
    renderer: MapRenderer,
    controller: InteractionController,
    history: UndoStack,
    pub style: MapStyle,
    textures: HashMap<IconKey, TextureHandle>,
    pending: Option<RenderMode>,
    cursor: Option<ScreenPoint>,
    had_focus: bool,
}

impl MapEditor {
    /// Load the sprite atlas named by the settings and build the map.
    /// Nothing is constructed if the atlas cannot be loaded.
    pub fn new(settings: &MapSettings, crafts: Vec<Craft>) -> Result<Self, MapError> {
        let atlas = StripAtlas::load(settings.atlas_path())?;
        Ok(Self::with_atlas(settings, crafts, Box::new(atlas)))
    }

    pub fn with_atlas(settings: &MapSettings, crafts: Vec<Craft>, atlas: Box<dyn SpriteAtlas>) -> Self {
        let platform = settings.platform;
        let (width, height) = INITIAL_SIZE;
        log::info!("Map opened for {} with {} craft", platform.name(), crafts.len());
        Self {
            view: WorldView::new(width, height),
            toggles: ToggleState::from_mask(platform, settings.waypoints, settings.show_tags, settings.show_traces),
            addressing: WaypointAddressing::new(platform, crafts),
            palette: CraftIconPalette::new(platform, atlas),
            renderer: MapRenderer::new(width, height),
            controller: InteractionController::new(),
            history: UndoStack::new(settings.history_max_records),
            style: settings.style.clone(),
            textures: HashMap::new(),
            pending: Some(RenderMode::Persistent),
            cursor: None,
            had_focus: true,
        }
    }

    pub fn view(&self) -> &WorldView {
        &self.view
    }

    pub fn toggles(&self) -> &ToggleState {
        &self.toggles
    }

    pub fn crafts(&self) -> &[Craft] {
        self.addressing.crafts()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Queue a redraw. A persistent request is never downgraded.
    pub fn request_redraw(&mut self, mode: RenderMode) {
        self.pending = match (self.pending, mode) {
            (Some(RenderMode::Persistent), _) | (_, RenderMode::Persistent) => Some(RenderMode::Persistent),
            _ => Some(RenderMode::Transient),
        };
    }

    pub fn pending_redraw(&self) -> Option<RenderMode> {
        self.pending
    }

    fn request(&mut self, mode: Option<RenderMode>) {
        if let Some(mode) = mode {
            self.request_redraw(mode);
        }
    }

    pub fn set_plane(&mut self, plane: Plane) {
        if self.view.switch_plane(plane) {
            self.request_redraw(RenderMode::Transient);
        }
    }

    pub fn set_zoom(&mut self, zoom: i32) {
        if zoom != self.view.zoom() {
            self.view.set_zoom(zoom);
            self.request_redraw(RenderMode::Persistent);
        }
    }

    pub fn set_channel(&mut self, slot: usize, on: bool) {
        self.toggles.set_channel(slot, on);
        self.request_redraw(RenderMode::Persistent);
    }

    pub fn set_show_tags(&mut self, on: bool) {
        self.toggles.show_tags = on;
        self.request_redraw(RenderMode::Persistent);
    }

    pub fn set_show_traces(&mut self, on: bool) {
        self.toggles.show_traces = on;
        self.request_redraw(RenderMode::Persistent);
    }

    /// 0-based; clamped to the available regions.
    pub fn set_region(&mut self, region: i32) {
        self.toggles.set_region(region);
        self.request_redraw(RenderMode::Persistent);
    }

    /// 0-based; clamped to the available orders.
    pub fn set_order(&mut self, order: i32) {
        self.toggles.set_order(order);
        self.request_redraw(RenderMode::Persistent);
    }

    pub fn pointer_down(&mut self, button: PointerButton, pos: ScreenPoint) {
        let redraw = self
            .controller
            .pointer_down(button, pos, &mut self.view, &self.toggles, &self.addressing);
        self.request(redraw);
    }

    pub fn pointer_move(&mut self, pos: ScreenPoint) {
        self.controller.pointer_move(pos);
    }

    pub fn pointer_up(&mut self, button: PointerButton, pos: ScreenPoint) {
        let redraw = self
            .controller
            .pointer_up(button, pos, &self.view, &mut self.addressing, &mut self.history);
        self.request(redraw);
    }

    pub fn focus_lost(&mut self) {
        let redraw = self.controller.focus_lost(&self.view, &mut self.addressing, &mut self.history);
        self.request(redraw);
    }

    /// Revert the last committed move. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.undo() else {
            return false;
        };
        self.addressing.set_coordinate(record.handle, record.before);
        log::info!("Undo move of {:?}", record.handle);
        self.request_redraw(RenderMode::Persistent);
        true
    }

    /// Re-apply the last undone move. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.redo() else {
            return false;
        };
        self.addressing.set_coordinate(record.handle, record.after);
        log::info!("Redo move of {:?}", record.handle);
        self.request_redraw(RenderMode::Persistent);
        true
    }

    /// Pointer position in klicks with per-plane axis labels, e.g.
    /// `("X: 1.25", "Y: -3")`.
    pub fn cursor_readout(&self) -> Option<(String, String)> {
        let (h, v) = self.view.cursor_klicks(self.cursor?);
        let (h_label, v_label) = self.view.plane().axis_labels();
        Some((format!("{h_label} {h}"), format!("{v_label} {v}")))
    }

    /// Lay out, handle input, and paint the map into all available space.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let canvas_offset = rect.min;

        if self.view.resize(rect.width() as i32, rect.height() as i32) {
            self.request_redraw(RenderMode::Persistent);
        }

        let mut input_pressed = Vec::new();
        let mut input_released = Vec::new();
        let mut input_scroll = 0.0;
        let mut input_focused = true;
        let mut input_pointer = None;

        ui.input(|i| {
            input_pointer = i.pointer.latest_pos();
            for (egui_button, button) in BUTTONS {
                if i.pointer.button_pressed(egui_button) {
                    input_pressed.push(button);
                }
                if i.pointer.button_released(egui_button) {
                    input_released.push(button);
                }
            }
            input_scroll = i.raw_scroll_delta.y;
            input_focused = i.focused;
        });

        let hovered = input_pointer.is_some_and(|p| rect.contains(p));
        let pointer = input_pointer.map(|p| {
            let local = p - canvas_offset;
            ScreenPoint::new(local.x.round() as i32, local.y.round() as i32)
        });
        self.cursor = pointer.filter(|_| hovered);

        if let Some(pos) = pointer {
            self.pointer_move(pos);
            if hovered {
                for button in input_pressed {
                    self.pointer_down(button, pos);
                }
            }
            // Released buttons count wherever the pointer is, so a drag
            // that leaves the canvas still commits.
            for button in input_released {
                self.pointer_up(button, pos);
            }
        }

        if response.double_clicked() && self.view.zoom_in() {
            self.request_redraw(RenderMode::Persistent);
        }
        if hovered && input_scroll != 0.0 {
            self.view.wheel(input_scroll.signum() as i32);
            self.request_redraw(RenderMode::Persistent);
        }

        if self.had_focus && !input_focused {
            self.focus_lost();
        } else if !self.had_focus && input_focused {
            self.request_redraw(RenderMode::Persistent);
        }
        self.had_focus = input_focused;

        self.paint(ui.ctx(), &painter, canvas_offset);
    }

    fn paint(&mut self, ctx: &egui::Context, painter: &egui::Painter, canvas_offset: egui::Pos2) {
        let pending = self.pending.take();
        let Self {
            view,
            toggles,
            addressing,
            palette,
            renderer,
            controller,
            style,
            textures,
            cursor,
            ..
        } = self;

        let mut scene = Scene {
            view: &*view,
            toggles: &*toggles,
            addressing: &*addressing,
            palette: &mut *palette,
            style: &*style,
        };
        let transient: Frame;
        let frame = match pending {
            Some(RenderMode::Transient) => {
                transient = renderer.render_transient(&mut scene);
                &transient
            }
            Some(RenderMode::Persistent) => renderer.render_persistent(&mut scene),
            None if renderer.is_stale() => renderer.render_persistent(&mut scene),
            None => renderer.frame(),
        };

        frame_painter::upload_icons(ctx, frame, palette, textures);
        frame_painter::paint_frame(painter, frame, canvas_offset, textures, style.font_size);

        if let Some(pos) = cursor.filter(|_| controller.is_dragging()) {
            let half = ICON_SIZE as f32 / 2.0;
            painter.circle_stroke(pos.to_pos2(canvas_offset), half, Stroke::new(1.0, style.tag));
        }
    }
}
