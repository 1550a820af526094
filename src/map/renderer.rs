//! # Map Renderer
//!
//! Composes a [`Frame`] from the view, the toggles and the craft list.
//!
//! ## Draw order
//! 1. Background
//! 2. Minor grid, one line per klick
//! 3. Major grid, every 5 klicks, thick
//! 4. Origin cross-hairs
//! 5. Craft, in list order; per craft, slots in order
//!
//! ## Slot rules
//! - Start and briefing slots: full icon centred on the point, tag at +8
//! - Waypoint, rendezvous and hyperspace slots: small circle, tag at +4
//! - Waypoints trace back to the nearest visible, enabled predecessor in
//!   their own group (slot 4 may trace to start point 1)
//! - Hyperspace traces, dashed, from the last visible, enabled waypoint

use super::addressing::WaypointAddressing;
use super::coordinate_transform::ScreenPoint;
use super::palette::{CraftIconPalette, IconKey, ICON_SIZE};
use super::style::MapStyle;
use super::toggles::{SlotKind, ToggleState, CHANNELS, SLOT_COUNT};
use super::world_view::WorldView;
use crate::mission::START_POINTS;
use egui::Color32;

/// Grid lines drawn on each side of the origin per axis.
pub const GRID_REPEAT: i32 = 200;
/// Klicks between major grid lines.
pub const MAJOR_EVERY: i32 = 5;
pub const MINOR_WIDTH: f32 = 1.0;
pub const MAJOR_WIDTH: f32 = 3.0;

const ICON_HALF: i32 = ICON_SIZE as i32 / 2;
const ICON_TAG_OFFSET: i32 = 8;
const DOT_TAG_OFFSET: i32 = 4;
const DOT_DIAMETER: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color32,
        width: f32,
        style: LineStyle,
    },
    /// Outlined circle inside the square at `top_left`.
    Circle {
        top_left: ScreenPoint,
        diameter: i32,
        color: Color32,
    },
    Icon {
        top_left: ScreenPoint,
        key: IconKey,
    },
    Text {
        pos: ScreenPoint,
        text: String,
        color: Color32,
    },
}

/// A composed map image, ready to be replayed onto a painter.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub background: Color32,
    pub primitives: Vec<Primitive>,
}

impl Frame {
    fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            background: Color32::BLACK,
            primitives: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Rebuild the retained frame.
    Persistent,
    /// Build a one-off frame; the retained frame goes stale.
    Transient,
}

/// Everything a frame is composed from.
pub struct Scene<'a> {
    pub view: &'a WorldView,
    pub toggles: &'a ToggleState,
    pub addressing: &'a WaypointAddressing,
    pub palette: &'a mut CraftIconPalette,
    pub style: &'a MapStyle,
}

pub struct MapRenderer {
    frame: Frame,
    stale: bool,
}

impl MapRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            frame: Frame::with_size(width, height),
            stale: true,
        }
    }

    /// The retained frame from the last persistent render.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Rebuild the retained frame. Its buffer is reused unless the viewport
    /// size changed.
    pub fn render_persistent(&mut self, scene: &mut Scene) -> &Frame {
        let (width, height) = scene.view.viewport();
        if (width, height) != (self.frame.width, self.frame.height) {
            self.frame = Frame::with_size(width, height);
        } else {
            self.frame.primitives.clear();
        }
        compose(&mut self.frame, scene);
        self.stale = false;
        &self.frame
    }

    /// Build a throwaway frame without touching the retained one.
    pub fn render_transient(&mut self, scene: &mut Scene) -> Frame {
        let (width, height) = scene.view.viewport();
        let mut frame = Frame::with_size(width, height);
        compose(&mut frame, scene);
        self.stale = true;
        frame
    }
}

fn compose(frame: &mut Frame, scene: &mut Scene) {
    frame.background = scene.style.background;
    draw_grid(frame, scene.view, scene.style);
    for craft in 0..scene.addressing.crafts().len() {
        draw_craft(frame, scene, craft);
    }
}

fn push_line(frame: &mut Frame, from: ScreenPoint, to: ScreenPoint, color: Color32, width: f32, style: LineStyle) {
    frame.primitives.push(Primitive::Line {
        from,
        to,
        color,
        width,
        style,
    });
}

/// Full-width horizontal and full-height vertical lines every `spacing`
/// pixels out from the origin, skipping those outside the viewport.
fn draw_grid_lines(frame: &mut Frame, origin: ScreenPoint, spacing: i32, repeat: i32, color: Color32, width: f32) {
    let (w, h) = (frame.width, frame.height);
    for i in 0..repeat {
        let sides = if i == 0 { 1 } else { 2 };
        for offset in [spacing * i, -spacing * i].into_iter().take(sides) {
            let y = origin.y + offset;
            if (0..=h).contains(&y) {
                push_line(frame, ScreenPoint::new(0, y), ScreenPoint::new(w, y), color, width, LineStyle::Solid);
            }
            let x = origin.x + offset;
            if (0..=w).contains(&x) {
                push_line(frame, ScreenPoint::new(x, 0), ScreenPoint::new(x, h), color, width, LineStyle::Solid);
            }
        }
    }
}

fn draw_grid(frame: &mut Frame, view: &WorldView, style: &MapStyle) {
    let origin = view.screen_origin();
    let zoom = view.zoom();
    draw_grid_lines(frame, origin, zoom, GRID_REPEAT, style.grid, MINOR_WIDTH);
    draw_grid_lines(
        frame,
        origin,
        zoom * MAJOR_EVERY,
        GRID_REPEAT / MAJOR_EVERY,
        style.grid,
        MAJOR_WIDTH,
    );
    draw_grid_lines(frame, origin, 0, 1, style.origin, MINOR_WIDTH);
}

fn draw_craft(frame: &mut Frame, scene: &mut Scene, craft_index: usize) {
    let addressing = scene.addressing;
    let toggles = scene.toggles;
    let view = scene.view;
    let craft = addressing.craft(craft_index);
    let color = {
        let tint = scene.palette.tint_for(craft);
        Color32::from_rgb(tint[0], tint[1], tint[2])
    };
    let icon = scene.palette.icon_for(craft);
    let platform = addressing.platform();
    // (group, projected point)
    let visible_point = |slot: usize| {
        addressing
            .visible_waypoint(craft_index, slot, toggles)
            .map(|(handle, waypoint)| (handle.group, view.project(waypoint.position)))
    };

    for slot in 0..SLOT_COUNT {
        let Some((group, point)) = visible_point(slot) else {
            continue;
        };
        let channel = &CHANNELS[slot];
        let tag_offset = match channel.kind {
            SlotKind::Start | SlotKind::Briefing => {
                if let Some(key) = icon {
                    frame.primitives.push(Primitive::Icon {
                        top_left: point.offset(-ICON_HALF, -ICON_HALF),
                        key,
                    });
                }
                ICON_TAG_OFFSET
            }
            SlotKind::Waypoint | SlotKind::Rendezvous | SlotKind::Hyperspace => {
                frame.primitives.push(Primitive::Circle {
                    top_left: point.offset(-1, -1),
                    diameter: DOT_DIAMETER,
                    color,
                });
                DOT_TAG_OFFSET
            }
        };
        if toggles.show_tags {
            frame.primitives.push(Primitive::Text {
                pos: point.offset(tag_offset, tag_offset),
                text: format!("{} {}", craft.name, channel.label(platform)),
                color: scene.style.tag,
            });
        }
        if !toggles.show_traces {
            continue;
        }
        let trace = match channel.kind {
            // Predecessors stay inside the waypoint's own group, except that
            // the first waypoint may link back to the first start point.
            SlotKind::Waypoint => (START_POINTS..slot)
                .rev()
                .chain(std::iter::once(0))
                .filter_map(&visible_point)
                .find(|&(from_group, _)| from_group == group || slot == START_POINTS)
                .map(|(_, from)| (from, LineStyle::Solid)),
            SlotKind::Hyperspace => (START_POINTS..12)
                .filter_map(&visible_point)
                .last()
                .map(|(_, from)| (from, LineStyle::Dashed)),
            _ => None,
        };
        if let Some((from, style)) = trace {
            push_line(frame, from, point, scene.style.trace, MINOR_WIDTH, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::palette::StripAtlas;
    use crate::mission::{Coordinate3, Craft, Platform, Waypoint};
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    struct Fixture {
        view: WorldView,
        toggles: ToggleState,
        addressing: WaypointAddressing,
        palette: CraftIconPalette,
        style: MapStyle,
    }

    impl Fixture {
        fn new(platform: Platform, groups: Vec<Vec<Waypoint>>) -> Self {
            let craft = Craft {
                name: "Red".into(),
                craft_type: 0,
                iff: 0,
                groups,
            };
            let sprite = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, Rgba([200, 200, 200, 255]));
            Self {
                view: WorldView::new(800, 600),
                toggles: ToggleState::from_mask(platform, u32::MAX, true, true),
                addressing: WaypointAddressing::new(platform, vec![craft]),
                palette: CraftIconPalette::new(platform, Box::new(StripAtlas::from_sprites(vec![sprite]))),
                style: MapStyle::default(),
            }
        }

        fn flat(enabled: &[(usize, (i16, i16))]) -> Self {
            let mut waypoints = vec![Waypoint::default(); 22];
            for &(slot, (x, y)) in enabled {
                waypoints[slot] = Waypoint::new(Coordinate3::from_klicks(x, y, 0), true);
            }
            Self::new(Platform::Xvt, vec![waypoints])
        }

        fn render(&mut self) -> Frame {
            let mut renderer = MapRenderer::new(800, 600);
            let mut scene = Scene {
                view: &self.view,
                toggles: &self.toggles,
                addressing: &self.addressing,
                palette: &mut self.palette,
                style: &self.style,
            };
            renderer.render_persistent(&mut scene).clone()
        }
    }

    fn craft_primitives(frame: &Frame) -> Vec<Primitive> {
        frame
            .primitives
            .iter()
            .filter(|p| !matches!(p, Primitive::Line { width, .. } if *width == MAJOR_WIDTH)
                && !matches!(p, Primitive::Line { from, to, .. } if from.x == 0 && to.x == 800 || from.y == 0 && to.y == 600))
            .cloned()
            .collect()
    }

    fn traces(frame: &Frame) -> Vec<(ScreenPoint, ScreenPoint, LineStyle)> {
        craft_primitives(frame)
            .into_iter()
            .filter_map(|p| match p {
                Primitive::Line { from, to, style, .. } => Some((from, to, style)),
                _ => None,
            })
            .collect()
    }

    // klicks to screen at zoom 40 with the origin at (400, 300)
    fn px(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint::new(400 + x * 40, 300 - y * 40)
    }

    #[test]
    fn grid_precedes_craft_and_origin_is_red() {
        let mut fixture = Fixture::flat(&[(0, (1, 1))]);
        let frame = fixture.render();
        let first_craft = frame
            .primitives
            .iter()
            .position(|p| matches!(p, Primitive::Icon { .. }))
            .unwrap();
        assert!(frame.primitives[..first_craft].iter().all(|p| matches!(p, Primitive::Line { .. })));
        let origin_lines: Vec<_> = frame
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { color, .. } if *color == Color32::RED))
            .collect();
        assert_eq!(origin_lines.len(), 2);
        assert!(frame.primitives.contains(&Primitive::Line {
            from: ScreenPoint::new(440, 0),
            to: ScreenPoint::new(440, 600),
            color: MapStyle::default().grid,
            width: MINOR_WIDTH,
            style: LineStyle::Solid,
        }));
    }

    #[test]
    fn start_points_draw_icons_and_waypoints_draw_circles() {
        let mut fixture = Fixture::flat(&[(0, (1, 1)), (4, (2, 2))]);
        fixture.toggles.show_traces = false;
        let primitives = craft_primitives(&fixture.render());
        let key = primitives.iter().find_map(|p| match p {
            Primitive::Icon { key, .. } => Some(*key),
            _ => None,
        });
        let key = key.unwrap();
        let tag = MapStyle::default().tag;
        let green = Color32::from_rgb(50, 205, 50);
        assert_eq!(
            primitives,
            vec![
                Primitive::Icon { top_left: px(1, 1).offset(-8, -8), key },
                Primitive::Text { pos: px(1, 1).offset(8, 8), text: "Red SP1".into(), color: tag },
                Primitive::Circle { top_left: px(2, 2).offset(-1, -1), diameter: 3, color: green },
                Primitive::Text { pos: px(2, 2).offset(4, 4), text: "Red WP1".into(), color: tag },
            ]
        );
    }

    #[test]
    fn waypoints_trace_to_nearest_enabled_predecessor() {
        let mut fixture = Fixture::flat(&[(0, (0, 0)), (4, (1, 0)), (6, (3, 0))]);
        let traces = traces(&fixture.render());
        assert_eq!(
            traces,
            vec![
                (px(0, 0), px(1, 0), LineStyle::Solid),
                (px(1, 0), px(3, 0), LineStyle::Solid),
            ]
        );
    }

    #[test]
    fn hidden_predecessor_is_skipped() {
        let mut fixture = Fixture::flat(&[(0, (0, 0)), (4, (1, 0)), (5, (2, 0))]);
        fixture.toggles.set_channel(4, false);
        assert_eq!(traces(&fixture.render()), vec![(px(0, 0), px(2, 0), LineStyle::Solid)]);
    }

    #[test]
    fn hyperspace_traces_dashed_from_last_waypoint() {
        let mut fixture = Fixture::flat(&[(4, (1, 0)), (5, (2, 0)), (9, (4, 0)), (13, (9, 9))]);
        fixture.toggles.set_channel(0, false);
        let traces = traces(&fixture.render());
        assert_eq!(traces.last(), Some(&(px(4, 0), px(9, 9), LineStyle::Dashed)));
        assert_eq!(traces.iter().filter(|t| t.2 == LineStyle::Dashed).count(), 1);
    }

    #[test]
    fn rendezvous_never_traces() {
        let mut fixture = Fixture::flat(&[(11, (1, 0)), (12, (2, 0))]);
        let frame = fixture.render();
        assert!(traces(&frame).is_empty());
        assert_eq!(
            craft_primitives(&frame).iter().filter(|p| matches!(p, Primitive::Circle { .. })).count(),
            2
        );
    }

    fn xwa_fixture(start_region: u8) -> Fixture {
        let mut groups = vec![vec![Waypoint::default(); 8]; 17];
        groups[0].truncate(4);
        groups[0][0] = Waypoint::new(Coordinate3::from_klicks(0, 0, 0), true).in_region(start_region);
        // region 1, order 2
        groups[7][0] = Waypoint::new(Coordinate3::from_klicks(1, 1, 0), true);
        groups[7][1] = Waypoint::new(Coordinate3::from_klicks(2, 2, 0), true);
        let mut fixture = Fixture::new(Platform::Xwa, groups);
        fixture.toggles.set_region(1);
        fixture.toggles.set_order(2);
        fixture
    }

    #[test]
    fn xwa_first_waypoint_traces_to_start_in_selected_region() {
        let mut fixture = xwa_fixture(1);
        assert_eq!(
            traces(&fixture.render()),
            vec![
                (px(0, 0), px(1, 1), LineStyle::Solid),
                (px(1, 1), px(2, 2), LineStyle::Solid),
            ]
        );
    }

    #[test]
    fn xwa_start_in_other_region_is_hidden_and_untraced() {
        let mut fixture = xwa_fixture(0);
        let frame = fixture.render();
        assert_eq!(traces(&frame), vec![(px(1, 1), px(2, 2), LineStyle::Solid)]);
        assert!(!craft_primitives(&frame).iter().any(|p| matches!(p, Primitive::Icon { .. })));
    }

    #[test]
    fn xwa_later_waypoint_never_traces_to_start() {
        let mut groups = vec![vec![Waypoint::default(); 8]; 17];
        groups[0].truncate(4);
        groups[0][0] = Waypoint::new(Coordinate3::from_klicks(0, 0, 0), true);
        // region 0, order 0; WP1 stays disabled
        groups[1][1] = Waypoint::new(Coordinate3::from_klicks(3, 3, 0), true);
        let mut fixture = Fixture::new(Platform::Xwa, groups);
        let frame = fixture.render();
        assert!(traces(&frame).is_empty());
        assert_eq!(
            craft_primitives(&frame).iter().filter(|p| matches!(p, Primitive::Circle { .. })).count(),
            1
        );
    }

    #[test]
    fn briefing_slots_draw_icons_without_traces() {
        let mut fixture = Fixture::flat(&[(14, (1, 1)), (15, (-2, 3))]);
        let primitives = craft_primitives(&fixture.render());
        let key = primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Icon { key, .. } => Some(*key),
                _ => None,
            })
            .unwrap();
        let tag = MapStyle::default().tag;
        assert_eq!(
            primitives,
            vec![
                Primitive::Icon { top_left: px(1, 1).offset(-8, -8), key },
                Primitive::Text { pos: px(1, 1).offset(8, 8), text: "Red BRF".into(), color: tag },
                Primitive::Icon { top_left: px(-2, 3).offset(-8, -8), key },
                Primitive::Text { pos: px(-2, 3).offset(8, 8), text: "Red BRF2".into(), color: tag },
            ]
        );
    }

    #[test]
    fn persistent_frames_reuse_their_buffer() {
        let mut fixture = Fixture::flat(&[(0, (1, 1))]);
        let mut renderer = MapRenderer::new(800, 600);
        let mut scene = Scene {
            view: &fixture.view,
            toggles: &fixture.toggles,
            addressing: &fixture.addressing,
            palette: &mut fixture.palette,
            style: &fixture.style,
        };
        assert!(renderer.is_stale());
        let first = renderer.render_persistent(&mut scene).primitives.as_ptr();
        assert!(!renderer.is_stale());
        let second = renderer.render_persistent(&mut scene).primitives.as_ptr();
        assert_eq!(first, second);
        let transient = renderer.render_transient(&mut scene);
        assert!(renderer.is_stale());
        assert_eq!(&transient, renderer.frame());
    }
}
