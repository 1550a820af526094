//! # Frame Painter
//!
//! Replays a composed [`Frame`] onto an egui painter.
//!
//! Icon primitives refer to colourised images by [`IconKey`]; the caller
//! uploads those as textures first (see [`upload_icons`]). An icon with no
//! texture is skipped.

use super::coordinate_transform::ScreenPoint;
use super::palette::{CraftIconPalette, IconKey};
use super::renderer::{Frame, LineStyle, Primitive};
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, TextureHandle, TextureOptions};
use std::collections::HashMap;

pub const DASH_LENGTH: f32 = 4.0;
pub const GAP_LENGTH: f32 = 4.0;

/// Draw a dashed line on a painter.
///
/// # Arguments
/// * `painter` - The egui painter to draw on
/// * `start` - Start point
/// * `end` - End point
/// * `dash_length` - Length of each dash
/// * `gap_length` - Length of gaps between dashes
/// * `stroke` - Stroke style to use
pub fn draw_dashed_line(
    painter: &egui::Painter,
    start: Pos2,
    end: Pos2,
    dash_length: f32,
    gap_length: f32,
    stroke: Stroke,
) {
    for [p1, p2] in dash_segments(start, end, dash_length, gap_length) {
        painter.line_segment([p1, p2], stroke);
    }
}

/// The visible dashes of a dashed line from `start` to `end`.
pub fn dash_segments(start: Pos2, end: Pos2, dash_length: f32, gap_length: f32) -> Vec<[Pos2; 2]> {
    let dir = end - start;
    let total_length = dir.length();
    if total_length < 0.001 {
        return Vec::new();
    }

    let unit = dir / total_length;
    let mut segments = Vec::new();
    let mut pos = 0.0;
    let mut drawing = true;

    while pos < total_length {
        let segment_length = if drawing { dash_length } else { gap_length };
        let segment_end = (pos + segment_length).min(total_length);

        if drawing {
            segments.push([start + unit * pos, start + unit * segment_end]);
        }

        pos = segment_end;
        drawing = !drawing;
    }
    segments
}

/// Upload every icon the frame refers to that has no texture yet.
pub fn upload_icons(
    ctx: &egui::Context,
    frame: &Frame,
    palette: &CraftIconPalette,
    textures: &mut HashMap<IconKey, TextureHandle>,
) {
    for primitive in &frame.primitives {
        let Primitive::Icon { key, .. } = primitive else {
            continue;
        };
        if textures.contains_key(key) {
            continue;
        }
        let Some(icon) = palette.icon(key) else {
            continue;
        };
        let size = [icon.width() as usize, icon.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, icon.as_raw());
        let [r, g, b] = key.tint;
        let name = format!("craft-{}-{r:02x}{g:02x}{b:02x}", key.craft_type);
        textures.insert(*key, ctx.load_texture(name, image, TextureOptions::NEAREST));
    }
}

pub fn paint_frame(
    painter: &egui::Painter,
    frame: &Frame,
    canvas_offset: Pos2,
    textures: &HashMap<IconKey, TextureHandle>,
    font_size: f32,
) {
    let canvas = Rect::from_min_size(canvas_offset, egui::vec2(frame.width as f32, frame.height as f32));
    painter.rect_filled(canvas, 0.0, frame.background);

    let at = |p: &ScreenPoint| p.to_pos2(canvas_offset);
    for primitive in &frame.primitives {
        match primitive {
            Primitive::Line {
                from,
                to,
                color,
                width,
                style,
            } => {
                let stroke = Stroke::new(*width, *color);
                match style {
                    LineStyle::Solid => {
                        painter.line_segment([at(from), at(to)], stroke);
                    }
                    LineStyle::Dashed => {
                        draw_dashed_line(painter, at(from), at(to), DASH_LENGTH, GAP_LENGTH, stroke);
                    }
                }
            }
            Primitive::Circle {
                top_left,
                diameter,
                color,
            } => {
                let radius = *diameter as f32 / 2.0;
                let center = at(top_left) + egui::vec2(radius, radius);
                painter.circle_stroke(center, radius, Stroke::new(1.0, *color));
            }
            Primitive::Icon { top_left, key } => {
                if let Some(texture) = textures.get(key) {
                    let rect = Rect::from_min_size(at(top_left), texture.size_vec2());
                    let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, Color32::WHITE);
                }
            }
            Primitive::Text { pos, text, color } => {
                painter.text(at(pos), Align2::LEFT_TOP, text, FontId::proportional(font_size), *color);
            }
        }
    }
}
