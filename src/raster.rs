//! Off-screen rasterisation of a document into an RGBA bitmap.
//!
//! The solve service reads ink from a transparent image, so the bitmap only
//! holds what the painter draws on top of the canvas background.

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::document::Document;
use crate::element::{Element, Shape, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT};
use crate::geometry::{distance_to_line_segment, freehand_outline, InkOptions};
use crate::renderer::{ELLIPSE_SEGMENTS, STROKE_WIDTH};

/// Font used for text elements; the same face egui draws them with.
const TEXT_FONT: &str = "Ubuntu-Light";

pub struct Rasterizer {
    font: Option<FontArc>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        let font = egui::FontDefinitions::default()
            .font_data
            .get(TEXT_FONT)
            .and_then(|data| FontArc::try_from_vec(data.font.to_vec()).ok());
        if font.is_none() {
            log::warn!("font {TEXT_FONT} unavailable, text elements will not be rasterised");
        }
        Self { font }
    }

    /// A rasteriser that skips text elements.
    pub fn without_text() -> Self {
        Self { font: None }
    }

    pub fn rasterize(&self, document: &Document, width: u32, height: u32) -> RgbaImage {
        let mut image = RgbaImage::new(width, height);
        for element in document.elements() {
            self.draw_element(&mut image, element);
        }
        image
    }

    fn draw_element(&self, image: &mut RgbaImage, element: &Element) {
        let color = element.color();
        match element.shape() {
            Shape::Line { start, end } => stroke_segment(image, *start, *end, color),
            Shape::Rectangle { a, b } => {
                let tr = Pos2::new(b.x, a.y);
                let bl = Pos2::new(a.x, b.y);
                for (p, q) in [(*a, tr), (tr, *b), (*b, bl), (bl, *a)] {
                    stroke_segment(image, p, q, color);
                }
            }
            Shape::Ellipse { a, b } => {
                let outline = ellipse_points(Rect::from_two_pos(*a, *b));
                for i in 0..outline.len() {
                    stroke_segment(image, outline[i], outline[(i + 1) % outline.len()], color);
                }
            }
            Shape::Freehand { points } => {
                fill_polygon(image, &freehand_outline(points, &InkOptions::default()), color);
            }
            Shape::Text { anchor, content, .. } => {
                if let Some(font) = &self.font {
                    draw_text(image, font, *anchor, content, color);
                }
            }
        }
    }
}

/// Points on the outline of the ellipse inscribed in `rect`.
pub fn ellipse_points(rect: Rect) -> Vec<Pos2> {
    let center = rect.center();
    let radius = rect.size() / 2.0;
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            Pos2::new(center.x + radius.x * angle.cos(), center.y + radius.y * angle.sin())
        })
        .collect()
}

/// Centre of the bounding box of all non-transparent pixels.
pub fn content_center(image: &RgbaImage) -> Option<Pos2> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }
    bounds.map(|(min_x, min_y, max_x, max_y)| {
        Pos2::new((min_x + max_x) as f32 / 2.0, (min_y + max_y) as f32 / 2.0)
    })
}

fn blend(image: &mut RgbaImage, x: i32, y: i32, color: Color32, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return;
    }
    let alpha = (color.a() as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    let src = [color.r(), color.g(), color.b()];
    let mut out = [0u8; 4];
    for channel in 0..3 {
        let blended = src[channel] as f32 * alpha
            + dst[channel] as f32 * dst_alpha * (1.0 - alpha);
        let value = blended / out_alpha;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round() as u8;
    *dst = Rgba(out);
}

fn stroke_segment(image: &mut RgbaImage, p: Pos2, q: Pos2, color: Color32) {
    let half = STROKE_WIDTH / 2.0;
    let pad = half + 1.0;
    let min_x = (p.x.min(q.x) - pad).floor() as i32;
    let max_x = (p.x.max(q.x) + pad).ceil() as i32;
    let min_y = (p.y.min(q.y) - pad).floor() as i32;
    let max_y = (p.y.max(q.y) + pad).ceil() as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_line_segment(center, p, q);
            blend(image, x, y, color, half + 0.5 - distance);
        }
    }
}

/// Scanline fill with the non-zero winding rule, so self-overlapping
/// outlines stay solid.
fn fill_polygon(image: &mut RgbaImage, polygon: &[Pos2], color: Color32) {
    if polygon.len() < 3 {
        return;
    }
    let min_y = polygon.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0) as i32;
    let max_y = polygon
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(image.height() as f32) as i32;

    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for y in min_y..max_y {
        let scan = y as f32 + 0.5;
        crossings.clear();
        for i in 0..polygon.len() {
            let p = polygon[i];
            let q = polygon[(i + 1) % polygon.len()];
            let winding = if p.y <= scan && q.y > scan {
                1
            } else if q.y <= scan && p.y > scan {
                -1
            } else {
                continue;
            };
            let t = (scan - p.y) / (q.y - p.y);
            crossings.push((p.x + t * (q.x - p.x), winding));
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            let start = (pair[0].0 - 0.5).ceil() as i32;
            let end = (pair[1].0 - 0.5).floor() as i32;
            for x in start..=end {
                blend(image, x, y, color, 1.0);
            }
        }
    }
}

fn draw_text(image: &mut RgbaImage, font: &FontArc, anchor: Pos2, content: &str, color: Color32) {
    let scale = PxScale::from(TEXT_FONT_SIZE);
    let scaled = font.as_scaled(scale);

    for (row, line) in content.split('\n').enumerate() {
        let baseline = anchor.y + row as f32 * TEXT_LINE_HEIGHT + scaled.ascent();
        let mut pen_x = anchor.x;
        let mut previous = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                pen_x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(pen_x, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    blend(
                        image,
                        bounds.min.x as i32 + gx as i32,
                        bounds.min.y as i32 + gy as i32,
                        color,
                        coverage,
                    );
                });
            }
            pen_x += scaled.h_advance(id);
            previous = Some(id);
        }
    }
}
