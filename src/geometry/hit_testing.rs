use egui::{CursorIcon, Pos2};

use crate::document::Document;
use crate::element::{Element, Shape};

/// Half-width of the square around a corner or endpoint that grabs it.
pub const CORNER_TOLERANCE: f32 = 5.0;
/// Distance from the ellipse outline that grabs one of its handles.
pub const ELLIPSE_HANDLE_TOLERANCE: f32 = 10.0;
/// Slack allowed when deciding a point lies on a straight line.
pub const LINE_TOLERANCE: f32 = 1.0;
/// Slack allowed when deciding a point lies on a freehand segment.
pub const FREEHAND_TOLERANCE: f32 = 5.0;

/// The part of an element a point landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Start,
    End,
    Inside,
}

impl Handle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::TopLeft => "tl",
            Handle::TopRight => "tr",
            Handle::BottomLeft => "bl",
            Handle::BottomRight => "br",
            Handle::Start => "start",
            Handle::End => "end",
            Handle::Inside => "inside",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Handle::TopLeft | Handle::BottomRight | Handle::Start | Handle::End => {
                CursorIcon::ResizeNwSe
            }
            Handle::TopRight | Handle::BottomLeft => CursorIcon::ResizeNeSw,
            Handle::Inside => CursorIcon::Move,
        }
    }
}

/// Cursor affordance for whatever the pointer is over.
pub fn cursor_for_position(handle: Option<Handle>) -> CursorIcon {
    match handle {
        Some(handle) => handle.cursor_icon(),
        None => CursorIcon::Default,
    }
}

/// `handle` when `pos` is within [`CORNER_TOLERANCE`] of `target` on both axes.
pub fn near_point(pos: Pos2, target: Pos2, handle: Handle) -> Option<Handle> {
    ((pos.x - target.x).abs() < CORNER_TOLERANCE && (pos.y - target.y).abs() < CORNER_TOLERANCE)
        .then_some(handle)
}

/// Whether `pos` lies on the segment `a..b`.
///
/// A point on the segment splits it into two pieces whose lengths add up to
/// the segment length; anything off the segment makes the detour longer.
pub fn on_line(a: Pos2, b: Pos2, pos: Pos2, max_distance: f32) -> bool {
    let slack = a.distance(b) - (a.distance(pos) + b.distance(pos));
    slack.abs() < max_distance
}

/// Distance from `point` to the closest point of the segment `start..end`.
pub fn distance_to_line_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line_vec = end - start;
    let len_sq = line_vec.length_sq();
    if len_sq == 0.0 {
        return point.distance(start);
    }

    let t = ((point - start).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    point.distance(start + line_vec * t)
}

/// Which part of `element` the point hits, if any.
pub fn position_within_element(pos: Pos2, element: &Element) -> Option<Handle> {
    match element.shape() {
        Shape::Rectangle { a, b } => position_within_rectangle(pos, *a, *b),
        Shape::Line { start, end } => near_point(pos, *start, Handle::Start)
            .or_else(|| near_point(pos, *end, Handle::End))
            .or_else(|| on_line(*start, *end, pos, LINE_TOLERANCE).then_some(Handle::Inside)),
        Shape::Ellipse { a, b } => position_within_ellipse(pos, *a, *b),
        Shape::Freehand { points } => points
            .windows(2)
            .any(|pair| on_line(pair[0], pair[1], pos, FREEHAND_TOLERANCE))
            .then_some(Handle::Inside),
        Shape::Text { anchor, size, .. } => {
            let max = *anchor + *size;
            (pos.x >= anchor.x && pos.x <= max.x && pos.y >= anchor.y && pos.y <= max.y)
                .then_some(Handle::Inside)
        }
    }
}

fn position_within_rectangle(pos: Pos2, a: Pos2, b: Pos2) -> Option<Handle> {
    near_point(pos, a, Handle::TopLeft)
        .or_else(|| near_point(pos, Pos2::new(b.x, a.y), Handle::TopRight))
        .or_else(|| near_point(pos, Pos2::new(a.x, b.y), Handle::BottomLeft))
        .or_else(|| near_point(pos, b, Handle::BottomRight))
        .or_else(|| {
            (pos.x >= a.x && pos.x <= b.x && pos.y >= a.y && pos.y <= b.y).then_some(Handle::Inside)
        })
}

/// Handles sit where the ray from the center through the pointer meets the
/// outline, scaled per axis by the radii. On a strongly elongated ellipse
/// that point drifts from the true nearest outline point; the drift is kept
/// as the handle placement.
fn position_within_ellipse(pos: Pos2, a: Pos2, b: Pos2) -> Option<Handle> {
    let center = Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let radius_x = (b.x - a.x).abs() / 2.0;
    let radius_y = (b.y - a.y).abs() / 2.0;

    let quadrants = [
        (pos.x <= center.x && pos.y <= center.y, -1.0, -1.0, Handle::TopLeft),
        (pos.x >= center.x && pos.y <= center.y, 1.0, -1.0, Handle::TopRight),
        (pos.x <= center.x && pos.y >= center.y, -1.0, 1.0, Handle::BottomLeft),
        (pos.x >= center.x && pos.y >= center.y, 1.0, 1.0, Handle::BottomRight),
    ];

    for (in_quadrant, sx, sy, handle) in quadrants {
        if !in_quadrant {
            continue;
        }
        let angle = f32::atan2(sy * (pos.y - center.y), sx * (pos.x - center.x));
        let on_outline = Pos2::new(
            center.x + sx * radius_x * angle.cos(),
            center.y + sy * radius_y * angle.sin(),
        );
        if pos.distance(on_outline) < ELLIPSE_HANDLE_TOLERANCE {
            return Some(handle);
        }
    }

    if radius_x <= 0.0 || radius_y <= 0.0 {
        return None;
    }
    let dx = pos.x - center.x;
    let dy = pos.y - center.y;
    ((dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y) <= 1.0)
        .then_some(Handle::Inside)
}

/// First element in creation order that the point hits.
pub fn element_at_position(pos: Pos2, document: &Document) -> Option<(&Element, Handle)> {
    document
        .elements()
        .find_map(|element| position_within_element(pos, element).map(|handle| (element, handle)))
}
