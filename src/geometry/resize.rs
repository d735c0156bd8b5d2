use egui::Pos2;

use super::hit_testing::Handle;
use crate::element::{Element, Shape};

/// New defining points of a two-point shape after dragging `handle` to `pointer`.
///
/// Rectangles and lines replace the corner or endpoint that was grabbed.
/// Ellipses replace the same corner of their bounding box; when the drag
/// crosses the opposite side the box is left inverted until pointer-up
/// normalises it.
pub fn resized_coordinates(
    pointer: Pos2,
    handle: Handle,
    (p1, p2): (Pos2, Pos2),
    is_ellipse: bool,
) -> (Pos2, Pos2) {
    if is_ellipse {
        return match handle {
            Handle::TopLeft => (pointer, p2),
            Handle::TopRight => (Pos2::new(p1.x, pointer.y), Pos2::new(pointer.x, p2.y)),
            Handle::BottomLeft => (Pos2::new(pointer.x, p1.y), Pos2::new(p2.x, pointer.y)),
            Handle::BottomRight => (p1, pointer),
            Handle::Start | Handle::End | Handle::Inside => (p1, p2),
        };
    }

    match handle {
        Handle::Start | Handle::TopLeft => (pointer, p2),
        Handle::TopRight => (Pos2::new(p1.x, pointer.y), Pos2::new(pointer.x, p2.y)),
        Handle::BottomLeft => (Pos2::new(pointer.x, p1.y), Pos2::new(p2.x, pointer.y)),
        Handle::End | Handle::BottomRight => (p1, pointer),
        Handle::Inside => (p1, p2),
    }
}

/// Canonical corner order for a two-point shape.
///
/// Rectangles and ellipses become min/max per axis. Lines keep their two
/// endpoints but order them left to right, breaking ties top to bottom.
/// Other shapes come back unchanged.
pub fn adjust_element_coordinates(element: &Element) -> (Pos2, Pos2) {
    let (p1, p2) = element.corners();
    match element.shape() {
        Shape::Rectangle { .. } | Shape::Ellipse { .. } => (
            Pos2::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            Pos2::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        ),
        Shape::Line { .. } => {
            if p1.x < p2.x || (p1.x == p2.x && p1.y < p2.y) {
                (p1, p2)
            } else {
                (p2, p1)
            }
        }
        Shape::Freehand { .. } | Shape::Text { .. } => (p1, p2),
    }
}
