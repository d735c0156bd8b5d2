use egui::{Pos2, Rect, Vec2};

/// Font size of text elements, in points.
pub const TEXT_FONT_SIZE: f32 = 24.0;
/// Height of one text line; text blocks grow by this per line.
pub const TEXT_LINE_HEIGHT: f32 = 24.0;

/// Measures rendered text so text elements get a hit-testable box.
pub trait TextMeasure {
    /// Width of a single line of text at [`TEXT_FONT_SIZE`].
    fn text_width(&self, line: &str) -> f32;
}

/// Every character advances by the same width. Used headless.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance(pub f32);

impl Default for FixedAdvance {
    fn default() -> Self {
        Self(TEXT_FONT_SIZE / 2.0)
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.0
    }
}

/// Size of a multi-line text block: widest line by line count.
pub(crate) fn measure_block(text: &str, measure: &dyn TextMeasure) -> Vec2 {
    let mut width: f32 = 0.0;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(measure.text_width(line));
        lines += 1;
    }
    Vec2::new(width, lines as f32 * TEXT_LINE_HEIGHT)
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}
