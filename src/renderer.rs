use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape as PaintShape, Stroke};

use crate::document::Document;
use crate::element::{Element, ElementId, Shape, TextMeasure, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT};
use crate::geometry::{InkOptions, InkOutline};
use crate::raster::ellipse_points;

/// Outline width of lines, rectangles and ellipses.
pub const STROKE_WIDTH: f32 = 2.0;
/// Segments used to approximate an ellipse outline.
pub const ELLIPSE_SEGMENTS: usize = 64;
pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(24, 24, 27);

/// Paints a document onto an egui painter.
///
/// Element coordinates are canvas-local; `origin` is the screen position of
/// the canvas' top-left corner.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    ink: InkOptions,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear `rect` and draw every element in creation order, skipping the
    /// element whose text is being edited.
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        document: &Document,
        editing: Option<ElementId>,
    ) {
        painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);
        for element in document.elements() {
            if Some(element.id()) == editing {
                continue;
            }
            self.draw_element(painter, rect.min, element);
        }
    }

    fn draw_element(&self, painter: &Painter, origin: Pos2, element: &Element) {
        let color = element.color();
        let stroke = Stroke::new(STROKE_WIDTH, color);
        let to_screen = |p: Pos2| origin + p.to_vec2();

        match element.shape() {
            Shape::Line { start, end } => {
                painter.line_segment([to_screen(*start), to_screen(*end)], stroke);
            }
            Shape::Rectangle { a, b } => {
                painter.rect_stroke(Rect::from_two_pos(to_screen(*a), to_screen(*b)), 0.0, stroke);
            }
            Shape::Ellipse { a, b } => {
                let points = ellipse_points(Rect::from_two_pos(*a, *b))
                    .into_iter()
                    .map(to_screen)
                    .collect();
                painter.add(PaintShape::closed_line(points, stroke));
            }
            Shape::Freehand { points } => {
                let screen: Vec<Pos2> = points.iter().copied().map(to_screen).collect();
                if let Some(outline) = InkOutline::new(&screen, &self.ink) {
                    painter.add(PaintShape::mesh(outline.to_mesh(color)));
                }
            }
            Shape::Text { anchor, content, .. } => {
                for (row, line) in content.split('\n').enumerate() {
                    let pos = to_screen(*anchor) + egui::vec2(0.0, row as f32 * TEXT_LINE_HEIGHT);
                    let font = FontId::proportional(TEXT_FONT_SIZE);
                    painter.text(pos, Align2::LEFT_TOP, line, font, color);
                }
            }
        }
    }
}

/// Measures with egui's own font atlas, matching what [`Renderer`] draws.
impl TextMeasure for egui::Context {
    fn text_width(&self, line: &str) -> f32 {
        self.fonts(|fonts| {
            fonts
                .layout_no_wrap(
                    line.to_owned(),
                    FontId::proportional(TEXT_FONT_SIZE),
                    Color32::WHITE,
                )
                .size()
                .x
        })
    }
}
