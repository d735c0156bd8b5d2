use egui::{Color32, Pos2, Rect, Vec2};

mod common;

pub use common::{FixedAdvance, TextMeasure, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT};

/// Stable identity of an element, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Geometry of a drawn element, one variant per primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { start: Pos2, end: Pos2 },
    /// Two opposite corners, in the order they were dragged.
    Rectangle { a: Pos2, b: Pos2 },
    /// Bounding-box corners of an axis-aligned ellipse.
    Ellipse { a: Pos2, b: Pos2 },
    /// Sampled pointer positions; never empty.
    Freehand { points: Vec<Pos2> },
    /// `size` is the measured text block, derived from `content`.
    Text {
        anchor: Pos2,
        size: Vec2,
        content: String,
    },
}

/// One drawn object on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    color: Color32,
    shape: Shape,
}

impl Element {
    pub fn new(id: ElementId, color: Color32, shape: Shape) -> Self {
        Self { id, color, shape }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn element_type(&self) -> &'static str {
        match self.shape {
            Shape::Line { .. } => "line",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Ellipse { .. } => "circle",
            Shape::Freehand { .. } => "pencil",
            Shape::Text { .. } => "text",
        }
    }

    /// The `(x1, y1)` anchor: first corner, start point, first stroke sample
    /// or text origin.
    pub fn anchor(&self) -> Pos2 {
        match &self.shape {
            Shape::Line { start, .. } => *start,
            Shape::Rectangle { a, .. } | Shape::Ellipse { a, .. } => *a,
            Shape::Freehand { points } => points.first().copied().unwrap_or(Pos2::ZERO),
            Shape::Text { anchor, .. } => *anchor,
        }
    }

    /// Both defining points of a two-point shape; `(x1, y1), (x2, y2)`.
    pub fn corners(&self) -> (Pos2, Pos2) {
        match &self.shape {
            Shape::Line { start, end } => (*start, *end),
            Shape::Rectangle { a, b } | Shape::Ellipse { a, b } => (*a, *b),
            Shape::Freehand { points } => {
                let first = points.first().copied().unwrap_or(Pos2::ZERO);
                (first, first)
            }
            Shape::Text { anchor, size, .. } => (*anchor, *anchor + *size),
        }
    }

    /// Axis-aligned bounds of the element geometry.
    pub fn rect(&self) -> Rect {
        match &self.shape {
            Shape::Freehand { points } => common::calculate_bounds(points),
            _ => {
                let (a, b) = self.corners();
                Rect::from_two_pos(a, b)
            }
        }
    }

    /// Whether the element is edited through its two corners.
    pub fn is_two_point(&self) -> bool {
        matches!(
            self.shape,
            Shape::Line { .. } | Shape::Rectangle { .. } | Shape::Ellipse { .. }
        )
    }

    /// Replace both defining points of a line, rectangle or ellipse.
    ///
    /// Freehand and text elements ignore this; they change through
    /// [`Element::push_point`], [`Element::translate`] and [`Element::set_text`].
    pub fn set_corners(&mut self, p1: Pos2, p2: Pos2) {
        match &mut self.shape {
            Shape::Line { start, end } => {
                *start = p1;
                *end = p2;
            }
            Shape::Rectangle { a, b } | Shape::Ellipse { a, b } => {
                *a = p1;
                *b = p2;
            }
            Shape::Freehand { .. } | Shape::Text { .. } => {}
        }
    }

    /// Append a sample to a freehand stroke.
    pub fn push_point(&mut self, point: Pos2) {
        if let Shape::Freehand { points } = &mut self.shape {
            points.push(point);
        }
    }

    /// Move the whole element rigidly.
    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.shape {
            Shape::Line { start, end } => {
                *start += delta;
                *end += delta;
            }
            Shape::Rectangle { a, b } | Shape::Ellipse { a, b } => {
                *a += delta;
                *b += delta;
            }
            Shape::Freehand { points } => {
                for point in points {
                    *point += delta;
                }
            }
            Shape::Text { anchor, .. } => *anchor += delta,
        }
    }

    /// Overwrite freehand samples wholesale, used by rigid moves.
    pub fn set_points(&mut self, new_points: Vec<Pos2>) {
        if let Shape::Freehand { points } = &mut self.shape {
            if !new_points.is_empty() {
                *points = new_points;
            }
        }
    }

    /// Store text content and re-measure the text block.
    pub fn set_text(&mut self, text: &str, measure: &dyn TextMeasure) {
        if let Shape::Text { size, content, .. } = &mut self.shape {
            *content = text.to_string();
            *size = common::measure_block(text, measure);
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn points(&self) -> Option<&[Pos2]> {
        match &self.shape {
            Shape::Freehand { points } => Some(points),
            _ => None,
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::error::ElementError;
    use crate::tools::Tool;

    /// Build a fresh element for a drawing tool.
    ///
    /// Two-point shapes take both corners as given. Freehand strokes start
    /// with the single sample `from`; text starts empty at `from`.
    pub fn create_element(
        id: ElementId,
        tool: Tool,
        from: Pos2,
        to: Pos2,
        color: Color32,
    ) -> Result<Element, ElementError> {
        let shape = match tool {
            Tool::Line => Shape::Line { start: from, end: to },
            Tool::Rectangle => Shape::Rectangle { a: from, b: to },
            Tool::Circle => Shape::Ellipse { a: from, b: to },
            Tool::Pencil => Shape::Freehand { points: vec![from] },
            Tool::Text => Shape::Text {
                anchor: from,
                size: Vec2::ZERO,
                content: String::new(),
            },
            Tool::Selection => return Err(ElementError::NotADrawingTool(tool)),
        };
        Ok(Element::new(id, color, shape))
    }

    /// Same as [`create_element`], but from a tool name.
    pub fn create_named(
        id: ElementId,
        tool_name: &str,
        from: Pos2,
        to: Pos2,
        color: Color32,
    ) -> Result<Element, ElementError> {
        let tool: Tool = tool_name.parse()?;
        create_element(id, tool, from, to, color)
    }
}
