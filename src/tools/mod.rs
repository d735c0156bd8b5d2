use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ElementError;

/// Every tool offered by the toolbar.
///
/// `Selection` grabs existing elements; the others create a new element
/// on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    Selection,
    #[default]
    Pencil,
    Rectangle,
    Circle,
    Line,
    Text,
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 6] = [
        Tool::Selection,
        Tool::Pencil,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Line,
        Tool::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Selection => "selection",
            Tool::Pencil => "pencil",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
            Tool::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Selection => "Select Tool",
            Tool::Pencil => "Pen Tool",
            Tool::Rectangle => "Rectangle Tool",
            Tool::Circle => "Circle Tool",
            Tool::Line => "Line Tool",
            Tool::Text => "Text Tool",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Selection => "⬉",
            Tool::Pencil => "✏",
            Tool::Rectangle => "☐",
            Tool::Circle => "○",
            Tool::Line => "╱",
            Tool::Text => "T",
        }
    }

    /// Whether pointer-down with this tool creates a new element.
    pub fn creates_elements(&self) -> bool {
        !matches!(self, Tool::Selection)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ElementError::UnknownTool(s.to_string()))
    }
}
