mod history;

use egui::Color32;

use crate::tools::Tool;

pub use history::History;

/// Session-level actions issued by buttons and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    /// Clear the elements as one undo step, and drop overlays and bindings.
    ResetAll,
    SetTool(Tool),
    SetColor(Color32),
}
