use egui::Color32;
use serde::{Deserialize, Serialize};

use super::EditorContext;
use crate::tools::Tool;

/// UI preferences that survive a restart. The scene itself never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // older saves may lack newer fields
pub struct Preferences {
    pub tool: Tool,
    pub color: Color32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: super::context::DEFAULT_COLOR,
        }
    }
}

impl Preferences {
    pub fn capture(ctx: &EditorContext) -> Self {
        Self {
            tool: ctx.tool(),
            color: ctx.color(),
        }
    }

    pub fn restore(self, ctx: &mut EditorContext) {
        ctx.set_tool(self.tool);
        ctx.set_color(self.color);
    }

    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
