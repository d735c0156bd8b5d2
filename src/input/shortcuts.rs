use egui::{Key, Modifiers};

use crate::command::Command;

/// Global keyboard shortcuts.
///
/// `command` is Cmd on macOS and Ctrl elsewhere.
pub fn shortcut_for(key: Key, modifiers: Modifiers) -> Option<Command> {
    if !modifiers.command {
        return None;
    }
    match key {
        Key::Z if modifiers.shift => Some(Command::Redo),
        Key::Z => Some(Command::Undo),
        Key::Y => Some(Command::Redo),
        _ => None,
    }
}
