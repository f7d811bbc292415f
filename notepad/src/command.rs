//! Everything a button, menu entry or shortcut can ask the app to do.

use crate::rich_text::{Alignment, FontChoice};
use egui::{Color32, Key, Modifiers};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bold,
    Italic,
    Underline,
    SetColor(Color32),
    SetFontFamily(FontChoice),
    SetFontSize(f32),
    Align(Alignment),
    OpenFile,
    SaveFile,
    SaveFileAs,
    /// Redraw the path bar at a breadcrumb's path.
    NavigateTo(PathBuf),
    ToggleToolbar,
    Minimize,
    Close,
}

impl Command {
    /// Shortcut bound to `key`. Undo and redo are left to the text editor.
    pub fn from_shortcut(key: Key, modifiers: Modifiers) -> Option<Command> {
        if !modifiers.command {
            return None;
        }
        match key {
            Key::S if modifiers.shift => Some(Command::SaveFileAs),
            Key::S => Some(Command::SaveFile),
            Key::O => Some(Command::OpenFile),
            Key::B => Some(Command::Bold),
            Key::I => Some(Command::Italic),
            Key::U => Some(Command::Underline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_shortcuts() {
        assert_eq!(Command::from_shortcut(Key::S, Modifiers::COMMAND), Some(Command::SaveFile));
        assert_eq!(
            Command::from_shortcut(Key::S, Modifiers::COMMAND | Modifiers::SHIFT),
            Some(Command::SaveFileAs)
        );
        assert_eq!(Command::from_shortcut(Key::O, Modifiers::COMMAND), Some(Command::OpenFile));
    }

    #[test]
    fn plain_keys_and_history_keys_pass_through() {
        assert_eq!(Command::from_shortcut(Key::S, Modifiers::NONE), None);
        assert_eq!(Command::from_shortcut(Key::Z, Modifiers::COMMAND), None);
        assert_eq!(Command::from_shortcut(Key::Y, Modifiers::COMMAND), None);
    }
}
