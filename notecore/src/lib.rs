//! notecore: window interaction, path bar and document I/O for the
//! translucent notepad, plus its shared theme and widgets.

pub mod config;
pub mod document;
pub mod interaction;
pub mod path_bar;
pub mod selection;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use config::{MoveStrategy, NotepadConfig};
pub use document::{Document, SaveOutcome, SessionCache};
pub use interaction::{CursorShape, InteractionState, WindowEffect, WindowInteraction};
pub use path_bar::{PathBar, PathBarItem, PathSegment};
pub use theme::NoteTheme;
