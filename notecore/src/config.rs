//! User configuration, stored as JSON in the platform config directory.

use crate::storage::{config_dir, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How window geometry changes reach the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStrategy {
    /// Pick at startup from the session type.
    #[default]
    Auto,
    /// The app positions and sizes the window itself on every pointer move.
    Manual,
    /// The app hands the gesture to the compositor once, at press time.
    Compositor,
}

impl MoveStrategy {
    /// Resolve `Auto` into a concrete strategy. Wayland compositors do not
    /// let clients place their own windows, so they get `Compositor`.
    pub fn resolve(self, wayland_session: bool) -> MoveStrategy {
        match self {
            MoveStrategy::Auto if wayland_session => MoveStrategy::Compositor,
            MoveStrategy::Auto => MoveStrategy::Manual,
            other => other,
        }
    }

    /// Resolve against the current process environment.
    pub fn detect(self) -> MoveStrategy {
        self.resolve(std::env::var_os("WAYLAND_DISPLAY").is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotepadConfig {
    /// Width of the band along the right and bottom edges that resizes.
    pub edge_margin: f32,
    pub min_size: [f32; 2],
    pub initial_size: [f32; 2],
    /// Alpha of the dark wash painted behind the whole window.
    pub window_tint: u8,
    pub editor_font_size: f32,
    pub move_strategy: MoveStrategy,
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            edge_margin: 8.0,
            min_size: [300.0, 200.0],
            initial_size: [900.0, 550.0],
            window_tint: 40,
            editor_font_size: 16.0,
            move_strategy: MoveStrategy::Auto,
        }
    }
}

impl NotepadConfig {
    pub fn default_path() -> PathBuf {
        config_dir("notepad").join("config.json")
    }

    pub fn load(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Load from `config_path`, falling back to defaults. A missing file is
    /// normal on first run; anything else is worth a warning.
    pub fn load_or_default(config_path: &Path) -> Self {
        match Self::load(config_path) {
            Ok(config) => {
                log::debug!("loaded config from {}", config_path.display());
                config.sanitized()
            }
            Err(crate::storage::StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", config_path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", config_path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values a hand-edited file could get wrong.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.edge_margin.is_finite() || self.edge_margin <= 0.0 {
            self.edge_margin = defaults.edge_margin;
        }
        for axis in 0..2 {
            if !self.min_size[axis].is_finite() || self.min_size[axis] < 1.0 {
                self.min_size[axis] = defaults.min_size[axis];
            }
            self.initial_size[axis] = self.initial_size[axis].max(self.min_size[axis]);
        }
        if !self.editor_font_size.is_finite() || self.editor_font_size < 4.0 {
            self.editor_font_size = defaults.editor_font_size;
        }
        self
    }

    pub fn min_size(&self) -> egui::Vec2 {
        egui::vec2(self.min_size[0], self.min_size[1])
    }

    pub fn initial_size(&self) -> egui::Vec2 {
        egui::vec2(self.initial_size[0], self.initial_size[1])
    }
}
