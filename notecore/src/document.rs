//! The single plain-text document and its last-session mirror.
//!
//! Writes are whole-file overwrites. Every save, successful or not, also
//! writes the in-memory text to the [`SessionCache`], which is read back
//! on the next start.

use crate::storage::{self, StorageError};
use std::path::{Path, PathBuf};

pub const APP_TITLE: &str = "Transparent Notepad";

/// Suggested file stem when the document has no usable first line.
pub const UNTITLED_STEM: &str = "untitled";

const MAX_STEM_BYTES: usize = 64;

/// Fixed-location copy of the most recently saved text.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The cache in the user's home directory.
    pub fn in_home() -> storage::Result<Self> {
        Ok(Self::new(storage::last_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text from the previous session, if there is any. A cache that exists
    /// but cannot be read is logged and treated as absent.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        match storage::read_text(&self.path) {
            Ok(text) => {
                log::info!("restored last session from {}", self.path.display());
                Some(text)
            }
            Err(e) => {
                log::warn!("could not read last session {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn store(&self, text: &str) -> storage::Result<()> {
        storage::write_text(&self.path, text)
    }
}

/// Result of [`Document::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    /// No path yet; the caller should run save-as. Nothing was written.
    NeedsPath,
    Saved {
        path: PathBuf,
        cache: storage::Result<()>,
    },
    Failed {
        error: StorageError,
        cache: storage::Result<()>,
    },
}

impl SaveOutcome {
    /// Outcome of the last-session mirror write, when one happened.
    pub fn cache_result(&self) -> Option<&storage::Result<()>> {
        match self {
            SaveOutcome::NeedsPath => None,
            SaveOutcome::Saved { cache, .. } | SaveOutcome::Failed { cache, .. } => Some(cache),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    current_path: Option<PathBuf>,
    /// The editor binds directly to this buffer.
    pub content: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// An untitled document seeded from the last-session cache.
    pub fn recovered(cache: &SessionCache) -> Self {
        Self {
            current_path: None,
            content: cache.load().unwrap_or_default(),
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn file_name(&self) -> Option<String> {
        self.current_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Directory holding the current file.
    pub fn directory(&self) -> Option<&Path> {
        self.current_path.as_ref().and_then(|p| p.parent())
    }

    pub fn window_title(&self) -> String {
        match self.file_name() {
            Some(name) => format!("{} - {}", APP_TITLE, name),
            None => APP_TITLE.to_string(),
        }
    }

    /// Replace the content with the file at `path`. On error nothing changes.
    pub fn open(&mut self, path: &Path) -> storage::Result<()> {
        let text = storage::read_text(path)?;
        log::info!("opened {} ({} bytes)", path.display(), text.len());
        self.content = text;
        self.current_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Write to the current path, then mirror to `cache` regardless of how
    /// the first write went.
    pub fn save(&mut self, cache: &SessionCache) -> SaveOutcome {
        let Some(path) = self.current_path.clone() else {
            return SaveOutcome::NeedsPath;
        };

        let primary = storage::write_text(&path, &self.content);
        let cache_result = cache.store(&self.content);
        if let Err(e) = &cache_result {
            log::warn!("could not update last session {}: {}", cache.path().display(), e);
        }

        match primary {
            Ok(()) => {
                log::info!("saved {} ({} bytes)", path.display(), self.content.len());
                SaveOutcome::Saved { path, cache: cache_result }
            }
            Err(error) => {
                log::warn!("could not save {}: {}", path.display(), error);
                SaveOutcome::Failed { error, cache: cache_result }
            }
        }
    }

    /// Adopt a user-chosen path and save there.
    pub fn save_as(&mut self, path: PathBuf, cache: &SessionCache) -> SaveOutcome {
        self.current_path = Some(path);
        self.save(cache)
    }

    /// File name offered by the save-as dialog: the first line of the text.
    pub fn suggested_file_name(&self) -> String {
        let first_line = self.content.lines().next().unwrap_or("");
        let cleaned: String = first_line
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
            .collect();
        let stem = truncate_on_char_boundary(cleaned.trim(), MAX_STEM_BYTES).trim_end();
        let stem = if stem.is_empty() { UNTITLED_STEM } else { stem };
        format!("{}.txt", stem)
    }
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
