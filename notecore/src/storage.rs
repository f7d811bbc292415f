//! Storage utilities for the notepad
//!
//! Error type, well-known locations, and the in-app file browser used by
//! the open/save dialogs.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the last-session cache, relative to the home directory.
pub const LAST_SESSION_FILE: &str = ".transparent_notepad_last.txt";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not determine the home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read a whole file as UTF-8.
///
/// A missing file is reported as [`StorageError::NotFound`], keeping the
/// OS message and adding the path it was about.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound {
            path: path.to_path_buf(),
            source: e,
        },
        _ => e.into(),
    })
}

/// Overwrite a whole file with UTF-8 text.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
}

/// Visible subdirectories and `extension` files of `dir`, directories
/// first, each group sorted case-insensitively.
fn list_dir(dir: &Path, extension: &str) -> std::io::Result<Vec<FileEntry>> {
    let mut listing: Vec<FileEntry> = std::fs::read_dir(dir)?
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let path = entry.path();
            let is_directory = path.is_dir();
            (is_directory || has_extension(&path, extension))
                .then_some(FileEntry { name, path, is_directory })
        })
        .collect();
    listing.sort_by_cached_key(|e| (!e.is_directory, e.name.to_lowercase()));
    Ok(listing)
}

/// One directory's worth of files of a single type, for the open/save
/// dialogs. The first entry is `..` unless the directory is a root.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    current_dir: PathBuf,
    extension: &'static str,
    entries: Vec<FileEntry>,
    selected: Option<usize>,
}

impl FileBrowser {
    pub fn new(start_dir: PathBuf, extension: &'static str) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            extension,
            entries: Vec::new(),
            selected: None,
        };
        browser.refresh();
        browser
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Re-read the current directory. An unreadable directory leaves only
    /// the `..` entry.
    pub fn refresh(&mut self) {
        self.selected = None;
        self.entries = self
            .current_dir
            .parent()
            .map(|parent| FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_directory: true,
            })
            .into_iter()
            .collect();

        match list_dir(&self.current_dir, self.extension) {
            Ok(listing) => self.entries.extend(listing),
            Err(e) => log::warn!("cannot list {}: {}", self.current_dir.display(), e),
        }
    }

    /// Show `dir` instead. Anything that is not a directory is ignored.
    pub fn navigate_to(&mut self, dir: PathBuf) {
        if dir.is_dir() {
            self.current_dir = dir;
            self.refresh();
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn select_by_name(&mut self, name: &str) {
        self.selected = self.entries.iter().position(|e| e.name == name);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Directory a new file should be written into: the selected
    /// directory if one is highlighted (and is not `..`), else the
    /// directory being shown.
    pub fn save_directory(&self) -> PathBuf {
        match self.selected_entry() {
            Some(entry) if entry.is_directory && entry.name != ".." => entry.path.clone(),
            _ => self.current_dir.clone(),
        }
    }
}

/// Config directory for the notepad
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(StorageError::NoHomeDir)
}

/// Home directory, or the current directory when none can be resolved.
pub fn home_dir_or_current() -> PathBuf {
    home_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Location of the last-session cache file.
pub fn last_session_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(LAST_SESSION_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_file_names_path_and_keeps_os_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let os_message = std::fs::read_to_string(&path).unwrap_err().to_string();

        let err = read_text(&path).unwrap_err();
        assert!(matches!(&err, StorageError::NotFound { path: p, .. } if *p == path));
        let message = err.to_string();
        assert!(message.contains("nope.txt"), "{message}");
        assert!(message.contains(&os_message), "{message}");
    }

    #[test]
    fn write_then_read_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        write_text(&path, "first").unwrap();
        write_text(&path, "second\nline").unwrap();
        assert_eq!(read_text(&path).unwrap(), "second\nline");
    }

    #[test]
    fn browser_lists_dirs_first_and_only_text_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("A.TXT"), "").unwrap();
        std::fs::write(dir.path().join("image.png"), "").unwrap();
        std::fs::write(dir.path().join("txt"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.txt"), "").unwrap();

        let browser = FileBrowser::new(dir.path().to_path_buf(), "txt");
        let names: Vec<&str> = browser.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "alpha", "Zeta", "A.TXT", "b.txt"]);
    }

    #[test]
    fn unreadable_directory_leaves_only_parent() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        let browser = FileBrowser::new(gone, "txt");
        assert_eq!(browser.entries().len(), 1);
        assert_eq!(browser.entries()[0].path, dir.path());
    }

    #[test]
    fn navigate_ignores_files_and_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), "txt");

        browser.navigate_to(dir.path().join("a.txt"));
        assert_eq!(browser.current_dir(), dir.path());

        browser.select(1);
        browser.navigate_to(dir.path().join("notes"));
        assert_eq!(browser.current_dir(), dir.path().join("notes"));
        assert_eq!(browser.selected_index(), None);
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), "txt");
        browser.select(5);
        assert_eq!(browser.selected_entry(), None);
    }

    #[test]
    fn save_directory_prefers_selected_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        let mut browser = FileBrowser::new(dir.path().to_path_buf(), "txt");
        assert_eq!(browser.save_directory(), dir.path());

        browser.select_by_name("notes");
        assert_eq!(browser.save_directory(), dir.path().join("notes"));

        browser.select_by_name("..");
        assert_eq!(browser.save_directory(), dir.path());
    }
}
