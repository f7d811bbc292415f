//! Open/save dialog window over the in-app file browser.

use egui::Context;
use notecore::storage::FileBrowser;
use notecore::theme::NoteTheme;
use notecore::widgets::PillButton;
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, Debug)]
enum DialogMode {
    Open,
    Save,
}

/// What the user picked. Closing the dialog any other way yields nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult {
    Open(PathBuf),
    Save(PathBuf),
}

pub struct FileDialog {
    browser: FileBrowser,
    mode: DialogMode,
    filename: String,
    open: bool,
}

fn text_browser(start_dir: PathBuf) -> FileBrowser {
    FileBrowser::new(start_dir, "txt")
}

/// Append `.txt` unless the name already ends in it (any case).
pub fn with_txt_extension(name: &str) -> String {
    let name = name.trim();
    if name.to_lowercase().ends_with(".txt") {
        name.to_string()
    } else {
        format!("{}.txt", name)
    }
}

impl FileDialog {
    pub fn open(start_dir: PathBuf) -> Self {
        Self {
            browser: text_browser(start_dir),
            mode: DialogMode::Open,
            filename: String::new(),
            open: true,
        }
    }

    pub fn save(start_dir: PathBuf, suggested_name: String) -> Self {
        Self {
            browser: text_browser(start_dir),
            mode: DialogMode::Save,
            filename: suggested_name,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn finish(&mut self) -> Option<DialogResult> {
        match self.mode {
            DialogMode::Open => {
                let entry = self.browser.selected_entry()?;
                if entry.is_directory {
                    return None;
                }
                let path = entry.path.clone();
                self.open = false;
                Some(DialogResult::Open(path))
            }
            DialogMode::Save => {
                if self.filename.trim().is_empty() {
                    return None;
                }
                let path = self.browser.save_directory().join(with_txt_extension(&self.filename));
                self.open = false;
                Some(DialogResult::Save(path))
            }
        }
    }

    pub fn show(&mut self, ctx: &Context) -> Option<DialogResult> {
        let title = match self.mode {
            DialogMode::Open => "Open file",
            DialogMode::Save => "Save as",
        };
        let mut result = None;
        let mut still_open = self.open;

        egui::Window::new(title)
            .open(&mut still_open)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                NoteTheme::bar_frame().show(ui, |ui| {
                    ui.label(self.browser.current_dir().display().to_string());
                });
                ui.add_space(4.0);

                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    let entries = self.browser.entries().to_vec();
                    for (idx, entry) in entries.iter().enumerate() {
                        let icon = if entry.is_directory { "📁" } else { "📄" };
                        let selected = self.browser.selected_index() == Some(idx);
                        let response =
                            ui.selectable_label(selected, format!("{} {}", icon, entry.name));
                        if response.clicked() {
                            self.browser.select(idx);
                            if !entry.is_directory && self.mode == DialogMode::Save {
                                self.filename = entry.name.clone();
                            }
                        }
                        if response.double_clicked() {
                            if entry.is_directory {
                                self.browser.navigate_to(entry.path.clone());
                            } else {
                                result = self.finish();
                            }
                        }
                    }
                });

                if self.mode == DialogMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("file name:");
                        ui.text_edit_singleline(&mut self.filename);
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.add(PillButton::new("cancel")).clicked() {
                        self.open = false;
                    }
                    let action = match self.mode {
                        DialogMode::Open => "open",
                        DialogMode::Save => "save",
                    };
                    if ui.add(PillButton::new(action)).clicked() {
                        result = self.finish();
                    }
                });
            });

        if !still_open {
            self.open = false;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_extension_added_once() {
        assert_eq!(with_txt_extension("draft"), "draft.txt");
        assert_eq!(with_txt_extension("draft.txt"), "draft.txt");
        assert_eq!(with_txt_extension(" Notes.TXT "), "Notes.TXT");
    }

    #[test]
    fn save_joins_browser_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut dialog = FileDialog::save(dir.path().to_path_buf(), "draft".to_string());
        assert_eq!(dialog.finish(), Some(DialogResult::Save(dir.path().join("draft.txt"))));
        assert!(!dialog.is_open());
    }

    #[test]
    fn save_with_blank_name_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut dialog = FileDialog::save(dir.path().to_path_buf(), "   ".to_string());
        assert_eq!(dialog.finish(), None);
        assert!(dialog.is_open());
    }

    #[test]
    fn open_needs_a_selected_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        let mut dialog = FileDialog::open(dir.path().to_path_buf());
        assert_eq!(dialog.finish(), None);

        dialog.browser.select_by_name("a.txt");
        assert_eq!(dialog.finish(), Some(DialogResult::Open(dir.path().join("a.txt"))));
    }
}
