//! Transparent Notepad - a translucent, frameless plain-text notepad
//!
//! Reopens whatever was last saved, from a copy kept in the home directory.

mod app;
mod command;
mod file_dialog;
mod rich_text;

use app::NotepadApp;
use eframe::NativeOptions;
use notecore::document::APP_TITLE;
use notecore::storage::LAST_SESSION_FILE;
use notecore::{NoteTheme, NotepadConfig, SessionCache};
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = NotepadConfig::default_path();
    let config = NotepadConfig::load_or_default(&config_path);
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            log::warn!("could not write default config to {}: {}", config_path.display(), e);
        }
    }

    let cache = SessionCache::in_home().unwrap_or_else(|e| {
        log::warn!("no home directory ({}), keeping last session in working directory", e);
        SessionCache::new(PathBuf::from(LAST_SESSION_FILE))
    });

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.initial_size())
            .with_min_inner_size(config.min_size())
            .with_decorations(false)
            .with_transparent(true)
            .with_title(APP_TITLE)
            .with_icon(app::app_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "notepad",
        options,
        Box::new(move |cc| {
            NoteTheme::with_tint(config.window_tint).apply(&cc.egui_ctx);
            Box::new(NotepadApp::new(&config, cache))
        }),
    )
}
