//! Transparent Notepad - a frameless, see-through plain-text editor
//!
//! Uses egui's built-in `TextEdit::multiline` for editing. Formatting is
//! drawn through a custom layouter and never saved. Without OS decorations
//! the window moves and resizes through `WindowInteraction`, fed from the
//! raw pointer events of each frame.

use crate::command::Command;
use crate::file_dialog::{DialogResult, FileDialog};
use crate::rich_text::{Alignment, FontChoice, FormatLayer, StyleChange, FONT_SIZES};
use egui::{Color32, Context, Pos2, Vec2, ViewportCommand};
use notecore::document::APP_TITLE;
use notecore::selection;
use notecore::storage::home_dir_or_current;
use notecore::theme::{NoteColors, NoteTheme};
use notecore::widgets::{notice, toolbar_separator, window_control_buttons, PillButton, WindowAction};
use notecore::{
    Document, NotepadConfig, PathBar, PathBarItem, SaveOutcome, SessionCache, WindowEffect,
    WindowInteraction,
};
use std::ops::Range;

/// Pointer activity of one frame, in client-area points.
#[derive(Debug, Clone, Copy)]
enum PointerEvent {
    Press(Pos2, egui::PointerButton),
    Move(Pos2),
    Release,
}

/// Application state
pub struct NotepadApp {
    document: Document,
    cache: SessionCache,
    format: FormatLayer,
    path_bar: PathBar,
    interaction: WindowInteraction,
    theme: NoteTheme,
    /// Window title last sent to the window system.
    title: String,
    show_toolbar: bool,
    /// Last known editor selection, in characters.
    selection: Range<usize>,
    pick_color: Color32,
    font_size: f32,
    font: FontChoice,
    dialog: Option<FileDialog>,
    /// Modal warning for failed open/save.
    warning: Option<String>,
    /// Non-modal notice, currently only for the last-session mirror.
    notice: Option<String>,
}

impl NotepadApp {
    pub fn new(config: &NotepadConfig, cache: SessionCache) -> Self {
        let document = Document::recovered(&cache);
        let format = FormatLayer::new(config.editor_font_size, &document.content);
        let strategy = config.move_strategy.detect();
        log::info!("window move strategy: {:?}", strategy);

        Self {
            format,
            document,
            cache,
            path_bar: PathBar::new(&home_dir_or_current()),
            interaction: WindowInteraction::new(config.edge_margin, config.min_size(), strategy),
            theme: NoteTheme::with_tint(config.window_tint),
            title: APP_TITLE.to_string(),
            show_toolbar: true,
            selection: 0..0,
            pick_color: Color32::WHITE,
            font_size: config.editor_font_size,
            font: FontChoice::Proportional,
            dialog: None,
            warning: None,
            notice: None,
        }
    }

    // ---------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------

    fn execute(&mut self, ctx: &Context, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::Bold => {
                let on = !self.format.cursor_style.bold;
                self.apply_format(StyleChange::Bold(on));
            }
            Command::Italic => {
                let on = !self.format.cursor_style.italic;
                self.apply_format(StyleChange::Italic(on));
            }
            Command::Underline => {
                let on = !self.format.cursor_style.underline;
                self.apply_format(StyleChange::Underline(on));
            }
            Command::SetColor(color) => self.apply_format(StyleChange::Color(color)),
            Command::SetFontFamily(font) => {
                self.font = font;
                self.apply_format(StyleChange::Font(font));
            }
            Command::SetFontSize(size) => {
                self.font_size = size;
                self.apply_format(StyleChange::Size(size));
            }
            Command::Align(alignment) => self.format.alignment = alignment,
            Command::OpenFile => self.dialog = Some(FileDialog::open(home_dir_or_current())),
            Command::SaveFile => self.save(ctx),
            Command::SaveFileAs => self.show_save_as_dialog(),
            Command::NavigateTo(path) => self.path_bar.rebuild(&path),
            Command::ToggleToolbar => self.show_toolbar = !self.show_toolbar,
            Command::Minimize => ctx.send_viewport_cmd(ViewportCommand::Minimized(true)),
            Command::Close => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }

    fn apply_format(&mut self, change: StyleChange) {
        let target = selection::format_target(&self.document.content, self.selection.clone());
        self.format.merge(target, change);
    }

    // ---------------------------------------------------------------
    // Document I/O
    // ---------------------------------------------------------------

    fn open_file(&mut self, ctx: &Context, path: &std::path::Path) {
        match self.document.open(path) {
            Ok(()) => {
                self.format.reset(&self.document.content);
                self.selection = 0..0;
                self.file_changed(ctx);
            }
            Err(e) => {
                log::warn!("could not open {}: {}", path.display(), e);
                self.warning = Some(format!("Could not open the file:\n{}", e));
            }
        }
    }

    fn save(&mut self, ctx: &Context) {
        let outcome = self.document.save(&self.cache);
        self.handle_save_outcome(ctx, outcome);
    }

    fn save_to(&mut self, ctx: &Context, path: std::path::PathBuf) {
        let outcome = self.document.save_as(path, &self.cache);
        self.handle_save_outcome(ctx, outcome);
    }

    fn handle_save_outcome(&mut self, ctx: &Context, outcome: SaveOutcome) {
        if let Some(cache) = outcome.cache_result() {
            self.notice = cache
                .as_ref()
                .err()
                .map(|e| format!("last-session copy not written: {}", e));
        }
        match outcome {
            SaveOutcome::NeedsPath => self.show_save_as_dialog(),
            SaveOutcome::Saved { .. } => self.file_changed(ctx),
            SaveOutcome::Failed { error, .. } => {
                self.warning = Some(format!("Could not save the file:\n{}", error));
            }
        }
    }

    /// After a successful open or save: retitle and point the path bar at
    /// the file's folder.
    fn file_changed(&mut self, ctx: &Context) {
        let title = self.document.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.title = title;
        }
        if let Some(dir) = self.document.directory() {
            self.path_bar.rebuild(dir);
        }
    }

    fn show_save_as_dialog(&mut self) {
        self.dialog = Some(FileDialog::save(
            home_dir_or_current(),
            self.document.suggested_file_name(),
        ));
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    /// Pull our shortcuts out of the event stream before the editor sees
    /// them. Everything else, undo/redo included, goes to the TextEdit.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let mut commands = Vec::new();
        ctx.input_mut(|i| {
            i.events.retain(|event| match event {
                egui::Event::Key { key, pressed: true, modifiers, .. } => {
                    match Command::from_shortcut(*key, *modifiers) {
                        Some(command) => {
                            commands.push(command);
                            false
                        }
                        None => true,
                    }
                }
                _ => true,
            });
        });
        for command in commands {
            self.execute(ctx, command);
        }
    }

    /// Route pointer events to the window interaction controller.
    /// `chrome_hovered` is true when the pointer is over the window
    /// background rather than a widget.
    fn handle_pointer(&mut self, ctx: &Context, chrome_hovered: bool) {
        let (events, inner, outer, any_down) = ctx.input(|i| {
            let events: Vec<PointerEvent> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerButton { pos, button, pressed: true, .. } => {
                        Some(PointerEvent::Press(*pos, *button))
                    }
                    egui::Event::PointerButton { pressed: false, .. } => Some(PointerEvent::Release),
                    egui::Event::PointerMoved(pos) => Some(PointerEvent::Move(*pos)),
                    _ => None,
                })
                .collect();
            let viewport = i.viewport();
            (events, viewport.inner_rect, viewport.outer_rect, i.pointer.any_down())
        });

        let Some(client) = inner else {
            return;
        };
        let frame = outer.unwrap_or(client);
        let to_screen = |local: Pos2| client.min + local.to_vec2();
        let mut released = false;

        for event in events {
            let effect = match event {
                PointerEvent::Press(local, button) if chrome_hovered => {
                    self.interaction.press(button, local, to_screen(local), frame, client)
                }
                PointerEvent::Press(..) => None,
                PointerEvent::Move(local) => {
                    self.interaction.pointer_moved(local, to_screen(local), client.size())
                }
                PointerEvent::Release => {
                    self.interaction.release();
                    released = true;
                    None
                }
            };
            if let Some(effect) = effect {
                apply_window_effect(ctx, effect);
            }
        }

        // The button came up outside the window, or the compositor ate it.
        if self.interaction.is_active() && !any_down && !released {
            self.interaction.release();
        }

        if self.interaction.is_active() || chrome_hovered {
            ctx.set_cursor_icon(self.interaction.cursor().icon());
        }
    }

    // ---------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------

    fn render_title_bar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        NoteTheme::bar_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("TransparentNotes").strong().color(NoteColors::TEXT));
                if let Some(text) = &self.notice {
                    notice(ui, text);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match window_control_buttons(ui) {
                        WindowAction::Close => commands.push(Command::Close),
                        WindowAction::Minimize => commands.push(Command::Minimize),
                        WindowAction::None => {}
                    }
                });
            });
        });
    }

    fn render_path_bar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        NoteTheme::bar_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::ScrollArea::horizontal()
                .id_source("path_bar")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for item in self.path_bar.items() {
                            match item {
                                PathBarItem::Segment(segment) => {
                                    if ui.add(PillButton::new(segment.label.as_str())).clicked() {
                                        commands.push(Command::NavigateTo(segment.path.clone()));
                                    }
                                }
                                PathBarItem::NewPath => {
                                    let plus = PillButton::new("+").fixed(28.0).tooltip("save as…");
                                    if ui.add(plus).clicked() {
                                        commands.push(Command::SaveFileAs);
                                    }
                                }
                            }
                        }
                    });
                });
        });
    }

    /// Formatting toolbar plus its collapse toggle.
    fn render_toolbar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            if self.show_toolbar {
                NoteTheme::bar_frame().show(ui, |ui| {
                    ui.horizontal(|ui| self.render_toolbar_contents(ui, commands));
                });
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let arrow = if self.show_toolbar { "▲" } else { "▼" };
                if ui.add(PillButton::new(arrow).fixed(28.0)).clicked() {
                    commands.push(Command::ToggleToolbar);
                }
            });
        });
    }

    fn render_toolbar_contents(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        let style = &self.format.cursor_style;
        let toggles = [
            (egui::RichText::new("B").strong(), style.bold, Command::Bold, "bold"),
            (egui::RichText::new("I").italics(), style.italic, Command::Italic, "italic"),
            (egui::RichText::new("U").underline(), style.underline, Command::Underline, "underline"),
        ];
        for (text, on, command, tip) in toggles {
            if ui.add(PillButton::new(text).selected(on).fixed(28.0).tooltip(tip)).clicked() {
                commands.push(command);
            }
        }

        toolbar_separator(ui);

        if ui.color_edit_button_srgba(&mut self.pick_color).changed() {
            commands.push(Command::SetColor(self.pick_color));
        }

        egui::ComboBox::from_id_source("font_family")
            .selected_text(self.font.label())
            .width(110.0)
            .show_ui(ui, |ui| {
                for font in [FontChoice::Proportional, FontChoice::Monospace] {
                    if ui.selectable_label(self.font == font, font.label()).clicked() {
                        commands.push(Command::SetFontFamily(font));
                    }
                }
            });

        egui::ComboBox::from_id_source("font_size")
            .selected_text(format!("{}", self.font_size as u32))
            .width(48.0)
            .show_ui(ui, |ui| {
                for size in FONT_SIZES {
                    let selected = (self.font_size - size).abs() < f32::EPSILON;
                    if ui.selectable_label(selected, format!("{}", size as u32)).clicked() {
                        commands.push(Command::SetFontSize(size));
                    }
                }
            });

        toolbar_separator(ui);

        let alignments = [
            ("⬅", Alignment::Left, "align left"),
            ("↔", Alignment::Center, "center"),
            ("➡", Alignment::Right, "align right"),
            ("☰", Alignment::Justify, "justify"),
        ];
        for (icon, alignment, tip) in alignments {
            let selected = self.format.alignment == alignment;
            if ui.add(PillButton::new(icon).selected(selected).fixed(28.0).tooltip(tip)).clicked() {
                commands.push(Command::Align(alignment));
            }
        }

        toolbar_separator(ui);

        if ui.add(PillButton::new("📂").fixed(28.0).tooltip("open  ctrl+o")).clicked() {
            commands.push(Command::OpenFile);
        }
        if ui.add(PillButton::new("💾").fixed(28.0).tooltip("save  ctrl+s")).clicked() {
            commands.push(Command::SaveFile);
        }
    }

    /// Render the editor using egui's built-in TextEdit::multiline
    fn render_editor(&mut self, ui: &mut egui::Ui) {
        NoteTheme::editor_frame().show(ui, |ui| {
            let available = ui.available_size();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let format = &self.format;
                    let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
                        let job = format.layout_job(text, wrap_width);
                        let galley = ui.fonts(|f| f.layout_job(job));
                        format.align_galley(galley, wrap_width)
                    };

                    let output = egui::TextEdit::multiline(&mut self.document.content)
                        .id(egui::Id::new("editor"))
                        .frame(false)
                        .lock_focus(true)
                        .desired_width(available.x)
                        .desired_rows((available.y / 20.0).max(4.0) as usize)
                        .layouter(&mut layouter)
                        .show(ui);

                    if output.response.changed() {
                        self.format.text_changed(&self.document.content);
                        ui.ctx().request_repaint();
                    }

                    if let Some(range) = output.cursor_range {
                        let current =
                            selection::ordered(range.primary.ccursor.index, range.secondary.ccursor.index);
                        if !output.response.changed() && current != self.selection {
                            self.format.follow_cursor(current.start);
                        }
                        self.selection = current;
                    }
                });
        });
    }

    fn render_warning(&mut self, ctx: &Context) {
        let Some(message) = self.warning.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.add(PillButton::new("ok")).clicked() {
                        self.warning = None;
                    }
                });
            });
    }

    fn render_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let result = dialog.show(ctx);
        if !dialog.is_open() {
            self.dialog = None;
        }
        match result {
            Some(DialogResult::Open(path)) => self.open_file(ctx, &path),
            Some(DialogResult::Save(path)) => self.save_to(ctx, path),
            None => {}
        }
    }
}

fn apply_window_effect(ctx: &Context, effect: WindowEffect) {
    match effect {
        WindowEffect::MoveTo(pos) => ctx.send_viewport_cmd(ViewportCommand::OuterPosition(pos)),
        WindowEffect::ResizeTo(size) => ctx.send_viewport_cmd(ViewportCommand::InnerSize(size)),
        WindowEffect::BeginSystemMove => ctx.send_viewport_cmd(ViewportCommand::StartDrag),
        WindowEffect::BeginSystemResize => ctx.send_viewport_cmd(ViewportCommand::BeginResize(
            egui::viewport::ResizeDirection::SouthEast,
        )),
    }
}

impl eframe::App for NotepadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        let dropped: Option<std::path::PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.open_file(ctx, &path);
        }

        let mut commands = Vec::new();
        let mut chrome_hovered = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                // Background surface: anything not claimed by a widget drags
                // the window. Registered first so widgets sit on top of it.
                let chrome = ui.interact(
                    ui.max_rect(),
                    egui::Id::new("window_chrome"),
                    egui::Sense::click(),
                );

                self.theme.window_frame().show(ui, |ui| {
                    ui.set_min_size(ui.available_size());
                    self.render_title_bar(ui, &mut commands);
                    self.render_path_bar(ui, &mut commands);
                    self.render_toolbar(ui, &mut commands);
                    self.render_editor(ui);
                });

                chrome_hovered = chrome.hovered();
            });

        self.handle_pointer(ctx, chrome_hovered);

        for command in commands {
            self.execute(ctx, command);
        }

        self.render_dialog(ctx);
        self.render_warning(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// Window icon: a translucent rounded page with three text lines.
pub fn app_icon() -> egui::IconData {
    const SIDE: u32 = 32;
    let mut rgba = Vec::with_capacity((SIDE * SIDE * 4) as usize);
    let radius = 6.0_f32;
    let inner = Vec2::splat(SIDE as f32 / 2.0 - radius);

    for y in 0..SIDE {
        for x in 0..SIDE {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - Vec2::splat(SIDE as f32 / 2.0);
            let corner = (p.abs() - inner).max(Vec2::ZERO);
            let inside = corner.length() <= radius;
            let line = (8..=24).contains(&x) && matches!(y, 10 | 15 | 20);
            let pixel = match (inside, line) {
                (false, _) => [0, 0, 0, 0],
                (true, true) => [255, 255, 255, 255],
                (true, false) => [30, 30, 36, 190],
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    egui::IconData { rgba, width: SIDE, height: SIDE }
}
