//! Custom widgets: rounded, translucent pills

use crate::theme::NoteColors;
use egui::{Response, Ui, Widget};

/// Action returned by window control buttons
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowAction {
    None,
    Close,
    Minimize,
}

/// Draw minimize and close buttons, in that order, at the right of the
/// title bar. Call from a right-to-left layout so close ends up outermost.
pub fn window_control_buttons(ui: &mut Ui) -> WindowAction {
    let mut action = WindowAction::None;
    if ui.add(PillButton::new("✕").danger().fixed(28.0)).clicked() {
        action = WindowAction::Close;
    }
    if ui.add(PillButton::new("–").fixed(28.0)).clicked() {
        action = WindowAction::Minimize;
    }
    action
}

/// A button: translucent white fill, rounded, no outline. Red variant for
/// destructive actions; a brighter fill when selected.
pub struct PillButton<'a> {
    text: egui::WidgetText,
    selected: bool,
    danger: bool,
    fixed: Option<f32>,
    tooltip: Option<&'a str>,
}

impl<'a> PillButton<'a> {
    pub fn new(text: impl Into<egui::WidgetText>) -> Self {
        Self {
            text: text.into(),
            selected: false,
            danger: false,
            fixed: None,
            tooltip: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    /// Square button of the given side length.
    pub fn fixed(mut self, side: f32) -> Self {
        self.fixed = Some(side);
        self
    }

    pub fn tooltip(mut self, text: &'a str) -> Self {
        self.tooltip = Some(text);
        self
    }
}

impl<'a> Widget for PillButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let galley = self.text.into_galley(
            ui,
            Some(false),
            f32::INFINITY,
            egui::TextStyle::Button,
        );
        let padding = ui.spacing().button_padding;
        let desired_size = match self.fixed {
            Some(side) => egui::vec2(side, side),
            None => egui::vec2(
                galley.size().x + padding.x * 2.0,
                (galley.size().y + padding.y * 2.0).max(ui.spacing().interact_size.y),
            ),
        };
        let (rect, response) = ui.allocate_exact_size(desired_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let hovered = response.hovered() || response.is_pointer_button_down_on();
            let fill = match (self.danger, hovered || self.selected) {
                (true, true) => NoteColors::CLOSE_HOVER,
                (true, false) => NoteColors::CLOSE,
                (false, true) => NoteColors::BUTTON_HOVER,
                (false, false) => NoteColors::BUTTON,
            };
            ui.painter().rect_filled(rect, 6.0, fill);
            let text_pos = rect.center() - galley.size() / 2.0;
            ui.painter().galley(text_pos, galley, NoteColors::TEXT);
        }

        match self.tooltip {
            Some(tip) => response.on_hover_text(tip),
            None => response,
        }
    }
}

/// Toolbar separator (thin vertical line)
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(9.0, height), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range().shrink(3.0),
            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(60)),
        );
    }
}

/// Small non-modal message in a bar, e.g. a failed background write.
pub fn notice(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).small().color(NoteColors::NOTICE));
}
