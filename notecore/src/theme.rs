//! Translucent theme
//!
//! White text over dark, see-through panels. The window itself is cleared
//! to full transparency; every visible surface is a tinted frame.

use egui::{Color32, FontFamily, FontId, Margin, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct NoteColors;

impl NoteColors {
    pub const TEXT: Color32 = Color32::WHITE;
    pub const TEXT_STRONG: Color32 = Color32::from_rgb(255, 236, 170);
    pub const BAR: Color32 = Color32::from_black_alpha(64);
    pub const EDITOR: Color32 = Color32::from_rgba_premultiplied(18, 18, 18, 18);
    pub const BUTTON: Color32 = Color32::from_rgba_premultiplied(38, 38, 38, 38);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgba_premultiplied(64, 64, 64, 64);
    pub const CLOSE: Color32 = Color32::from_rgba_premultiplied(102, 0, 0, 102);
    pub const CLOSE_HOVER: Color32 = Color32::from_rgba_premultiplied(204, 0, 0, 204);
    pub const NOTICE: Color32 = Color32::from_rgb(255, 190, 120);
}

/// Theme configuration for the notepad
pub struct NoteTheme {
    pub font_size_body: f32,
    pub font_size_title: f32,
    pub font_size_small: f32,
    pub item_spacing: f32,
    /// Alpha of the wash behind the whole window.
    pub window_tint: u8,
}

impl Default for NoteTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_title: 14.0,
            font_size_small: 11.0,
            item_spacing: 4.0,
            window_tint: 40,
        }
    }
}

impl NoteTheme {
    pub fn with_tint(window_tint: u8) -> Self {
        Self { window_tint, ..Self::default() }
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_title, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();
        visuals.override_text_color = Some(NoteColors::TEXT);
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = Color32::from_rgba_premultiplied(20, 20, 24, 235);
        visuals.extreme_bg_color = Color32::TRANSPARENT;
        visuals.window_rounding = Rounding::same(8.0);
        visuals.menu_rounding = Rounding::same(6.0);
        visuals.window_stroke = Stroke::new(1.0, Color32::from_white_alpha(40));

        let translucent = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, NoteColors::TEXT);
            ws.rounding = Rounding::same(6.0);
        };
        translucent(&mut visuals.widgets.inactive, NoteColors::BUTTON);
        translucent(&mut visuals.widgets.hovered, NoteColors::BUTTON_HOVER);
        translucent(&mut visuals.widgets.active, NoteColors::BUTTON_HOVER);
        translucent(&mut visuals.widgets.open, NoteColors::BUTTON_HOVER);

        visuals.selection.bg_fill = Color32::from_rgba_premultiplied(60, 90, 140, 160);
        visuals.selection.stroke = Stroke::new(1.0, NoteColors::TEXT);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        // Labels are window chrome: a press on them drags the window.
        style.interaction.selectable_labels = false;

        ctx.set_style(style);
    }

    /// Wash behind all content; also the surface that starts drag gestures.
    pub fn window_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(Color32::from_black_alpha(self.window_tint))
            .rounding(Rounding::same(10.0))
            .inner_margin(Margin::same(6.0))
    }

    /// Title, path and toolbar rows.
    pub fn bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(NoteColors::BAR)
            .rounding(Rounding::same(8.0))
            .inner_margin(Margin::same(4.0))
    }

    pub fn editor_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(NoteColors::EDITOR)
            .rounding(Rounding::same(8.0))
            .inner_margin(Margin::same(12.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_colors_are_premultiplied_white() {
        for (color, alpha) in [
            (NoteColors::EDITOR, 18),
            (NoteColors::BUTTON, 38),
            (NoteColors::BUTTON_HOVER, 64),
        ] {
            assert_eq!(color.a(), alpha);
            assert_eq!([color.r(), color.g(), color.b()], [alpha; 3]);
        }
    }

    #[test]
    fn apply_makes_labels_part_of_the_chrome() {
        let ctx = egui::Context::default();
        NoteTheme::default().apply(&ctx);
        let style = ctx.style();
        assert!(!style.interaction.selectable_labels);
        assert_eq!(style.visuals.panel_fill, Color32::TRANSPARENT);
    }
}
