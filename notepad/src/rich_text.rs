//! Visual-only formatting: per-character styling on top of a plain buffer
//!
//! The editor's `String` stays the source of truth and is what gets saved.
//! `FormatLayer` keeps a parallel `Vec<CharStyle>` in step with it and turns
//! both into a `LayoutJob` for display. Styles never reach the disk.

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontFamily, FontId, Stroke};
use notecore::theme::NoteColors;
use std::ops::Range;
use std::sync::Arc;

pub const FONT_SIZES: [f32; 17] = [
    8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0, 34.0, 36.0, 38.0, 40.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontChoice {
    Proportional,
    Monospace,
}

impl FontChoice {
    pub fn family(self) -> FontFamily {
        match self {
            FontChoice::Proportional => FontFamily::Proportional,
            FontChoice::Monospace => FontFamily::Monospace,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontChoice::Proportional => "proportional",
            FontChoice::Monospace => "monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Style properties for a single character
#[derive(Debug, Clone, PartialEq)]
pub struct CharStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// `None` renders in the theme's text color.
    pub color: Option<Color32>,
    pub font: FontChoice,
    pub size: f32,
}

impl CharStyle {
    pub fn with_size(size: f32) -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            color: None,
            font: FontChoice::Proportional,
            size,
        }
    }

    fn text_format(&self) -> TextFormat {
        // egui fonts have no weight axis, so bold shows as a warmer,
        // slightly spaced-out face.
        let color = match (self.color, self.bold) {
            (Some(c), _) => c,
            (None, true) => NoteColors::TEXT_STRONG,
            (None, false) => NoteColors::TEXT,
        };
        TextFormat {
            font_id: FontId::new(self.size, self.font.family()),
            color,
            italics: self.italic,
            underline: if self.underline { Stroke::new(1.0, color) } else { Stroke::NONE },
            extra_letter_spacing: if self.bold { 0.6 } else { 0.0 },
            ..Default::default()
        }
    }
}

/// One formatting command's effect on a style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleChange {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Color(Color32),
    Font(FontChoice),
    Size(f32),
}

impl StyleChange {
    fn apply(self, style: &mut CharStyle) {
        match self {
            StyleChange::Bold(on) => style.bold = on,
            StyleChange::Italic(on) => style.italic = on,
            StyleChange::Underline(on) => style.underline = on,
            StyleChange::Color(c) => style.color = Some(c),
            StyleChange::Font(f) => style.font = f,
            StyleChange::Size(s) => style.size = s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormatLayer {
    /// One style per character of `last_text`.
    styles: Vec<CharStyle>,
    /// Text the styles were last aligned with.
    last_text: String,
    base: CharStyle,
    /// Style for the next typed character.
    pub cursor_style: CharStyle,
    pub alignment: Alignment,
}

impl FormatLayer {
    pub fn new(base_size: f32, text: &str) -> Self {
        let base = CharStyle::with_size(base_size);
        let mut layer = Self {
            styles: Vec::new(),
            last_text: String::new(),
            cursor_style: base.clone(),
            base,
            alignment: Alignment::default(),
        };
        layer.reset(text);
        layer
    }

    /// Forget all formatting; used when the buffer is replaced wholesale.
    pub fn reset(&mut self, text: &str) {
        self.styles = vec![self.base.clone(); text.chars().count()];
        self.last_text = text.to_string();
        self.cursor_style = self.base.clone();
    }

    pub fn style_at(&self, char_idx: usize) -> &CharStyle {
        self.styles.get(char_idx).unwrap_or(&self.cursor_style)
    }

    /// Bring styles in line with an edited buffer. The changed span is found
    /// by trimming the common prefix and suffix; inserted characters take
    /// the cursor style.
    pub fn text_changed(&mut self, new_text: &str) {
        let old: Vec<char> = self.last_text.chars().collect();
        let new: Vec<char> = new_text.chars().collect();
        self.styles.resize(old.len(), self.base.clone());

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let removed = prefix..old.len() - suffix;
        let inserted = new.len() - suffix - prefix;
        self.styles.splice(
            removed,
            std::iter::repeat(self.cursor_style.clone()).take(inserted),
        );
        self.last_text = new_text.to_string();
    }

    /// Typing after a cursor move continues the style of the character
    /// just before the cursor.
    pub fn follow_cursor(&mut self, char_idx: usize) {
        self.cursor_style = match char_idx.checked_sub(1).and_then(|i| self.styles.get(i)) {
            Some(style) => style.clone(),
            None => self.base.clone(),
        };
    }

    /// Apply `change` to `range` and to the cursor style.
    pub fn merge(&mut self, range: Range<usize>, change: StyleChange) {
        let end = range.end.min(self.styles.len());
        let start = range.start.min(end);
        for style in &mut self.styles[start..end] {
            change.apply(style);
        }
        change.apply(&mut self.cursor_style);
    }

    pub fn layout_job(&self, text: &str, wrap_width: f32) -> LayoutJob {
        let mut job = LayoutJob::default();
        job.wrap.max_width = wrap_width;
        job.justify = self.alignment == Alignment::Justify;

        let mut run_start = 0;
        let mut run_style: Option<&CharStyle> = None;
        for (i, (byte, _)) in text.char_indices().enumerate() {
            let style = self.style_at(i);
            match run_style {
                Some(current) if current == style => {}
                Some(current) => {
                    job.append(&text[run_start..byte], 0.0, current.text_format());
                    run_start = byte;
                    run_style = Some(style);
                }
                None => run_style = Some(style),
            }
        }
        let tail = run_style.unwrap_or(&self.cursor_style);
        job.append(&text[run_start..], 0.0, tail.text_format());
        job
    }

    /// Shift rows for center/right alignment. Layout is done left-aligned
    /// so row coordinates never go negative.
    pub fn align_galley(&self, galley: Arc<egui::Galley>, wrap_width: f32) -> Arc<egui::Galley> {
        let factor = match self.alignment {
            Alignment::Left | Alignment::Justify => return galley,
            Alignment::Center => 0.5,
            Alignment::Right => 1.0,
        };
        if !wrap_width.is_finite() {
            return galley;
        }

        let mut galley = (*galley).clone();
        let mut bounds = galley.mesh_bounds;
        for row in &mut galley.rows {
            let dx = ((wrap_width - row.rect.width()) * factor).max(0.0);
            if dx <= 0.0 {
                continue;
            }
            let delta = egui::vec2(dx, 0.0);
            row.rect = row.rect.translate(delta);
            for glyph in &mut row.glyphs {
                glyph.pos.x += dx;
            }
            row.visuals.mesh.translate(delta);
            row.visuals.mesh_bounds = row.visuals.mesh_bounds.translate(delta);
            bounds = bounds.union(row.visuals.mesh_bounds);
            galley.rect = galley.rect.union(row.rect);
        }
        galley.mesh_bounds = bounds;
        Arc::new(galley)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold_mask(layer: &FormatLayer, len: usize) -> String {
        (0..len).map(|i| if layer.style_at(i).bold { 'B' } else { '.' }).collect()
    }

    #[test]
    fn reset_gives_one_plain_style_per_char() {
        let layer = FormatLayer::new(16.0, "héllo");
        assert_eq!(layer.styles.len(), 5);
        assert!(layer.styles.iter().all(|s| *s == CharStyle::with_size(16.0)));
    }

    #[test]
    fn merge_applies_to_range_and_cursor_style() {
        let mut layer = FormatLayer::new(16.0, "hello world");
        layer.merge(6..11, StyleChange::Bold(true));
        assert_eq!(bold_mask(&layer, 11), "......BBBBB");
        assert!(layer.cursor_style.bold);
    }

    #[test]
    fn merge_clamps_out_of_range() {
        let mut layer = FormatLayer::new(16.0, "abc");
        layer.merge(2..99, StyleChange::Italic(true));
        assert!(layer.style_at(2).italic);
        layer.merge(50..60, StyleChange::Size(30.0));
        assert_eq!(layer.cursor_style.size, 30.0);
    }

    #[test]
    fn typing_in_the_middle_keeps_neighbours() {
        let mut layer = FormatLayer::new(16.0, "abcd");
        layer.merge(0..2, StyleChange::Bold(true)); // cursor style now bold
        layer.text_changed("abXYcd");
        assert_eq!(bold_mask(&layer, 6), "BBBB..");
    }

    #[test]
    fn deleting_removes_styles_of_deleted_chars() {
        let mut layer = FormatLayer::new(16.0, "abcdef");
        layer.merge(4..6, StyleChange::Underline(true));
        layer.text_changed("abef");
        let underlined: Vec<bool> = (0..4).map(|i| layer.style_at(i).underline).collect();
        assert_eq!(underlined, vec![false, false, true, true]);
    }

    #[test]
    fn replacing_repeated_chars_stays_aligned() {
        let mut layer = FormatLayer::new(16.0, "aaaa");
        layer.text_changed("aaa");
        assert_eq!(layer.styles.len(), 3);
        layer.text_changed("");
        assert!(layer.styles.is_empty());
        layer.text_changed("zz");
        assert_eq!(layer.styles.len(), 2);
    }

    #[test]
    fn cursor_follows_previous_char_style() {
        let mut layer = FormatLayer::new(16.0, "ab");
        layer.merge(0..1, StyleChange::Color(Color32::RED));
        layer.follow_cursor(1);
        assert_eq!(layer.cursor_style.color, Some(Color32::RED));
        layer.follow_cursor(2);
        assert_eq!(layer.cursor_style.color, None);
        layer.follow_cursor(0);
        assert_eq!(layer.cursor_style, CharStyle::with_size(16.0));
    }

    #[test]
    fn layout_job_groups_runs() {
        let mut layer = FormatLayer::new(16.0, "one two three");
        layer.merge(4..7, StyleChange::Font(FontChoice::Monospace));
        let job = layer.layout_job("one two three", 200.0);
        assert_eq!(job.text, "one two three");
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[1].byte_range, 4..7);
        assert_eq!(job.sections[1].format.font_id.family, FontFamily::Monospace);
        assert_eq!(job.wrap.max_width, 200.0);
    }

    #[test]
    fn layout_job_handles_multibyte_runs() {
        let mut layer = FormatLayer::new(16.0, "日本語");
        layer.merge(1..2, StyleChange::Italic(true));
        let job = layer.layout_job("日本語", 100.0);
        let ranges: Vec<_> = job.sections.iter().map(|s| s.byte_range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..9]);
    }

    #[test]
    fn justify_flag_follows_alignment() {
        let mut layer = FormatLayer::new(16.0, "x");
        assert!(!layer.layout_job("x", 100.0).justify);
        layer.alignment = Alignment::Justify;
        assert!(layer.layout_job("x", 100.0).justify);
    }
}
