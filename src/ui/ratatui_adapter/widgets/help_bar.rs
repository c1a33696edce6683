//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Enter", "ctrl+u")
    pub key: &'static str,
    /// Action description (e.g., "confirm")
    pub action: &'static str,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints shown under the choice list
pub const PROMPT_HINTS: &[KeyHint] = &[
    KeyHint::new("↑/↓", "navigate"),
    KeyHint::new("Enter", "confirm"),
    KeyHint::new("ctrl+u", "clear"),
    KeyHint::new("ESC", "cancel"),
];

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    /// Text shown at the left, before the hints
    status: Option<Span<'a>>,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            status: None,
        }
    }

    /// Show a status span before the hints
    #[must_use]
    pub fn status(mut self, status: Span<'a>) -> Self {
        self.status = Some(status);
        self
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        if let Some(status) = self.status {
            spans.push(status);
            spans.push(Span::styled("  │  ", self.theme.dimmed_style()));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::styled(hint.action, self.theme.dimmed_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
