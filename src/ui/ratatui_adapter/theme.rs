//! Color theme definitions for the ratatui prompt
//!
//! Defines colors and styles used by the prompt widgets.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the prompt
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub selection_bg: Color,
    /// Color for the cursor indicator
    pub cursor: Color,
    /// Color for the message
    pub message: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for the loading indicator
    pub loading: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Indexed(236),
            cursor: Color::Cyan,
            message: Color::White,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
            loading: Color::Yellow,
        }
    }

    /// Style for the highlighted row
    ///
    /// Only the background changes so per-cell colors stay visible.
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the prompt message
    #[must_use]
    pub fn message_style(&self) -> Style {
        Style::default()
            .fg(self.message)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for the loading indicator
    #[must_use]
    pub fn loading_style(&self) -> Style {
        Style::default()
            .fg(self.loading)
            .add_modifier(Modifier::ITALIC)
    }
}
