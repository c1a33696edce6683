//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the message and the query with cursor
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Byte position of the cursor in the query
    cursor: usize,
    /// Prompt message, shown as the block title
    message: &'a str,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            message,
            theme,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(Span::styled(format!(" {} ", self.message), self.theme.message_style()));

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let (before, after) = self.query.split_at(self.cursor.min(self.query.len()));

        let line = Line::from(vec![
            Span::styled("›", self.theme.cursor_style()),
            Span::raw(" "),
            Span::raw(before),
            cursor,
            Span::raw(after),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
