//! Choice list widget for displaying the latest candidate snapshot

use crate::layout::{Cell, Row, SEPARATOR};
use crate::ui::ratatui_adapter::state::PromptState;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Map a row color onto the terminal palette
#[must_use]
pub fn to_ratatui_color(color: colored::Color) -> Color {
    use colored::Color as C;

    match color {
        C::Black => Color::Black,
        C::Red => Color::Red,
        C::Green => Color::Green,
        C::Yellow => Color::Yellow,
        C::Blue => Color::Blue,
        C::Magenta => Color::Magenta,
        C::Cyan => Color::Cyan,
        C::White => Color::Gray,
        C::BrightBlack => Color::DarkGray,
        C::BrightRed => Color::LightRed,
        C::BrightGreen => Color::LightGreen,
        C::BrightYellow => Color::LightYellow,
        C::BrightBlue => Color::LightBlue,
        C::BrightMagenta => Color::LightMagenta,
        C::BrightCyan => Color::LightCyan,
        C::BrightWhite => Color::White,
        C::TrueColor { r, g, b } => Color::Rgb(r, g, b),
        #[allow(unreachable_patterns)]
        _ => Color::Reset,
    }
}

fn cell_span(cell: &Cell) -> Span<'_> {
    match cell.color {
        Some(color) => Span::styled(cell.text.as_str(), Style::default().fg(to_ratatui_color(color))),
        None => Span::raw(cell.text.as_str()),
    }
}

/// Spans of a rendered row, separators included
#[must_use]
pub fn row_spans(row: &Row) -> Vec<Span<'_>> {
    let mut spans = Vec::with_capacity(row.cells().len() * 2);
    for (i, cell) in row.cells().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(cell_span(cell));
    }
    spans
}

/// Choice list widget with a cursor indicator
pub struct ChoiceList<'a, T> {
    state: &'a PromptState<T>,
    theme: &'a Theme,
}

impl<'a, T> ChoiceList<'a, T> {
    /// Create a new choice list widget
    #[must_use]
    pub const fn new(state: &'a PromptState<T>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn title(&self) -> Span<'static> {
        let count = self.state.choices.iter().filter(|c| c.is_selectable()).count();
        if self.state.loading {
            Span::styled(format!(" {count} loaded, searching… "), self.theme.loading_style())
        } else {
            Span::styled(format!(" {count} "), self.theme.dimmed_style())
        }
    }
}

impl<T> Widget for ChoiceList<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(self.theme.border_style())
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let start = self.state.scroll_offset;
        let end = (start + inner.height as usize).min(self.state.choices.len());

        let items: Vec<ListItem> = self.state.choices[start.min(end)..end]
            .iter()
            .enumerate()
            .map(|(offset, choice)| {
                let is_cursor = start + offset == self.state.cursor;

                let mut spans = vec![
                    Span::styled(if is_cursor { ">" } else { " " }, self.theme.cursor_style()),
                    Span::raw(" "),
                ];
                spans.extend(row_spans(&choice.title));

                let item = ListItem::new(Line::from(spans));
                if is_cursor {
                    item.style(self.theme.selected_style())
                } else {
                    item
                }
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_spans_keep_separator_and_colors() {
        let row = Row::new(vec![
            Cell::plain("web"),
            Cell {
                text: "Running".into(),
                color: Some(colored::Color::Green),
            },
        ]);
        let spans = row_spans(&row);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, SEPARATOR);
        assert_eq!(spans[2].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_ratatui_color(colored::Color::BrightBlack), Color::DarkGray);
        assert_eq!(
            to_ratatui_color(colored::Color::TrueColor { r: 1, g: 2, b: 3 }),
            Color::Rgb(1, 2, 3)
        );
    }
}
