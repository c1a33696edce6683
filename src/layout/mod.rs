//! Row layout engine
//!
//! Turns a list of [`ColumnSpec`]s and a terminal width into fixed column
//! widths, then renders items into single-line [`Row`]s.
//!
//! # Sizing
//!
//! 1. Every column reserves `max(min_width, width)` plus a two-space separator.
//! 2. While the reservation exceeds the available width (terminal width minus
//!    [`MARGIN`]), the *last* column absorbs the excess if it can, otherwise it
//!    is dropped and the next-to-last column is considered.
//! 3. Leftover width goes to columns without a fixed `width`, in proportion
//!    to their `grow` weight (default 1), rounded down.
//!
//! A rendered row is therefore never wider than the terminal.

mod column;
pub mod time;

pub use column::{ColorMap, ColumnSpec, Format, OTHER, value_at_path, value_text};

use chrono::{DateTime, Utc};
use colored::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text between two columns
pub const SEPARATOR: &str = "  ";

/// Columns kept free at the right edge of the terminal
pub const MARGIN: usize = 4;

/// Text shown in `show_recent` columns for recent items
pub const RECENT_MARKER: &str = "(recent)";

/// Color of the recent marker
pub const RECENT_COLOR: Color = Color::Magenta;

/// Color of placeholder rows
pub const MUTED_COLOR: Color = Color::BrightBlack;

const ELLIPSIS: char = '…';

/// One rendered column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Text already fitted to the column width
    pub text: String,
    /// Foreground color, if any
    pub color: Option<Color>,
}

impl Cell {
    /// Uncolored cell
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }
}

/// A rendered, single-line row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Row made of the given cells
    #[must_use]
    pub const fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Single gray cell, used for non-selectable placeholder rows
    #[must_use]
    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(vec![Cell {
            text: text.into(),
            color: Some(MUTED_COLOR),
        }])
    }

    /// The cells of this row
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text without color codes
    #[must_use]
    pub fn plain(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.text.as_str())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Display width in terminal columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.plain().width()
    }
}

/// Fit `text` to exactly `width` terminal columns
///
/// Control characters become spaces so the row stays on one line. Short text
/// is padded with spaces. Long text keeps a left and a right part joined by a
/// single ellipsis.
#[must_use]
pub fn fit_to_width(text: &str, width: usize) -> String {
    let text: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let text = text.as_str();
    let text_width = text.width();
    if text_width <= width {
        let mut fitted = text.to_string();
        fitted.push_str(&" ".repeat(width - text_width));
        return fitted;
    }
    if width == 0 {
        return String::new();
    }

    let left_budget = width / 2;
    let right_budget = width - left_budget - 1;

    let mut left = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > left_budget {
            break;
        }
        used += w;
        left.push(c);
    }

    let mut right: Vec<char> = Vec::new();
    let mut used_right = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used_right + w > right_budget {
            break;
        }
        used_right += w;
        right.push(c);
    }
    right.reverse();

    let mut fitted = left;
    fitted.push(ELLIPSIS);
    fitted.extend(right);

    // Wide characters can leave a gap on either side of the ellipsis
    let fitted_width = fitted.width();
    fitted.push_str(&" ".repeat(width.saturating_sub(fitted_width)));
    fitted
}

/// Computed widths for one set of columns at one terminal width
#[derive(Debug)]
pub struct RowLayout<T> {
    columns: Vec<ColumnSpec<T>>,
    widths: Vec<usize>,
}

impl<T> RowLayout<T> {
    /// Compute column widths for a terminal `terminal_width` columns wide
    #[must_use]
    pub fn new(columns: Vec<ColumnSpec<T>>, terminal_width: usize) -> Self {
        let mut columns = columns;
        for column in &mut columns {
            if let Some(width) = column.format.implicit_width() {
                column.width = Some(width);
            }
        }

        let available = terminal_width.saturating_sub(MARGIN);
        let reserved = |c: &ColumnSpec<T>| c.min_width.unwrap_or(0).max(c.width.unwrap_or(0));

        let mut fixed_width: usize = columns
            .iter()
            .map(|c| reserved(c) + SEPARATOR.len())
            .sum();

        while fixed_width > available {
            let excess = fixed_width - available;
            let Some(last) = columns.last_mut() else {
                break;
            };

            let floor = reserved(last);
            if floor > excess {
                last.min_width = last.min_width.map(|w| w.saturating_sub(excess));
                last.width = last.width.map(|w| w.saturating_sub(excess));
                break;
            }

            fixed_width -= floor + SEPARATOR.len();
            columns.pop();
        }

        let total_grow = columns
            .iter()
            .map(|c| c.grow.unwrap_or(usize::from(c.width.is_none())))
            .sum::<usize>()
            .max(1);
        let remaining = available.saturating_sub(fixed_width);

        let widths = columns
            .iter()
            .map(|c| {
                c.width.unwrap_or_else(|| {
                    c.min_width.unwrap_or(0) + remaining * c.grow.unwrap_or(1) / total_grow
                })
            })
            .collect();

        Self { columns, widths }
    }

    /// Width of every surviving column, in declaration order
    #[must_use]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Number of columns that survived sizing
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Render `item` as of now
    #[must_use]
    pub fn render(&self, item: &T, is_recent: bool) -> Row {
        self.render_at(item, is_recent, Utc::now())
    }

    /// Render `item` with relative times measured from `now`
    #[must_use]
    pub fn render_at(&self, item: &T, is_recent: bool, now: DateTime<Utc>) -> Row {
        let cells = self
            .columns
            .iter()
            .zip(&self.widths)
            .map(|(column, &width)| {
                let value = column.value(item);

                if column.show_recent && is_recent {
                    return Cell {
                        text: fit_to_width(RECENT_MARKER, width),
                        color: Some(RECENT_COLOR),
                    };
                }

                Cell {
                    text: fit_to_width(&column.format.apply(&value, now), width),
                    color: column.colors.color_for(&value),
                }
            })
            .collect();

        Row::new(cells)
    }
}
