//! Prompt state management
//!
//! Holds the query line, the latest candidate snapshot, and the list cursor.

use crate::select::Choice;

/// State of one running prompt
#[derive(Debug)]
pub struct PromptState<T> {
    /// Message shown above the query
    pub message: String,
    /// Current query text
    pub query: String,
    /// Byte position of the cursor in the query
    pub query_cursor: usize,
    /// Latest snapshot of the current suggestion cycle
    pub choices: Vec<Choice<T>>,
    /// Highlighted row
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Number of rows that fit in the list
    pub visible_height: usize,
    /// Whether the current cycle has not settled yet
    pub loading: bool,
}

impl<T> PromptState<T> {
    /// Create a new prompt state
    #[must_use]
    pub fn new(message: String) -> Self {
        Self {
            message,
            query: String::new(),
            query_cursor: 0,
            choices: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
            loading: true,
        }
    }

    /// Replace the displayed snapshot
    pub fn set_choices(&mut self, choices: Vec<Choice<T>>) {
        self.choices = choices;
        if self.cursor >= self.choices.len() {
            self.cursor = self.choices.len().saturating_sub(1);
        }
        self.adjust_scroll();
    }

    /// Move the highlight back to the top, e.g. when a new cycle starts
    pub const fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Take the value of the highlighted row
    ///
    /// Placeholders and an empty list yield `None`.
    pub fn take_selected(&mut self) -> Option<T> {
        self.choices.get_mut(self.cursor)?.value.take()
    }

    /// Move cursor up
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.choices.len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self) {
        let max_cursor = self.choices.len().saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    /// Jump to the first row
    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to the last row
    pub const fn jump_to_end(&mut self) {
        self.cursor = self.choices.len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Adjust scroll offset to keep cursor visible
    const fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.visible_height > 0 && self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor + 1 - self.visible_height;
        }
    }

    /// Set the number of visible rows, keeping the cursor in view
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.adjust_scroll();
    }

    /// Add a character to the query
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove a character from the query (backspace)
    pub fn query_backspace(&mut self) {
        if self.query_cursor > 0 {
            let prev_char_boundary = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            self.query.remove(prev_char_boundary);
            self.query_cursor = prev_char_boundary;
        }
    }

    /// Delete character under cursor
    pub fn query_delete(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query.remove(self.query_cursor);
        }
    }

    /// Move query cursor left
    pub fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    /// Move query cursor right
    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    /// Move query cursor to the start (Ctrl-A)
    pub const fn query_cursor_home(&mut self) {
        self.query_cursor = 0;
    }

    /// Move query cursor to the end (Ctrl-E)
    pub const fn query_cursor_end(&mut self) {
        self.query_cursor = self.query.len();
    }

    /// Clear the query
    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }
}
