//! Ratatui widgets for the selection prompt
//!
//! Custom widgets for rendering the prompt interface.

mod choice_list;
mod help_bar;
mod search_bar;

pub use choice_list::{ChoiceList, row_spans, to_ratatui_color};
pub use help_bar::{HelpBar, KeyHint, PROMPT_HINTS};
pub use search_bar::SearchBar;
