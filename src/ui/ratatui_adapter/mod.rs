//! Ratatui-based selection prompt
//!
//! Implements the `Prompt` trait with ratatui widgets drawn on stderr and
//! crossterm's async event stream for input.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             RatatuiPrompt                   │
//! │      (implements Prompt trait)              │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼──────────────┐
//!        ▼             ▼              ▼
//! ┌────────────┐ ┌───────────┐ ┌─────────────┐
//! │ Suggestion │ │  Ratatui  │ │  Crossterm  │
//! │   stream   │ │ (widgets) │ │  (events)   │
//! └────────────┘ └───────────┘ └─────────────┘
//! ```

mod events;
mod prompt;
mod state;
mod theme;
pub mod widgets;

pub use prompt::RatatuiPrompt;
pub use state::PromptState;
pub use theme::Theme;
