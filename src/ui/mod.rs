//! Interactive prompt layer
//!
//! The selection engine talks to the terminal only through the [`Prompt`]
//! trait. A prompt receives a [`PromptConfig`] and a suggestion source, shows
//! every snapshot the source emits for the current query, and starts a new
//! cycle whenever the query changes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Selection engine                   │
//! │   (select::Selection, selectors)        │
//! └────────────────┬────────────────────────┘
//!                  │ Uses trait
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      Prompt                             │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ RatatuiPrompt │  │ ScriptedPrompt    │
//! │  (terminal)   │  │   (tests only)    │
//! └───────────────┘  └───────────────────┘
//! ```

mod error;
mod traits;

pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use ratatui_adapter::RatatuiPrompt;
pub use traits::{Prompt, PromptConfig};
