//! Core traits for the prompt abstraction

use crate::select::{SelectError, SuggestionSource};

/// Configuration for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// Message shown above the query line
    pub message: String,
    /// Maximum number of rows shown at once (None = as many as fit)
    pub limit: Option<usize>,
}

impl PromptConfig {
    /// Create a prompt configuration
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            limit: None,
        }
    }

    /// Cap the number of visible rows
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Trait for interactive prompt implementations
///
/// The prompt owns the query line. It starts a suggestion cycle for the empty
/// query, starts a new one (canceling the previous token) on every query
/// change, and always displays the latest snapshot of the current cycle.
#[allow(async_fn_in_trait)]
pub trait Prompt {
    /// Run the prompt until the operator confirms or aborts
    ///
    /// Returns the confirmed choice's value, or `None` on abort or when a
    /// placeholder was confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails or the suggestion source reports
    /// a remote failure.
    async fn run<T>(
        &mut self,
        config: &PromptConfig,
        source: &dyn SuggestionSource<T>,
    ) -> Result<Option<T>, SelectError>;
}
