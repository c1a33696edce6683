//! Selection outcome errors

use crate::aws::AwsError;
use crate::ui::UiError;
use thiserror::Error;

/// Errors that end a selection
///
/// Recents failures never show up here; the store swallows them.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The prompt was aborted or only a placeholder was confirmed
    #[error("no {thing} was selected")]
    NoSelection { thing: String },

    /// A recent entry was picked but no longer exists
    #[error("recent {thing} not found: {id}")]
    StaleRecentNotFound { thing: String, id: String },

    /// A recent entry was picked but carries no id to look it up by
    #[error("failed to get id of selected {thing}")]
    MissingId { thing: String },

    /// The remote query failed
    #[error(transparent)]
    Query(#[from] AwsError),

    /// The interactive prompt failed
    #[error(transparent)]
    Ui(#[from] UiError),
}

impl SelectError {
    /// Whether the operator simply declined to pick anything
    #[must_use]
    pub const fn is_no_selection(&self) -> bool {
        matches!(self, Self::NoSelection { .. })
    }
}
