//! UI error types

use thiserror::Error;

/// Errors that can occur while running the interactive prompt
#[derive(Debug, Error)]
pub enum UiError {
    /// stdin or stderr is not attached to a terminal
    #[error("interactive selection requires a terminal on stdin and stderr")]
    NoTerminal,

    /// IO error while drawing or reading events
    #[error("terminal error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
