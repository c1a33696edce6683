//! Recents store error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the recents file
///
/// These never abort a selection; the store logs them and degrades to
/// "no recents" or "recents not saved".
#[derive(Debug, Error)]
pub enum RecentsError {
    /// The file or its directory could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not contain a valid recents document
    #[error("invalid recents document in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RecentsError {
    /// Whether the failure is simply that the file does not exist yet
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
