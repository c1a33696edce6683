//! aws-select - interactive fuzzy pickers for AWS resources
//!
//! Each picker runs a live, paginated search against the `aws` CLI as the
//! operator types, remembers recent picks per profile and region, and hands
//! back the selected resource's JSON record (or a JMESPath projection of it).

use thiserror::Error;

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod layout;
pub mod logging;
pub mod recents;
pub mod select;
pub mod selectors;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AppError {
    /// Selection ended without a usable record
    #[error(transparent)]
    Select(#[from] select::SelectError),
    /// AWS CLI failure outside a selection, such as region resolution
    #[error(transparent)]
    Aws(#[from] aws::AwsError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// The `--query` expression is invalid or failed to evaluate
    #[error("Query error: {0}")]
    Query(#[from] jmespath::JmespathError),
    /// A result could not be converted to or from JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
