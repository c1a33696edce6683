//! Errors raised while talking to AWS
//!
//! Every remote failure surfaces as an [`AwsError`]. Cancellation is modelled
//! as [`AwsError::Aborted`] so callers can tell an abandoned request apart from
//! a real failure.

use thiserror::Error;

/// Remote query errors
#[derive(Debug, Error)]
pub enum AwsError {
    /// The request was abandoned because its cancellation token fired
    #[error("request aborted")]
    Aborted,

    /// The `aws` program could not be started
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The `aws` program exited unsuccessfully
    #[error("`aws {operation}` failed: {stderr}")]
    Command {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The response could not be decoded
    #[error("failed to decode response of `aws {operation}`: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    /// No region was configured anywhere
    #[error("no AWS region configured (use --region, AWS_REGION or `aws configure`)")]
    NoRegion,
}

impl AwsError {
    /// Whether this is the error produced by cancellation
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Whether the remote side reported that the requested resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Command { stderr, .. } => {
                stderr.contains("NotFound")
                    || stderr.contains("does not exist")
                    || stderr.contains("NoSuchHostedZone")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_error(stderr: &str) -> AwsError {
        AwsError::Command {
            operation: "ec2 describe-instances".into(),
            code: Some(254),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn test_not_found_detection() {
        assert!(command_error("An error occurred (InvalidInstanceID.NotFound)").is_not_found());
        assert!(command_error("An error occurred (ResourceNotFoundException)").is_not_found());
        assert!(command_error("Stack with id foo does not exist").is_not_found());
        assert!(!command_error("An error occurred (ThrottlingException)").is_not_found());
        assert!(!AwsError::Aborted.is_not_found());
    }

    #[test]
    fn test_aborted_detection() {
        assert!(AwsError::Aborted.is_aborted());
        assert!(!AwsError::NoRegion.is_aborted());
    }

    #[test]
    fn test_command_error_display_includes_operation() {
        let message = command_error("boom").to_string();
        assert!(message.contains("ec2 describe-instances"));
        assert!(message.contains("boom"));
    }
}
