//! Client that drives the `aws` command-line program
//!
//! Each call spawns `aws <service> <operation> ... --output json` and decodes
//! the JSON it prints. The child is raced against an abort token and killed if
//! the token fires first.

use super::error::AwsError;
use crate::select::CancellationToken;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Fallback profile name when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// Handle on the `aws` program plus the profile/region it should use
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
    profile: Option<String>,
    region: Option<String>,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new("aws")
    }
}

impl AwsCli {
    /// Create a client for the given program
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            profile: None,
            region: None,
        }
    }

    /// Use an explicit profile
    #[must_use]
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Use an explicit region
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Profile name used to scope recents
    ///
    /// Explicit profile, then `AWS_PROFILE`, then `default`.
    #[must_use]
    pub fn profile_name(&self) -> String {
        self.profile
            .clone()
            .or_else(|| non_empty_env("AWS_PROFILE"))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Resolve the region requests will be sent to
    ///
    /// Explicit region, then `AWS_REGION`, then `AWS_DEFAULT_REGION`, then
    /// whatever `aws configure get region` reports.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::NoRegion`] if no source provides a region.
    pub async fn region(&self) -> Result<String, AwsError> {
        if let Some(region) = self
            .region
            .clone()
            .or_else(|| non_empty_env("AWS_REGION"))
            .or_else(|| non_empty_env("AWS_DEFAULT_REGION"))
        {
            return Ok(region);
        }

        let mut command = Command::new(&self.program);
        command.args(["configure", "get", "region"]);
        if let Some(profile) = &self.profile {
            command.args(["--profile", profile]);
        }

        let output = command
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| self.spawn_error(source))?;

        let region = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() && !region.is_empty() {
            Ok(region)
        } else {
            Err(AwsError::NoRegion)
        }
    }

    /// Full argument list for one invocation
    #[must_use]
    pub fn command_args(&self, service: &str, operation: &str, args: &[String]) -> Vec<String> {
        let mut all = Vec::with_capacity(args.len() + 8);
        all.push(service.to_string());
        all.push(operation.to_string());
        all.extend(args.iter().cloned());
        all.push("--output".to_string());
        all.push("json".to_string());
        if let Some(profile) = &self.profile {
            all.push("--profile".to_string());
            all.push(profile.clone());
        }
        if let Some(region) = &self.region {
            all.push("--region".to_string());
            all.push(region.clone());
        }
        all
    }

    /// Run one operation and decode its JSON output
    ///
    /// Empty output decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Aborted`] if `abort` fires before the program exits
    /// (the child is killed), or a spawn/command/decode error otherwise.
    pub async fn call(
        &self,
        service: &str,
        operation: &str,
        args: &[String],
        abort: &CancellationToken,
    ) -> Result<Value, AwsError> {
        if abort.is_canceled() {
            return Err(AwsError::Aborted);
        }

        let label = format!("{service} {operation}");
        let argv = self.command_args(service, operation, args);
        tracing::debug!(program = %self.program.display(), args = ?argv, "running aws command");

        let child = Command::new(&self.program)
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        let output = abort
            .run_until_canceled(child.wait_with_output())
            .await
            .ok_or(AwsError::Aborted)?
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(AwsError::Command {
                operation: label,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&output.stdout).map_err(|source| AwsError::Decode {
            operation: label,
            source,
        })
    }

    fn spawn_error(&self, source: std::io::Error) -> AwsError {
        AwsError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
