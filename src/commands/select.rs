//! Select command - run one resource picker and return the chosen record

use crate::{
    AppError,
    aws::AwsCli,
    cli::{Commands, GlobalArgs},
    config::AppConfig,
    recents::RecentsStore,
    select::{SelectContext, Selection, Selector},
    selectors::{
        EbsSnapshotSelector, Ec2InstanceSelector, HostedZoneSelector, LogEventOptions, LogEventSelector,
        LogGroupSelector, LogStreamOptions, LogStreamSelector, RecordSetOptions, RecordSetSelector,
        SecretSelector, StackSelector,
    },
    ui::{Prompt, RatatuiPrompt},
};
use serde_json::Value;

type Result<T> = std::result::Result<T, AppError>;

/// Size assumed when the terminal size cannot be read
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Per-run overrides shared by every selection of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSettings {
    pub message: Option<String>,
    pub limit: Option<usize>,
}

impl SelectionSettings {
    /// Command-line values win over the config file
    #[must_use]
    pub fn new(global: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            message: global.prompt.clone(),
            limit: global.limit.or(config.default_limit),
        }
    }

    fn selection<S: Selector>(&self, selector: S, options: S::Options) -> Selection<S> {
        Selection::new(selector, options)
            .message(self.message.clone())
            .limit(self.limit)
    }
}

/// Whether this run remembers and offers recent selections
#[must_use]
pub const fn recents_enabled(global: &GlobalArgs, config: &AppConfig) -> bool {
    config.use_recents && !global.no_recents
}

/// Execute a resource selection with the full-screen prompt
///
/// # Errors
///
/// Returns `AppError::Aws` if no region can be resolved, and
/// `AppError::Select` when the selection ends without a record.
pub async fn execute(command: &Commands, global: &GlobalArgs, config: &AppConfig) -> Result<Value> {
    let client = AwsCli::new(&config.aws_program)
        .with_profile(global.profile.clone())
        .with_region(global.region.clone());
    let region = client.region().await?;
    let client = client.with_region(Some(region.clone()));

    let recents = recents_enabled(global, config)
        .then(|| config.recents_path())
        .flatten()
        .map(RecentsStore::new);
    tracing::debug!(region = %region, recents = ?recents.as_ref().map(RecentsStore::path), "starting selection");

    let (width, rows) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
    let mut prompt = RatatuiPrompt::new();
    let mut ctx = SelectContext::new(&mut prompt, region.as_str(), usize::from(width))
        .with_visible_rows(visible_rows(rows))
        .with_recents(recents.as_ref())
        .with_scope([client.profile_name(), region.clone()]);

    run(command, &mut ctx, &client, &SelectionSettings::new(global, config)).await
}

/// Dispatch `command` to its selector
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for commands that are not selections, and
/// `AppError::Select` when the selection ends without a record.
pub async fn run<P: Prompt>(
    command: &Commands,
    ctx: &mut SelectContext<'_, P>,
    client: &AwsCli,
    settings: &SelectionSettings,
) -> Result<Value> {
    let item = match command {
        Commands::Ec2Instance { .. } => settings.selection(Ec2InstanceSelector, ()).run(ctx, client).await?,
        Commands::EbsSnapshot { .. } => settings.selection(EbsSnapshotSelector, ()).run(ctx, client).await?,
        Commands::CloudformationStack { .. } => settings.selection(StackSelector, ()).run(ctx, client).await?,
        Commands::Route53HostedZone { .. } => settings.selection(HostedZoneSelector, ()).run(ctx, client).await?,
        Commands::Route53RecordSet { hosted_zone_id, .. } => {
            let options = RecordSetOptions {
                hosted_zone_id: hosted_zone_id.clone(),
            };
            settings.selection(RecordSetSelector, options).run(ctx, client).await?
        }
        Commands::Secret { .. } => settings.selection(SecretSelector, ()).run(ctx, client).await?,
        Commands::LogGroup { .. } => settings.selection(LogGroupSelector, ()).run(ctx, client).await?,
        Commands::LogStream { log_group_name, .. } => {
            let options = LogStreamOptions {
                log_group_name: log_group_name.clone(),
            };
            settings.selection(LogStreamSelector::new(), options).run(ctx, client).await?
        }
        Commands::LogEvent {
            log_group_name,
            log_stream_name,
            start_time,
            ..
        } => {
            let options = LogEventOptions {
                log_group_name: log_group_name.clone(),
                log_stream_name: log_stream_name.clone(),
                start_time: *start_time,
            };
            settings.selection(LogEventSelector::new(), options).run(ctx, client).await?
        }
        Commands::Config { .. } => {
            return Err(AppError::InvalidInput("config is not a resource selection".into()));
        }
    };
    Ok(item)
}

/// Choices shown at once: every terminal row but one
fn visible_rows(terminal_rows: u16) -> Option<usize> {
    Some(usize::from(terminal_rows.saturating_sub(1))).filter(|&rows| rows > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::ui::mock::ScriptedPrompt;
    use clap::Parser;

    fn global(args: &[&str]) -> GlobalArgs {
        let argv = ["aws-select"].iter().chain(args).chain(["secret"].iter());
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn test_settings_prefer_command_line() {
        let config = AppConfig {
            default_limit: Some(30),
            ..AppConfig::default()
        };

        let defaults = SelectionSettings::new(&global(&[]), &config);
        assert_eq!(defaults.limit, Some(30));
        assert_eq!(defaults.message, None);

        let overridden = SelectionSettings::new(&global(&["--limit", "5", "--prompt", "Pick one"]), &config);
        assert_eq!(overridden.limit, Some(5));
        assert_eq!(overridden.message.as_deref(), Some("Pick one"));
    }

    #[test]
    fn test_recents_toggles() {
        let enabled = AppConfig::default();
        let disabled = AppConfig {
            use_recents: false,
            ..AppConfig::default()
        };

        assert!(recents_enabled(&global(&[]), &enabled));
        assert!(!recents_enabled(&global(&["--no-recents"]), &enabled));
        assert!(!recents_enabled(&global(&[]), &disabled));
    }

    #[test]
    fn test_visible_rows_leave_one_line() {
        assert_eq!(visible_rows(24), Some(23));
        assert_eq!(visible_rows(1), None);
        assert_eq!(visible_rows(0), None);
    }

    #[tokio::test]
    async fn test_config_is_not_a_selection() {
        let command = Commands::Config {
            command: crate::cli::ConfigCommands::Path,
        };
        let mut prompt = ScriptedPrompt::aborted();
        let mut ctx = SelectContext::new(&mut prompt, "us-east-1", 80);

        let result = run(&command, &mut ctx, &AwsCli::new("aws"), &SelectionSettings::default()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
