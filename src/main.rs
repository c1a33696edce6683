//! aws-select CLI application entry point
//!
//! Opens an interactive picker for one kind of AWS resource and prints the
//! selected record (or a JMESPath projection of it) to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Pick an EC2 instance and print its private IP
//! aws-select ec2-instance --priv-ip
//!
//! # Pick a log event, choosing group and stream interactively
//! aws-select --profile prod log-event --message
//!
//! # Arbitrary projection of the selected record
//! aws-select cloudformation-stack --query 'Outputs[].OutputValue'
//!
//! # Turn recents off for good
//! aws-select config set use_recents=false
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/aws-select/config.toml` on Linux) and `AWS_SELECT_*`
//! environment variables. Diagnostics go to stderr, filtered by
//! `AWS_SELECT_LOG` or the `log_level` setting.

use aws_select::{
    AppError,
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    logging,
};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, AppError>;

/// Run the parsed command
///
/// # Errors
///
/// Returns `AppError` if the selection fails, the query is invalid or a
/// config subcommand fails.
fn run(cli: &Cli, config: AppConfig) -> Result<()> {
    if let Commands::Config { command } = &cli.command {
        return commands::config(config, command);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let selected = runtime.block_on(commands::select(&cli.command, &cli.global, &config))?;

    let result = commands::output::apply_query(selected, cli.command.expression())?;
    println!("{}", commands::output::format_result(&result)?);
    Ok(())
}

/// Main entry point for the aws-select application
///
/// Parses arguments, loads configuration and dispatches to the command
/// handler. Any error is printed as `error: <message>` with exit status 1.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log_level.as_deref());

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
