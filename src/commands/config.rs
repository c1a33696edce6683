//! Config command - inspect and change persisted settings

use crate::{AppError, cli::ConfigCommands, config::AppConfig};

type Result<T> = std::result::Result<T, AppError>;

/// Execute a config subcommand against the default config file
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for a malformed `key=value` setting and
/// `AppError::Config` for unknown keys, bad values or write failures.
pub fn execute(mut config: AppConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set(key, value)?;
            config.save()?;
            println!("Set {key} = {}", config.get(key)?);
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
    }
    Ok(())
}

fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    setting
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Invalid format. Use: aws-select config set key=value".into()))
}
