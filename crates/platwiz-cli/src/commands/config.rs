//! `platwiz config`: inspect configuration values.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `source` is the `--config` file, if one was given; `path` reports it in
/// place of the default location.
pub fn execute(
    cmd: ConfigCommands,
    source: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                let value = serde_json::to_value(&config)
                    .with_cli_context(|| "Failed to serialise config")?;
                output.json(&value)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            let path = source.unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}
