//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`]; each one is `global = true`, so
//! `platwiz new -v` and `platwiz -v new` mean the same thing.  The ones that
//! mirror a config key win over the file and `PLATWIZ__*` variables (see
//! [`crate::config::AppConfig::with_overrides`]).

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Global options")]
pub struct GlobalArgs {
    /// More log output on stderr: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Read settings from FILE instead of the per-user config.
    #[arg(short, long, global = true, value_name = "FILE", env = "PLATWIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write a daily rolling debug log into DIR.
    #[arg(long, global = true, value_name = "DIR", env = "PLATWIZ_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not record run telemetry for this invocation.
    #[arg(long, global = true)]
    pub no_telemetry: bool,

    /// How results are rendered on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `output.format` from the config, else human on a terminal and
    /// plain when piped.
    #[default]
    Auto,
    /// Coloured, aligned tables.
    Human,
    /// No colours, same layout.
    Plain,
    /// A single JSON document.
    Json,
}
