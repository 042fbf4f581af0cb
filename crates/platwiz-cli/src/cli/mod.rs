//! Command line surface of `platwiz` (clap derive).
//!
//! Value parsers reuse the core types' `FromStr`, so an unknown scaffold or
//! grouping is rejected at parse time with the domain error as the message.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use platwiz_core::{
    application::CleanupPolicy,
    domain::{IosVersion, ProjectGrouping, ScaffoldType, TargetFramework},
};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// `platwiz [GLOBAL OPTIONS] <COMMAND>`
#[derive(Debug, Parser)]
#[command(
    name    = "platwiz",
    bin_name = "platwiz",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Multi-platform solution wizard",
    long_about = "platwiz collects the options for a multi-platform app solution, \
                  reconciles the destination directory and produces the parameter \
                  map a template engine consumes.",
    after_help = "EXAMPLES:\n\
        \x20 platwiz new MyApp --solution MyApp --yes\n\
        \x20 platwiz new MyApp --no-ios --tests core,android --yes --output-format json\n\
        \x20 platwiz list\n\
        \x20 platwiz completions bash > /usr/share/bash-completion/completions/platwiz",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the wizard for a new solution.
    #[command(
        visible_alias = "n",
        about = "Run the wizard for a new solution",
        after_help = "EXAMPLES:\n\
            \x20 platwiz new MyApp                              # interactive\n\
            \x20 platwiz new MyApp --solution Contoso --yes     # preset from flags + config\n\
            \x20 platwiz new MyApp --yes --dry-run --emit params.json"
    )]
    New(NewArgs),

    /// List parameter keys and accepted option values.
    #[command(
        visible_alias = "ls",
        about = "List parameters and option values",
        after_help = "EXAMPLES:\n\
            \x20 platwiz list\n\
            \x20 platwiz list --format json"
    )]
    List(ListArgs),

    /// Initialise a platwiz configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 platwiz init           # default location\n\
            \x20 platwiz init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 platwiz completions bash > ~/.local/share/bash-completion/completions/platwiz\n\
            \x20 platwiz completions zsh  > ~/.zfunc/_platwiz\n\
            \x20 platwiz completions fish > ~/.config/fish/completions/platwiz.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the platwiz configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 platwiz config get wizard.cleanup_policy\n\
            \x20 platwiz config list\n\
            \x20 platwiz config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `platwiz new`.
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Project name.  Becomes `$projectname$`; the safe form replaces every
    /// character that is not alphanumeric with `_`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Put the project inside a solution folder of this name.
    #[arg(
        short = 's',
        long = "solution",
        value_name = "SOLUTION",
        help = "Solution folder name"
    )]
    pub solution: Option<String>,

    /// Directory the solution is created under.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Run as a multi-project template instead of a single project.
    #[arg(long = "multi", help = "Run as a multi-project template")]
    pub multi: bool,

    // ── platforms ──
    #[arg(long = "android", overrides_with = "no_android", help = "Generate the Android project")]
    pub android: bool,
    #[arg(long = "no-android", overrides_with = "android", help = "Skip the Android project")]
    pub no_android: bool,

    #[arg(long = "ios", overrides_with = "no_ios", help = "Generate the iOS project")]
    pub ios: bool,
    #[arg(long = "no-ios", overrides_with = "ios", help = "Skip the iOS project")]
    pub no_ios: bool,

    #[arg(long = "uwp", overrides_with = "no_uwp", help = "Generate the UWP project")]
    pub uwp: bool,
    #[arg(long = "no-uwp", overrides_with = "uwp", help = "Skip the UWP project")]
    pub no_uwp: bool,

    // ── tests ──
    /// Test projects to generate.  Replaces the configured default set.
    #[arg(
        long = "tests",
        value_name = "LIST",
        value_enum,
        value_delimiter = ',',
        num_args = 0..,
        help = "Test projects to generate (comma separated)"
    )]
    pub tests: Option<Vec<TestProject>>,

    #[arg(
        long = "editorconfig",
        overrides_with = "no_editorconfig",
        help = "Add an .editorconfig"
    )]
    pub editorconfig: bool,
    #[arg(
        long = "no-editorconfig",
        overrides_with = "editorconfig",
        help = "Do not add an .editorconfig"
    )]
    pub no_editorconfig: bool,

    // ── identity ──
    #[arg(long = "app-id", value_name = "ID", help = "Reverse-DNS app id, e.g. com.contoso.app")]
    pub app_id: Option<String>,

    #[arg(long = "app-name", value_name = "NAME", help = "Display name of the app")]
    pub app_name: Option<String>,

    #[arg(
        long = "uwp-description",
        value_name = "TEXT",
        help = "Description written into the UWP manifest"
    )]
    pub uwp_description: Option<String>,

    // ── shape ──
    #[arg(
        long = "scaffold",
        value_name = "TYPE",
        value_parser = ScaffoldType::from_str,
        help = "Starting point: blank, navigation, tabbed, sample"
    )]
    pub scaffold: Option<ScaffoldType>,

    #[arg(
        long = "grouping",
        value_name = "GROUPING",
        value_parser = ProjectGrouping::from_str,
        help = "Project grouping: none, solution-folders, platform-folders"
    )]
    pub grouping: Option<ProjectGrouping>,

    #[arg(
        long = "framework",
        value_name = "TFM",
        value_parser = TargetFramework::from_str,
        help = "Target framework of the core project: netstandard2.0, netstandard2.1"
    )]
    pub framework: Option<TargetFramework>,

    #[arg(long = "android-min", value_name = "API", help = "Minimum Android API level")]
    pub android_min: Option<u32>,

    #[arg(
        long = "ios-min",
        value_name = "VERSION",
        value_parser = IosVersion::from_str,
        help = "Minimum iOS version, e.g. 12.0"
    )]
    pub ios_min: Option<IosVersion>,

    #[arg(long = "uwp-min", value_name = "BUILD", help = "Minimum Windows 10 build")]
    pub uwp_min: Option<u32>,

    /// Keep the project next to the solution instead of creating a
    /// solution directory.
    #[arg(long = "no-solution-dir", help = "Do not create a solution directory")]
    pub no_solution_dir: bool,

    // ── run control ──
    /// Skip the interactive form and use flags + configured defaults.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Use flags and configured defaults without prompting"
    )]
    pub yes: bool,

    /// Allow deleting an existing target directory.
    #[arg(long = "force", help = "Clear an existing target directory (destructive)")]
    pub force: bool,

    /// Run against an in-memory copy of the destination; nothing is deleted.
    #[arg(long = "dry-run", help = "Show the result without touching the disk")]
    pub dry_run: bool,

    #[arg(
        long = "cleanup-policy",
        value_name = "POLICY",
        value_parser = CleanupPolicy::from_str,
        help = "What a failed cleanup does: record-only, abort-on-access-denied, abort-on-any-failure"
    )]
    pub cleanup_policy: Option<CleanupPolicy>,

    /// Write the final parameter map as JSON to this file.
    #[arg(long = "emit", value_name = "FILE", help = "Write the parameter map as JSON")]
    pub emit: Option<PathBuf>,
}

impl NewArgs {
    /// `Some(true)` for `--android`, `Some(false)` for `--no-android`.
    pub fn android(&self) -> Option<bool> {
        toggle(self.android, self.no_android)
    }

    pub fn ios(&self) -> Option<bool> {
        toggle(self.ios, self.no_ios)
    }

    pub fn uwp(&self) -> Option<bool> {
        toggle(self.uwp, self.no_uwp)
    }

    pub fn editorconfig(&self) -> Option<bool> {
        toggle(self.editorconfig, self.no_editorconfig)
    }
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Test project selectable with `--tests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum TestProject {
    Core,
    Android,
    Ios,
    Uwp,
    UwpUi,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `platwiz list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON object.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `platwiz init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `platwiz completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `platwiz config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `telemetry.sink`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
