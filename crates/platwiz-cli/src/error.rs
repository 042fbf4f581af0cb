//! Errors of the platwiz CLI.
//!
//! [`CliError`] is what every command returns.  `main` turns it into a
//! stderr report (message, optional cause chain, suggestions) and an exit
//! code; wizard outcomes arrive through `From<RunAborted>`.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use platwiz_core::application::RunAborted;
use platwiz_core::error::WizardError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The target directory exists and `--force` was not given.
    #[error("Target directory already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config get` was asked for a key that does not exist.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    // ── Wizard outcomes ────────────────────────────────────────────────────
    /// The user closed the options form.
    #[error("Wizard cancelled")]
    Cancelled,

    /// The run started and then failed.  Nothing was generated.
    #[error("Wizard run failed: {cause}")]
    RunFailed {
        #[source]
        cause: WizardError,
    },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<RunAborted> for CliError {
    fn from(aborted: RunAborted) -> Self {
        match aborted.cause {
            None => CliError::Cancelled,
            Some(cause) => CliError::RunFailed { cause },
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ProjectExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Use --force to clear it before the wizard runs (destructive)".into(),
                "Use --dry-run --force to see the result without deleting".into(),
                "Choose a different project or solution name".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use letters, digits, '.', '-' and '_'".into(),
                "Examples: MyApp, Contoso.Mobile, field_app".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'platwiz config path' to find the active config file".into(),
                "Run 'platwiz init --force' to restore the defaults".into(),
            ],

            Self::UnknownConfigKey { key } => vec![
                format!("'{}' is not a configuration key", key),
                "List every key with 'platwiz config list'".into(),
                "Nested keys are dotted, e.g. defaults.platforms.ios".into(),
            ],

            Self::Cancelled => vec!["No parameters were produced".into()],

            Self::RunFailed { cause } => cause.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Pass --yes to use flags and configured defaults instead".into(),
                format!(
                    "Or reinstall with the feature enabled: cargo install platwiz-cli --features {}",
                    feature
                ),
            ],
        }
    }

    /// Classification used for the exit code and log level.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::ProjectExists { .. }
            | Self::InvalidProjectName { .. }
            | Self::Cancelled => ErrorCategory::UserError,
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            // a run that started and failed is the host's problem, whatever
            // the cause
            Self::RunFailed { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Sources below this error, outermost first.
    fn causes(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(self.source(), |&e| e.source())
    }

    /// Multi-line report for stderr.
    ///
    /// The cause chain is only listed when `verbose`; otherwise a hint to
    /// pass `-v` closes the report.
    pub fn render(&self, verbose: bool, colour: bool) -> String {
        let paint = |text: &str, style: Style| {
            if colour {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };
        let red = Style::new().red();
        let dim = Style::new().dimmed();

        let mut out = format!(
            "\n{} {}\n",
            paint("\u{2717} Error:", red.bold()),
            paint(&self.to_string(), red)
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&paint(&format!("  Caused by: {cause}"), dim));
                out.push('\n');
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push('\n');
            out.push_str(&paint("Suggestions:", Style::new().yellow().bold()));
            out.push('\n');
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push('\n');
            out.push_str(&paint("Use -v / --verbose for more details.", dim));
            out.push('\n');
        }
        out
    }

    /// Emit the error as a tracing event at a level matching its category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "Command rejected");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "Command failed");
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "Caused by");
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, an existing target, or a cancelled form.
    UserError,
    /// A lookup (config key) that matched nothing.
    NotFound,
    /// Unreadable config or a build without a needed feature.
    Configuration,
    /// A failed run or an I/O failure.
    Internal,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

// ── IntoCli ───────────────────────────────────────────────────────────────────

/// Attach a context message to foreign errors at the call-site.
///
/// Anything convertible into `io::Error` qualifies, which covers
/// `serde_json::Error` as well as I/O itself.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> IntoCli<T> for Result<T, E>
where
    E: Into<std::io::Error>,
{
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platwiz_core::application::ApplicationError;
    use platwiz_core::domain::{DirectoryCleanupResult, DomainError};
    use std::io;

    // ── outcome mapping ───────────────────────────────────────────────────

    #[test]
    fn cancellation_maps_to_user_error() {
        let err = CliError::from(RunAborted { cause: None });
        assert!(matches!(err, CliError::Cancelled));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn failed_run_exits_one_even_for_validation_causes() {
        let err = CliError::from(RunAborted {
            cause: Some(DomainError::NoPlatformSelected.into()),
        });
        assert!(matches!(err, CliError::RunFailed { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn cleanup_failure_suggests_policy() {
        let err = CliError::RunFailed {
            cause: ApplicationError::CleanupFailed {
                path: PathBuf::from("/work/MyApp"),
                result: DirectoryCleanupResult::AccessDenied,
            }
            .into(),
        };
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("cleanup_policy"))
        );
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn project_exists_suggests_force() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/test"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn missing_feature_suggests_yes() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--yes")));
        assert_eq!(err.exit_code(), 4);
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            CliError::UnknownConfigKey {
                key: "x.y".into()
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn render_contains_error_header() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.render(false, false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn verbose_render_shows_cause_chain() {
        let err = CliError::RunFailed {
            cause: DomainError::NoPlatformSelected.into(),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by:"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn causes_walk_every_nested_source() {
        let err = CliError::RunFailed {
            cause: DomainError::NoPlatformSelected.into(),
        };
        let causes: Vec<String> = err.causes().map(ToString::to_string).collect();
        assert_eq!(
            causes,
            ["Domain error: No target platform selected", "No target platform selected"]
        );
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }

    #[test]
    fn into_cli_json_error() {
        let result: Result<serde_json::Value, serde_json::Error> = serde_json::from_str("{");
        let cli = result.with_cli_context(|| "parsing parameters");
        assert!(matches!(
            cli,
            Err(CliError::IoError { message, .. }) if message == "parsing parameters"
        ));
    }
}
