//! Application layer errors.
//!
//! These errors represent failures in orchestration, not selection logic.
//! Selection and host-contract errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::WizardState;
use crate::domain::DirectoryCleanupResult;
use crate::error::ErrorCategory;

/// Errors that occur during run orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// `begin` was called while another run was still active.
    #[error("A wizard run is already active (run {run_id})")]
    RunAlreadyActive { run_id: String },

    /// A run-scoped operation was attempted with no active run.
    #[error("No wizard run is active")]
    NoActiveRun,

    /// The orchestrator tried to move between states that are not connected.
    #[error("Illegal wizard transition {from} -> {to}")]
    IllegalTransition { from: WizardState, to: WizardState },

    /// Directory cleanup failed and the configured policy aborts on it.
    #[error("Could not clear {path}: {result}")]
    CleanupFailed {
        path: PathBuf,
        result: DirectoryCleanupResult,
    },

    /// The host refused an operation (closing the solution, modal toggle).
    #[error("Host operation '{operation}' failed: {reason}")]
    HostFailure {
        operation: &'static str,
        reason: String,
    },

    /// The options UI failed to produce an answer.
    #[error("Options UI failed: {reason}")]
    UiFailure { reason: String },

    /// A telemetry sink rejected an event. Never escalated past the
    /// dispatcher.
    #[error("Telemetry sink failed: {reason}")]
    TelemetryFailure { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RunAlreadyActive { .. } => vec![
                "Only one wizard run can be active at a time".into(),
                "Wait for the current run to finish".into(),
            ],
            Self::CleanupFailed { path, result } => vec![
                format!("Failed to remove: {} ({})", path.display(), result),
                "Check that you have write permissions".into(),
                "Close any program holding files in that directory".into(),
                "Or set wizard.cleanup_policy = \"record-only\" to continue anyway".into(),
            ],
            Self::HostFailure { operation, .. } => vec![
                format!("The host could not {}", operation),
                "Close the open solution manually and retry".into(),
            ],
            Self::UiFailure { .. } => vec![
                "The options dialog could not be shown".into(),
                "Try again with --yes to use the configured defaults".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RunAlreadyActive { .. } | Self::NoActiveRun => ErrorCategory::Internal,
            Self::IllegalTransition { .. } => ErrorCategory::Internal,
            Self::CleanupFailed { .. } => ErrorCategory::Filesystem,
            Self::HostFailure { .. } | Self::UiFailure { .. } => ErrorCategory::Internal,
            Self::TelemetryFailure { .. } => ErrorCategory::Internal,
        }
    }
}
