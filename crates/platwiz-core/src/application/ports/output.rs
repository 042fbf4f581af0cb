//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the orchestrator needs from external systems.
//! The `platwiz-adapters` crate and the `platwiz` binary provide
//! implementations.

use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::application::telemetry::TelemetryEvent;
use crate::domain::{DirectoryCleanupResult, RunKind, UserSelectedOptions};
use crate::error::{WizardError, WizardResult};

/// What the options UI is told about the run it is collecting choices for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRequest {
    pub run_id: Uuid,
    pub kind: RunKind,
    pub project_name: String,
    pub safe_project_name: String,
    /// Empty when the host did not ask for a solution folder.
    pub solution_name: String,
    /// Initial value for the "create solution directory" choice.
    pub can_create_solution_directory: bool,
    pub destination: String,
}

/// Port for the modal options form.
///
/// Implemented by:
/// - `platwiz::prompt::DialoguerOptionsUi` (interactive terminal)
/// - `platwiz::prompt::PresetOptionsUi` (flags + config, `--yes`)
#[cfg_attr(test, mockall::automock)]
pub trait OptionsUi: Send + Sync {
    /// Show the form and block until the user confirms or cancels.
    ///
    /// `Ok(None)` is a cancellation, not an error. Called exactly once per
    /// run.
    fn show_options(&self, request: &SelectionRequest)
    -> WizardResult<Option<UserSelectedOptions>>;

    /// Surface a run failure to the user.
    fn show_error(&self, error: &WizardError);
}

/// Port for the host's solution system.
///
/// Implemented by:
/// - `platwiz_adapters::host::LocalHost` (standalone CLI host)
#[cfg_attr(test, mockall::automock)]
pub trait HostShell: Send + Sync {
    /// Close whatever solution is currently open. Must succeed before files
    /// under the destination are deleted.
    fn close_solution(&self) -> WizardResult<()>;

    /// Toggle the host's modeless UI (tool windows, background dialogs).
    fn set_modeless(&self, enabled: bool);
}

/// Port for the filesystem operations the reconciler needs.
///
/// Implemented by:
/// - `platwiz_adapters::filesystem::LocalFilesystem` (production)
/// - `platwiz_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `safe_delete_dir` classifies instead of returning an error: a missing
///   path is `NotFound`, never a failure
/// - Implementations must not panic
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively delete `path` and classify the outcome.
    fn safe_delete_dir(&self, path: &Path) -> DirectoryCleanupResult;
}

/// Port for telemetry delivery.
///
/// Implemented by:
/// - `platwiz_adapters::telemetry::TracingTelemetry` (events as log lines)
/// - `platwiz_adapters::telemetry::JsonlTelemetry` (append-only JSON lines)
/// - `platwiz_adapters::telemetry::NoopTelemetry`
///
/// Called from the dispatcher's worker thread; errors are logged and dropped.
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySink: Send + Sync {
    fn track(&self, event: &TelemetryEvent) -> WizardResult<()>;
}
