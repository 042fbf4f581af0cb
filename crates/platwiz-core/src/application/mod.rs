//! Application layer for platwiz.
//!
//! This layer contains:
//! - **Services**: Run orchestration (WizardOrchestrator, DirectoryReconciler)
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Run context**: The single-slot state of the run in progress
//! - **Telemetry**: Events and the fire-and-forget dispatcher
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Selection rules and parameter mapping live in
//! `crate::domain`.

pub mod error;
pub mod outcome;
pub mod ports;
pub mod run_context;
pub mod services;
pub mod telemetry;

// Re-export main services
pub use services::{
    CleanupPolicy, DirectoryReconciler, ModalSession, ReconcileReport, WizardOrchestrator,
    WizardState,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, HostShell, OptionsUi, SelectionRequest, TelemetrySink};

pub use error::ApplicationError;
pub use outcome::{RunAborted, RunOutcome};
pub use run_context::{RunContext, RunIdentity};
pub use telemetry::{TelemetryDispatcher, TelemetryEvent, TelemetryKind, WizardInfo};
