//! platwiz Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the platwiz
//! solution wizard: the selection model, the parameter builder, directory
//! reconciliation, and the run orchestrator, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       platwiz-cli (host + options UI)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls run()
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (WizardOrchestrator, DirectoryReconciler│
//! │   RunContext, TelemetryDispatcher)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (OptionsUi, HostShell, Filesystem,      │
//! │  TelemetrySink)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     platwiz-adapters (Infrastructure)   │
//! │ (LocalFilesystem, JsonlTelemetry, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (UserSelectedOptions, RunMetadata,      │
//! │  ParameterBuilder, HostPath)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use platwiz_core::prelude::*;
//!
//! // 1. Wire the adapters
//! let mut orchestrator = WizardOrchestrator::new(
//!     WizardInfo::new("platwiz", platwiz_core::VERSION),
//!     ui, host, filesystem, sink,
//! );
//!
//! // 2. Run against the host's parameters
//! let mut metadata = RunMetadata::new(RunKind::NewProject, parameters);
//! match orchestrator.run(&mut metadata).into_result() {
//!     Ok(_) => { /* hand metadata.parameters to the template engine */ }
//!     Err(aborted) => { /* discard partial output */ }
//! }
//!
//! // 3. Flush telemetry
//! orchestrator.finish();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CleanupPolicy, RunAborted, RunOutcome, WizardOrchestrator, WizardState,
        ports::{Filesystem, HostShell, OptionsUi, SelectionRequest, TelemetrySink},
        telemetry::{TelemetryEvent, TelemetryKind, WizardInfo},
    };
    pub use crate::domain::{
        DirectoryCleanupResult, HostKey, HostParameters, ParameterBuilder, ParameterKey,
        ParameterMap, PlatformSelection, ProjectGrouping, RunKind, RunMetadata, ScaffoldType,
        SdkSelection, TargetFramework, TestSelection, UserSelectedOptions,
    };
    pub use crate::error::{WizardError, WizardResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
