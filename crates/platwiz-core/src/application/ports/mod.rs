//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `platwiz-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the orchestrator, implemented by infrastructure
//!   - `OptionsUi`: The modal options form
//!   - `HostShell`: The host's solution/window system
//!   - `Filesystem`: Existence checks and safe recursive delete
//!   - `TelemetrySink`: Fire-and-forget event reporting
//!
//! - **Driving (Input) Port**: `WizardOrchestrator::run`, called by the host

pub mod output;

pub use output::{Filesystem, HostShell, OptionsUi, SelectionRequest, TelemetrySink};

#[cfg(test)]
pub use output::{MockFilesystem, MockHostShell, MockOptionsUi, MockTelemetrySink};
