//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! wizard's one use case: "turn a host request into a parameter set".

pub mod directory_reconciler;
pub mod wizard_orchestrator;

pub use directory_reconciler::{CleanupPolicy, DirectoryReconciler, ReconcileReport};
pub use wizard_orchestrator::{ModalSession, WizardOrchestrator, WizardState};
