//! Wizard Orchestrator - drives one run from host call to outcome.
//!
//! ```text
//! Idle → Started → (CleaningDirectory) → AwaitingSelection
//!      → Cancelled
//!      → Selected → BuildingParameters → Completed
//! any of the above after Started → Failed
//! Completed | Cancelled | Failed → Finalizing → Idle
//! ```
//!
//! Every exit path goes through `Finalizing`, which reports the end of the
//! session and clears the run context.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        outcome::RunOutcome,
        ports::{Filesystem, HostShell, OptionsUi, SelectionRequest, TelemetrySink},
        run_context::{RunContext, RunIdentity},
        services::directory_reconciler::{CleanupPolicy, DirectoryReconciler},
        telemetry::{TelemetryDispatcher, TelemetryEvent, TelemetryKind, WizardInfo},
    },
    domain::{DomainValidator as validator, ParameterBuilder, ParameterMap, RunMetadata},
    error::{WizardError, WizardResult},
};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardState {
    Idle,
    Started,
    CleaningDirectory,
    AwaitingSelection,
    Selected,
    Cancelled,
    BuildingParameters,
    Completed,
    Failed,
    Finalizing,
}

impl WizardState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Started => "started",
            Self::CleaningDirectory => "cleaning-directory",
            Self::AwaitingSelection => "awaiting-selection",
            Self::Selected => "selected",
            Self::Cancelled => "cancelled",
            Self::BuildingParameters => "building-parameters",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Finalizing => "finalizing",
        }
    }

    /// Whether `next` is directly reachable from `self`.
    pub fn can_transition_to(&self, next: WizardState) -> bool {
        use WizardState::*;

        match (self, next) {
            (Idle, Started) => true,
            (Started, CleaningDirectory | AwaitingSelection) => true,
            (CleaningDirectory, AwaitingSelection) => true,
            (AwaitingSelection, Cancelled | Selected) => true,
            (Selected, BuildingParameters) => true,
            (BuildingParameters, Completed) => true,
            (
                Started | CleaningDirectory | AwaitingSelection | Selected | BuildingParameters,
                Failed,
            ) => true,
            (Completed | Cancelled | Failed, Finalizing) => true,
            (Finalizing, Idle) => true,
            _ => false,
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host modeless UI is disabled for as long as this guard lives.
pub struct ModalSession<'a> {
    host: &'a dyn HostShell,
}

impl<'a> ModalSession<'a> {
    pub fn acquire(host: &'a dyn HostShell) -> Self {
        host.set_modeless(false);
        Self { host }
    }
}

impl Drop for ModalSession<'_> {
    fn drop(&mut self) {
        self.host.set_modeless(true);
    }
}

/// Runs the wizard for the host.
///
/// Holds the run context, so runs are serialized by `&mut self`.
pub struct WizardOrchestrator {
    wizard: WizardInfo,
    ui: Box<dyn OptionsUi>,
    host: Arc<dyn HostShell>,
    reconciler: DirectoryReconciler,
    telemetry: TelemetryDispatcher,
    cleanup_policy: CleanupPolicy,
    context: RunContext,
    state: WizardState,
}

impl WizardOrchestrator {
    /// Create an orchestrator with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use platwiz_core::application::WizardOrchestrator;
    ///
    /// let mut orchestrator = WizardOrchestrator::new(
    ///     wizard,     // WizardInfo
    ///     ui,         // impl OptionsUi
    ///     host,       // impl HostShell
    ///     filesystem, // impl Filesystem
    ///     sink,       // impl TelemetrySink
    /// );
    /// let outcome = orchestrator.run(&mut metadata);
    /// orchestrator.finish();
    /// ```
    pub fn new(
        wizard: WizardInfo,
        ui: Box<dyn OptionsUi>,
        host: Arc<dyn HostShell>,
        filesystem: Box<dyn Filesystem>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self::with_dispatcher(wizard, ui, host, filesystem, TelemetryDispatcher::spawn(sink))
    }

    /// Same as [`WizardOrchestrator::new`] with an existing dispatcher
    /// (for example [`TelemetryDispatcher::disabled`]).
    pub fn with_dispatcher(
        wizard: WizardInfo,
        ui: Box<dyn OptionsUi>,
        host: Arc<dyn HostShell>,
        filesystem: Box<dyn Filesystem>,
        telemetry: TelemetryDispatcher,
    ) -> Self {
        Self {
            wizard,
            ui,
            reconciler: DirectoryReconciler::new(Arc::clone(&host), filesystem),
            host,
            telemetry,
            cleanup_policy: CleanupPolicy::default(),
            context: RunContext::new(),
            state: WizardState::Idle,
        }
    }

    pub fn with_cleanup_policy(mut self, policy: CleanupPolicy) -> Self {
        self.cleanup_policy = policy;
        self
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Run the wizard against the host's metadata.
    ///
    /// On `Completed` the host parameters hold the built parameter set and
    /// the final directories. On `Cancelled` they hold whatever the
    /// directory cleanup wrote. On `Failed` nothing beyond the cleanup is
    /// written.
    #[instrument(skip_all, fields(kind = %metadata.kind, run_id = tracing::field::Empty))]
    pub fn run(&mut self, metadata: &mut RunMetadata) -> RunOutcome {
        if !metadata.kind.is_orchestrated() {
            debug!("Run kind is not handled by the wizard, skipping");
            return RunOutcome::Skipped;
        }

        let outcome = match self.drive(metadata) {
            Ok(outcome) => outcome,
            Err(cause) => self.fail(cause),
        };
        self.finalize();

        info!(outcome = outcome.label(), "Wizard run finished");
        outcome
    }

    /// Stop the telemetry worker after delivering queued events.
    pub fn finish(self) {
        self.telemetry.shutdown();
    }

    fn drive(&mut self, metadata: &mut RunMetadata) -> WizardResult<RunOutcome> {
        self.advance(WizardState::Started)?;
        let identity = RunIdentity::capture(&self.wizard, metadata)?;
        let run_id = self.context.begin(identity)?;
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        if metadata.requires_fresh_directory {
            self.advance(WizardState::CleaningDirectory)?;
            let report = self.reconciler.reconcile(metadata)?;
            self.context.record_cleanup(report.cleanup)?;

            if self.cleanup_policy.aborts_on(report.cleanup) {
                return Err(ApplicationError::CleanupFailed {
                    path: PathBuf::from(report.target_root.as_str()),
                    result: report.cleanup,
                }
                .into());
            }
        }

        self.advance(WizardState::AwaitingSelection)?;
        let request = self.selection_request(run_id, metadata)?;
        let selection = {
            let _modal = ModalSession::acquire(self.host.as_ref());
            self.ui.show_options(&request)?
        };
        self.context.record_selection(selection)?;
        self.context.stop_timer();

        let Some(selection) = self.context.selection().cloned() else {
            self.advance(WizardState::Cancelled)?;
            info!("Options dialog cancelled");
            self.report(TelemetryKind::WizardCancelled {
                elapsed_seconds: self.context.elapsed_seconds(),
            });
            return Ok(RunOutcome::Cancelled);
        };

        self.advance(WizardState::Selected)?;
        self.report(TelemetryKind::ProjectGenerated {
            selection,
            elapsed_seconds: self.context.elapsed_seconds(),
        });

        self.advance(WizardState::BuildingParameters)?;
        let parameters = self.build_parameters(metadata)?;

        self.advance(WizardState::Completed)?;
        Ok(RunOutcome::Completed { parameters })
    }

    /// Build into a copy of the metadata and write back only on success.
    fn build_parameters(&mut self, metadata: &mut RunMetadata) -> WizardResult<ParameterMap> {
        let selection = self
            .context
            .take_selection()
            .ok_or_else(|| WizardError::Internal {
                message: "selection was consumed before parameters were built".into(),
            })?;
        validator::validate_selection(&selection)?;

        let parameters = ParameterBuilder::build(&selection);

        let mut staged = metadata.clone();
        parameters.write_into(&mut staged.parameters);
        ParameterBuilder::apply_solution_directory_policy(&mut staged, &selection)?;
        metadata.parameters = staged.parameters;

        info!(count = parameters.len(), "Template parameters written");
        Ok(parameters)
    }

    fn selection_request(
        &self,
        run_id: Uuid,
        metadata: &RunMetadata,
    ) -> WizardResult<SelectionRequest> {
        let identity = self.context.identity().ok_or(ApplicationError::NoActiveRun)?;
        Ok(SelectionRequest {
            run_id,
            kind: metadata.kind,
            project_name: identity.project_name.clone(),
            safe_project_name: identity.safe_project_name.clone(),
            solution_name: identity.solution_name.clone(),
            can_create_solution_directory: identity.can_create_solution_directory,
            destination: metadata.destination_directory()?.to_string(),
        })
    }

    fn fail(&mut self, cause: WizardError) -> RunOutcome {
        let failed_in = self.state;
        error!(state = %failed_in, error = %cause, "Wizard run failed");
        self.force(WizardState::Failed);

        self.report(TelemetryKind::Error {
            message: cause.to_string(),
            context: failed_in.to_string(),
        });
        self.ui.show_error(&cause);

        RunOutcome::Failed { cause }
    }

    fn finalize(&mut self) {
        self.force(WizardState::Finalizing);
        self.report(TelemetryKind::EndSession);
        self.context.end();
        self.force(WizardState::Idle);
    }

    fn advance(&mut self, next: WizardState) -> WizardResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ApplicationError::IllegalTransition {
                from: self.state,
                to: next,
            }
            .into());
        }
        debug!(from = %self.state, to = %next, "Wizard state");
        self.state = next;
        Ok(())
    }

    /// `advance` for the exit path, which must not be blocked.
    fn force(&mut self, next: WizardState) {
        if !self.state.can_transition_to(next) {
            warn!(from = %self.state, to = %next, "Forcing wizard state");
        }
        self.state = next;
    }

    fn report(&self, kind: TelemetryKind) {
        let run_id = self.context.run_id().unwrap_or_else(Uuid::nil);
        self.telemetry
            .dispatch(TelemetryEvent::new(run_id, &self.wizard, kind));
    }
}
