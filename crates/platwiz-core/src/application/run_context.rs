//! Single-slot state for the run in progress.

use std::time::Instant;

use tracing::debug;
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::telemetry::WizardInfo;
use crate::domain::{DirectoryCleanupResult, DomainError, RunMetadata, UserSelectedOptions};

/// Who the run is for, captured once when it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub wizard: WizardInfo,
    pub project_name: String,
    pub safe_project_name: String,
    pub solution_name: String,
    pub can_create_solution_directory: bool,
}

impl RunIdentity {
    /// Read the identity out of the host parameters.
    ///
    /// A non-blank specified solution name means the host asked for a
    /// solution folder.
    pub fn capture(wizard: &WizardInfo, metadata: &RunMetadata) -> Result<Self, DomainError> {
        let solution_name = metadata.specified_solution_name()?.to_string();
        Ok(Self {
            wizard: wizard.clone(),
            project_name: metadata.project_name()?.to_string(),
            safe_project_name: metadata.safe_project_name()?.to_string(),
            can_create_solution_directory: !solution_name.trim().is_empty(),
            solution_name,
        })
    }
}

#[derive(Debug)]
struct ActiveRun {
    id: Uuid,
    identity: RunIdentity,
    selection: Option<UserSelectedOptions>,
    cleanup: DirectoryCleanupResult,
    started: Instant,
    stopped: Option<Instant>,
}

/// Holds at most one active run.
///
/// Every field is reset by [`RunContext::begin`] and dropped by
/// [`RunContext::end`], so nothing from one run can be observed by the next.
#[derive(Debug, Default)]
pub struct RunContext {
    active: Option<ActiveRun>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run. Fails if one is already active.
    pub fn begin(&mut self, identity: RunIdentity) -> Result<Uuid, ApplicationError> {
        if let Some(active) = &self.active {
            return Err(ApplicationError::RunAlreadyActive {
                run_id: active.id.to_string(),
            });
        }

        let id = Uuid::new_v4();
        debug!(run_id = %id, project = %identity.project_name, "Run context started");
        self.active = Some(ActiveRun {
            id,
            identity,
            selection: None,
            cleanup: DirectoryCleanupResult::NotAttempted,
            started: Instant::now(),
            stopped: None,
        });
        Ok(id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn identity(&self) -> Option<&RunIdentity> {
        self.active.as_ref().map(|a| &a.identity)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveRun, ApplicationError> {
        self.active.as_mut().ok_or(ApplicationError::NoActiveRun)
    }

    /// Store what the options UI returned. `None` is a cancellation.
    pub fn record_selection(
        &mut self,
        selection: Option<UserSelectedOptions>,
    ) -> Result<(), ApplicationError> {
        self.active_mut()?.selection = selection;
        Ok(())
    }

    pub fn has_selection(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.selection.is_some())
    }

    /// Peek at the selection without consuming it.
    pub fn selection(&self) -> Option<&UserSelectedOptions> {
        self.active.as_ref().and_then(|a| a.selection.as_ref())
    }

    /// Move the selection out. A second call returns `None`.
    pub fn take_selection(&mut self) -> Option<UserSelectedOptions> {
        self.active.as_mut().and_then(|a| a.selection.take())
    }

    pub fn record_cleanup(
        &mut self,
        result: DirectoryCleanupResult,
    ) -> Result<(), ApplicationError> {
        self.active_mut()?.cleanup = result;
        Ok(())
    }

    /// `NotAttempted` when idle or when no cleanup ran.
    pub fn cleanup_result(&self) -> DirectoryCleanupResult {
        self.active
            .as_ref()
            .map_or(DirectoryCleanupResult::NotAttempted, |a| a.cleanup)
    }

    /// Freeze the elapsed time. Later calls keep the first stop.
    pub fn stop_timer(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.stopped.get_or_insert_with(Instant::now);
        }
    }

    /// Seconds since `begin`, or until `stop_timer`. `0.0` when idle.
    pub fn elapsed_seconds(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |a| {
            let end = a.stopped.unwrap_or_else(Instant::now);
            end.duration_since(a.started).as_secs_f64()
        })
    }

    /// Drop the active run. Safe to call when idle.
    pub fn end(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(run_id = %active.id, cleanup = %active.cleanup, "Run context cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlatformSelection;

    fn identity() -> RunIdentity {
        RunIdentity {
            wizard: WizardInfo::new("platwiz", "0.1.0"),
            project_name: "Demo".into(),
            safe_project_name: "Demo".into(),
            solution_name: String::new(),
            can_create_solution_directory: false,
        }
    }

    fn selection() -> UserSelectedOptions {
        UserSelectedOptions::builder()
            .app_id("com.contoso.demo")
            .app_name("Demo")
            .solution_name("Demo")
            .platforms(PlatformSelection::all())
            .build()
            .unwrap()
    }

    #[test]
    fn begin_twice_is_rejected() {
        let mut context = RunContext::new();
        let first = context.begin(identity()).unwrap();

        let err = context.begin(identity()).unwrap_err();
        assert_eq!(
            err,
            ApplicationError::RunAlreadyActive {
                run_id: first.to_string()
            }
        );
    }

    #[test]
    fn end_is_idempotent_and_allows_a_new_run() {
        let mut context = RunContext::new();
        context.begin(identity()).unwrap();
        context.end();
        context.end();

        assert!(!context.is_active());
        assert!(context.begin(identity()).is_ok());
    }

    #[test]
    fn take_selection_consumes_it() {
        let mut context = RunContext::new();
        context.begin(identity()).unwrap();
        context.record_selection(Some(selection())).unwrap();

        assert!(context.take_selection().is_some());
        assert!(context.take_selection().is_none());
        assert!(!context.has_selection());
    }

    #[test]
    fn new_run_starts_without_previous_state() {
        let mut context = RunContext::new();
        context.begin(identity()).unwrap();
        context.record_selection(Some(selection())).unwrap();
        context
            .record_cleanup(DirectoryCleanupResult::Succeeded)
            .unwrap();
        context.end();

        context.begin(identity()).unwrap();
        assert!(context.selection().is_none());
        assert_eq!(context.cleanup_result(), DirectoryCleanupResult::NotAttempted);
    }

    #[test]
    fn recording_without_a_run_fails() {
        let mut context = RunContext::new();
        assert_eq!(
            context.record_selection(None),
            Err(ApplicationError::NoActiveRun)
        );
        assert_eq!(context.elapsed_seconds(), 0.0);
    }

    #[test]
    fn stopped_timer_is_frozen() {
        let mut context = RunContext::new();
        context.begin(identity()).unwrap();
        context.stop_timer();
        let first = context.elapsed_seconds();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(context.elapsed_seconds(), first);
    }

    #[test]
    fn capture_derives_solution_folder_flag() {
        use crate::domain::{HostKey, HostParameters, RunKind};

        let parameters: HostParameters = [
            (HostKey::ProjectName.as_str(), "Demo"),
            (HostKey::SafeProjectName.as_str(), "Demo"),
            (HostKey::SpecifiedSolutionName.as_str(), "  "),
        ]
        .into_iter()
        .collect();
        let metadata = RunMetadata::new(RunKind::NewProject, parameters);

        let identity = RunIdentity::capture(&WizardInfo::new("w", "1"), &metadata).unwrap();
        assert!(!identity.can_create_solution_directory);
    }
}
