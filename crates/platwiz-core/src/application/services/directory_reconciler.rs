//! Directory Reconciler - clears a stale destination before regeneration.
//!
//! 1. Resolve the target root (the destination, or its parent when the host
//!    asked for a solution folder)
//! 2. Close the open solution
//! 3. Safe recursive delete, classified
//! 4. Point the destination and solution directories at the root's parent

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    application::ports::{Filesystem, HostShell},
    domain::{DirectoryCleanupResult, HostKey, HostPath, RunMetadata},
    error::WizardResult,
};

/// Whether a failed cleanup stops the run before the options UI is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupPolicy {
    /// Record the result and carry on.
    #[default]
    RecordOnly,
    AbortOnAccessDenied,
    AbortOnAnyFailure,
}

impl CleanupPolicy {
    pub const ALL: &'static [CleanupPolicy] = &[
        CleanupPolicy::RecordOnly,
        CleanupPolicy::AbortOnAccessDenied,
        CleanupPolicy::AbortOnAnyFailure,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RecordOnly => "record-only",
            Self::AbortOnAccessDenied => "abort-on-access-denied",
            Self::AbortOnAnyFailure => "abort-on-any-failure",
        }
    }

    pub fn aborts_on(self, result: DirectoryCleanupResult) -> bool {
        match self {
            Self::RecordOnly => false,
            Self::AbortOnAccessDenied => result == DirectoryCleanupResult::AccessDenied,
            Self::AbortOnAnyFailure => result.is_failure(),
        }
    }
}

impl std::fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CleanupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "record-only" | "record" => Ok(Self::RecordOnly),
            "abort-on-access-denied" => Ok(Self::AbortOnAccessDenied),
            "abort-on-any-failure" | "strict" => Ok(Self::AbortOnAnyFailure),
            other => Err(format!("unknown cleanup policy: {other}")),
        }
    }
}

/// What reconciliation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The directory that was deleted (or would have been).
    pub target_root: HostPath,
    /// Parent of `target_root`, now written into the host map.
    pub new_root: HostPath,
    pub cleanup: DirectoryCleanupResult,
}

/// Clears the destination and rewrites the directory parameters.
pub struct DirectoryReconciler {
    host: Arc<dyn HostShell>,
    filesystem: Box<dyn Filesystem>,
}

impl DirectoryReconciler {
    pub fn new(host: Arc<dyn HostShell>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { host, filesystem }
    }

    /// Directory that will be deleted for `metadata`.
    pub fn target_root(metadata: &RunMetadata) -> WizardResult<HostPath> {
        let destination = metadata.destination_directory()?;
        if metadata.specified_solution_name()?.trim().is_empty() {
            Ok(destination)
        } else {
            Ok(destination.parent()?)
        }
    }

    /// Clear the target root and rewrite the destination/solution paths.
    ///
    /// A missing root is `NotFound`, not an error. Deletion failures are
    /// classified in the report; only host and contract failures are
    /// returned as errors.
    #[instrument(skip_all, fields(destination = tracing::field::Empty))]
    pub fn reconcile(&self, metadata: &mut RunMetadata) -> WizardResult<ReconcileReport> {
        let target_root = Self::target_root(metadata)?;
        tracing::Span::current().record("destination", target_root.as_str());
        let new_root = target_root.parent()?.with_trailing_separator();

        // Nothing may be deleted under an open solution
        self.host.close_solution()?;

        let path = Path::new(target_root.as_str());
        let cleanup = if self.filesystem.exists(path) {
            self.filesystem.safe_delete_dir(path)
        } else {
            DirectoryCleanupResult::NotFound
        };

        if cleanup.is_failure() {
            warn!(root = %target_root, result = %cleanup, "Destination cleanup failed");
        } else {
            info!(root = %target_root, result = %cleanup, "Destination reconciled");
        }

        metadata
            .parameters
            .set(HostKey::DestinationDirectory, new_root.as_str());
        metadata
            .parameters
            .set(HostKey::SolutionDirectory, new_root.as_str());

        Ok(ReconcileReport {
            target_root,
            new_root,
            cleanup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockFilesystem, MockHostShell};
    use crate::domain::{HostParameters, RunKind};
    use crate::error::WizardError;

    fn metadata(destination: &str, solution_name: &str) -> RunMetadata {
        let parameters: HostParameters = [
            (HostKey::ProjectName.as_str(), "MyApp"),
            (HostKey::SafeProjectName.as_str(), "MyApp"),
            (HostKey::SpecifiedSolutionName.as_str(), solution_name),
            (HostKey::DestinationDirectory.as_str(), destination),
            (HostKey::SolutionDirectory.as_str(), destination),
        ]
        .into_iter()
        .collect();
        RunMetadata::new(RunKind::NewProject, parameters)
    }

    fn host() -> Arc<MockHostShell> {
        let mut host = MockHostShell::new();
        host.expect_close_solution().times(1).returning(|| Ok(()));
        Arc::new(host)
    }

    #[test]
    fn missing_root_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_safe_delete_dir().never();

        let reconciler = DirectoryReconciler::new(host(), Box::new(fs));
        let mut metadata = metadata("/work/MyApp/", "");
        let report = reconciler.reconcile(&mut metadata).unwrap();

        assert_eq!(report.cleanup, DirectoryCleanupResult::NotFound);
        assert_eq!(metadata.destination_directory().unwrap().as_str(), "/work/");
    }

    #[test]
    fn existing_root_is_deleted_and_parent_written_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_safe_delete_dir()
            .withf(|path| path == Path::new("/work/MyApp/"))
            .times(1)
            .return_const(DirectoryCleanupResult::Succeeded);

        let reconciler = DirectoryReconciler::new(host(), Box::new(fs));
        let mut metadata = metadata("/work/MyApp/", "");
        let report = reconciler.reconcile(&mut metadata).unwrap();

        assert_eq!(report.cleanup, DirectoryCleanupResult::Succeeded);
        assert_eq!(report.new_root.as_str(), "/work/");
        assert_eq!(metadata.solution_directory().unwrap().as_str(), "/work/");
    }

    #[test]
    fn solution_folder_makes_parent_the_target() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_safe_delete_dir()
            .withf(|path| path == Path::new(r"C:\Proj\MyApp\"))
            .return_const(DirectoryCleanupResult::Succeeded);

        let reconciler = DirectoryReconciler::new(host(), Box::new(fs));
        let mut metadata = metadata(r"C:\Proj\MyApp\MyApp\", "MyApp");
        let report = reconciler.reconcile(&mut metadata).unwrap();

        assert_eq!(report.target_root.as_str(), r"C:\Proj\MyApp\");
        assert_eq!(
            metadata.destination_directory().unwrap().as_str(),
            r"C:\Proj\"
        );
    }

    #[test]
    fn access_denied_is_reported_not_raised() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_safe_delete_dir()
            .return_const(DirectoryCleanupResult::AccessDenied);

        let reconciler = DirectoryReconciler::new(host(), Box::new(fs));
        let report = reconciler
            .reconcile(&mut metadata("/work/MyApp/", ""))
            .unwrap();
        assert_eq!(report.cleanup, DirectoryCleanupResult::AccessDenied);
    }

    #[test]
    fn host_failure_stops_before_delete() {
        let mut host = MockHostShell::new();
        host.expect_close_solution().returning(|| {
            Err(ApplicationError::HostFailure {
                operation: "close the solution",
                reason: "busy".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();
        fs.expect_safe_delete_dir().never();

        let reconciler = DirectoryReconciler::new(Arc::new(host), Box::new(fs));
        let mut metadata = metadata("/work/MyApp/", "");
        let err = reconciler.reconcile(&mut metadata).unwrap_err();

        assert!(matches!(err, WizardError::Application(ApplicationError::HostFailure { .. })));
        assert_eq!(
            metadata.destination_directory().unwrap().as_str(),
            "/work/MyApp/"
        );
    }

    #[test]
    fn policy_decides_abort() {
        use DirectoryCleanupResult::*;

        assert!(!CleanupPolicy::RecordOnly.aborts_on(AccessDenied));
        assert!(CleanupPolicy::AbortOnAccessDenied.aborts_on(AccessDenied));
        assert!(!CleanupPolicy::AbortOnAccessDenied.aborts_on(InUse));
        assert!(CleanupPolicy::AbortOnAnyFailure.aborts_on(InUse));
        assert!(!CleanupPolicy::AbortOnAnyFailure.aborts_on(NotFound));
    }
}
