//! What a run hands back to the host.

use thiserror::Error;

use crate::domain::ParameterMap;
use crate::error::WizardError;

/// Terminal result of [`WizardOrchestrator::run`](crate::application::WizardOrchestrator::run).
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run kind is not one the wizard handles. Nothing was touched.
    Skipped,
    /// Parameters were built and written into the host map.
    Completed { parameters: ParameterMap },
    /// The user closed the options UI.
    Cancelled,
    /// Something failed after the run started.
    Failed { cause: WizardError },
}

impl RunOutcome {
    /// Whether the host must stop and discard partial output.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Completed { .. } => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed { .. } => "failed",
        }
    }

    /// `Ok(None)` for a skipped run, `Ok(Some(_))` for a completed one.
    pub fn into_result(self) -> Result<Option<ParameterMap>, RunAborted> {
        match self {
            Self::Skipped => Ok(None),
            Self::Completed { parameters } => Ok(Some(parameters)),
            Self::Cancelled => Err(RunAborted { cause: None }),
            Self::Failed { cause } => Err(RunAborted { cause: Some(cause) }),
        }
    }
}

/// The abort signal. No cause means the user cancelled.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", match .cause {
    Some(cause) => format!("Wizard run aborted: {cause}"),
    None => "Wizard run cancelled".to_string(),
})]
pub struct RunAborted {
    pub cause: Option<WizardError>,
}

impl RunAborted {
    pub fn is_cancellation(&self) -> bool {
        self.cause.is_none()
    }
}
