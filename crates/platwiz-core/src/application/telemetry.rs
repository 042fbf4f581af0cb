//! Telemetry events and the fire-and-forget dispatcher.
//!
//! The orchestrator never waits on a sink. Events go through an mpsc channel
//! to a single worker thread, which hands them to the sink in order and
//! drops whatever the sink rejects.

use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::application::ports::TelemetrySink;
use crate::domain::UserSelectedOptions;

/// Name and version of the wizard a run belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardInfo {
    pub name: String,
    pub version: String,
}

impl WizardInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryKind {
    WizardCancelled {
        elapsed_seconds: f64,
    },
    ProjectGenerated {
        selection: UserSelectedOptions,
        elapsed_seconds: f64,
    },
    Error {
        message: String,
        /// State the run was in when the error surfaced.
        context: String,
    },
    EndSession,
}

impl TelemetryKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WizardCancelled { .. } => "wizard_cancelled",
            Self::ProjectGenerated { .. } => "project_generated",
            Self::Error { .. } => "error",
            Self::EndSession => "end_session",
        }
    }
}

/// One telemetry report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryEvent {
    pub run_id: Uuid,
    pub wizard_name: String,
    pub wizard_version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TelemetryKind,
}

impl TelemetryEvent {
    pub fn new(run_id: Uuid, wizard: &WizardInfo, kind: TelemetryKind) -> Self {
        Self {
            run_id,
            wizard_name: wizard.name.clone(),
            wizard_version: wizard.version.clone(),
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// Background delivery of telemetry events.
///
/// Dropping the dispatcher closes the channel without waiting; call
/// [`TelemetryDispatcher::shutdown`] to flush.
pub struct TelemetryDispatcher {
    sender: Option<Sender<TelemetryEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl TelemetryDispatcher {
    /// Start the worker thread for `sink`.
    ///
    /// If the thread cannot be spawned the dispatcher still works, it just
    /// drops every event.
    pub fn spawn(sink: Arc<dyn TelemetrySink>) -> Self {
        let (sender, receiver) = mpsc::channel::<TelemetryEvent>();

        let worker = thread::Builder::new()
            .name("platwiz-telemetry".into())
            .spawn(move || {
                for event in receiver {
                    if let Err(e) = sink.track(&event) {
                        debug!(
                            event = event.kind.name(),
                            error = %e,
                            "Telemetry sink rejected event"
                        );
                    }
                }
                trace!("Telemetry worker stopped");
            });

        match worker {
            Ok(handle) => Self {
                sender: Some(sender),
                worker: Some(handle),
            },
            Err(e) => {
                warn!(error = %e, "Could not start telemetry worker, events will be dropped");
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// A dispatcher that drops everything.
    pub fn disabled() -> Self {
        Self {
            sender: None,
            worker: None,
        }
    }

    /// Queue `event`. Never blocks and never fails.
    pub fn dispatch(&self, event: TelemetryEvent) {
        let Some(sender) = &self.sender else {
            trace!(event = event.kind.name(), "Telemetry disabled, event dropped");
            return;
        };
        if sender.send(event).is_err() {
            debug!("Telemetry worker is gone, event dropped");
        }
    }

    /// Close the channel and wait for queued events to be delivered.
    pub fn shutdown(mut self) {
        self.sender.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.join().is_err() {
            warn!("Telemetry worker panicked");
        }
    }
}

impl std::fmt::Debug for TelemetryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryDispatcher")
            .field("enabled", &self.sender.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::MockTelemetrySink;
    use crate::error::WizardResult;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl TelemetrySink for Recorder {
        fn track(&self, event: &TelemetryEvent) -> WizardResult<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn event(kind: TelemetryKind) -> TelemetryEvent {
        TelemetryEvent::new(Uuid::new_v4(), &WizardInfo::new("test", "0.0.1"), kind)
    }

    #[test]
    fn shutdown_flushes_in_order() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = TelemetryDispatcher::spawn(recorder.clone());

        dispatcher.dispatch(event(TelemetryKind::WizardCancelled {
            elapsed_seconds: 1.5,
        }));
        dispatcher.dispatch(event(TelemetryKind::EndSession));
        dispatcher.shutdown();

        let events = recorder.events.lock().unwrap();
        let names: Vec<_> = events.iter().map(|e| e.kind.name()).collect();
        assert_eq!(names, ["wizard_cancelled", "end_session"]);
    }

    #[test]
    fn sink_errors_are_swallowed() {
        let mut sink = MockTelemetrySink::new();
        sink.expect_track().times(2).returning(|_| {
            Err(ApplicationError::TelemetryFailure {
                reason: "offline".into(),
            }
            .into())
        });

        let dispatcher = TelemetryDispatcher::spawn(Arc::new(sink));
        dispatcher.dispatch(event(TelemetryKind::EndSession));
        dispatcher.dispatch(event(TelemetryKind::EndSession));
        dispatcher.shutdown();
    }

    #[test]
    fn disabled_dispatcher_drops_events() {
        let dispatcher = TelemetryDispatcher::disabled();
        dispatcher.dispatch(event(TelemetryKind::EndSession));
        dispatcher.shutdown();
    }

    #[test]
    fn event_serializes_flat_with_tag() {
        let json = serde_json::to_value(event(TelemetryKind::Error {
            message: "boom".into(),
            context: "building-parameters".into(),
        }))
        .unwrap();

        assert_eq!(json["event"], "error");
        assert_eq!(json["message"], "boom");
        assert_eq!(json["wizard_name"], "test");
    }
}
