//! Append-only JSON lines telemetry file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use platwiz_core::{
    application::{ApplicationError, ports::TelemetrySink, telemetry::TelemetryEvent},
    error::WizardResult,
};

/// One JSON object per line, appended to `path`.
///
/// The file and its parent directory are created on first write.
#[derive(Debug)]
pub struct JsonlTelemetry {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlTelemetry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn failure(reason: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::TelemetryFailure {
        reason: reason.to_string(),
    }
}

impl TelemetrySink for JsonlTelemetry {
    fn track(&self, event: &TelemetryEvent) -> WizardResult<()> {
        let mut line = serde_json::to_string(event).map_err(failure)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| failure("telemetry file lock poisoned"))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(failure)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| failure(format!("{}: {e}", self.path.display())))?;
        file.write_all(line.as_bytes()).map_err(failure)?;
        Ok(())
    }
}
