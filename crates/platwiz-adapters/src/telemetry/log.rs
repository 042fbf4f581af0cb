//! Sinks that never leave the process.

use tracing::info;

use platwiz_core::{
    application::{ports::TelemetrySink, telemetry::TelemetryEvent},
    error::WizardResult,
};

/// Writes each event as a structured `tracing` line under the
/// `platwiz::telemetry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn track(&self, event: &TelemetryEvent) -> WizardResult<()> {
        info!(
            target: "platwiz::telemetry",
            run_id = %event.run_id,
            wizard = %event.wizard_name,
            version = %event.wizard_version,
            event = event.kind.name(),
            "{:?}",
            event.kind
        );
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn track(&self, _event: &TelemetryEvent) -> WizardResult<()> {
        Ok(())
    }
}
