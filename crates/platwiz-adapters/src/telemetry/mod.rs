//! Telemetry sink adapters.

mod jsonl;
mod log;

pub use jsonl::JsonlTelemetry;
pub use log::{NoopTelemetry, TracingTelemetry};
