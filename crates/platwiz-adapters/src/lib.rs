//! Infrastructure adapters for platwiz.
//!
//! This crate implements the driven ports defined in
//! `platwiz_core::application::ports`. It contains the filesystem access and
//! telemetry I/O; the options UI lives in the CLI.

pub mod filesystem;
pub mod host;
pub mod telemetry;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use host::LocalHost;
pub use telemetry::{JsonlTelemetry, NoopTelemetry, TracingTelemetry};
