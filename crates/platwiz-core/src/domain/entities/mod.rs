pub mod common;
pub mod parameters;
pub mod run_metadata;
pub mod selection;

pub use crate::domain::DomainError;
pub use parameters::{ParameterBuilder, ParameterKey, ParameterMap};
pub use run_metadata::{HostKey, HostParameters, RunMetadata};
pub use selection::UserSelectedOptions;
