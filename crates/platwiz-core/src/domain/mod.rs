// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for platwiz.
//!
//! This module contains pure logic with no I/O. Filesystem, UI, host and
//! telemetry concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Host paths are manipulated as strings, never touched
//! - **Immutable selections**: `UserSelectedOptions` is built once, validated,
//!   then only read
//! - **Total parameter mapping**: every selection maps to every key
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    common::{HostPath, PathStyle},
    parameters::{ParameterBuilder, ParameterKey, ParameterMap},
    run_metadata::{HostKey, HostParameters, RunMetadata},
    selection::{
        PlatformSelection, SdkSelection, SelectionBuilder, TestSelection, UserSelectedOptions,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    DirectoryCleanupResult, IosVersion, ProjectGrouping, RunKind, ScaffoldType, TargetFramework,
};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Selection → Parameters → Host map
    // ========================================================================

    fn host_parameters(destination: &str) -> HostParameters {
        [
            (HostKey::ProjectName.as_str(), "Contoso"),
            (HostKey::SafeProjectName.as_str(), "Contoso"),
            (HostKey::SpecifiedSolutionName.as_str(), ""),
            (HostKey::DestinationDirectory.as_str(), destination),
            (HostKey::SolutionDirectory.as_str(), destination),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn selection_flows_into_host_map() {
        let options = UserSelectedOptions::builder()
            .app_id("com.contoso.app")
            .app_name("Contoso")
            .solution_name("Contoso")
            .platforms(PlatformSelection::all())
            .can_create_solution_directory(true)
            .build()
            .unwrap();

        let mut metadata = RunMetadata::new(RunKind::NewProject, host_parameters("/src/"));
        ParameterBuilder::build(&options).write_into(&mut metadata.parameters);
        ParameterBuilder::apply_solution_directory_policy(&mut metadata, &options).unwrap();

        // 5 host keys + every template parameter
        assert_eq!(
            metadata.parameters.len(),
            HostKey::ALL.len() + ParameterKey::ALL.len()
        );
        assert_eq!(
            metadata.parameters.get("$passthrough:HasUwpProject$"),
            Some("true")
        );
        assert_eq!(
            metadata.destination_directory().unwrap().as_str(),
            "/src/Contoso/"
        );
    }

    #[test]
    fn validator_rejects_deserialized_invalid_selection() {
        let options = UserSelectedOptions::builder()
            .app_id("com.contoso.app")
            .app_name("Contoso")
            .solution_name("Contoso")
            .platforms(PlatformSelection::all())
            .build()
            .unwrap();

        let mut json = serde_json::to_value(&options).unwrap();
        json["platforms"] = serde_json::json!({ "android": false, "ios": false, "uwp": false });
        let tampered: UserSelectedOptions = serde_json::from_value(json).unwrap();

        assert_eq!(
            DomainValidator::validate_selection(&tampered),
            Err(DomainError::NoPlatformSelected)
        );
    }
}
