use crate::domain::{entities::UserSelectedOptions, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    /// Selections can arrive deserialized (preset files, remote UIs), so the
    /// builder's checks are re-run before parameters are built from them.
    pub fn validate_selection(options: &UserSelectedOptions) -> Result<(), DomainError> {
        options.validate()
    }
}
