// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be reported to telemetry and still returned)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid app id '{app_id}': {reason}")]
    InvalidAppId { app_id: String, reason: String },

    #[error("Invalid solution name '{name}': {reason}")]
    InvalidSolutionName { name: String, reason: String },

    #[error("No target platform selected")]
    NoPlatformSelected,

    #[error("'{flag}' requires the {platform} platform")]
    PlatformNotSelected {
        flag: &'static str,
        platform: &'static str,
    },

    // ========================================================================
    // Host Contract Violations
    // ========================================================================
    #[error("Host parameter '{key}' is missing")]
    MissingHostParameter { key: &'static str },

    #[error("Host path '{path}' has no parent directory")]
    NoParentDirectory { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSelection(msg) => vec![
                "Check the selected options".into(),
                format!("Details: {}", msg),
                "Try: platwiz list to see accepted values".into(),
            ],
            Self::InvalidAppId { .. } => vec![
                "App ids use reverse-DNS form".into(),
                "Example: com.contoso.myapp".into(),
            ],
            Self::InvalidSolutionName { .. } => vec![
                "Use letters, digits, '.', '-' and '_' only".into(),
                "Solution names must not contain path separators".into(),
            ],
            Self::NoPlatformSelected => vec![
                "Select at least one of: android, ios, uwp".into(),
            ],
            Self::PlatformNotSelected { platform, .. } => vec![
                format!("Enable the {} platform or drop the test project", platform),
            ],
            Self::MissingHostParameter { key } => vec![
                format!("The host must supply '{}'", key),
                "This is a host integration error".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection(_)
            | Self::InvalidAppId { .. }
            | Self::InvalidSolutionName { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::NoPlatformSelected | Self::PlatformNotSelected { .. } => {
                ErrorCategory::Compatibility
            }
            Self::MissingHostParameter { .. } | Self::NoParentDirectory { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
