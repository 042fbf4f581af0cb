//! Domain value objects: RunKind, ProjectGrouping, ScaffoldType,
//! TargetFramework, IosVersion, DirectoryCleanupResult.
//!
//! # Design
//!
//! These are pure value types: `Copy` where possible, equality-by-value, no
//! identity. Each one owns its string token (the form written into the host
//! parameter map) and its `FromStr` parser.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add it to the type's `ALL` table so `platwiz list` shows it
//! 4. Done

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RunKind ──────────────────────────────────────────────────────────────────

/// How the host invoked the wizard.
///
/// Only [`RunKind::NewProject`] and [`RunKind::MultiProject`] drive the full
/// orchestration; anything else passes straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunKind {
    NewProject,
    MultiProject,
    ProjectItem,
    Other,
}

impl RunKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewProject => "new-project",
            Self::MultiProject => "multi-project",
            Self::ProjectItem => "project-item",
            Self::Other => "other",
        }
    }

    /// Whether this kind of run goes through the wizard at all.
    pub const fn is_orchestrated(self) -> bool {
        matches!(self, Self::NewProject | Self::MultiProject)
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectGrouping ──────────────────────────────────────────────────────────

/// How generated projects are grouped inside the solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectGrouping {
    /// Every project at the solution root.
    #[default]
    None,
    /// Platform projects grouped under a "Platforms" solution folder, tests
    /// under "Tests".
    SolutionFolders,
    /// One solution folder per platform holding the app and its tests.
    PlatformFolders,
}

impl ProjectGrouping {
    pub const ALL: &'static [ProjectGrouping] = &[
        ProjectGrouping::None,
        ProjectGrouping::SolutionFolders,
        ProjectGrouping::PlatformFolders,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SolutionFolders => "solution-folders",
            Self::PlatformFolders => "platform-folders",
        }
    }
}

impl fmt::Display for ProjectGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectGrouping {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "flat" => Ok(Self::None),
            "solution-folders" | "solution" | "folders" => Ok(Self::SolutionFolders),
            "platform-folders" | "platform" => Ok(Self::PlatformFolders),
            other => Err(DomainError::InvalidSelection(format!(
                "unknown project grouping: {other}"
            ))),
        }
    }
}

// ── ScaffoldType ─────────────────────────────────────────────────────────────

/// The starting point the generated app is scaffolded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaffoldType {
    /// A single empty view.
    #[default]
    Blank,
    /// Master/detail navigation.
    Navigation,
    /// Tabbed root view.
    Tabbed,
    /// Fully wired sample app.
    Sample,
}

impl ScaffoldType {
    pub const ALL: &'static [ScaffoldType] = &[
        ScaffoldType::Blank,
        ScaffoldType::Navigation,
        ScaffoldType::Tabbed,
        ScaffoldType::Sample,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Navigation => "navigation",
            Self::Tabbed => "tabbed",
            Self::Sample => "sample",
        }
    }

    /// Token written into the parameter map.
    pub const fn as_parameter(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ScaffoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaffoldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blank" | "empty" => Ok(Self::Blank),
            "navigation" | "nav" => Ok(Self::Navigation),
            "tabbed" | "tabs" => Ok(Self::Tabbed),
            "sample" | "demo" => Ok(Self::Sample),
            other => Err(DomainError::InvalidSelection(format!(
                "unknown scaffold type: {other}"
            ))),
        }
    }
}

// ── TargetFramework ──────────────────────────────────────────────────────────

/// .NET Standard version the shared core project targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFramework {
    #[serde(rename = "netstandard2.0")]
    NetStandard20,
    #[default]
    #[serde(rename = "netstandard2.1")]
    NetStandard21,
}

impl TargetFramework {
    pub const ALL: &'static [TargetFramework] =
        &[TargetFramework::NetStandard20, TargetFramework::NetStandard21];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetStandard20 => "netstandard2.0",
            Self::NetStandard21 => "netstandard2.1",
        }
    }

    /// Bare version number, the form the templates expect.
    pub const fn version(&self) -> &'static str {
        match self {
            Self::NetStandard20 => "2.0",
            Self::NetStandard21 => "2.1",
        }
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "netstandard2.0" | "2.0" => Ok(Self::NetStandard20),
            "netstandard2.1" | "2.1" => Ok(Self::NetStandard21),
            other => Err(DomainError::InvalidSelection(format!(
                "unknown target framework: {other}"
            ))),
        }
    }
}

// ── IosVersion ───────────────────────────────────────────────────────────────

/// Minimum iOS deployment target, rendered as `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IosVersion {
    pub major: u16,
    pub minor: u16,
}

impl IosVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl Default for IosVersion {
    fn default() -> Self {
        Self::new(11, 0)
    }
}

impl fmt::Display for IosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for IosVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidSelection(format!("invalid iOS version: {s}"));

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        let major = major.trim().parse().map_err(|_| invalid())?;
        let minor = minor.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(major, minor))
    }
}

// ── DirectoryCleanupResult ───────────────────────────────────────────────────

/// Classified outcome of the safe recursive delete done before generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryCleanupResult {
    /// The run did not need a fresh directory.
    #[default]
    NotAttempted,
    Succeeded,
    /// Nothing existed at the target root.
    NotFound,
    AccessDenied,
    /// A file under the root is locked by another process.
    InUse,
    /// Any other I/O failure.
    Failed,
}

impl DirectoryCleanupResult {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotAttempted => "not-attempted",
            Self::Succeeded => "succeeded",
            Self::NotFound => "not-found",
            Self::AccessDenied => "access-denied",
            Self::InUse => "in-use",
            Self::Failed => "failed",
        }
    }

    /// `Succeeded` and `NotFound` both leave the target root absent.
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Succeeded | Self::NotFound)
    }

    pub const fn is_failure(self) -> bool {
        matches!(self, Self::AccessDenied | Self::InUse | Self::Failed)
    }
}

impl fmt::Display for DirectoryCleanupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_project_runs_are_orchestrated() {
        assert!(RunKind::NewProject.is_orchestrated());
        assert!(RunKind::MultiProject.is_orchestrated());
        assert!(!RunKind::ProjectItem.is_orchestrated());
        assert!(!RunKind::Other.is_orchestrated());
    }

    #[test]
    fn grouping_parses_aliases() {
        assert_eq!(
            ProjectGrouping::from_str("flat").unwrap(),
            ProjectGrouping::None
        );
        assert_eq!(
            ProjectGrouping::from_str("Platform").unwrap(),
            ProjectGrouping::PlatformFolders
        );
        assert!(ProjectGrouping::from_str("nested").is_err());
    }

    #[test]
    fn scaffold_type_tokens_roundtrip_through_from_str() {
        for scaffold in ScaffoldType::ALL {
            assert_eq!(
                ScaffoldType::from_str(scaffold.as_parameter()).unwrap(),
                *scaffold
            );
        }
    }

    #[test]
    fn target_framework_accepts_bare_version() {
        assert_eq!(
            TargetFramework::from_str("2.0").unwrap(),
            TargetFramework::NetStandard20
        );
        assert_eq!(TargetFramework::NetStandard21.version(), "2.1");
    }

    #[test]
    fn cleanup_classification() {
        assert!(DirectoryCleanupResult::NotFound.is_clean());
        assert!(DirectoryCleanupResult::Succeeded.is_clean());
        assert!(!DirectoryCleanupResult::NotAttempted.is_failure());
        assert!(DirectoryCleanupResult::AccessDenied.is_failure());
        assert!(DirectoryCleanupResult::InUse.is_failure());
    }

    #[test]
    fn ios_version_parses_major_only() {
        assert_eq!(IosVersion::from_str("12").unwrap(), IosVersion::new(12, 0));
        assert_eq!(IosVersion::from_str("13.4").unwrap().to_string(), "13.4");
        assert!(IosVersion::from_str("thirteen").is_err());
    }
}
