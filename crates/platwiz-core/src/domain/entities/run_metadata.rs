use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::HostPath, error::DomainError, value_objects::RunKind,
};

/// Well-known keys of the host's replacement map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKey {
    ProjectName,
    SafeProjectName,
    SpecifiedSolutionName,
    DestinationDirectory,
    SolutionDirectory,
}

impl HostKey {
    pub const ALL: &'static [HostKey] = &[
        HostKey::ProjectName,
        HostKey::SafeProjectName,
        HostKey::SpecifiedSolutionName,
        HostKey::DestinationDirectory,
        HostKey::SolutionDirectory,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectName => "$projectname$",
            Self::SafeProjectName => "$safeprojectname$",
            Self::SpecifiedSolutionName => "$specifiedsolutionname$",
            Self::DestinationDirectory => "$destinationdirectory$",
            Self::SolutionDirectory => "$solutiondirectory$",
        }
    }
}

/// The host's flat key→string map.
///
/// Ordered so that dumps and serialized output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostParameters(BTreeMap<String, String>);

impl HostParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn require(&self, key: HostKey) -> Result<&str, DomainError> {
        self.get(key.as_str())
            .ok_or(DomainError::MissingHostParameter { key: key.as_str() })
    }

    pub fn set(&mut self, key: HostKey, value: impl Into<String>) {
        self.insert(key.as_str(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HostParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Everything the host hands over for one run.
///
/// `parameters` is mutated in place by the orchestrator; after a completed
/// run it is what the template engine consumes.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub kind: RunKind,
    pub parameters: HostParameters,
    /// Opaque extra arguments from the host. Carried, never interpreted.
    pub custom_params: Vec<String>,
    /// Whether the destination must be cleared before the options UI runs.
    pub requires_fresh_directory: bool,
}

impl RunMetadata {
    pub fn new(kind: RunKind, parameters: HostParameters) -> Self {
        Self {
            kind,
            parameters,
            custom_params: Vec::new(),
            requires_fresh_directory: kind.is_orchestrated(),
        }
    }

    pub fn with_fresh_directory(mut self, required: bool) -> Self {
        self.requires_fresh_directory = required;
        self
    }

    pub fn project_name(&self) -> Result<&str, DomainError> {
        self.parameters.require(HostKey::ProjectName)
    }

    pub fn safe_project_name(&self) -> Result<&str, DomainError> {
        self.parameters.require(HostKey::SafeProjectName)
    }

    /// Empty when no explicit solution folder was requested.
    pub fn specified_solution_name(&self) -> Result<&str, DomainError> {
        self.parameters.require(HostKey::SpecifiedSolutionName)
    }

    pub fn destination_directory(&self) -> Result<HostPath, DomainError> {
        self.parameters
            .require(HostKey::DestinationDirectory)
            .map(HostPath::new)
    }

    pub fn solution_directory(&self) -> Result<HostPath, DomainError> {
        self.parameters
            .require(HostKey::SolutionDirectory)
            .map(HostPath::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> HostParameters {
        [
            (HostKey::ProjectName.as_str(), "Demo"),
            (HostKey::SafeProjectName.as_str(), "Demo"),
            (HostKey::SpecifiedSolutionName.as_str(), ""),
            (HostKey::DestinationDirectory.as_str(), "/work/Demo/"),
            (HostKey::SolutionDirectory.as_str(), "/work/Demo/"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_identity_from_parameters() {
        let metadata = RunMetadata::new(RunKind::NewProject, params());
        assert_eq!(metadata.project_name().unwrap(), "Demo");
        assert_eq!(metadata.specified_solution_name().unwrap(), "");
        assert_eq!(
            metadata.destination_directory().unwrap().as_str(),
            "/work/Demo/"
        );
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let mut parameters = params();
        parameters.remove(HostKey::SolutionDirectory.as_str());
        let metadata = RunMetadata::new(RunKind::NewProject, parameters);

        assert_eq!(
            metadata.solution_directory().unwrap_err(),
            DomainError::MissingHostParameter {
                key: "$solutiondirectory$"
            }
        );
    }

    #[test]
    fn only_orchestrated_runs_need_a_fresh_directory_by_default() {
        assert!(RunMetadata::new(RunKind::MultiProject, params()).requires_fresh_directory);
        assert!(!RunMetadata::new(RunKind::ProjectItem, params()).requires_fresh_directory);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut parameters = params();
        parameters.set(HostKey::DestinationDirectory, "/other/");
        assert_eq!(
            parameters.require(HostKey::DestinationDirectory).unwrap(),
            "/other/"
        );
        assert_eq!(parameters.len(), 5);
    }
}
