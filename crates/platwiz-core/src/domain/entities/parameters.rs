//! Selection → template parameters.
//!
//! [`ParameterBuilder::build`] is a pure, total function: one entry per
//! [`ParameterKey`], in declaration order, no conditional omissions. The
//! solution-directory policy is applied separately because it depends on
//! directory values the reconciler may already have rewritten.

use serde::Serialize;

use crate::domain::{
    entities::{
        run_metadata::{HostKey, HostParameters, RunMetadata},
        selection::UserSelectedOptions,
    },
    error::DomainError,
};

/// Every parameter the templates read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterKey {
    HasAndroidProject,
    HasIosProject,
    HasUwpProject,
    HasCoreTestProject,
    HasAndroidTestProject,
    HasIosTestProject,
    HasUwpTestProject,
    HasUwpUiTestProject,
    HasEditorConfig,
    SolutionProjectGrouping,
    AppId,
    AppName,
    SolutionName,
    NetStandardVersion,
    AndroidMinSdkVersion,
    IosMinSdkVersion,
    UwpMinSdkVersion,
    UwpAppDescription,
    ScaffoldType,
}

impl ParameterKey {
    pub const ALL: &'static [ParameterKey] = &[
        ParameterKey::HasAndroidProject,
        ParameterKey::HasIosProject,
        ParameterKey::HasUwpProject,
        ParameterKey::HasCoreTestProject,
        ParameterKey::HasAndroidTestProject,
        ParameterKey::HasIosTestProject,
        ParameterKey::HasUwpTestProject,
        ParameterKey::HasUwpUiTestProject,
        ParameterKey::HasEditorConfig,
        ParameterKey::SolutionProjectGrouping,
        ParameterKey::AppId,
        ParameterKey::AppName,
        ParameterKey::SolutionName,
        ParameterKey::NetStandardVersion,
        ParameterKey::AndroidMinSdkVersion,
        ParameterKey::IosMinSdkVersion,
        ParameterKey::UwpMinSdkVersion,
        ParameterKey::UwpAppDescription,
        ParameterKey::ScaffoldType,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::HasAndroidProject => "HasAndroidProject",
            Self::HasIosProject => "HasIosProject",
            Self::HasUwpProject => "HasUwpProject",
            Self::HasCoreTestProject => "HasCoreTestProject",
            Self::HasAndroidTestProject => "HasAndroidTestProject",
            Self::HasIosTestProject => "HasIosTestProject",
            Self::HasUwpTestProject => "HasUwpTestProject",
            Self::HasUwpUiTestProject => "HasUwpUiTestProject",
            Self::HasEditorConfig => "HasEditorConfig",
            Self::SolutionProjectGrouping => "SolutionProjectGrouping",
            Self::AppId => "AppId",
            Self::AppName => "AppName",
            Self::SolutionName => "SolutionName",
            Self::NetStandardVersion => "NetStandardVersion",
            Self::AndroidMinSdkVersion => "AndroidMinSdkVersion",
            Self::IosMinSdkVersion => "IosMinSdkVersion",
            Self::UwpMinSdkVersion => "UwpMinSdkVersion",
            Self::UwpAppDescription => "UwpAppDescription",
            Self::ScaffoldType => "ScaffoldType",
        }
    }

    /// Key as written into the host map: `$passthrough:<Name>$`.
    pub fn host_key(&self) -> String {
        format!("$passthrough:{}$", self.name())
    }
}

/// Ordered, flat parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterMap {
    entries: Vec<(ParameterKey, String)>,
}

impl ParameterMap {
    fn push(&mut self, key: ParameterKey, value: impl Into<String>) {
        debug_assert!(self.get(key).is_none(), "duplicate parameter {key:?}");
        self.entries.push((key, value.into()));
    }

    pub fn get(&self, key: ParameterKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry into the host map under its passthrough key.
    pub fn write_into(&self, parameters: &mut HostParameters) {
        for (key, value) in &self.entries {
            parameters.insert(key.host_key(), value.clone());
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Maps a selection to template parameters.
pub struct ParameterBuilder;

impl ParameterBuilder {
    /// Build the full parameter set for `options`.
    pub fn build(options: &UserSelectedOptions) -> ParameterMap {
        let platforms = options.platforms();
        let tests = options.tests();
        let sdk = options.sdk();

        let mut map = ParameterMap::default();
        for key in ParameterKey::ALL {
            let value = match key {
                ParameterKey::HasAndroidProject => flag(platforms.android).to_string(),
                ParameterKey::HasIosProject => flag(platforms.ios).to_string(),
                ParameterKey::HasUwpProject => flag(platforms.uwp).to_string(),
                ParameterKey::HasCoreTestProject => flag(tests.core).to_string(),
                ParameterKey::HasAndroidTestProject => flag(tests.android).to_string(),
                ParameterKey::HasIosTestProject => flag(tests.ios).to_string(),
                ParameterKey::HasUwpTestProject => flag(tests.uwp).to_string(),
                ParameterKey::HasUwpUiTestProject => flag(tests.uwp_ui).to_string(),
                ParameterKey::HasEditorConfig => flag(options.has_editor_config()).to_string(),
                ParameterKey::SolutionProjectGrouping => options.grouping().to_string(),
                ParameterKey::AppId => options.app_id().to_string(),
                ParameterKey::AppName => options.app_name().to_string(),
                ParameterKey::SolutionName => options.solution_name().to_string(),
                ParameterKey::NetStandardVersion => {
                    options.target_framework().version().to_string()
                }
                ParameterKey::AndroidMinSdkVersion => sdk.android_min.to_string(),
                ParameterKey::IosMinSdkVersion => sdk.ios_min.to_string(),
                ParameterKey::UwpMinSdkVersion => sdk.uwp_min.to_string(),
                ParameterKey::UwpAppDescription => options.uwp_description().to_string(),
                ParameterKey::ScaffoldType => options.scaffold_type().as_parameter().to_string(),
            };
            map.push(*key, value);
        }
        map
    }

    /// Point the solution at its own sub-folder, or drop the explicit
    /// solution name.
    ///
    /// Must run after [`ParameterBuilder::build`] and after directory
    /// reconciliation.
    pub fn apply_solution_directory_policy(
        metadata: &mut RunMetadata,
        options: &UserSelectedOptions,
    ) -> Result<(), DomainError> {
        if options.can_create_solution_directory() {
            let name = options.solution_name();
            let solution_dir = metadata.solution_directory()?.join_dir(name);
            let destination_dir = metadata.destination_directory()?.join_dir(name);

            let parameters = &mut metadata.parameters;
            parameters.set(HostKey::SpecifiedSolutionName, name);
            parameters.set(HostKey::SolutionDirectory, solution_dir.as_str());
            parameters.set(HostKey::DestinationDirectory, destination_dir.as_str());
        } else {
            metadata.parameters.set(HostKey::SpecifiedSolutionName, "");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::{
        entities::selection::{PlatformSelection, SdkSelection, TestSelection},
        value_objects::{IosVersion, ProjectGrouping, RunKind, ScaffoldType},
    };

    fn options(can_create: bool) -> UserSelectedOptions {
        UserSelectedOptions::builder()
            .app_id("com.contoso.myapp")
            .app_name("My App")
            .solution_name("MyApp")
            .platforms(PlatformSelection {
                android: true,
                ios: false,
                uwp: true,
            })
            .tests(TestSelection {
                core: true,
                uwp_ui: true,
                ..TestSelection::default()
            })
            .grouping(ProjectGrouping::PlatformFolders)
            .sdk(SdkSelection {
                android_min: 23,
                ios_min: IosVersion::new(12, 1),
                uwp_min: 17763,
            })
            .scaffold_type(ScaffoldType::Tabbed)
            .uwp_description("A demo")
            .can_create_solution_directory(can_create)
            .build()
            .unwrap()
    }

    fn metadata(destination: &str, solution_name: &str) -> RunMetadata {
        let parameters: HostParameters = [
            (HostKey::ProjectName.as_str(), "MyApp"),
            (HostKey::SafeProjectName.as_str(), "MyApp"),
            (HostKey::SpecifiedSolutionName.as_str(), solution_name),
            (HostKey::DestinationDirectory.as_str(), destination),
            (HostKey::SolutionDirectory.as_str(), destination),
        ]
        .into_iter()
        .collect();
        RunMetadata::new(RunKind::NewProject, parameters)
    }

    #[test]
    fn build_emits_every_key_exactly_once() {
        let map = ParameterBuilder::build(&options(false));

        assert_eq!(map.len(), ParameterKey::ALL.len());
        let keys: HashSet<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), ParameterKey::ALL.len());
        for key in ParameterKey::ALL {
            assert!(map.get(*key).is_some(), "missing {key:?}");
        }
    }

    #[test]
    fn build_preserves_declaration_order() {
        let map = ParameterBuilder::build(&options(false));
        let order: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(order, ParameterKey::ALL);
    }

    #[test]
    fn build_renders_host_representations() {
        let map = ParameterBuilder::build(&options(false));

        assert_eq!(map.get(ParameterKey::HasAndroidProject), Some("true"));
        assert_eq!(map.get(ParameterKey::HasIosProject), Some("false"));
        assert_eq!(map.get(ParameterKey::HasUwpUiTestProject), Some("true"));
        assert_eq!(
            map.get(ParameterKey::SolutionProjectGrouping),
            Some("platform-folders")
        );
        assert_eq!(map.get(ParameterKey::NetStandardVersion), Some("2.1"));
        assert_eq!(map.get(ParameterKey::AndroidMinSdkVersion), Some("23"));
        assert_eq!(map.get(ParameterKey::IosMinSdkVersion), Some("12.1"));
        assert_eq!(map.get(ParameterKey::UwpMinSdkVersion), Some("17763"));
        assert_eq!(map.get(ParameterKey::ScaffoldType), Some("tabbed"));
    }

    #[test]
    fn build_is_deterministic() {
        let selection = options(true);
        assert_eq!(
            ParameterBuilder::build(&selection),
            ParameterBuilder::build(&selection)
        );
    }

    #[test]
    fn write_into_uses_passthrough_keys() {
        let mut parameters = HostParameters::new();
        ParameterBuilder::build(&options(false)).write_into(&mut parameters);

        assert_eq!(parameters.len(), ParameterKey::ALL.len());
        assert_eq!(
            parameters.get("$passthrough:AppId$"),
            Some("com.contoso.myapp")
        );
    }

    #[test]
    fn solution_directory_policy_appends_solution_folder() {
        let mut metadata = metadata(r"C:\Proj\", "");
        ParameterBuilder::apply_solution_directory_policy(&mut metadata, &options(true)).unwrap();

        assert_eq!(
            metadata.destination_directory().unwrap().as_str(),
            r"C:\Proj\MyApp\"
        );
        assert_eq!(
            metadata.solution_directory().unwrap().as_str(),
            r"C:\Proj\MyApp\"
        );
        assert_eq!(metadata.specified_solution_name().unwrap(), "MyApp");
    }

    #[test]
    fn solution_directory_policy_clears_name_when_disabled() {
        let mut metadata = metadata("/work/", "MyApp");
        ParameterBuilder::apply_solution_directory_policy(&mut metadata, &options(false))
            .unwrap();

        assert_eq!(metadata.specified_solution_name().unwrap(), "");
        assert_eq!(metadata.destination_directory().unwrap().as_str(), "/work/");
        assert_eq!(metadata.solution_directory().unwrap().as_str(), "/work/");
    }

    #[test]
    fn solution_directory_policy_needs_directories() {
        let mut metadata = metadata("/work/", "");
        metadata
            .parameters
            .remove(HostKey::SolutionDirectory.as_str());

        let err = ParameterBuilder::apply_solution_directory_policy(&mut metadata, &options(true))
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingHostParameter { .. }));
    }
}
