use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{IosVersion, ProjectGrouping, ScaffoldType, TargetFramework},
};

/// Which target platforms get a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSelection {
    pub android: bool,
    pub ios: bool,
    pub uwp: bool,
}

impl PlatformSelection {
    pub const fn all() -> Self {
        Self {
            android: true,
            ios: true,
            uwp: true,
        }
    }

    pub const fn any(&self) -> bool {
        self.android || self.ios || self.uwp
    }
}

/// Which unit/UI test projects get generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSelection {
    pub core: bool,
    pub android: bool,
    pub ios: bool,
    pub uwp: bool,
    pub uwp_ui: bool,
}

/// Minimum SDK levels per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkSelection {
    /// Android API level.
    pub android_min: u32,
    pub ios_min: IosVersion,
    /// Windows 10 build number.
    pub uwp_min: u32,
}

impl Default for SdkSelection {
    fn default() -> Self {
        Self {
            android_min: 21,
            ios_min: IosVersion::default(),
            uwp_min: 16299,
        }
    }
}

/// The completed set of choices returned by the options UI.
///
/// Construct through [`UserSelectedOptions::builder`], which validates the
/// combination. Once built the value is immutable; the orchestrator takes it
/// out of the run context exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelectedOptions {
    platforms: PlatformSelection,
    tests: TestSelection,
    has_editor_config: bool,
    grouping: ProjectGrouping,
    app_id: String,
    app_name: String,
    solution_name: String,
    target_framework: TargetFramework,
    sdk: SdkSelection,
    uwp_description: String,
    scaffold_type: ScaffoldType,
    can_create_solution_directory: bool,
}

impl UserSelectedOptions {
    pub fn builder() -> SelectionBuilder {
        SelectionBuilder::default()
    }

    // Getters

    pub fn platforms(&self) -> PlatformSelection {
        self.platforms
    }

    pub fn tests(&self) -> TestSelection {
        self.tests
    }

    pub fn has_editor_config(&self) -> bool {
        self.has_editor_config
    }

    pub fn grouping(&self) -> ProjectGrouping {
        self.grouping
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn solution_name(&self) -> &str {
        &self.solution_name
    }

    pub fn target_framework(&self) -> TargetFramework {
        self.target_framework
    }

    pub fn sdk(&self) -> SdkSelection {
        self.sdk
    }

    pub fn uwp_description(&self) -> &str {
        &self.uwp_description
    }

    pub fn scaffold_type(&self) -> ScaffoldType {
        self.scaffold_type
    }

    pub fn can_create_solution_directory(&self) -> bool {
        self.can_create_solution_directory
    }

    /// Check the combination of choices.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.app_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "app_name" });
        }

        validate_app_id(&self.app_id)?;
        validate_solution_name(&self.solution_name)?;

        if !self.platforms.any() {
            return Err(DomainError::NoPlatformSelected);
        }

        let checks: [(bool, bool, &'static str, &'static str); 4] = [
            (self.tests.android, self.platforms.android, "android tests", "android"),
            (self.tests.ios, self.platforms.ios, "ios tests", "ios"),
            (self.tests.uwp, self.platforms.uwp, "uwp tests", "uwp"),
            (self.tests.uwp_ui, self.platforms.uwp, "uwp ui tests", "uwp"),
        ];
        for (wanted, available, flag, platform) in checks {
            if wanted && !available {
                return Err(DomainError::PlatformNotSelected { flag, platform });
            }
        }

        Ok(())
    }
}

fn validate_app_id(app_id: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidAppId {
        app_id: app_id.into(),
        reason: reason.into(),
    };

    let segments: Vec<&str> = app_id.split('.').collect();
    if segments.len() < 2 {
        return Err(invalid("expected at least two dot-separated segments"));
    }
    for segment in segments {
        let mut chars = segment.chars();
        match chars.next() {
            None => return Err(invalid("empty segment")),
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(invalid("segments must start with a letter"));
            }
            _ => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("segments may only contain letters, digits and '_'"));
        }
    }
    Ok(())
}

fn validate_solution_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidSolutionName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(invalid("name contains unsupported characters"));
    }
    Ok(())
}

/// Builder for [`UserSelectedOptions`].
///
/// `app_name`, `app_id` and `solution_name` are required; everything else has
/// a default.
#[derive(Debug, Clone, Default)]
pub struct SelectionBuilder {
    platforms: PlatformSelection,
    tests: TestSelection,
    has_editor_config: bool,
    grouping: ProjectGrouping,
    app_id: Option<String>,
    app_name: Option<String>,
    solution_name: Option<String>,
    target_framework: TargetFramework,
    sdk: SdkSelection,
    uwp_description: String,
    scaffold_type: ScaffoldType,
    can_create_solution_directory: bool,
}

impl SelectionBuilder {
    pub fn platforms(mut self, platforms: PlatformSelection) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn tests(mut self, tests: TestSelection) -> Self {
        self.tests = tests;
        self
    }

    pub fn editor_config(mut self, enabled: bool) -> Self {
        self.has_editor_config = enabled;
        self
    }

    pub fn grouping(mut self, grouping: ProjectGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn solution_name(mut self, solution_name: impl Into<String>) -> Self {
        self.solution_name = Some(solution_name.into());
        self
    }

    pub fn target_framework(mut self, framework: TargetFramework) -> Self {
        self.target_framework = framework;
        self
    }

    pub fn sdk(mut self, sdk: SdkSelection) -> Self {
        self.sdk = sdk;
        self
    }

    pub fn uwp_description(mut self, description: impl Into<String>) -> Self {
        self.uwp_description = description.into();
        self
    }

    pub fn scaffold_type(mut self, scaffold_type: ScaffoldType) -> Self {
        self.scaffold_type = scaffold_type;
        self
    }

    pub fn can_create_solution_directory(mut self, enabled: bool) -> Self {
        self.can_create_solution_directory = enabled;
        self
    }

    /// Assemble and validate the selection.
    pub fn build(self) -> Result<UserSelectedOptions, DomainError> {
        let options = UserSelectedOptions {
            platforms: self.platforms,
            tests: self.tests,
            has_editor_config: self.has_editor_config,
            grouping: self.grouping,
            app_id: self
                .app_id
                .ok_or(DomainError::MissingRequiredField { field: "app_id" })?,
            app_name: self
                .app_name
                .ok_or(DomainError::MissingRequiredField { field: "app_name" })?,
            solution_name: self
                .solution_name
                .ok_or(DomainError::MissingRequiredField {
                    field: "solution_name",
                })?,
            target_framework: self.target_framework,
            sdk: self.sdk,
            uwp_description: self.uwp_description,
            scaffold_type: self.scaffold_type,
            can_create_solution_directory: self.can_create_solution_directory,
        };

        options.validate()?;
        Ok(options)
    }
}
