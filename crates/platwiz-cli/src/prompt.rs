//! Options UIs: the terminal form and the non-interactive preset.
//!
//! Both start from a [`Preset`] (flags layered over `[defaults]`).  The
//! preset UI answers with it directly; the dialoguer form uses it for the
//! initial value of every question.

use tracing::debug;

use platwiz_core::{
    application::{OptionsUi, SelectionRequest},
    domain::{
        DomainError, PlatformSelection, ProjectGrouping, ScaffoldType, SdkSelection,
        SelectionBuilder, TargetFramework, TestSelection, UserSelectedOptions,
    },
    error::{WizardError, WizardResult},
};

use crate::{
    cli::{NewArgs, TestProject},
    config::Defaults,
};

// ── Preset ────────────────────────────────────────────────────────────────────

/// Answers known before the form opens.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub platforms: PlatformSelection,
    pub tests: TestSelection,
    pub editor_config: bool,
    pub grouping: ProjectGrouping,
    pub scaffold: ScaffoldType,
    pub target_framework: TargetFramework,
    pub sdk: SdkSelection,
    pub app_id: Option<String>,
    pub app_id_prefix: String,
    pub app_name: Option<String>,
    pub uwp_description: String,
    /// `None` follows the host's initial value.
    pub solution_directory: Option<bool>,
}

impl Preset {
    /// Layer `new` flags over the configured defaults.
    ///
    /// Configured test projects whose platform is switched off are dropped;
    /// tests requested with `--tests` are kept as given so that a
    /// contradiction is reported instead of silently fixed.
    pub fn from_args(args: &NewArgs, defaults: &Defaults) -> Self {
        let platforms = PlatformSelection {
            android: args.android().unwrap_or(defaults.platforms.android),
            ios: args.ios().unwrap_or(defaults.platforms.ios),
            uwp: args.uwp().unwrap_or(defaults.platforms.uwp),
        };

        let tests = match &args.tests {
            Some(projects) => tests_from(projects),
            None => {
                let mut tests = defaults.tests;
                tests.android &= platforms.android;
                tests.ios &= platforms.ios;
                tests.uwp &= platforms.uwp;
                tests.uwp_ui &= platforms.uwp;
                tests
            }
        };

        let sdk = SdkSelection {
            android_min: args.android_min.unwrap_or(defaults.sdk.android_min),
            ios_min: args.ios_min.unwrap_or(defaults.sdk.ios_min),
            uwp_min: args.uwp_min.unwrap_or(defaults.sdk.uwp_min),
        };

        Self {
            platforms,
            tests,
            editor_config: args.editorconfig().unwrap_or(defaults.editor_config),
            grouping: args.grouping.unwrap_or(defaults.grouping),
            scaffold: args.scaffold.unwrap_or(defaults.scaffold),
            target_framework: args.framework.unwrap_or(defaults.target_framework),
            sdk,
            app_id: args.app_id.clone(),
            app_id_prefix: defaults.app_id_prefix.clone(),
            app_name: args.app_name.clone(),
            uwp_description: args
                .uwp_description
                .clone()
                .unwrap_or_else(|| defaults.uwp_description.clone()),
            solution_directory: args.no_solution_dir.then_some(false),
        }
    }

    pub fn app_name_for(&self, request: &SelectionRequest) -> String {
        self.app_name
            .clone()
            .unwrap_or_else(|| request.project_name.clone())
    }

    pub fn app_id_for(&self, request: &SelectionRequest) -> String {
        self.app_id
            .clone()
            .unwrap_or_else(|| derive_app_id(&self.app_id_prefix, &request.safe_project_name))
    }

    pub fn solution_directory_for(&self, request: &SelectionRequest) -> bool {
        self.solution_directory
            .unwrap_or(request.can_create_solution_directory)
    }

    /// Builder holding every preset answer for `request`.
    pub fn builder_for(&self, request: &SelectionRequest) -> SelectionBuilder {
        UserSelectedOptions::builder()
            .platforms(self.platforms)
            .tests(self.tests)
            .editor_config(self.editor_config)
            .grouping(self.grouping)
            .app_id(self.app_id_for(request))
            .app_name(self.app_name_for(request))
            .solution_name(solution_name_for(request))
            .target_framework(self.target_framework)
            .sdk(self.sdk)
            .uwp_description(self.uwp_description.clone())
            .scaffold_type(self.scaffold)
            .can_create_solution_directory(self.solution_directory_for(request))
    }

    pub fn selection(
        &self,
        request: &SelectionRequest,
    ) -> Result<UserSelectedOptions, DomainError> {
        self.builder_for(request).build()
    }
}

/// The solution folder name when one was given, else the safe project name.
pub fn solution_name_for(request: &SelectionRequest) -> String {
    if request.solution_name.trim().is_empty() {
        request.safe_project_name.clone()
    } else {
        request.solution_name.clone()
    }
}

/// `<prefix>.<lowercased safe name>`, with a leading letter guaranteed.
fn derive_app_id(prefix: &str, safe_name: &str) -> String {
    let mut segment: String = safe_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if !segment.starts_with(|c: char| c.is_ascii_alphabetic()) {
        segment.insert_str(0, "app");
    }

    match prefix.trim().trim_end_matches('.') {
        "" => segment,
        prefix => format!("{prefix}.{segment}"),
    }
}

fn tests_from(projects: &[TestProject]) -> TestSelection {
    let mut tests = TestSelection::default();
    for project in projects {
        project.set(&mut tests, true);
    }
    tests
}

impl TestProject {
    #[cfg_attr(not(feature = "interactive"), allow(dead_code))]
    const ALL: [TestProject; 5] = [
        TestProject::Core,
        TestProject::Android,
        TestProject::Ios,
        TestProject::Uwp,
        TestProject::UwpUi,
    ];

    fn set(self, tests: &mut TestSelection, enabled: bool) {
        match self {
            Self::Core => tests.core = enabled,
            Self::Android => tests.android = enabled,
            Self::Ios => tests.ios = enabled,
            Self::Uwp => tests.uwp = enabled,
            Self::UwpUi => tests.uwp_ui = enabled,
        }
    }

    #[cfg_attr(not(feature = "interactive"), allow(dead_code))]
    fn is_set(self, tests: &TestSelection) -> bool {
        match self {
            Self::Core => tests.core,
            Self::Android => tests.android,
            Self::Ios => tests.ios,
            Self::Uwp => tests.uwp,
            Self::UwpUi => tests.uwp_ui,
        }
    }

    #[cfg_attr(not(feature = "interactive"), allow(dead_code))]
    fn available(self, platforms: PlatformSelection) -> bool {
        match self {
            Self::Core => true,
            Self::Android => platforms.android,
            Self::Ios => platforms.ios,
            Self::Uwp | Self::UwpUi => platforms.uwp,
        }
    }

    #[cfg_attr(not(feature = "interactive"), allow(dead_code))]
    fn label(self) -> &'static str {
        match self {
            Self::Core => "Core unit tests",
            Self::Android => "Android unit tests",
            Self::Ios => "iOS unit tests",
            Self::Uwp => "UWP unit tests",
            Self::UwpUi => "UWP UI tests",
        }
    }
}

// ── Preset UI ─────────────────────────────────────────────────────────────────

/// Non-interactive options UI used with `--yes`.
#[derive(Debug, Clone)]
pub struct PresetOptionsUi {
    preset: Preset,
}

impl PresetOptionsUi {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }
}

impl OptionsUi for PresetOptionsUi {
    fn show_options(
        &self,
        request: &SelectionRequest,
    ) -> WizardResult<Option<UserSelectedOptions>> {
        let options = self.preset.selection(request)?;
        debug!(app_id = options.app_id(), "Preset selection accepted");
        Ok(Some(options))
    }

    fn show_error(&self, error: &WizardError) {
        // reported by the exit path
        debug!(error = %error, "Run failed with preset options");
    }
}

// ── Interactive UI ────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use interactive::DialoguerOptionsUi;

#[cfg(feature = "interactive")]
mod interactive {
    use console::Term;
    use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select, theme::ColorfulTheme};
    use owo_colors::OwoColorize;

    use platwiz_core::{
        application::{ApplicationError, OptionsUi, SelectionRequest},
        domain::{
            DomainError, PlatformSelection, ProjectGrouping, ScaffoldType, TargetFramework,
            TestSelection, UserSelectedOptions,
        },
        error::{WizardError, WizardResult},
    };

    use super::{Preset, TestProject, solution_name_for};

    /// Terminal form backed by `dialoguer`.
    ///
    /// Esc on a choice or yes/no question cancels the run; the two text
    /// fields have no cancel key.  Declining the final confirmation, or
    /// declining to change options that failed validation, cancels too.
    #[derive(Debug, Clone)]
    pub struct DialoguerOptionsUi {
        preset: Preset,
    }

    impl DialoguerOptionsUi {
        pub fn new(preset: Preset) -> Self {
            Self { preset }
        }

        /// One pass over the questions.  `None` when the user backs out.
        fn ask(
            &self,
            request: &SelectionRequest,
            theme: &ColorfulTheme,
        ) -> WizardResult<Option<platwiz_core::domain::SelectionBuilder>> {
            let app_name = Input::<String>::with_theme(theme)
                .with_prompt("App name")
                .default(self.preset.app_name_for(request))
                .interact_text()
                .map_err(ui_failure)?;

            let app_id = Input::<String>::with_theme(theme)
                .with_prompt("App id")
                .default(self.preset.app_id_for(request))
                .interact_text()
                .map_err(ui_failure)?;

            let defaults = [
                self.preset.platforms.android,
                self.preset.platforms.ios,
                self.preset.platforms.uwp,
            ];
            let Some(chosen) = MultiSelect::with_theme(theme)
                .with_prompt("Platforms")
                .items(&["Android", "iOS", "UWP"])
                .defaults(&defaults)
                .interact_opt()
                .map_err(ui_failure)?
            else {
                return Ok(None);
            };
            let platforms = PlatformSelection {
                android: chosen.contains(&0),
                ios: chosen.contains(&1),
                uwp: chosen.contains(&2),
            };

            let candidates: Vec<TestProject> = TestProject::ALL
                .into_iter()
                .filter(|project| project.available(platforms))
                .collect();
            let labels: Vec<&str> = candidates.iter().map(|project| project.label()).collect();
            let checked: Vec<bool> = candidates
                .iter()
                .map(|project| project.is_set(&self.preset.tests))
                .collect();
            let Some(chosen) = MultiSelect::with_theme(theme)
                .with_prompt("Test projects")
                .items(&labels)
                .defaults(&checked)
                .interact_opt()
                .map_err(ui_failure)?
            else {
                return Ok(None);
            };
            let mut tests = TestSelection::default();
            for index in chosen {
                if let Some(project) = candidates.get(index) {
                    project.set(&mut tests, true);
                }
            }

            let Some(grouping) =
                pick(theme, "Project grouping", ProjectGrouping::ALL, self.preset.grouping)?
            else {
                return Ok(None);
            };

            let scaffold_labels: Vec<&str> = ScaffoldType::ALL.iter().map(|s| s.as_str()).collect();
            let Some(scaffold) = FuzzySelect::with_theme(theme)
                .with_prompt("Scaffold")
                .items(&scaffold_labels)
                .default(index_of(ScaffoldType::ALL, self.preset.scaffold))
                .interact_opt()
                .map_err(ui_failure)?
            else {
                return Ok(None);
            };

            let Some(framework) = pick(
                theme,
                "Core target framework",
                TargetFramework::ALL,
                self.preset.target_framework,
            )?
            else {
                return Ok(None);
            };

            let Some(editor_config) = Confirm::with_theme(theme)
                .with_prompt("Add an .editorconfig?")
                .default(self.preset.editor_config)
                .interact_opt()
                .map_err(ui_failure)?
            else {
                return Ok(None);
            };

            let Some(solution_directory) = Confirm::with_theme(theme)
                .with_prompt(format!(
                    "Create a solution directory '{}'?",
                    solution_name_for(request)
                ))
                .default(self.preset.solution_directory_for(request))
                .interact_opt()
                .map_err(ui_failure)?
            else {
                return Ok(None);
            };

            Ok(Some(
                self.preset
                    .builder_for(request)
                    .app_name(app_name)
                    .app_id(app_id)
                    .platforms(platforms)
                    .tests(tests)
                    .grouping(grouping)
                    .scaffold_type(ScaffoldType::ALL[scaffold])
                    .target_framework(framework)
                    .editor_config(editor_config)
                    .can_create_solution_directory(solution_directory),
            ))
        }
    }

    impl OptionsUi for DialoguerOptionsUi {
        fn show_options(
            &self,
            request: &SelectionRequest,
        ) -> WizardResult<Option<UserSelectedOptions>> {
            let theme = ColorfulTheme::default();
            let term = Term::stderr();
            let _ = term.write_line(&format!(
                "{} {} {}",
                "New solution".cyan().bold(),
                request.project_name.bold(),
                format!("({})", request.destination).dimmed()
            ));

            loop {
                let Some(builder) = self.ask(request, &theme)? else {
                    return Ok(None);
                };

                let built = builder.build();
                let prompt = match &built {
                    Ok(_) => "Generate with these options?",
                    Err(invalid) => {
                        let _ = term
                            .write_line(&format!("{} {}", "\u{26a0}".yellow().bold(), invalid));
                        "Change the options?"
                    }
                };
                let answer = Confirm::with_theme(&theme)
                    .with_prompt(prompt)
                    .default(true)
                    .interact_opt()
                    .map_err(ui_failure)?;

                match settle(built, answer) {
                    Step::Finish(outcome) => return Ok(outcome),
                    Step::AskAgain => continue,
                }
            }
        }

        fn show_error(&self, error: &WizardError) {
            let _ = Term::stderr().write_line(&format!("{} {}", "\u{2717}".red().bold(), error));
        }
    }

    /// Where the form goes after its closing yes/no question.
    #[derive(Debug, PartialEq)]
    enum Step {
        /// `None` cancels the run.
        Finish(Option<UserSelectedOptions>),
        AskAgain,
    }

    /// Combine the validated answers with the closing question.  Only an
    /// explicit yes proceeds; no and Esc both cancel.
    fn settle(built: Result<UserSelectedOptions, DomainError>, answer: Option<bool>) -> Step {
        match (built, answer) {
            (Ok(options), Some(true)) => Step::Finish(Some(options)),
            (Err(_), Some(true)) => Step::AskAgain,
            _ => Step::Finish(None),
        }
    }

    fn pick<T>(
        theme: &ColorfulTheme,
        prompt: &str,
        all: &[T],
        current: T,
    ) -> WizardResult<Option<T>>
    where
        T: Copy + PartialEq + std::fmt::Display,
    {
        let labels: Vec<String> = all.iter().map(ToString::to_string).collect();
        let chosen = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(index_of(all, current))
            .interact_opt()
            .map_err(ui_failure)?;
        Ok(chosen.and_then(|index| all.get(index).copied()))
    }

    fn index_of<T: PartialEq>(all: &[T], current: T) -> usize {
        all.iter().position(|item| *item == current).unwrap_or(0)
    }

    fn ui_failure(error: dialoguer::Error) -> WizardError {
        ApplicationError::UiFailure {
            reason: error.to_string(),
        }
        .into()
    }

}
