//! Implementation of the `platwiz new` command.
//!
//! Here the CLI plays the host: it lays out the destination the way an IDE
//! would, hands the parameter map to the orchestrator, and reports what
//! came back.  No selection logic lives here.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use platwiz_adapters::{
    JsonlTelemetry, LocalFilesystem, LocalHost, MemoryFilesystem, NoopTelemetry, TracingTelemetry,
};
use platwiz_core::{
    application::{
        DirectoryReconciler, Filesystem, OptionsUi, TelemetryDispatcher, TelemetrySink,
        WizardInfo, WizardOrchestrator,
    },
    domain::{HostKey, HostParameters, RunKind, RunMetadata},
};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::{AppConfig, TelemetryConfig, TelemetrySinkKind},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt::{Preset, PresetOptionsUi},
};

/// Execute the `platwiz new` command.
///
/// 1. Validate names and lay out the destination
/// 2. Refuse an existing target root unless `--force`
/// 3. Pick the options UI (`--yes` preset or the terminal form)
/// 4. Run the orchestrator and flush telemetry
/// 5. Print or emit the final parameter map
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    validate_name(&args.name)?;
    if let Some(solution) = &args.solution {
        validate_name(solution)?;
    }

    let layout = HostLayout::resolve(&args)?;
    let kind = if args.multi {
        RunKind::MultiProject
    } else {
        RunKind::NewProject
    };
    let mut metadata = RunMetadata::new(kind, layout.parameters());

    let target_root = DirectoryReconciler::target_root(&metadata)
        .map(|root| PathBuf::from(root.as_str()))
        .map_err(|e| CliError::InvalidInput {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

    let root_exists = target_root.exists();
    if root_exists && !args.force {
        return Err(CliError::ProjectExists { path: target_root });
    }

    let filesystem: Box<dyn Filesystem> = if args.dry_run {
        let memory = MemoryFilesystem::new();
        if root_exists {
            memory.add(&target_root);
        }
        Box::new(memory)
    } else {
        if root_exists && output.format() != OutputFormat::Json {
            output.warning(&format!("Clearing {}", target_root.display()))?;
        }
        Box::new(LocalFilesystem::new())
    };

    let ui = options_ui(&args, &config)?;
    let policy = args
        .cleanup_policy
        .unwrap_or(config.wizard.cleanup_policy);

    let mut orchestrator = WizardOrchestrator::with_dispatcher(
        WizardInfo::new("platwiz", env!("CARGO_PKG_VERSION")),
        ui,
        Arc::new(LocalHost::new()),
        filesystem,
        telemetry_dispatcher(&config.telemetry),
    )
    .with_cleanup_policy(policy);

    info!(
        destination = %layout.destination,
        kind = %kind,
        policy = %policy,
        dry_run = args.dry_run,
        "Wizard started"
    );
    let outcome = orchestrator.run(&mut metadata);
    orchestrator.finish();
    outcome.into_result()?;

    report(&args, &metadata.parameters, &output)
}

// ── Host layout ───────────────────────────────────────────────────────────────

/// The host's view of a new project before the wizard runs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HostLayout {
    project_name: String,
    safe_project_name: String,
    /// Empty without `--solution`.
    solution_name: String,
    destination: String,
    solution_directory: String,
}

impl HostLayout {
    /// `<output>/<solution>/<name>/`, or `<output>/<name>/` without a
    /// solution folder.  The solution directory is the solution folder, or
    /// the destination itself when there is none.
    fn resolve(args: &NewArgs) -> CliResult<Self> {
        let output = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
        let output = std::path::absolute(&output).with_cli_context(|| {
            format!("Failed to resolve output directory '{}'", output.display())
        })?;

        let solution = args
            .solution
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let solution_root = match solution {
            Some(name) => output.join(name),
            None => output,
        };
        let destination = solution_root.join(&args.name);
        let solution_directory = match solution {
            Some(_) => solution_root,
            None => destination.clone(),
        };

        Ok(Self {
            project_name: args.name.clone(),
            safe_project_name: safe_name(&args.name),
            solution_name: solution.unwrap_or_default().to_string(),
            destination: dir_string(&destination),
            solution_directory: dir_string(&solution_directory),
        })
    }

    fn parameters(&self) -> HostParameters {
        [
            (HostKey::ProjectName, &self.project_name),
            (HostKey::SafeProjectName, &self.safe_project_name),
            (HostKey::SpecifiedSolutionName, &self.solution_name),
            (HostKey::DestinationDirectory, &self.destination),
            (HostKey::SolutionDirectory, &self.solution_directory),
        ]
        .into_iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
    }
}

/// Directory paths carry a trailing separator in the host map.
fn dir_string(path: &Path) -> String {
    let mut text = path.display().to_string();
    if !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    text
}

/// Identifier-safe form of a project name.
fn safe_name(name: &str) -> String {
    let mut safe: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if safe.starts_with(|c: char| c.is_ascii_digit()) {
        safe.insert(0, '_');
    }
    safe
}

fn validate_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
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
    if name
        .chars()
        .any(|c| c.is_control() || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|'))
    {
        return Err(invalid("name contains characters not allowed in file names"));
    }
    Ok(())
}

// ── Adapters ──────────────────────────────────────────────────────────────────

fn options_ui(args: &NewArgs, config: &AppConfig) -> CliResult<Box<dyn OptionsUi>> {
    let preset = Preset::from_args(args, &config.defaults);
    if args.yes {
        return Ok(Box::new(PresetOptionsUi::new(preset)));
    }
    interactive_ui(preset)
}

#[cfg(feature = "interactive")]
fn interactive_ui(preset: Preset) -> CliResult<Box<dyn OptionsUi>> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "the options form needs a terminal; pass --yes to use flags and defaults"
                .into(),
            source: None,
        });
    }
    Ok(Box::new(crate::prompt::DialoguerOptionsUi::new(preset)))
}

#[cfg(not(feature = "interactive"))]
fn interactive_ui(_preset: Preset) -> CliResult<Box<dyn OptionsUi>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn telemetry_dispatcher(config: &TelemetryConfig) -> TelemetryDispatcher {
    if !config.enabled {
        return TelemetryDispatcher::disabled();
    }
    let sink: Arc<dyn TelemetrySink> = match config.sink {
        TelemetrySinkKind::Log => Arc::new(TracingTelemetry),
        TelemetrySinkKind::File => Arc::new(JsonlTelemetry::new(config.file_path())),
        TelemetrySinkKind::None => Arc::new(NoopTelemetry),
    };
    TelemetryDispatcher::spawn(sink)
}

// ── Report ────────────────────────────────────────────────────────────────────

fn report(args: &NewArgs, parameters: &HostParameters, output: &OutputManager) -> CliResult<()> {
    let json = serde_json::to_value(parameters)
        .with_cli_context(|| "Failed to serialise the parameter map")?;

    if let Some(path) = &args.emit {
        let mut text = serde_json::to_string_pretty(&json)
            .with_cli_context(|| "Failed to serialise the parameter map")?;
        text.push('\n');
        std::fs::write(path, text)
            .with_cli_context(|| format!("Failed to write parameters to '{}'", path.display()))?;
    }

    if output.format() == OutputFormat::Json {
        if args.emit.is_none() {
            output.json(&json)?;
        }
        return Ok(());
    }

    if args.emit.is_none() {
        output.header("Parameters")?;
        output.table(parameters.iter())?;
        output.print("")?;
    }

    if args.dry_run {
        output.info("Dry run: nothing on disk was changed")?;
    }
    if let Some(path) = &args.emit {
        output.success(&format!("Parameters written to {}", path.display()))?;
    }
    let destination = parameters
        .get(HostKey::DestinationDirectory.as_str())
        .unwrap_or_default();
    output.success(&format!("Ready to generate into {destination}"))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::{Cli, Commands};

    fn new_args(argv: &[&str]) -> NewArgs {
        let mut full = vec!["platwiz", "new"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::New(args) => args,
            _ => panic!("expected New command"),
        }
    }

    fn sep() -> String {
        MAIN_SEPARATOR.to_string()
    }

    // ── HostLayout ────────────────────────────────────────────────────────

    #[test]
    fn layout_without_solution_uses_project_folder() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_str().unwrap();
        let layout = HostLayout::resolve(&new_args(&["MyApp", "-o", out])).unwrap();

        let expected = format!("{}{}MyApp{}", temp.path().display(), sep(), sep());
        assert_eq!(layout.destination, expected);
        assert_eq!(layout.solution_directory, expected);
        assert_eq!(layout.solution_name, "");
    }

    #[test]
    fn layout_with_solution_nests_project() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_str().unwrap();
        let layout =
            HostLayout::resolve(&new_args(&["MyApp", "-s", "Contoso", "-o", out])).unwrap();

        let root = temp.path().join("Contoso");
        assert_eq!(
            layout.destination,
            format!("{}{}MyApp{}", root.display(), sep(), sep())
        );
        assert_eq!(layout.solution_directory, format!("{}{}", root.display(), sep()));
        assert_eq!(layout.solution_name, "Contoso");
    }

    #[test]
    fn blank_solution_counts_as_none() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_str().unwrap();
        let layout = HostLayout::resolve(&new_args(&["MyApp", "-s", "  ", "-o", out])).unwrap();
        assert_eq!(layout.solution_name, "");
    }

    #[test]
    fn layout_fills_every_host_key() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_str().unwrap();
        let parameters = HostLayout::resolve(&new_args(&["My App", "-o", out]))
            .unwrap()
            .parameters();

        assert_eq!(parameters.len(), HostKey::ALL.len());
        assert_eq!(parameters.get("$safeprojectname$"), Some("My_App"));
    }

    #[test]
    fn target_root_is_solution_folder_when_present() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().to_str().unwrap();
        let layout =
            HostLayout::resolve(&new_args(&["MyApp", "-s", "Contoso", "-o", out])).unwrap();
        let metadata = RunMetadata::new(RunKind::NewProject, layout.parameters());

        let root = DirectoryReconciler::target_root(&metadata).unwrap();
        assert_eq!(
            Path::new(root.as_str()),
            temp.path().join("Contoso").as_path()
        );
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn safe_name_replaces_symbols() {
        assert_eq!(safe_name("My App"), "My_App");
        assert_eq!(safe_name("contoso.mobile-app"), "contoso_mobile_app");
        assert_eq!(safe_name("3D"), "_3D");
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["", "  ", ".hidden", "a/b", "a\\b", "a:b", "what?"] {
            assert!(
                matches!(validate_name(name), Err(CliError::InvalidProjectName { .. })),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn valid_names_pass() {
        for name in ["MyApp", "My App", "Contoso.Mobile", "field_app", "app-2"] {
            assert!(validate_name(name).is_ok(), "rejected: {name}");
        }
    }

    // ── telemetry wiring ──────────────────────────────────────────────────

    #[test]
    fn disabled_telemetry_builds_inert_dispatcher() {
        let config = TelemetryConfig {
            enabled: false,
            ..TelemetryConfig::default()
        };
        // must not spawn a worker that outlives the call
        telemetry_dispatcher(&config).shutdown();
    }
}
