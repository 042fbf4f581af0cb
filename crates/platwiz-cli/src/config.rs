//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Global CLI flags, via [`AppConfig::with_overrides`]
//! 2. Environment variables: `PLATWIZ__<SECTION>__<KEY>`, e.g.
//!    `PLATWIZ__WIZARD__CLEANUP_POLICY=abort-on-any-failure`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use platwiz_core::{
    application::CleanupPolicy,
    domain::{
        PlatformSelection, ProjectGrouping, ScaffoldType, SdkSelection, TargetFramework,
        TestSelection,
    },
};

use crate::cli::global::{GlobalArgs, OutputFormat};

const ENV_PREFIX: &str = "PLATWIZ";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for the options form.
    pub defaults: Defaults,
    /// Run behaviour.
    pub wizard: WizardConfig,
    /// Where telemetry events go.
    pub telemetry: TelemetryConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// File logging.
    pub logging: LoggingConfig,
}

/// Initial values of the options form (and the whole answer with `--yes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub platforms: PlatformSelection,
    pub tests: TestSelection,
    pub editor_config: bool,
    pub grouping: ProjectGrouping,
    pub scaffold: ScaffoldType,
    pub target_framework: TargetFramework,
    pub sdk: SdkSelection,
    /// Prepended to the safe project name to form the app id.
    pub app_id_prefix: String,
    pub uwp_description: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            platforms: PlatformSelection::all(),
            tests: TestSelection {
                core: true,
                ..TestSelection::default()
            },
            editor_config: true,
            grouping: ProjectGrouping::default(),
            scaffold: ScaffoldType::default(),
            target_framework: TargetFramework::default(),
            sdk: SdkSelection::default(),
            app_id_prefix: "com.example".into(),
            uwp_description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub cleanup_policy: CleanupPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub sink: TelemetrySinkKind,
    /// JSON-lines file for `sink = "file"`.  Defaults to the data dir.
    pub path: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: TelemetrySinkKind::Log,
            path: None,
        }
    }
}

impl TelemetryConfig {
    /// Configured file, or `telemetry.jsonl` in the platform data dir.
    pub fn file_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|d| d.data_dir().join("telemetry.jsonl"))
                .unwrap_or_else(|| PathBuf::from("platwiz-telemetry.jsonl"))
        })
    }
}

/// Telemetry destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetrySinkKind {
    /// `tracing` events on the `platwiz::telemetry` target.
    #[default]
    Log,
    /// Append JSON lines to `telemetry.path`.
    File,
    /// Accept and drop.
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a daily rolling log here in addition to stderr.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, config_file.is_some())
    }

    pub(crate) fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to seed configuration defaults")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Fold the global flags that shadow config keys into `self`.
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(dir) = &args.log_dir {
            self.logging.directory = Some(dir.clone());
        }
        if args.no_telemetry {
            self.telemetry.enabled = false;
        }
        self.output.no_color |= args.no_color;
        self
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.platwiz.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".platwiz.toml"))
    }

    /// Value at a dotted key such as `telemetry.sink`, rendered as TOML
    /// would show it.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&root, |node, segment| node.get(segment))?;

        Some(match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "platwiz", "platwiz")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_select_every_platform() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.platforms, PlatformSelection::all());
        assert!(cfg.defaults.tests.core);
        assert!(!cfg.defaults.tests.uwp_ui);
    }

    #[test]
    fn default_cleanup_policy_records_only() {
        assert_eq!(
            AppConfig::default().wizard.cleanup_policy,
            CleanupPolicy::RecordOnly
        );
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_overrides_selected_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[defaults]
app_id_prefix = "com.contoso"
grouping = "platform-folders"

[defaults.platforms]
android = true
ios = false
uwp = false

[wizard]
cleanup_policy = "abort-on-access-denied"

[telemetry]
sink = "file"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();

        assert_eq!(cfg.defaults.app_id_prefix, "com.contoso");
        assert_eq!(cfg.defaults.grouping, ProjectGrouping::PlatformFolders);
        assert!(!cfg.defaults.platforms.ios);
        assert_eq!(cfg.wizard.cleanup_policy, CleanupPolicy::AbortOnAccessDenied);
        assert_eq!(cfg.telemetry.sink, TelemetrySinkKind::File);
        // untouched sections keep their defaults
        assert!(cfg.telemetry.enabled);
        assert_eq!(cfg.defaults.sdk, SdkSelection::default());
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("wizard.cleanup_policy").as_deref(), Some("record-only"));
        assert_eq!(cfg.get("defaults.platforms.uwp").as_deref(), Some("true"));
        assert_eq!(cfg.get("defaults.sdk.android_min").as_deref(), Some("21"));
        assert_eq!(cfg.get("logging.directory").as_deref(), Some(""));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn global_flags_shadow_config() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            log_dir: Some(PathBuf::from("logs")),
            no_telemetry: true,
            output_format: OutputFormat::Auto,
        };

        let cfg = AppConfig::default().with_overrides(&args);
        assert!(!cfg.telemetry.enabled);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.logging.directory, Some(PathBuf::from("logs")));
    }
}
