//! Tests for error handling, exit codes and suggestions.

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

fn platwiz(temp: &TempDir) -> Command {
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("platwiz");
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn test_error_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["new", ".hidden", "--yes", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_error_no_platform_fails_the_run() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["new", "MyApp", "--yes", "--dry-run"])
        .args(["--no-android", "--no-ios", "--no-uwp"])
        .arg("-o")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Wizard run failed"));
}

#[test]
fn test_error_tests_for_missing_platform() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["new", "MyApp", "--yes", "--dry-run", "--no-ios", "--tests", "ios"])
        .arg("-o")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ios"));
}

#[test]
fn test_error_unknown_scaffold_lists_values() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["new", "MyApp", "--yes", "--scaffold", "wizardry"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("wizardry"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["config", "get", "does.not.exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown configuration key"))
        .stderr(predicate::str::contains("config list"));
}

#[test]
fn test_error_missing_explicit_config() {
    let temp = TempDir::new().unwrap();
    cargo_bin_cmd!("platwiz")
        .current_dir(temp.path())
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_error_malformed_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "[telemetry]\nsink = \"carrier-pigeon\"\n").unwrap();

    cargo_bin_cmd!("platwiz")
        .current_dir(temp.path())
        .env_remove("PLATWIZ__TELEMETRY__SINK")
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_verbose_prints_cause_chain() {
    let temp = TempDir::new().unwrap();
    platwiz(&temp)
        .args(["-v", "new", "MyApp", "--yes", "--dry-run", "--no-android", "--no-ios", "--no-uwp"])
        .arg("-o")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Caused by"));
}
