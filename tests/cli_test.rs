//! Integration tests for the hrflow binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".hrflow");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), config).unwrap();
    temp
}

fn hrflow(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.current_dir(temp.path())
        .env_remove("HRFLOW_USERNAME")
        .env_remove("HRFLOW_PASSWORD")
        .env_remove("HRFLOW_WEBDRIVER_URL");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Browser-driven regression workflow"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn run_help_lists_overrides() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.args(["run", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--webdriver-url"))
        .stdout(predicate::str::contains("--halt-on-edit-failure"))
        .stdout(predicate::str::contains("--dry-run"));
    Ok(())
}

#[test]
fn dry_run_passes_all_steps() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    hrflow(&temp)
        .args(["run", "--dry-run", "--username", "user_cli001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 TEST EXECUTION SUMMARY"))
        .stdout(predicate::str::contains("📈 Results: 8/8 tests passed"))
        .stdout(predicate::str::contains("🎉 ALL TESTS PASSED"))
        .stdout(predicate::str::contains("edited_user_cli001"));
    Ok(())
}

#[test]
fn failed_step_exits_with_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("credentials:\n  password: not-the-password\n");
    hrflow(&temp)
        .args(["run", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0/1 tests passed"))
        .stdout(predicate::str::contains("Some tests failed"));
    Ok(())
}

#[test]
fn env_password_override_applies() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("credentials:\n  password: not-the-password\n");
    hrflow(&temp)
        .env("HRFLOW_PASSWORD", "admin123")
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8/8 tests passed"));
    Ok(())
}

#[test]
fn invalid_config_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("target:\n  url: not a url\ntimeouts:\n  poll_ms: 0\n");
    hrflow(&temp)
        .args(["run", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("target.url"));
    Ok(())
}

#[test]
fn empty_edited_prefix_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("user:\n  edited_prefix: ''\n");
    hrflow(&temp)
        .args(["run", "--dry-run", "--ci"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("user.edited_prefix"));
    Ok(())
}

#[test]
fn quiet_run_still_prints_summary() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    hrflow(&temp)
        .args(["--quiet", "run", "--dry-run", "--ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains("📊 TEST EXECUTION SUMMARY"))
        .stdout(predicate::str::contains("8/8 tests passed"));
    Ok(())
}

#[test]
fn unreachable_webdriver_prints_empty_summary() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    hrflow(&temp)
        .args(["run", "--ci", "--webdriver-url", "http://127.0.0.1:9"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("📊 TEST EXECUTION SUMMARY"))
        .stderr(predicate::str::contains("0/0 tests passed"));
    Ok(())
}

#[test]
fn malformed_config_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("timeouts: [1, 2\n");
    hrflow(&temp)
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn missing_explicit_config_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    hrflow(&temp)
        .args(["run", "--dry-run", "--config", "nowhere.yml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn config_masks_passwords() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("user:\n  prefix: qa_\n");
    hrflow(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("prefix: qa_"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("admin123").not())
        .stdout(predicate::str::contains("Test@123").not());
    Ok(())
}

#[test]
fn config_local_file_overrides_project_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("browser:\n  headless: false\n  width: 1024\n");
    fs::write(
        temp.path().join(".hrflow/config.local.yml"),
        "browser:\n  headless: true\n",
    )?;
    hrflow(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("headless: true"))
        .stdout(predicate::str::contains("width: 1024"));
    Ok(())
}

#[test]
fn project_flag_selects_root() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("user:\n  prefix: proj_\n");
    let elsewhere = TempDir::new()?;
    hrflow(&elsewhere)
        .arg("config")
        .arg("--project")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("prefix: proj_"));
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_hrflow"));
    Ok(())
}

#[test]
fn unknown_shell_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("hrflow"));
    cmd.args(["completions", "tcsh"]);
    cmd.assert().failure();
    Ok(())
}
