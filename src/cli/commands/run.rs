//! Run command implementation.
//!
//! The `hrflow run` command executes the user-lifecycle workflow, either in a
//! real browser over WebDriver or, with `--dry-run`, against the in-memory
//! replica of the admin console.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info};

use crate::cli::args::RunArgs;
use crate::config::{validate, HrflowConfig};
use crate::driver::{Driver, WebDriverSession};
use crate::error::Result;
use crate::report::RunReport;
use crate::ui::{format_duration, UserInterface};
use crate::workflow::{admin_replica, generate_username, ReplicaOptions, WorkflowRunner};

use super::config::load_resolved;
use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Layer the command-line flags over the loaded configuration.
    fn apply_overrides(&self, config: &mut HrflowConfig) {
        if let Some(url) = &self.args.webdriver_url {
            config.browser.webdriver_url = url.clone();
        }
        if self.args.headless {
            config.browser.headless = true;
        }
        if let Some(dir) = &self.args.screenshot_dir {
            config.artifacts.screenshot_dir = dir.clone();
        }
        if self.args.halt_on_edit_failure {
            config.policy.continue_after_edit_failure = false;
        }
        if config.artifacts.screenshot_dir.is_relative() {
            config.artifacts.screenshot_dir =
                self.project_root.join(&config.artifacts.screenshot_dir);
        }
    }

    /// Username for this run: flag, then config, then generated.
    fn username(&self, config: &HrflowConfig) -> String {
        self.args
            .username
            .clone()
            .or_else(|| config.user.fixed_username.clone())
            .unwrap_or_else(|| generate_username(&config.user.prefix, &mut rand::thread_rng()))
    }

    fn open_driver(&self, config: &HrflowConfig, username: &str) -> Result<Box<dyn Driver>> {
        if self.args.dry_run {
            info!("Dry run: using the in-memory admin console");
            return Ok(Box::new(admin_replica(
                config,
                username,
                &ReplicaOptions::default(),
            )));
        }

        let options = config.browser.options(config.timeouts.request());
        let session = WebDriverSession::connect(&config.browser.webdriver_url, &options)?;
        Ok(Box::new(session))
    }

    fn show_settings(&self, config: &HrflowConfig, username: &str, ui: &mut dyn UserInterface) {
        let browser = if self.args.dry_run {
            "in-memory replica".to_string()
        } else {
            format!(
                "{} ({})",
                config.browser.webdriver_url,
                if config.browser.headless { "headless" } else { "windowed" }
            )
        };
        ui.message(&format!("  browser:     {}", browser));
        ui.message(&format!("  username:    {}", username));
        let picks = &config.selection;
        ui.message(&format!(
            "  options:     role {} status {}, edited role {} status {}",
            picks.add_role_index,
            picks.add_status_index,
            picks.edit_role_index,
            picks.edit_status_index
        ));
        ui.message(&format!(
            "  screenshots: {}",
            config.artifacts.screenshot_dir.display()
        ));
        ui.message(&format!(
            "  on edit failure: {}",
            if config.policy.continue_after_edit_failure { "continue" } else { "halt" }
        ));
    }

    fn show_report(&self, report: &RunReport, ui: &mut dyn UserInterface) {
        ui.message(&report.render());

        let elapsed = (report.finished_at - report.started_at)
            .to_std()
            .unwrap_or_default();
        let line = format!("{} in {}", report.tally(), format_duration(elapsed));
        if report.all_passed() {
            ui.success(&line);
        } else {
            ui.error(&line);
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(mut config) = load_resolved(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(CommandResult::CONFIG_ERROR));
        };
        self.apply_overrides(&mut config);

        if let Err(e) = validate(&config) {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(CommandResult::CONFIG_ERROR));
        }
        debug!("Resolved configuration: {:?}", config);

        let username = self.username(&config);
        let mode = if self.args.dry_run { " (dry run)" } else { "" };
        ui.show_header(&format!("hrflow: {}{}", config.target.url, mode));
        if ui.output_mode().shows_details() {
            self.show_settings(&config, &username, ui);
        }

        let started_at = Local::now();
        let driver = match self.open_driver(&config, &username) {
            Ok(driver) => driver,
            Err(e) => {
                error!("Could not open a browser session: {}", e);
                ui.error(&format!("Could not open a browser session: {}", e));
                self.show_report(&RunReport::not_started(started_at), ui);
                return Ok(CommandResult::failure(CommandResult::STEP_FAILED));
            }
        };
        let mut runner = WorkflowRunner::new(driver, config).with_username(username);
        let report = runner.run(ui);
        self.show_report(&report, ui);

        if report.all_passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(CommandResult::STEP_FAILED))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn dry_run() -> RunArgs {
        RunArgs {
            dry_run: true,
            ..Default::default()
        }
    }

    #[test]
    fn dry_run_passes_every_step() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = RunCommand::new(temp.path(), None, dry_run())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("8/8 tests passed"));
        assert!(ui.has_message("🎉 ALL TESTS PASSED"));
        assert_eq!(ui.spinners().len(), 8);
    }

    #[test]
    fn dry_run_uses_requested_username() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = RunArgs {
            username: Some("qa_fixed".into()),
            ..dry_run()
        };

        RunCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("qa_fixed"));
        assert!(ui.has_message("edited_qa_fixed"));
    }

    #[test]
    fn wrong_credentials_fail_the_run() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".hrflow");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "credentials:\n  password: nope\n").unwrap();
        let mut ui = MockUI::new();
        let args = RunArgs {
            screenshot_dir: Some(PathBuf::from("shots")),
            ..dry_run()
        };

        let result = RunCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, CommandResult::STEP_FAILED);
        assert!(ui.has_message("0/1 tests passed"));
        assert!(!temp.path().join("shots").exists());
    }

    #[test]
    fn invalid_config_exits_with_config_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".hrflow");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "timeouts:\n  poll_ms: 0\n").unwrap();
        let mut ui = MockUI::new();

        let result = RunCommand::new(temp.path(), None, dry_run())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, CommandResult::CONFIG_ERROR);
        assert!(ui.has_error("Invalid configuration"));
    }

    #[test]
    fn flags_override_config() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            webdriver_url: Some("http://grid.test:4444".into()),
            headless: true,
            halt_on_edit_failure: true,
            screenshot_dir: Some(PathBuf::from("shots")),
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), None, args);
        let mut config = HrflowConfig::default();

        cmd.apply_overrides(&mut config);

        assert_eq!(config.browser.webdriver_url, "http://grid.test:4444");
        assert!(config.browser.headless);
        assert!(!config.policy.continue_after_edit_failure);
        assert_eq!(config.artifacts.screenshot_dir, temp.path().join("shots"));
    }

    #[test]
    fn unreachable_webdriver_reports_empty_summary() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            webdriver_url: Some("http://127.0.0.1:9".into()),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = RunCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, CommandResult::STEP_FAILED);
        assert!(ui.has_error("Could not open a browser session"));
        assert!(ui.has_message("TEST EXECUTION SUMMARY"));
        assert!(ui.has_message("Some tests failed"));
        assert!(ui.has_error("0/0 tests passed"));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn quiet_mode_still_prints_summary() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        let result = RunCommand::new(temp.path(), None, dry_run())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("TEST EXECUTION SUMMARY"));
        assert!(ui.has_message("🎉 ALL TESTS PASSED"));
    }

    #[test]
    fn verbose_mode_lists_resolved_settings() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        let args = RunArgs {
            username: Some("qa_fixed".into()),
            halt_on_edit_failure: true,
            ..dry_run()
        };

        RunCommand::new(temp.path(), None, args)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("browser:     in-memory replica"));
        assert!(ui.has_message("username:    qa_fixed"));
        assert!(ui.has_message("on edit failure: halt"));
    }

    #[test]
    fn normal_mode_skips_settings() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        RunCommand::new(temp.path(), None, dry_run())
            .execute(&mut ui)
            .unwrap();

        assert!(!ui.has_message("browser:"));
    }
}
