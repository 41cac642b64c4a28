//! Step orchestration.
//!
//! The runner owns the driver for the whole run, executes the steps in
//! order, and turns each step result into an outcome. A failed step gets a
//! screenshot (where the step defines one) and ends the run, except Edit
//! User when the policy allows continuing. The session is closed and a
//! [`RunReport`] is returned however the run ended.

use chrono::Local;
use tracing::{debug, error, info, warn};

use super::artifacts::ScreenshotStore;
use super::context::{generate_username, WorkflowContext};
use super::outcome::{OutcomeLog, StepOutcome, StepStatus};
use super::step::{RunState, Step};
use super::steps::{self, StepDone};
use crate::config::HrflowConfig;
use crate::driver::Driver;
use crate::error::Result;
use crate::report::RunReport;
use crate::ui::UserInterface;

/// Mutable bookkeeping of one run.
struct Progress {
    log: OutcomeLog,
    context: WorkflowContext,
    state: RunState,
}

/// Drives one session through the fixed step sequence.
pub struct WorkflowRunner<D: Driver> {
    driver: D,
    config: HrflowConfig,
    screenshots: ScreenshotStore,
    username: Option<String>,
}

impl<D: Driver> WorkflowRunner<D> {
    /// Create a runner. Screenshots go to `config.artifacts.screenshot_dir`.
    pub fn new(driver: D, config: HrflowConfig) -> Self {
        let screenshots = ScreenshotStore::new(config.artifacts.screenshot_dir.clone());
        Self {
            driver,
            config,
            screenshots,
            username: None,
        }
    }

    /// Create the user under this name instead of a generated one.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Username the Add User step will create.
    fn resolve_username(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.config.user.fixed_username.clone())
            .unwrap_or_else(|| generate_username(&self.config.user.prefix, &mut rand::thread_rng()))
    }

    /// Execute the workflow and summarize it.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> RunReport {
        let started_at = Local::now();
        let mut progress = Progress {
            log: OutcomeLog::new(),
            context: WorkflowContext::default(),
            state: RunState::Init,
        };

        self.execute(ui, &mut progress);

        if let Err(e) = self.driver.close() {
            warn!("Failed to close browser session: {}", e);
        }
        info!(
            "Run finished after {:?} with {}/{} passed",
            progress.state,
            progress.log.passed(),
            progress.log.total()
        );

        let state = RunState::Reported;
        debug!("Run state {:?} -> {:?}", progress.state, state);
        RunReport {
            outcomes: progress.log,
            context: progress.context,
            started_at,
            finished_at: Local::now(),
            reached: progress.state,
            state,
        }
    }

    fn execute(&mut self, ui: &mut dyn UserInterface, progress: &mut Progress) {
        if self
            .attempt(ui, progress, Step::Login, steps::login::<D>)
            .is_none()
        {
            return;
        }
        if self
            .attempt(ui, progress, Step::NavigateToAdmin, steps::navigate_to_admin::<D>)
            .is_none()
        {
            return;
        }

        let username = self.resolve_username();
        let Some(created) = self.attempt(ui, progress, Step::AddUser, |d, c| {
            steps::add_user(d, c, &username)
        }) else {
            return;
        };
        progress.context.created_user = Some(created.clone());

        if self
            .attempt(ui, progress, Step::SearchUser, |d, c| {
                steps::search_user(d, c, &created)
            })
            .is_none()
        {
            return;
        }

        let current = match self.attempt(ui, progress, Step::EditUser, |d, c| {
            steps::edit_user(d, c, &created)
        }) {
            Some(renamed) => renamed,
            None if !Step::EditUser
                .halts_on_failure(self.config.policy.continue_after_edit_failure) =>
            {
                warn!("Continuing with unedited username {}", created);
                created.clone()
            }
            None => return,
        };
        progress.context.renamed_user = Some(current.clone());

        if self
            .attempt(ui, progress, Step::ValidateUpdate, |d, c| {
                steps::validate_update(d, c, &created, &current)
            })
            .is_none()
        {
            return;
        }
        if self
            .attempt(ui, progress, Step::DeleteUser, |d, c| {
                steps::delete_user(d, c, &current)
            })
            .is_none()
        {
            return;
        }
        self.attempt(ui, progress, Step::ValidateDeletion, |d, c| {
            steps::validate_deletion(d, c, &current)
        });
    }

    /// Run one step and record its outcome. `None` means the step failed.
    fn attempt<T>(
        &mut self,
        ui: &mut dyn UserInterface,
        progress: &mut Progress,
        step: Step,
        action: impl FnOnce(&mut D, &HrflowConfig) -> Result<StepDone<T>>,
    ) -> Option<T> {
        let label = format!("[{}/{}] {}", step.position(), Step::ALL.len(), step);
        info!("{}", label);
        let mut spinner = ui.start_spinner(&label);

        match action(&mut self.driver, &self.config) {
            Ok(done) => {
                let line = format!("{}: {}", step, done.detail);
                match done.status {
                    StepStatus::Warning => spinner.finish_warning(&line),
                    _ => spinner.finish_success(&line),
                }
                progress
                    .log
                    .record(StepOutcome::new(step, done.status, done.detail));
                progress.state = RunState::after(step);
                Some(done.value)
            }
            Err(e) => {
                error!("{} failed ({:?}): {}", step, e.kind(), e);
                let shot = step
                    .screenshot_file()
                    .and_then(|file| self.screenshots.capture(&mut self.driver, file));
                spinner.finish_error(&format!("{}: {}", step, e));
                if ui.output_mode().shows_details() {
                    ui.message(&format!("  failure kind: {:?}", e.kind()));
                    if let Some(path) = &shot {
                        ui.message(&format!("  screenshot: {}", path.display()));
                    }
                }
                progress
                    .log
                    .record(StepOutcome::new(step, StepStatus::Failure, e.to_string()));
                None
            }
        }
    }
}
