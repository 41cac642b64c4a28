//! The user-lifecycle workflow.
//!
//! A run logs in, opens the admin module, then creates, finds, edits and
//! deletes one user, validating the edit and the deletion:
//!
//! - [`step`]: the fixed step order and run state machine
//! - [`steps`]: what each step does on the page
//! - [`selection`]: dropdown and autocomplete policies
//! - [`runner`]: ordering, failure isolation and the outcome log
//! - [`replica`]: an in-memory admin surface for dry runs and tests
//!
//! # Example
//!
//! ```
//! use hrflow::config::HrflowConfig;
//! use hrflow::ui::MockUI;
//! use hrflow::workflow::{admin_replica, ReplicaOptions, WorkflowRunner};
//!
//! let config = HrflowConfig::default();
//! let driver = admin_replica(&config, "user_demo01", &ReplicaOptions::default());
//! let mut runner = WorkflowRunner::new(driver, config).with_username("user_demo01");
//!
//! let report = runner.run(&mut MockUI::new());
//! assert_eq!(report.tally(), "8/8 tests passed");
//! ```

pub mod artifacts;
pub mod context;
pub mod outcome;
pub mod replica;
pub mod runner;
pub mod selection;
pub mod step;
pub mod steps;
pub mod surface;

pub use artifacts::ScreenshotStore;
pub use context::{edited_username, generate_username, WorkflowContext};
pub use outcome::{OutcomeLog, StepOutcome, StepStatus};
pub use replica::{admin_replica, ReplicaOptions};
pub use runner::WorkflowRunner;
pub use selection::{clamp_option_index, SelectedOption, Suggestion};
pub use step::{RunState, Step};
pub use steps::StepDone;
