//! hrflow - Browser-driven regression run for an HR admin console.
//!
//! hrflow logs into the admin console, creates a system user, finds it,
//! edits it, deletes it and checks each change, then prints a pass/fail
//! summary. Browsers are driven over the W3C WebDriver protocol.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`driver`] - Browser driver abstraction, WebDriver client and mock
//! - [`error`] - Error types and result aliases
//! - [`report`] - End-of-run summary
//! - [`ui`] - Spinners and terminal output
//! - [`workflow`] - The user-lifecycle steps and their runner
//!
//! # Example
//!
//! ```
//! use hrflow::workflow::{clamp_option_index, Step};
//!
//! // "Second option" on a dropdown offering only one entry picks the last
//! assert_eq!(clamp_option_index(1, 1), Some(0));
//! assert_eq!(Step::EditUser.screenshot_file(), Some("fail_edit_user.png"));
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod report;
pub mod ui;
pub mod workflow;

pub use error::{HrflowError, Result};
