//! Configuration loading, parsing, and validation for hrflow.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use hrflow::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".hrflow");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "browser:\n  headless: true\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert!(config.browser.headless);
//! ```
//!
//! # Configuration File Locations
//!
//! hrflow discovers and merges configuration in this order:
//! 1. Project config (`.hrflow/config.yml`)
//! 2. Local overrides (`.hrflow/config.local.yml`)
//!
//! `HRFLOW_USERNAME`, `HRFLOW_PASSWORD` and `HRFLOW_WEBDRIVER_URL` are
//! applied on top, followed by command-line flags.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    ArtifactsConfig, BrowserConfig, Credentials, HrflowConfig, Policy, SelectionConfig,
    TargetConfig, Timeouts, UserConfig,
};

// Loader re-exports
pub use loader::{
    apply_env_overrides, load_config, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR, ENV_PASSWORD, ENV_USERNAME, ENV_WEBDRIVER_URL,
};

// Merger re-exports
pub use merger::{deep_merge, merge_configs};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};
