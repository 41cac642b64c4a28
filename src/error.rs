//! Error types for hrflow operations.
//!
//! This module defines [`HrflowError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `HrflowError` for domain-specific errors that need distinct handling
//! - Driver failures are wrapped via `HrflowError::Driver`
//! - Use `anyhow::Error` (via `HrflowError::Other`) for unexpected errors
//! - Step failures never escape the runner; they become failure outcomes

use std::path::PathBuf;
use thiserror::Error;

use crate::driver::DriverError;

/// Core error type for hrflow operations.
#[derive(Debug, Error)]
pub enum HrflowError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A dropdown opened but offered nothing to select.
    #[error("Dropdown '{control}' opened with {count} options")]
    UnexpectedOptionCount { control: String, count: usize },

    /// An autocomplete field produced no suggestions.
    #[error("No suggestions appeared for '{seed}' within {timeout_ms}ms")]
    NoSuggestions { seed: String, timeout_ms: u128 },

    /// Browser driver failure.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad failure categories reported with each failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An element never appeared or could not be found.
    ElementOrTimeout,
    /// A dropdown or suggestion list had an unusable number of entries.
    UnexpectedOptionCount,
    /// The browser session or the page could not be reached.
    NetworkOrNavigation,
    /// Anything else.
    Other,
}

impl HrflowError {
    /// Classify the error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Driver(e) if e.is_element_failure() => FailureKind::ElementOrTimeout,
            Self::Driver(e) if e.is_network_failure() => FailureKind::NetworkOrNavigation,
            Self::UnexpectedOptionCount { .. } | Self::NoSuggestions { .. } => {
                FailureKind::UnexpectedOptionCount
            }
            _ => FailureKind::Other,
        }
    }
}

/// Result type alias for hrflow operations.
pub type Result<T> = std::result::Result<T, HrflowError>;
