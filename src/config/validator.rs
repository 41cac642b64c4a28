//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - The target and WebDriver URLs must parse as http(s) URLs
//! - Credentials and autocomplete seeds must not be empty
//! - Every wait must be positive and longer than the poll interval

use crate::config::schema::HrflowConfig;
use crate::error::{HrflowError, Result};
use reqwest::Url;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Dotted path of the offending field
    pub field: String,
}

impl ValidationError {
    fn new(rule: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
            field: field.to_string(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// All errors are collected so that several mistakes can be fixed in one go.
pub fn validate_config(config: &HrflowConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_urls(config));
    errors.extend(validate_required(config));
    errors.extend(validate_timeouts(config));

    errors
}

fn validate_urls(config: &HrflowConfig) -> Vec<ValidationError> {
    [
        ("target.url", config.target.url.as_str()),
        ("browser.webdriver_url", config.browser.webdriver_url.as_str()),
    ]
    .into_iter()
    .filter_map(|(field, raw)| match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => None,
        Ok(url) => Some(ValidationError::new(
            "unsupported-scheme",
            field,
            format!("{} uses unsupported scheme '{}'", field, url.scheme()),
        )),
        Err(e) => Some(ValidationError::new(
            "invalid-url",
            field,
            format!("{} is not a valid URL ('{}'): {}", field, raw, e),
        )),
    })
    .collect()
}

fn validate_required(config: &HrflowConfig) -> Vec<ValidationError> {
    let user = &config.user;
    let fixed = user.fixed_username.as_deref().unwrap_or("-");
    [
        ("credentials.username", config.credentials.username.as_str()),
        ("credentials.password", config.credentials.password.as_str()),
        ("user.prefix", user.prefix.as_str()),
        ("user.edited_prefix", user.edited_prefix.as_str()),
        ("user.fixed_username", fixed),
        ("user.password", user.password.as_str()),
        ("user.edited_password", user.edited_password.as_str()),
        (
            "selection.add_employee_seed",
            config.selection.add_employee_seed.as_str(),
        ),
        (
            "selection.edit_employee_seed",
            config.selection.edit_employee_seed.as_str(),
        ),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| ValidationError::new("empty-value", field, format!("{} must not be empty", field)))
    .collect()
}

fn validate_timeouts(config: &HrflowConfig) -> Vec<ValidationError> {
    let timeouts = &config.timeouts;
    let mut errors = Vec::new();

    if timeouts.poll_ms == 0 {
        errors.push(ValidationError::new(
            "zero-poll",
            "timeouts.poll_ms",
            "timeouts.poll_ms must be at least 1",
        ));
    }
    if timeouts.request_ms == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "timeouts.request_ms",
            "timeouts.request_ms must be positive",
        ));
    }

    for (name, value) in timeouts.waits() {
        let field = format!("timeouts.{}", name);
        if value == 0 {
            errors.push(ValidationError::new(
                "zero-timeout",
                &field,
                format!("{} must be positive", field),
            ));
        } else if value < timeouts.poll_ms {
            errors.push(ValidationError::new(
                "poll-exceeds-timeout",
                &field,
                format!(
                    "{} ({}ms) is shorter than timeouts.poll_ms ({}ms)",
                    field, value, timeouts.poll_ms
                ),
            ));
        }
    }

    errors
}

/// Validate config and return error if invalid.
pub fn validate(config: &HrflowConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(HrflowError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
