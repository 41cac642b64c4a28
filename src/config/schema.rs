//! Configuration schema definitions for hrflow.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format. Every field has a default, so an
//! empty file (or no file at all) reproduces the stock demo run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::driver::BrowserOptions;

/// Root configuration structure for `.hrflow/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrflowConfig {
    /// Application under test
    pub target: TargetConfig,

    /// Administrator login
    pub credentials: Credentials,

    /// Browser session settings
    pub browser: BrowserConfig,

    /// The user record created, edited and deleted by the run
    pub user: UserConfig,

    /// Fixed option choices per step
    pub selection: SelectionConfig,

    /// Bounded wait durations
    pub timeouts: Timeouts,

    /// Failure handling choices
    pub policy: Policy,

    /// Failure artifacts
    pub artifacts: ArtifactsConfig,
}

/// Application under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Login page URL
    pub url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "https://opensource-demo.orangehrmlive.com/web/index.php/auth/login".to_string(),
        }
    }
}

/// Administrator credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "Admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Browser session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver server endpoint
    pub webdriver_url: String,

    /// Browser name passed in the session capabilities
    pub name: String,

    /// Run without a visible window
    pub headless: bool,

    /// Delay after each interaction, in milliseconds
    pub slow_mo_ms: u64,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            name: "chrome".to_string(),
            headless: false,
            slow_mo_ms: 150,
            width: 1366,
            height: 900,
        }
    }
}

impl BrowserConfig {
    /// Launch options for the WebDriver backend.
    pub fn options(&self, request_timeout: Duration) -> BrowserOptions {
        BrowserOptions {
            browser: self.name.clone(),
            headless: self.headless,
            window: (self.width, self.height),
            slow_mo: Duration::from_millis(self.slow_mo_ms),
            request_timeout,
        }
    }
}

/// The user record managed by the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Prefix of generated usernames
    pub prefix: String,

    /// Use this username instead of generating one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_username: Option<String>,

    /// Prefix prepended to the username by the edit step
    pub edited_prefix: String,

    /// Password set when creating the user
    pub password: String,

    /// Password set by the edit step
    pub edited_password: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            prefix: "user_".to_string(),
            fixed_username: None,
            edited_prefix: "edited_".to_string(),
            password: "Test@123".to_string(),
            edited_password: "NewEditedPass@123".to_string(),
        }
    }
}

/// Fixed option choices. Indices are zero-based and clamped to the options offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// User Role option picked when creating
    pub add_role_index: usize,

    /// Status option picked when creating
    pub add_status_index: usize,

    /// User Role option picked when editing
    pub edit_role_index: usize,

    /// Status option picked when editing
    pub edit_status_index: usize,

    /// Text typed into the employee autocomplete when creating
    pub add_employee_seed: String,

    /// Text typed into the employee autocomplete when editing
    pub edit_employee_seed: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            add_role_index: 1,
            add_status_index: 1,
            edit_role_index: 2,
            edit_status_index: 2,
            add_employee_seed: "a".to_string(),
            edit_employee_seed: "c".to_string(),
        }
    }
}

/// Bounded wait durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Page-level waits (headings, result rows)
    pub page_ms: u64,

    /// Form controls becoming visible
    pub element_ms: u64,

    /// Confirmation toasts and form headers after a submit
    pub toast_ms: u64,

    /// Dropdown option list opening
    pub dropdown_ms: u64,

    /// A chosen dropdown option being clickable
    pub option_ms: u64,

    /// Autocomplete suggestions appearing
    pub suggestion_ms: u64,

    /// Optional elements (Reset button, stale rows)
    pub optional_ms: u64,

    /// Delay before keyboard-selecting a suggestion
    pub suggestion_settle_ms: u64,

    /// Interval between visibility checks
    pub poll_ms: u64,

    /// Per-request HTTP timeout for the WebDriver server
    pub request_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            page_ms: 15_000,
            element_ms: 10_000,
            toast_ms: 12_000,
            dropdown_ms: 5_000,
            option_ms: 3_000,
            suggestion_ms: 15_000,
            optional_ms: 3_000,
            suggestion_settle_ms: 2_000,
            poll_ms: 100,
            request_ms: 60_000,
        }
    }
}

impl Timeouts {
    pub fn page(&self) -> Duration {
        Duration::from_millis(self.page_ms)
    }

    pub fn element(&self) -> Duration {
        Duration::from_millis(self.element_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn dropdown(&self) -> Duration {
        Duration::from_millis(self.dropdown_ms)
    }

    pub fn option(&self) -> Duration {
        Duration::from_millis(self.option_ms)
    }

    pub fn suggestion(&self) -> Duration {
        Duration::from_millis(self.suggestion_ms)
    }

    pub fn optional(&self) -> Duration {
        Duration::from_millis(self.optional_ms)
    }

    pub fn suggestion_settle(&self) -> Duration {
        Duration::from_millis(self.suggestion_settle_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    /// Named wait durations, for validation.
    pub fn waits(&self) -> [(&'static str, u64); 7] {
        [
            ("page_ms", self.page_ms),
            ("element_ms", self.element_ms),
            ("toast_ms", self.toast_ms),
            ("dropdown_ms", self.dropdown_ms),
            ("option_ms", self.option_ms),
            ("suggestion_ms", self.suggestion_ms),
            ("optional_ms", self.optional_ms),
        ]
    }
}

/// Failure handling choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Keep going with the original username when the edit step fails
    pub continue_after_edit_failure: bool,

    /// Fail a step when the employee autocomplete offers no suggestion
    pub require_autocomplete: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            continue_after_edit_failure: true,
            require_autocomplete: false,
        }
    }
}

/// Failure artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory receiving failure screenshots (relative to the project root)
    pub screenshot_dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: HrflowConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, HrflowConfig::default());
        assert_eq!(config.credentials.username, "Admin");
        assert_eq!(config.selection.add_role_index, 1);
        assert_eq!(config.selection.edit_status_index, 2);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
browser:
  headless: true
selection:
  edit_role_index: 5
"#;
        let config: HrflowConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.browser.headless);
        assert_eq!(config.browser.name, "chrome");
        assert_eq!(config.selection.edit_role_index, 5);
        assert_eq!(config.selection.add_role_index, 1);
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let t = Timeouts::default();
        assert_eq!(t.page(), Duration::from_secs(15));
        assert_eq!(t.dropdown(), Duration::from_secs(5));
        assert_eq!(t.option(), Duration::from_secs(3));
        assert_eq!(t.poll(), Duration::from_millis(100));
    }

    #[test]
    fn browser_options_follow_config() {
        let config = BrowserConfig {
            headless: true,
            slow_mo_ms: 0,
            width: 800,
            height: 600,
            ..Default::default()
        };
        let options = config.options(Duration::from_secs(30));
        assert!(options.headless);
        assert_eq!(options.window, (800, 600));
        assert!(options.slow_mo.is_zero());
        assert_eq!(options.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn default_policy_preserves_continue_on_edit_failure() {
        let policy = Policy::default();
        assert!(policy.continue_after_edit_failure);
        assert!(!policy.require_autocomplete);
    }

    #[test]
    fn fixed_username_omitted_when_unset() {
        let yaml = serde_yaml::to_string(&UserConfig::default()).unwrap();
        assert!(!yaml.contains("fixed_username"));
    }
}
