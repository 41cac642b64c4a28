//! Configuration file discovery and loading.
//!
//! This module finds the configuration files of a project, layers them,
//! and applies environment overrides. A project without any file runs on
//! built-in defaults.

use crate::config::merger::merge_configs;
use crate::config::schema::HrflowConfig;
use crate::error::{HrflowError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".hrflow";

/// Environment variable overriding the admin username.
pub const ENV_USERNAME: &str = "HRFLOW_USERNAME";
/// Environment variable overriding the admin password.
pub const ENV_PASSWORD: &str = "HRFLOW_PASSWORD";
/// Environment variable overriding the WebDriver endpoint.
pub const ENV_WEBDRIVER_URL: &str = "HRFLOW_WEBDRIVER_URL";

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. Project config (`.hrflow/config.yml`)
/// 2. Local overrides (`.hrflow/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .hrflow/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .hrflow/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Load a config file as raw YAML for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HrflowError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HrflowError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| HrflowError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<HrflowConfig> {
    if content.trim().is_empty() {
        return Ok(HrflowConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| HrflowError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and layer every config file of a project.
///
/// Returns the defaults when the project has no config files.
pub fn load_merged_config(project_root: &Path) -> Result<HrflowConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();
    if existing.is_empty() {
        return Ok(HrflowConfig::default());
    }

    let layers = existing
        .into_iter()
        .map(|p| load_config_value(p))
        .collect::<Result<Vec<_>>>()?;

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| HrflowError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// An explicit file is loaded on its own and must exist.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<HrflowConfig> {
    match config_override {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HrflowError::ConfigNotFound {
                        path: path.to_path_buf(),
                    }
                } else {
                    HrflowError::Io(e)
                }
            })?;
            parse_config(&content, path)
        }
        None => load_merged_config(project_root),
    }
}

/// Apply `HRFLOW_*` overrides from an environment snapshot.
pub fn apply_env_overrides(config: &mut HrflowConfig, env: &HashMap<String, String>) {
    if let Some(username) = env.get(ENV_USERNAME) {
        config.credentials.username = username.clone();
    }
    if let Some(password) = env.get(ENV_PASSWORD) {
        config.credentials.password = password.clone();
    }
    if let Some(url) = env.get(ENV_WEBDRIVER_URL) {
        config.browser.webdriver_url = url.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_both_layers() {
        let temp = project(&[("config.yml", "{}"), ("config.local.yml", "{}")]);
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn missing_files_yield_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, HrflowConfig::default());
    }

    #[test]
    fn local_layer_overrides_project() {
        let temp = project(&[
            (
                "config.yml",
                "browser:\n  headless: false\n  name: firefox\n",
            ),
            ("config.local.yml", "browser:\n  headless: true\n"),
        ]);
        let config = load_merged_config(temp.path()).unwrap();
        assert!(config.browser.headless);
        assert_eq!(config.browser.name, "firefox");
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = project(&[("config.yml", "target: [unclosed")]);
        let err = load_merged_config(temp.path()).unwrap_err();
        match err {
            HrflowError::ConfigParseError { path, .. } => {
                assert!(path.ends_with("config.yml"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let temp = project(&[("config.yml", "selection:\n  add_role_index: second\n")]);
        assert!(matches!(
            load_merged_config(temp.path()),
            Err(HrflowError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn explicit_override_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        assert!(matches!(
            load_config(temp.path(), Some(&missing)),
            Err(HrflowError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn explicit_override_skips_discovery() {
        let temp = project(&[("config.yml", "credentials:\n  username: fromproject\n")]);
        let file = temp.path().join("other.yml");
        fs::write(&file, "credentials:\n  username: fromfile\n").unwrap();

        let config = load_config(temp.path(), Some(&file)).unwrap();
        assert_eq!(config.credentials.username, "fromfile");
    }

    #[test]
    fn empty_explicit_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("empty.yml");
        fs::write(&file, "").unwrap();
        assert_eq!(
            load_config(temp.path(), Some(&file)).unwrap(),
            HrflowConfig::default()
        );
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = HrflowConfig::default();
        let env: HashMap<String, String> = [
            (ENV_PASSWORD.to_string(), "s3cret".to_string()),
            (ENV_WEBDRIVER_URL.to_string(), "http://grid:4444".to_string()),
        ]
        .into_iter()
        .collect();

        apply_env_overrides(&mut config, &env);
        assert_eq!(config.credentials.username, "Admin");
        assert_eq!(config.credentials.password, "s3cret");
        assert_eq!(config.browser.webdriver_url, "http://grid:4444");
    }
}
