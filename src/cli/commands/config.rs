//! Config command implementation.
//!
//! The `hrflow config` command shows the resolved configuration: files,
//! environment overrides and defaults merged, passwords masked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{apply_env_overrides, load_config, ConfigPaths, HrflowConfig};
use crate::error::{HrflowError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const MASK: &str = "********";

/// Load configuration and apply environment overrides.
///
/// Configuration problems are reported through `ui` and yield `None`;
/// the caller exits with [`CommandResult::CONFIG_ERROR`].
pub(crate) fn load_resolved(
    project_root: &Path,
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<HrflowConfig>> {
    match load_config(project_root, config_path) {
        Ok(mut config) => {
            let env: HashMap<String, String> = std::env::vars().collect();
            apply_env_overrides(&mut config, &env);
            Ok(Some(config))
        }
        Err(
            e @ (HrflowError::ConfigNotFound { .. }
            | HrflowError::ConfigParseError { .. }
            | HrflowError::ConfigValidationError { .. }),
        ) => {
            ui.error(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Copy of `config` with every password replaced by a mask.
pub fn masked(config: &HrflowConfig) -> HrflowConfig {
    let mut config = config.clone();
    config.credentials.password = MASK.to_string();
    config.user.password = MASK.to_string();
    config.user.edited_password = MASK.to_string();
    config
}

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_resolved(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(CommandResult::CONFIG_ERROR));
        };

        // Show config file path(s)
        let sources: Vec<PathBuf> = match &self.config_path {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if sources.is_empty() {
            ui.message("# built-in defaults");
        }
        for path in &sources {
            ui.message(&format!("# {}", path.display()));
        }
        ui.message("");

        let shown = if self.args.show_secrets {
            config
        } else {
            masked(&config)
        };

        let text = if self.args.json {
            serde_json::to_string_pretty(&shown).map_err(|e| HrflowError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&shown).map_err(|e| HrflowError::Other(e.into()))?
        };
        ui.message(&text);

        Ok(CommandResult::success())
    }
}
