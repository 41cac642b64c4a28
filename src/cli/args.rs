//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// hrflow - User-lifecycle regression run against an HR admin console.
#[derive(Debug, Parser)]
#[command(name = "hrflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .hrflow/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the user-lifecycle workflow (default if no command specified)
    Run(RunArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// WebDriver server to open the browser session on
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Create the user under this name instead of a generated one
    #[arg(short, long)]
    pub username: Option<String>,

    /// Directory for failure screenshots
    #[arg(long)]
    pub screenshot_dir: Option<PathBuf>,

    /// Stop the run when editing the user fails
    #[arg(long)]
    pub halt_on_edit_failure: bool,

    /// Drive an in-memory replica of the admin console instead of a browser
    #[arg(long)]
    pub dry_run: bool,

    /// Plain line output, no spinners
    #[arg(long)]
    pub ci: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Show passwords instead of masking them
    #[arg(long)]
    pub show_secrets: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
