//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Provision a project's Python environment and editor configuration
///
/// Without a subcommand, runs the full setup: detect Python, create the
/// virtual environment, install requirements, write VS Code configuration
/// and verify the required modules.
#[derive(Parser, Debug)]
#[command(name = "provision")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "PROVISION_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Skip detecting the system Python runtime
    #[arg(long)]
    pub skip_runtime_check: bool,

    /// Never prompt: recreate an existing environment and continue past a
    /// failed runtime check
    #[arg(short, long)]
    pub force: bool,

    /// Minimum Python version to warn about
    #[arg(long, default_value = "3.8")]
    pub runtime_version: String,

    /// Do not offer to open the editor when setup finishes
    #[arg(long)]
    pub no_editor: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check an existing setup without changing anything
    ///
    /// Reports the interpreter version, required project files and module
    /// availability. Exits non-zero if anything is missing.
    Check,
}
