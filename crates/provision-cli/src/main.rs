//! Python environment provisioner CLI
//!
//! Prepares a project's virtual environment, installs its requirements,
//! writes VS Code configuration and verifies the result.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod prompt;

use clap::Parser;
use colored::Colorize;
use provision_env::{SetupConfig, SetupContext, SystemRunner};
use provision_fs::NormalizedPath;

use cli::{Cli, Commands};
use commands::SetupOptions;
use error::{CliError, Result};
use prompt::TerminalPrompter;

fn main() {
    if let Err(e) = run() {
        if e.is_unexpected() {
            eprintln!("{}: Unexpected error: {}", "error".red().bold(), e);
        } else {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow(), e);
    }

    let ctx = load_context(&cli)?;
    let runner = SystemRunner;

    match cli.command {
        Some(Commands::Check) => {
            commands::run_check(&ctx, &runner)?;
        }
        None => {
            let opts = SetupOptions {
                skip_runtime_check: cli.skip_runtime_check,
                force: cli.force,
                runtime_version: cli.runtime_version.clone(),
                no_editor: cli.no_editor,
            };
            let report = commands::run_setup(&ctx, &opts, &runner, &TerminalPrompter)?;
            tracing::info!(
                plan = ?report.plan,
                runtime = ?report.runtime.as_ref().map(|r| r.version.to_string()),
                install = ?report.install,
                changed = report.editor.changed_count(),
                degraded = report.degraded(),
                "setup finished"
            );
        }
    }
    Ok(())
}

/// Resolve the working root and load its configuration.
fn load_context(cli: &Cli) -> Result<SetupContext> {
    let root = NormalizedPath::new(&cli.root)
        .canonicalize()
        .filter(|p| p.is_dir())
        .ok_or_else(|| {
            CliError::user(format!(
                "Project root '{}' does not exist or is not a directory",
                cli.root.display()
            ))
        })?;
    tracing::debug!(root = %root, "resolved project root");

    let config = SetupConfig::load(&root)?;
    Ok(SetupContext::new(root, config))
}
