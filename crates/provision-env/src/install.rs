//! Dependency installation with pip inside the environment

use crate::error::{Result, Stage, classify};
use crate::manifest::DependencyManifest;
use crate::python::Environment;
use crate::runner::{CommandRunner, display_command};
use provision_fs::NormalizedPath;

/// Outcome of the installation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// pip was upgraded and the manifest installed. `requirements` is
    /// `None` when the manifest could not be read for counting.
    Installed { requirements: Option<usize> },
    /// pip was upgraded; no manifest file was found.
    ManifestMissing { path: NormalizedPath },
}

/// Upgrade pip, then install the manifest if present.
///
/// Fails with `ActivationMissing` before running anything when the
/// environment has no activation entry point, and with
/// `InstallationFailure` when pip exits non-zero.
pub fn install_dependencies(
    runner: &dyn CommandRunner,
    env: &Environment,
    manifest_path: &NormalizedPath,
    cwd: &NormalizedPath,
) -> Result<InstallOutcome> {
    env.require_activation()?;

    let python = env.interpreter().to_string();
    run_pip(runner, &python, &["install", "--upgrade", "pip"], cwd)?;

    if !manifest_path.is_file() {
        tracing::warn!(path = %manifest_path, "no dependency manifest, skipping install");
        return Ok(InstallOutcome::ManifestMissing {
            path: manifest_path.clone(),
        });
    }

    // The count is only reported; pip reads the file itself
    let requirements = match DependencyManifest::load(manifest_path) {
        Ok(manifest) => manifest.map(|m| m.len()),
        Err(e) => {
            tracing::warn!(path = %manifest_path, error = %e, "could not read dependency manifest");
            None
        }
    };

    let manifest_arg = manifest_path.to_string();
    run_pip(runner, &python, &["install", "-r", &manifest_arg], cwd)?;

    tracing::info!(count = ?requirements, "installed dependencies");
    Ok(InstallOutcome::Installed { requirements })
}

fn run_pip(
    runner: &dyn CommandRunner,
    python: &str,
    pip_args: &[&str],
    cwd: &NormalizedPath,
) -> Result<()> {
    let args: Vec<String> = ["-m", "pip"]
        .iter()
        .chain(pip_args)
        .map(|a| a.to_string())
        .collect();
    let command = display_command(python, &args);
    let output = runner.run(python, &args, cwd)?;
    classify(Stage::Install, &command, &output)
}
