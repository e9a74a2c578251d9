//! Post-install verification

use crate::error::{Error, Result, Stage, classify};
use crate::python::Environment;
use crate::runner::{CommandRunner, display_command};
use crate::runtime;
use provision_fs::NormalizedPath;
use semver::Version;

/// Which modules imported inside the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Interpreter version reported by the environment, if it answered
    pub runtime: Option<Version>,
    pub available: Vec<String>,
    pub missing: Vec<String>,
}

impl VerificationResult {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    /// The degraded-verification error, if any module is missing.
    pub fn degraded(&self) -> Option<Error> {
        (!self.passed()).then(|| Error::VerificationDegraded {
            missing: self.missing.clone(),
        })
    }
}

/// Verify a provisioned environment.
///
/// A missing activation entry point is fatal, exactly as during
/// installation. Everything else (the version query, each import) is
/// recorded in the result instead of failing.
pub fn verify_environment(
    runner: &dyn CommandRunner,
    env: &Environment,
    modules: &[String],
    cwd: &NormalizedPath,
) -> Result<VerificationResult> {
    env.require_activation()?;
    Ok(verify_interpreter(
        runner,
        env.interpreter().as_str(),
        modules,
        cwd,
    ))
}

/// Query the version of `python` and try to import every module with it.
///
/// Each module is checked in its own process so one failure cannot mask
/// another.
pub fn verify_interpreter(
    runner: &dyn CommandRunner,
    python: &str,
    modules: &[String],
    cwd: &NormalizedPath,
) -> VerificationResult {
    let runtime = match runtime::query_version(runner, python, cwd) {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(error = %e, "could not query environment interpreter version");
            None
        }
    };

    let mut result = VerificationResult {
        runtime,
        ..VerificationResult::default()
    };

    for module in modules {
        match import_module(runner, python, module, cwd) {
            Ok(()) => result.available.push(module.clone()),
            Err(e) => {
                tracing::debug!(module = %module, error = %e, "module not importable");
                result.missing.push(module.clone());
            }
        }
    }

    if !result.passed() {
        tracing::warn!(missing = ?result.missing, "verification degraded");
    }
    result
}

fn import_module(
    runner: &dyn CommandRunner,
    python: &str,
    module: &str,
    cwd: &NormalizedPath,
) -> Result<()> {
    let args = vec!["-c".to_string(), format!("import {}", module)];
    let command = display_command(python, &args);
    let output = runner.run(python, &args, cwd)?;
    classify(
        Stage::Verify {
            module: module.to_string(),
        },
        &command,
        &output,
    )
}

/// Presence of the project files the application needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCheck {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

impl FileCheck {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_project_files(root: &NormalizedPath, files: &[String]) -> FileCheck {
    let (present, missing): (Vec<String>, Vec<String>) = files
        .iter()
        .cloned()
        .partition(|file| root.join(file).exists());
    FileCheck { present, missing }
}
