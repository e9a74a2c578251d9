//! Check command implementation
//!
//! Read-only health check of an existing setup: interpreter version, project
//! files and module availability.

use colored::Colorize;
use provision_env::{CommandRunner, FileCheck, SetupContext, VerificationResult, runtime, verify};

use crate::error::{CliError, Result};
use crate::output;

/// Outcome of a check run.
#[derive(Debug)]
pub struct CheckReport {
    /// Interpreter that was checked
    pub interpreter: String,
    /// Whether the interpreter lives in the project environment
    pub in_environment: bool,
    pub compatible: bool,
    pub files: FileCheck,
    pub modules: VerificationResult,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.compatible && self.files.passed() && self.modules.passed()
    }
}

/// Run the check and print one line per item.
///
/// Returns an error when anything failed so the process exits non-zero.
pub fn run_check(ctx: &SetupContext, runner: &dyn CommandRunner) -> Result<CheckReport> {
    let report = inspect(ctx, runner);
    print_report(&report);

    if report.passed() {
        println!();
        println!("{}", "All checks passed.".green().bold());
        Ok(report)
    } else {
        Err(CliError::user(
            "Some checks failed. Run `provision` to set up the environment.",
        ))
    }
}

fn inspect(ctx: &SetupContext, runner: &dyn CommandRunner) -> CheckReport {
    let env = ctx.environment();
    let in_environment = env.is_populated();
    let interpreter = if in_environment {
        env.interpreter().to_string()
    } else {
        tracing::debug!(path = %env.path(), "no environment, checking the system interpreter");
        ctx.python().to_string()
    };

    let modules = verify::verify_interpreter(
        runner,
        &interpreter,
        &ctx.config.verify.modules,
        &ctx.root,
    );
    let compatible = modules
        .runtime
        .as_ref()
        .is_some_and(runtime::is_compatible);
    let files = verify::check_project_files(&ctx.root, &ctx.config.required_files);

    CheckReport {
        interpreter,
        in_environment,
        compatible,
        files,
        modules,
    }
}

fn print_report(report: &CheckReport) {
    output::banner("Setup check");

    let location = if report.in_environment {
        "environment"
    } else {
        "system"
    };
    match &report.modules.runtime {
        Some(version) if report.compatible => {
            output::ok(&format!("Python {} ({})", version, location))
        }
        Some(version) => output::fail(&format!(
            "Python {} ({}) is not supported, {} or newer is required",
            version,
            location,
            runtime::minimum_supported()
        )),
        None => output::fail(&format!("Could not run {}", report.interpreter)),
    }

    for file in &report.files.present {
        output::ok(file);
    }
    for file in &report.files.missing {
        output::fail(&format!("{} not found", file));
    }

    for module in &report.modules.available {
        output::ok(module);
    }
    for module in &report.modules.missing {
        output::fail(&format!("{} cannot be imported", module));
    }
}
