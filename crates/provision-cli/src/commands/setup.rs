//! Setup command implementation
//!
//! Runs the six provisioning steps in order: runtime gate, environment,
//! dependencies, editor configuration, verification and the completion
//! report. Every fatal failure stops the sequence; degraded verification
//! does not.

use colored::Colorize;
use provision_env::{
    CommandRunner, EnvPlan, InstallOutcome, RuntimeDescriptor, SetupContext, VerificationResult,
    install, needs_confirmation, plan_environment, runtime, should_continue, verify,
};
use provision_tools::{EditorContext, EditorIntegration, VSCodeIntegration, WriteReport};
use semver::Version;

use crate::error::{CliError, Result};
use crate::output;
use crate::prompt::Prompter;

/// Flags controlling a setup run.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub skip_runtime_check: bool,
    pub force: bool,
    /// Minimum version to warn about, e.g. `3.8`
    pub runtime_version: String,
    pub no_editor: bool,
}

/// What a completed setup did.
#[derive(Debug)]
pub struct SetupReport {
    /// `None` when the runtime check was skipped or failed
    pub runtime: Option<RuntimeDescriptor>,
    pub plan: EnvPlan,
    pub install: InstallOutcome,
    pub editor: WriteReport,
    pub verification: VerificationResult,
}

impl SetupReport {
    pub fn degraded(&self) -> bool {
        !self.verification.passed()
    }
}

/// Run the full setup against `ctx.root`.
pub fn run_setup(
    ctx: &SetupContext,
    opts: &SetupOptions,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
) -> Result<SetupReport> {
    let minimum = runtime::parse_requested(&opts.runtime_version)?;

    output::banner("Python environment setup");
    tracing::info!(root = %ctx.root, force = opts.force, "starting setup");

    // 1. Runtime gate
    let runtime = if opts.skip_runtime_check {
        output::warn("Skipping Python runtime check");
        None
    } else {
        check_runtime(ctx, opts, &minimum, runner, prompter)?
    };

    // 2. Environment
    let env = ctx.environment();
    let exists = env.exists();
    let response = if needs_confirmation(exists, opts.force) {
        Some(prompter.confirm(
            &format!(
                "Virtual environment '{}' already exists. Recreate it?",
                ctx.config.venv_dir
            ),
            false,
        )?)
    } else {
        None
    };
    let plan = plan_environment(exists, opts.force, response);
    tracing::info!(?plan, path = %env.path(), "environment plan");

    match plan {
        EnvPlan::Create | EnvPlan::Recreate => {
            if plan == EnvPlan::Recreate {
                output::step("Removing existing virtual environment...");
                env.remove()?;
            }
            output::step(&format!(
                "Creating virtual environment in '{}'...",
                ctx.config.venv_dir
            ));
            env.create(runner, ctx.python(), &ctx.root)?;
            output::ok("Virtual environment created");
        }
        EnvPlan::Reuse => output::ok("Using existing virtual environment"),
    }

    // 3. Dependencies
    output::step("Installing dependencies...");
    let install =
        install::install_dependencies(runner, &env, &ctx.requirements_path(), &ctx.root)?;
    match &install {
        InstallOutcome::Installed {
            requirements: Some(count),
        } => output::ok(&format!("Installed {} requirement(s)", count)),
        InstallOutcome::Installed { requirements: None } => {
            output::ok("Installed requirements")
        }
        InstallOutcome::ManifestMissing { path } => {
            output::warn(&format!("{} not found, skipping dependency installation", path))
        }
    }

    // 4. Editor configuration
    output::step("Writing VS Code configuration...");
    let editor_ctx = EditorContext::new(
        ctx.root.clone(),
        ctx.config.editor_dir.clone(),
        env.resolved_interpreter(),
        ctx.config.entry_script.clone(),
    );
    let integration = VSCodeIntegration::new();
    let editor = integration.write(&editor_ctx)?;
    output::ok(&format!(
        "Wrote {} ({} changed)",
        integration.documents().join(", "),
        editor.changed_count()
    ));

    // 5. Verification
    output::step("Verifying installation...");
    let verification =
        verify::verify_environment(runner, &env, &ctx.config.verify.modules, &ctx.root)?;
    report_verification(&verification);

    let report = SetupReport {
        runtime,
        plan,
        install,
        editor,
        verification,
    };

    // 6. Completion
    report_completion(ctx, &report);
    if !opts.force && !opts.no_editor {
        offer_editor(ctx, runner, prompter);
    }

    Ok(report)
}

/// Detect the system runtime and decide whether to carry on.
fn check_runtime(
    ctx: &SetupContext,
    opts: &SetupOptions,
    minimum: &Version,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
) -> Result<Option<RuntimeDescriptor>> {
    output::step("Checking Python runtime...");

    let (detected, compatible) = match runtime::detect(runner, ctx.python(), &ctx.root) {
        Ok(descriptor) => {
            let compatible = descriptor.is_compatible();
            if compatible {
                output::ok(&format!("Python {}", descriptor.version));
                if descriptor.version < *minimum {
                    output::warn(&format!(
                        "Python {} is older than the requested {}",
                        descriptor.version,
                        opts.runtime_version
                    ));
                }
            } else {
                output::fail(&format!(
                    "Python {} is not supported ({} or newer is required)",
                    descriptor.version,
                    runtime::minimum_supported()
                ));
            }
            (Some(descriptor), compatible)
        }
        Err(e) => {
            output::fail(&e.to_string());
            (None, false)
        }
    };

    if compatible {
        return Ok(detected);
    }

    print_install_guidance();
    let response = if opts.force {
        None
    } else {
        Some(prompter.confirm("Continue anyway?", false)?)
    };
    if should_continue(compatible, opts.force, response) {
        output::warn("Continuing without a compatible Python runtime");
        Ok(detected)
    } else {
        Err(CliError::user(
            "Setup cancelled: a compatible Python runtime is required",
        ))
    }
}

fn print_install_guidance() {
    output::detail(&format!(
        "Install Python {} or newer:",
        runtime::minimum_supported()
    ));
    output::detail("  Windows: https://www.python.org/downloads/ (tick \"Add Python to PATH\")");
    output::detail("  macOS:   brew install python3");
    output::detail("  Linux:   sudo apt install python3 python3-venv");
}

fn report_verification(result: &VerificationResult) {
    if let Some(version) = &result.runtime {
        output::ok(&format!("Environment Python {}", version));
    }
    for module in &result.available {
        output::ok(module);
    }
    if let Some(degraded) = result.degraded() {
        output::warn(&degraded.to_string());
        output::detail("Install them into the environment with pip and rerun the check.");
    }
}

fn report_completion(ctx: &SetupContext, report: &SetupReport) {
    println!();
    if report.degraded() {
        output::banner("Setup finished with warnings");
    } else {
        output::banner("Setup complete");
    }

    let env = ctx.environment();
    println!("{}", "Next steps:".bold());
    println!("  1. Open the project folder in VS Code");
    println!(
        "  2. Select the interpreter at {}",
        env.relative_interpreter().as_str().cyan()
    );
    println!(
        "  3. Run {} (F5 or the default build task)",
        ctx.config.entry_script.cyan()
    );
    println!(
        "  Activate manually with {}",
        activation_hint(&ctx.config.venv_dir).cyan()
    );
}

fn activation_hint(venv_dir: &str) -> String {
    if cfg!(windows) {
        format!("{}\\Scripts\\Activate.ps1", venv_dir)
    } else {
        format!("source {}/bin/activate", venv_dir)
    }
}

/// Offer to open the editor on the project root.
///
/// Nothing here can fail the run.
fn offer_editor(ctx: &SetupContext, runner: &dyn CommandRunner, prompter: &dyn Prompter) {
    let editor = ctx.config.editor.as_str();
    let Some(location) = runner.locate(editor) else {
        tracing::debug!(editor, "editor not found on PATH");
        return;
    };
    tracing::debug!(editor, location = %location, "editor found");

    match prompter.confirm("Open the project in VS Code now?", true) {
        Ok(true) => {
            let args = vec![ctx.root.to_string()];
            match runner.run(editor, &args, &ctx.root) {
                Ok(out) if out.success() => output::ok("Opened VS Code"),
                Ok(out) => tracing::debug!(code = out.exit_code, "editor exited non-zero"),
                Err(e) => tracing::debug!(error = %e, "failed to launch editor"),
            }
        }
        Ok(false) => {}
        Err(e) => tracing::debug!(error = %e, "editor prompt failed"),
    }
}
