//! Environment creation, installation and verification against a scripted
//! toolchain

use pretty_assertions::assert_eq;
use provision_env::install::{InstallOutcome, install_dependencies};
use provision_env::verify::{verify_environment, verify_interpreter};
use provision_env::{Error, ErrorKind, SetupConfig};
use provision_test_utils::{ScriptedRunner, TestProject};

fn modules() -> Vec<String> {
    SetupConfig::default().verify.modules
}

#[test]
fn test_create_lays_out_environment() {
    let project = TestProject::new();
    let ctx = project.context();
    let runner = ScriptedRunner::new();
    let env = ctx.environment();

    env.create(&runner, ctx.python(), &ctx.root).unwrap();

    assert!(env.is_populated());
    assert!(env.require_activation().is_ok());
    assert_eq!(runner.count_calls("-m venv"), 1);
}

#[test]
fn test_create_failure_is_environment_unavailable() {
    let project = TestProject::new();
    let ctx = project.context();
    let runner = ScriptedRunner::new().failing_create();

    let err = ctx
        .environment()
        .create(&runner, ctx.python(), &ctx.root)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
    assert!(err.to_string().contains("ensurepip"));
}

#[test]
fn test_create_without_interpreter_is_environment_unavailable() {
    let project = TestProject::new();
    let ctx = project.context();
    let runner = ScriptedRunner::new().without_system_python();

    let err = ctx
        .environment()
        .create(&runner, ctx.python(), &ctx.root)
        .unwrap_err();
    assert!(matches!(err, Error::EnvironmentUnavailable { .. }));
}

#[test]
fn test_install_with_manifest() {
    let project = TestProject::new()
        .with_requirements("requests\npillow\n# comment\n")
        .with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let outcome =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            requirements: Some(2)
        }
    );
    assert_eq!(runner.count_calls("pip install --upgrade pip"), 1);
    assert_eq!(runner.count_calls("pip install -r"), 1);
}

#[test]
fn test_install_utf16_manifest_runs_pip() {
    let project = TestProject::new().with_environment(true);
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend("requests\r\npillow\r\n".encode_utf16().flat_map(u16::to_le_bytes));
    std::fs::write(project.root().join("requirements.txt"), bytes).unwrap();
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let outcome =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap();

    assert_eq!(
        outcome,
        InstallOutcome::Installed {
            requirements: Some(2)
        }
    );
    assert_eq!(runner.count_calls("pip install -r"), 1);
}

#[test]
fn test_install_manifest_with_invalid_utf8_runs_pip() {
    let project = TestProject::new().with_environment(true);
    std::fs::write(
        project.root().join("requirements.txt"),
        b"requests\n\xe9t\xe9\n".as_slice(),
    )
    .unwrap();
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let outcome =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap();

    assert!(matches!(outcome, InstallOutcome::Installed { .. }));
    assert_eq!(runner.count_calls("pip install -r"), 1);
}

#[test]
fn test_install_without_manifest_only_upgrades_pip() {
    let project = TestProject::new().with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let outcome =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap();

    assert!(matches!(outcome, InstallOutcome::ManifestMissing { .. }));
    assert_eq!(runner.count_calls("pip install --upgrade pip"), 1);
    assert_eq!(runner.count_calls("pip install -r"), 0);
}

#[test]
fn test_install_failure_is_fatal() {
    let project = TestProject::new()
        .with_requirements("nonexistent-package\n")
        .with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new().failing_install();

    let err =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InstallationFailure);
    assert!(err.is_fatal());
}

#[test]
fn test_install_requires_activation() {
    let project = TestProject::new()
        .with_requirements("requests\n")
        .with_environment(false);
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let err =
        install_dependencies(&runner, &ctx.environment(), &ctx.requirements_path(), &ctx.root)
            .unwrap_err();

    assert!(matches!(err, Error::ActivationMissing { .. }));
    assert!(runner.calls().is_empty(), "pip must not run: {:?}", runner.calls());
}

#[test]
fn test_verify_all_modules_available() {
    let project = TestProject::new().with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let result = verify_environment(&runner, &ctx.environment(), &modules(), &ctx.root).unwrap();

    assert!(result.passed());
    assert_eq!(result.available, modules());
    assert_eq!(result.runtime.unwrap().to_string(), "3.11.4");
}

#[test]
fn test_verify_single_failing_import_is_degraded() {
    let project = TestProject::new().with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new().failing_import("pdfplumber");

    let result = verify_environment(&runner, &ctx.environment(), &modules(), &ctx.root).unwrap();

    assert_eq!(result.missing, vec!["pdfplumber".to_string()]);
    assert_eq!(result.available.len(), modules().len() - 1);
    let degraded = result.degraded().unwrap();
    assert_eq!(degraded.kind(), ErrorKind::VerificationDegraded);
    assert!(!degraded.is_fatal());
}

#[test]
fn test_verify_checks_every_module_independently() {
    let project = TestProject::new().with_environment(true);
    let ctx = project.context();
    let runner = ScriptedRunner::new()
        .failing_import("tkinter")
        .failing_import("reportlab");

    let result = verify_environment(&runner, &ctx.environment(), &modules(), &ctx.root).unwrap();

    assert_eq!(runner.count_calls(" -c import "), modules().len());
    assert_eq!(
        result.missing,
        vec!["tkinter".to_string(), "reportlab".to_string()]
    );
}

#[test]
fn test_verify_missing_activation_is_fatal() {
    let project = TestProject::new().with_environment(false);
    let ctx = project.context();
    let runner = ScriptedRunner::new();

    let err = verify_environment(&runner, &ctx.environment(), &modules(), &ctx.root).unwrap_err();
    assert!(matches!(err, Error::ActivationMissing { .. }));
}

#[test]
fn test_verify_interpreter_without_python_marks_all_missing() {
    let project = TestProject::new();
    let runner = ScriptedRunner::new().without_system_python();

    let result = verify_interpreter(&runner, "python", &modules(), &project.normalized_root());

    assert!(result.runtime.is_none());
    assert_eq!(result.missing, modules());
}
