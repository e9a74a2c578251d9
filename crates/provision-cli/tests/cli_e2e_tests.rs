//! End-to-end tests for the `provision` binary.
//!
//! Only paths that fail before any external tool is needed, or that never
//! modify the project, are exercised here; the full setup sequence is
//! covered with a scripted toolchain in the command unit tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn provision_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("provision"));
    cmd.env_remove("PROVISION_ROOT").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_setup_flags() {
    provision_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--skip-runtime-check"))
        .stdout(predicate::str::contains("--runtime-version"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version_output() {
    provision_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"));
}

#[test]
fn test_unknown_flag_fails() {
    provision_cmd().arg("--recreate").assert().failure();
}

// ============================================================================
// Root and Configuration
// ============================================================================

#[test]
fn test_nonexistent_root_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-project");

    provision_cmd()
        .arg("--root")
        .arg(&missing)
        .arg("--force")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_module_name_in_config_fails() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("provision.toml"),
        "[verify]\nmodules = [\"requests\", \"not a module\"]\n",
    )
    .unwrap();

    provision_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("--force")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a module"))
        .stderr(predicate::str::contains("Unexpected").not());

    assert!(!dir.path().join("venv").exists());
}

#[test]
fn test_unknown_config_key_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("provision.toml"), "venv = \"env\"\n").unwrap();

    provision_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .code(1);
}

#[test]
fn test_invalid_runtime_version_fails_before_any_step() {
    let dir = tempdir().unwrap();

    provision_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--force", "--runtime-version", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid runtime version 'abc'"));

    assert!(!dir.path().join("venv").exists());
    assert!(!dir.path().join(".vscode").exists());
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_in_empty_project_fails_and_lists_missing_files() {
    let dir = tempdir().unwrap();

    provision_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("main.py not found"))
        .stdout(predicate::str::contains("requirements.txt not found"))
        .stderr(predicate::str::contains("Run `provision`"));

    assert!(!dir.path().join("venv").exists());
}

#[test]
fn test_check_honours_configured_required_files() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("provision.toml"),
        "required_files = [\"app.py\"]\n",
    )
    .unwrap();

    provision_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("app.py not found"))
        .stdout(predicate::str::contains("main.py").not());
}
