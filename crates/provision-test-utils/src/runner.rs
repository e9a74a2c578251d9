//! [`ScriptedRunner`]: a fake Python toolchain for provisioning tests.
//!
//! Answers the handful of commands the provisioner issues and records every
//! call. `python -m venv <dir>` lays out a fake environment on disk so later
//! steps find an interpreter and activation script where they expect them.

use provision_env::python::{ACTIVATION_SCRIPT, BIN_DIR, INTERPRETER};
use provision_env::{CommandOutput, CommandRunner, Error, Result};
use provision_fs::NormalizedPath;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub struct ScriptedRunner {
    system_version: Option<String>,
    env_version: String,
    failing_imports: HashSet<String>,
    activation: bool,
    fail_create: bool,
    fail_install: bool,
    editor: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    /// A healthy toolchain: Python 3.11.4 on PATH, every import succeeds.
    pub fn new() -> Self {
        Self {
            system_version: Some("3.11.4".to_string()),
            env_version: "3.11.4".to_string(),
            failing_imports: HashSet::new(),
            activation: true,
            fail_create: false,
            fail_install: false,
            editor: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Report `version` from the system interpreter.
    pub fn with_system_version(mut self, version: &str) -> Self {
        self.system_version = Some(version.to_string());
        self
    }

    /// No interpreter on PATH.
    pub fn without_system_python(mut self) -> Self {
        self.system_version = None;
        self
    }

    /// Make `import <module>` fail inside the environment.
    pub fn failing_import(mut self, module: &str) -> Self {
        self.failing_imports.insert(module.to_string());
        self
    }

    /// Create environments without an activation entry point.
    pub fn without_activation(mut self) -> Self {
        self.activation = false;
        self
    }

    /// Make `python -m venv` exit non-zero.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make `pip install -r` exit non-zero.
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Put an editor binary named `name` on the fake PATH.
    pub fn with_editor(mut self, name: &str) -> Self {
        self.editor = Some(name.to_string());
        self
    }

    /// Every command run so far, rendered as `program arg1 arg2`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls containing `needle`.
    pub fn count_calls(&self, needle: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.contains(needle)).count()
    }

    fn is_system(program: &str) -> bool {
        !program.contains('/') && !program.contains('\\')
    }

    fn lay_out_environment(&self, dir: &str) {
        let bin = Path::new(dir).join(BIN_DIR);
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join(INTERPRETER), "fake interpreter").unwrap();
        if self.activation {
            fs::write(bin.join(ACTIVATION_SCRIPT), "fake activation").unwrap();
        }
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn fail(stderr: &str) -> CommandOutput {
    CommandOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String], _cwd: &NormalizedPath) -> Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.borrow_mut().push(line);

        let system = Self::is_system(program);
        if system && self.editor.as_deref() == Some(program) {
            return Ok(ok(""));
        }
        if system && self.system_version.is_none() {
            return Err(Error::CommandNotFound {
                command: program.to_string(),
            });
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = match args.as_slice() {
            ["--version"] => {
                let version = if system {
                    self.system_version.as_deref().unwrap_or_default()
                } else {
                    self.env_version.as_str()
                };
                ok(&format!("Python {}\n", version))
            }
            ["-m", "venv", dir] => {
                if self.fail_create {
                    fail("Error: Command '-m ensurepip' returned non-zero exit status 1.\n")
                } else {
                    self.lay_out_environment(dir);
                    ok("")
                }
            }
            ["-m", "pip", "install", "-r", _] if self.fail_install => {
                fail("ERROR: No matching distribution found for nonexistent-package\n")
            }
            ["-m", "pip", ..] => ok(""),
            ["-c", statement] => {
                let module = statement.trim_start_matches("import ");
                if self.failing_imports.contains(module) {
                    fail(&format!("ModuleNotFoundError: No module named '{}'\n", module))
                } else {
                    ok("")
                }
            }
            _ => ok(""),
        };
        Ok(output)
    }

    fn locate(&self, program: &str) -> Option<NormalizedPath> {
        let found = self.editor.as_deref() == Some(program)
            || (program.starts_with("python") && self.system_version.is_some());
        found.then(|| NormalizedPath::new(format!("/usr/bin/{}", program)))
    }
}
