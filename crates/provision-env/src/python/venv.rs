//! Virtual environment built with Python's built-in venv module

use crate::config::is_project_subdir;
use crate::error::{Error, Result, Stage, classify};
use crate::runner::{CommandRunner, display_command};
use provision_fs::{NormalizedPath, io};

/// Directory holding the interpreter and activation scripts.
pub const BIN_DIR: &str = if cfg!(windows) { "Scripts" } else { "bin" };

/// Interpreter file name inside [`BIN_DIR`].
pub const INTERPRETER: &str = if cfg!(windows) { "python.exe" } else { "python" };

/// Activation entry point inside [`BIN_DIR`].
pub const ACTIVATION_SCRIPT: &str = if cfg!(windows) {
    "Activate.ps1"
} else {
    "activate"
};

/// A virtual environment directory under the project root.
///
/// Lifecycle: absent, created by [`Environment::create`], populated by the
/// installer and finally verified. Only the provisioner mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    path: NormalizedPath,
    /// Directory name as configured, used for the relative interpreter path
    dir_name: String,
}

impl Environment {
    pub fn new(root: &NormalizedPath, dir_name: &str) -> Self {
        Self {
            path: root.join(dir_name),
            dir_name: dir_name.to_string(),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Interpreter inside the environment.
    pub fn interpreter(&self) -> NormalizedPath {
        self.path.join(BIN_DIR).join(INTERPRETER)
    }

    /// Interpreter path relative to the project root, e.g. `venv/bin/python`.
    pub fn relative_interpreter(&self) -> NormalizedPath {
        NormalizedPath::new(&self.dir_name)
            .join(BIN_DIR)
            .join(INTERPRETER)
    }

    /// Absolute interpreter path for editor settings, falling back to the
    /// relative path when it cannot be resolved.
    pub fn resolved_interpreter(&self) -> NormalizedPath {
        self.interpreter()
            .canonicalize()
            .unwrap_or_else(|| self.relative_interpreter())
    }

    pub fn activation(&self) -> NormalizedPath {
        self.path.join(BIN_DIR).join(ACTIVATION_SCRIPT)
    }

    /// The activation entry point, or `ActivationMissing`.
    ///
    /// Both installation and verification go through this check and treat a
    /// missing entry point as fatal.
    pub fn require_activation(&self) -> Result<NormalizedPath> {
        let activation = self.activation();
        if activation.is_file() {
            Ok(activation)
        } else {
            Err(Error::ActivationMissing {
                path: activation.to_string(),
            })
        }
    }

    /// True once the interpreter binary is in place.
    pub fn is_populated(&self) -> bool {
        self.interpreter().is_file()
    }

    /// Build the environment with `<python> -m venv <path>`.
    pub fn create(
        &self,
        runner: &dyn CommandRunner,
        python: &str,
        cwd: &NormalizedPath,
    ) -> Result<()> {
        let args = vec![
            "-m".to_string(),
            "venv".to_string(),
            self.path.to_string(),
        ];
        let command = display_command(python, &args);
        let output = runner.run(python, &args, cwd).map_err(|e| match e {
            Error::CommandNotFound { command } => Error::EnvironmentUnavailable {
                message: format!("`{}` was not found on PATH", command),
            },
            other => other,
        })?;
        classify(Stage::CreateEnvironment, &command, &output)?;

        tracing::info!(path = %self.path, "created virtual environment");
        Ok(())
    }

    /// Delete the environment directory recursively.
    ///
    /// Refuses unless the directory lies strictly below the project root.
    pub fn remove(&self) -> Result<()> {
        if !is_project_subdir(&self.dir_name) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "refusing to remove '{}': not a directory inside the project",
                    self.path
                ),
            });
        }
        io::remove_dir_all(&self.path)?;
        tracing::info!(path = %self.path, "removed virtual environment");
        Ok(())
    }
}
