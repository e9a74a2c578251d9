//! External command execution

use crate::error::{Error, Result};
use provision_fs::NormalizedPath;
use std::path::PathBuf;
use std::process::Command;

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code, `-1` when terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, for tools that report on either stream.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Runs external programs to completion.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd` and wait for it to exit.
    ///
    /// A non-zero exit is not an error here; callers classify the output.
    /// Errors are reserved for programs that could not be started.
    fn run(&self, program: &str, args: &[String], cwd: &NormalizedPath) -> Result<CommandOutput>;

    /// Locate `program` on the search path.
    fn locate(&self, program: &str) -> Option<NormalizedPath> {
        which(program).map(NormalizedPath::new)
    }
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &NormalizedPath) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, cwd = %cwd, "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd.to_native())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    Error::Spawn {
                        command: program.to_string(),
                        source: e,
                    }
                }
            })?;

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        tracing::debug!(program, code = result.exit_code, "command finished");
        Ok(result)
    }
}

/// Find the full path of a binary on PATH (cross-platform)
pub fn which(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let exts: &[&str] = if cfg!(windows) {
        &[".exe", ".cmd", ".bat", ""]
    } else {
        &[""]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in exts {
            let candidate = dir.join(format!("{}{}", binary, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Render a command line for messages and logs.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_which_returns_none_for_nonexistent() {
        assert!(which("nonexistent_binary_that_does_not_exist_12345").is_none());
    }

    #[test]
    fn test_missing_program_is_command_not_found() {
        let cwd = NormalizedPath::new(std::env::temp_dir());
        let err = SystemRunner
            .run("nonexistent_binary_that_does_not_exist_12345", &[], &cwd)
            .unwrap_err();
        assert!(matches!(err, Error::CommandNotFound { .. }));
    }

    #[test]
    fn test_display_command() {
        let args = vec!["-m".to_string(), "venv".to_string(), "venv".to_string()];
        assert_eq!(display_command("python", &args), "python -m venv venv");
    }

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: "Python 2.7.18\n".into(),
        };
        assert!(output.success());
        assert_eq!(output.combined(), "Python 2.7.18\n");
    }
}
