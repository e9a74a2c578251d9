//! Error types for provision-env

use crate::runner::CommandOutput;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] provision_fs::Error),

    #[error("Environment unavailable: {message}")]
    EnvironmentUnavailable { message: String },

    #[error("Activation entry point not found at {path}")]
    ActivationMissing { path: String },

    #[error("Installation failed: `{command}` exited with code {code}")]
    InstallationFailure {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Missing modules: {}", missing.join(", "))]
    VerificationDegraded { missing: Vec<String> },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid module name '{name}' in config")]
    InvalidModuleName { name: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid runtime version '{input}'")]
    InvalidVersion { input: String },
}

/// Failure classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Runtime missing or the environment could not be built or activated.
    EnvironmentUnavailable,
    /// The package installer exited non-zero.
    InstallationFailure,
    /// Some expected modules are not importable. Never fatal.
    VerificationDegraded,
    /// Anything else.
    Unexpected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EnvironmentUnavailable { .. }
            | Self::ActivationMissing { .. }
            | Self::CommandNotFound { .. } => ErrorKind::EnvironmentUnavailable,
            Self::InstallationFailure { .. } => ErrorKind::InstallationFailure,
            Self::VerificationDegraded { .. } => ErrorKind::VerificationDegraded,
            _ => ErrorKind::Unexpected,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() != ErrorKind::VerificationDegraded
    }
}

/// The provisioning step an external command belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    DetectRuntime,
    CreateEnvironment,
    Install,
    /// Importing a single module inside the environment.
    Verify { module: String },
}

/// Map the result of an external command to the error taxonomy.
///
/// A zero exit code is always `Ok`. Otherwise the stage decides the class:
/// runtime and environment-build failures make the environment unavailable,
/// installer failures are installation failures and a failed import degrades
/// verification.
pub fn classify(stage: Stage, command: &str, output: &CommandOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }

    tracing::debug!(
        ?stage,
        command,
        code = output.exit_code,
        stderr = %output.stderr.trim(),
        "external command failed"
    );

    Err(match stage {
        Stage::DetectRuntime | Stage::CreateEnvironment => Error::EnvironmentUnavailable {
            message: format!(
                "`{}` exited with code {}{}",
                command,
                output.exit_code,
                stderr_suffix(output)
            ),
        },
        Stage::Install => Error::InstallationFailure {
            command: command.to_string(),
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        },
        Stage::Verify { module } => Error::VerificationDegraded {
            missing: vec![module],
        },
    })
}

fn stderr_suffix(output: &CommandOutput) -> String {
    match output.stderr.trim().lines().last() {
        Some(line) if !line.is_empty() => format!(": {}", line),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            exit_code: code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_success_is_ok_for_every_stage() {
        let ok = CommandOutput::default();
        assert!(classify(Stage::DetectRuntime, "python --version", &ok).is_ok());
        assert!(classify(Stage::CreateEnvironment, "python -m venv", &ok).is_ok());
        assert!(classify(Stage::Install, "pip install", &ok).is_ok());
        let verify = Stage::Verify {
            module: "requests".into(),
        };
        assert!(classify(verify, "python -c", &ok).is_ok());
    }

    #[test]
    fn test_create_failure_is_environment_unavailable() {
        let err = classify(
            Stage::CreateEnvironment,
            "python -m venv venv",
            &failed(1, "Error: ensurepip missing\n"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
        assert!(err.to_string().contains("ensurepip missing"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_install_failure_keeps_code() {
        let err = classify(Stage::Install, "pip install -r requirements.txt", &failed(2, ""))
            .unwrap_err();
        assert!(matches!(err, Error::InstallationFailure { code: 2, .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_import_failure_is_degraded_not_fatal() {
        let err = classify(
            Stage::Verify {
                module: "PIL".into(),
            },
            "python -c import PIL",
            &failed(1, "ModuleNotFoundError"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VerificationDegraded);
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Missing modules: PIL");
    }

    #[test]
    fn test_activation_missing_is_environment_unavailable() {
        let err = Error::ActivationMissing {
            path: "venv/bin/activate".into(),
        };
        assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
    }
}
