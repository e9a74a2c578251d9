//! Error types for provision-cli

use provision_env::ErrorKind;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from provision-env
    #[error(transparent)]
    Env(#[from] provision_env::Error),

    /// Error from provision-tools
    #[error(transparent)]
    Tools(#[from] provision_tools::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// True for faults outside the provisioning error taxonomy.
    pub fn is_unexpected(&self) -> bool {
        match self {
            Self::Env(e) => e.kind() == ErrorKind::Unexpected && !is_config_error(e),
            Self::User { .. } => false,
            _ => true,
        }
    }
}

/// Bad input from the user's config file or flags.
fn is_config_error(e: &provision_env::Error) -> bool {
    use provision_env::Error;
    matches!(
        e,
        Error::InvalidModuleName { .. }
            | Error::InvalidConfig { .. }
            | Error::InvalidVersion { .. }
            | Error::Fs(
                provision_fs::Error::ConfigParse { .. }
                    | provision_fs::Error::UnsupportedFormat { .. }
            )
    )
}
