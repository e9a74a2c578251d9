//! Error types for provision-tools

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] provision_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
