use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Lane not found: {0}")]
    LaneNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Credentials file not found: {}", .0.display())]
    CredentialsNotFound(PathBuf),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Database client is closed")]
    ClientClosed,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(feature = "sqlite-storage")]
impl From<rusqlite::Error> for FuzzyError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}
