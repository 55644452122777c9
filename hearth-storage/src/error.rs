//! Error types for the storage layer.

use hearth_model::ModelError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A saved entry names a kind nobody registered.
    #[error("unknown entity kind: {0}")]
    UnknownType(String),

    /// The backing file is well-formed JSON but not a valid store.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An entry could not be rebuilt into an entity.
    #[error("model error: {0}")]
    Model(ModelError),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<ModelError> for StorageError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownType(kind) => Self::UnknownType(kind),
            other => Self::Model(other),
        }
    }
}
