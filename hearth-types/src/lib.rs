//! Core type definitions for Hearth.
//!
//! This crate defines the leaf types every persisted object is built from:
//! - Entity identifiers (random UUID v4, kept in canonical string form)
//! - Microsecond-precision wall-clock timestamps with an ISO-8601 text form
//! - The closed attribute value type stored on entities
//!
//! Nothing here knows about entity kinds or the backing file; those live in
//! `hearth-model` and `hearth-storage`.

mod ids;
mod timestamp;
mod value;

pub use ids::EntityId;
pub use timestamp::Timestamp;
pub use value::Value;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("unsupported attribute value: {0}")]
    UnsupportedValue(String),
}
