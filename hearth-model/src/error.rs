//! Error types for the entity model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or converting entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A saved value could not be turned back into its typed form.
    #[error("cannot convert `{field}`: {reason}")]
    TypeConversion { field: String, reason: String },

    /// No factory is registered under this kind name.
    #[error("unknown entity kind: {0}")]
    UnknownType(String),

    /// The name belongs to the base bookkeeping fields.
    #[error("`{0}` is reserved and cannot be set as an attribute")]
    ReservedAttribute(String),
}

impl ModelError {
    pub(crate) fn conversion(field: &str, reason: impl Into<String>) -> Self {
        Self::TypeConversion {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}
