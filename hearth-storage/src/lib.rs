//! JSON file storage layer for Hearth.
//!
//! Holds every live entity in one registry keyed by `"<Kind>.<id>"` and
//! mirrors it to a single backing file.
//!
//! # Architecture
//!
//! - The registry is an explicit [`FileStorage`] value passed to entities,
//!   never a process global
//! - `save` rewrites the whole file atomically (temp file + rename)
//! - `reload` rebuilds entities through a [`KindRegistry`], so new kinds are
//!   added by registering them, not by editing the engine
//! - A missing backing file is the empty state, not an error
//!
//! [`KindRegistry`]: hearth_model::KindRegistry

mod config;
mod error;
mod file_storage;

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use file_storage::FileStorage;
