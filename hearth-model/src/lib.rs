//! Entity base model for Hearth.
//!
//! Defines the types every persisted object is built on:
//! - [`BaseModel`] — identity, creation/update timestamps and the attribute bag
//! - [`Kind`] — implemented once per concrete entity kind; provides fresh and
//!   restore construction and `save`
//! - [`Model`] — the object-safe view the storage engine holds
//! - [`KindRegistry`] — kind name → factory table used to rebuild entities
//!   from saved records
//! - [`ObjectStore`] — the seam through which an entity reaches its storage
//!   context
//!
//! The dictionary form ([`Record`]) is the contract with the backing file:
//! `to_dict` produces it and restore construction consumes it.

mod entity;
mod error;
mod key;
mod kind;
mod registry;

pub use entity::{BaseModel, RawAttributes, Record, CLASS_KEY, CREATED_AT_KEY, ID_KEY, UPDATED_AT_KEY};
pub use error::{ModelError, ModelResult};
pub use key::{object_key, split_key, KEY_SEPARATOR};
pub use kind::{Kind, Model, ObjectStore};
pub use registry::{Factory, KindRegistry};

pub use hearth_types::{EntityId, Timestamp, Value};
