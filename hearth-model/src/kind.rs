use crate::entity::{BaseModel, Record};
use crate::error::ModelResult;
use crate::key::object_key;
use hearth_types::Value;
use std::any::Any;
use std::fmt;

/// The storage context an entity registers itself with.
///
/// Implemented by the storage engine; entities only see this seam.
pub trait ObjectStore {
    type Error;

    /// Inserts or replaces the object under its composite key.
    fn register(&mut self, object: Box<dyn Model>);

    /// Flushes every registered object to durable storage.
    fn save(&mut self) -> Result<(), Self::Error>;
}

/// A concrete entity kind.
///
/// Implementors wrap a [`BaseModel`] and pick a unique `NAME`, which becomes
/// the discriminator in saved records and the prefix of composite keys.
///
/// ```
/// use hearth_model::{BaseModel, Kind};
///
/// #[derive(Debug, Clone)]
/// struct User(BaseModel);
///
/// impl Kind for User {
///     const NAME: &'static str = "User";
///     fn from_base(base: BaseModel) -> Self { Self(base) }
///     fn base(&self) -> &BaseModel { &self.0 }
///     fn base_mut(&mut self) -> &mut BaseModel { &mut self.0 }
/// }
/// ```
pub trait Kind: Clone + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;

    fn from_base(base: BaseModel) -> Self;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    /// Fresh construction, registered with `store` but not yet persisted.
    fn create<S: ObjectStore + ?Sized>(store: &mut S) -> Self {
        let entity = Self::from_base(BaseModel::fresh());
        store.register(Box::new(entity.clone()));
        entity
    }

    /// Restore construction from a saved record. Not registered anywhere.
    fn restore(record: &Record) -> ModelResult<Self> {
        BaseModel::from_record(record).map(Self::from_base)
    }

    /// Empty `kwargs` means fresh construction, anything else restores.
    fn construct<S: ObjectStore + ?Sized>(kwargs: &Record, store: &mut S) -> ModelResult<Self> {
        if kwargs.is_empty() {
            Ok(Self::create(store))
        } else {
            Self::restore(kwargs)
        }
    }

    /// Sets a named attribute and registers the new state with `store`.
    ///
    /// Reserved names and values without a JSON form (non-finite floats)
    /// are rejected and leave both the entity and the store untouched.
    fn set_attr<S: ObjectStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> ModelResult<Option<Value>> {
        let previous = self.base_mut().set(name, value)?;
        store.register(Box::new(self.clone()));
        Ok(previous)
    }

    /// Removes a named attribute and registers the new state with `store`.
    fn unset_attr<S: ObjectStore + ?Sized>(&mut self, store: &mut S, name: &str) -> Option<Value> {
        let previous = self.base_mut().remove_attr(name);
        if previous.is_some() {
            store.register(Box::new(self.clone()));
        }
        previous
    }

    /// Advances `updated_at`, registers the current state and flushes the
    /// whole store.
    fn save<S: ObjectStore + ?Sized>(&mut self, store: &mut S) -> Result<(), S::Error> {
        self.base_mut().touch();
        store.register(Box::new(self.clone()));
        store.save()
    }
}

/// Object-safe view of an entity, as held by a storage registry.
pub trait Model: fmt::Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    fn as_base(&self) -> &BaseModel;

    fn clone_model(&self) -> Box<dyn Model>;

    fn as_any(&self) -> &dyn Any;

    /// Composite registry key, `"<Kind>.<id>"`.
    fn key(&self) -> String {
        object_key(self.kind(), self.as_base().id().as_str())
    }

    fn to_dict(&self) -> Record {
        self.as_base().to_record(self.kind())
    }

    fn to_display_string(&self) -> String {
        self.as_base().display_as(self.kind())
    }
}

impl<K: Kind> Model for K {
    fn kind(&self) -> &'static str {
        K::NAME
    }

    fn as_base(&self) -> &BaseModel {
        self.base()
    }

    fn clone_model(&self) -> Box<dyn Model> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

impl fmt::Display for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl Kind for BaseModel {
    const NAME: &'static str = "BaseModel";

    fn from_base(base: BaseModel) -> Self {
        base
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }
}
