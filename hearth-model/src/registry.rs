use crate::entity::{BaseModel, Record};
use crate::error::{ModelError, ModelResult};
use crate::kind::{Kind, Model};
use std::collections::HashMap;
use std::fmt;

/// Rebuilds a boxed entity of one kind from its saved record.
pub type Factory = fn(&Record) -> ModelResult<Box<dyn Model>>;

/// Table of known entity kinds, keyed by kind name.
///
/// Each concrete kind registers itself once at startup; the storage engine
/// resolves kind names through this table and never names concrete types.
#[derive(Clone, Default)]
pub struct KindRegistry {
    factories: HashMap<&'static str, Factory>,
}

impl KindRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that already knows [`BaseModel`].
    #[must_use]
    pub fn with_base() -> Self {
        let mut registry = Self::new();
        registry.register::<BaseModel>();
        registry
    }

    /// Registers `K` under `K::NAME`, replacing any previous entry.
    pub fn register<K: Kind>(&mut self) -> &mut Self {
        self.factories.insert(K::NAME, restore_boxed::<K>);
        self
    }

    pub fn resolve(&self, kind: &str) -> Option<Factory> {
        self.factories.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Restore-constructs an entity of the named kind.
    pub fn restore(&self, kind: &str, record: &Record) -> ModelResult<Box<dyn Model>> {
        let factory = self
            .resolve(kind)
            .ok_or_else(|| ModelError::UnknownType(kind.to_owned()))?;
        factory(record)
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &self.names())
            .finish()
    }
}

fn restore_boxed<K: Kind>(record: &Record) -> ModelResult<Box<dyn Model>> {
    Ok(Box::new(K::restore(record)?))
}
