use crate::error::{ModelError, ModelResult};
use hearth_types::{EntityId, Timestamp, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The dictionary form of an entity, as written to and read from disk.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Discriminator entry naming the concrete kind in a [`Record`].
pub const CLASS_KEY: &str = "__class__";
pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

const RESERVED: [&str; 4] = [ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY, CLASS_KEY];

/// Identity, timestamps and attributes shared by every entity kind.
///
/// `id` and `created_at` never change after construction; `updated_at` only
/// moves forward, on save. `created_at <= updated_at` holds for every value
/// this type hands out.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    id: EntityId,
    created_at: Timestamp,
    updated_at: Timestamp,
    attributes: BTreeMap<String, Value>,
}

impl BaseModel {
    /// Fresh construction: a new id with `created_at == updated_at == now`.
    #[must_use]
    pub fn fresh() -> Self {
        let now = Timestamp::now();
        Self {
            id: EntityId::new(),
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Restore construction from a saved record.
    ///
    /// `id` must be present as a non-empty string. A timestamp key that is
    /// present must hold parseable ISO-8601 text; one that is absent takes
    /// the other timestamp's value, or the current time if both are absent.
    /// The discriminator is ignored and every other key becomes an attribute.
    pub fn from_record(record: &Record) -> ModelResult<Self> {
        let id = match record.get(ID_KEY) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => EntityId::from(s.as_str()),
            Some(other) => {
                return Err(ModelError::conversion(
                    ID_KEY,
                    format!("expected a non-empty string, got {other}"),
                ));
            }
            None => return Err(ModelError::conversion(ID_KEY, "missing")),
        };

        let (created_at, updated_at) = match (
            timestamp_field(record, CREATED_AT_KEY)?,
            timestamp_field(record, UPDATED_AT_KEY)?,
        ) {
            (Some(created), Some(updated)) => (created, updated),
            (Some(created), None) => (created, created),
            (None, Some(updated)) => (updated, updated),
            (None, None) => {
                let now = Timestamp::now();
                (now, now)
            }
        };
        if created_at > updated_at {
            return Err(ModelError::conversion(
                CREATED_AT_KEY,
                format!("{} is later than updated_at {}", created_at.to_iso(), updated_at.to_iso()),
            ));
        }

        let mut attributes = BTreeMap::new();
        for (name, value) in record {
            if is_reserved(name) {
                continue;
            }
            let value = Value::from_json(value)
                .map_err(|e| ModelError::conversion(name, e.to_string()))?;
            attributes.insert(name.clone(), value);
        }

        Ok(Self {
            id,
            created_at,
            updated_at,
            attributes,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets a named attribute, returning the previous value. Public callers
    /// go through [`Kind::set_attr`] so the store sees the change.
    ///
    /// [`Kind::set_attr`]: crate::Kind::set_attr
    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> ModelResult<Option<Value>> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(ModelError::ReservedAttribute(name));
        }
        let value = value.into();
        value
            .validate()
            .map_err(|e| ModelError::conversion(&name, e.to_string()))?;
        Ok(self.attributes.insert(name, value))
    }

    pub(crate) fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Moves `updated_at` strictly forward.
    pub(crate) fn touch(&mut self) {
        self.updated_at = self.updated_at.tick();
    }

    /// The dictionary form under the given kind name, timestamps as text.
    #[must_use]
    pub fn to_record(&self, kind: &str) -> Record {
        let mut record: Record = self
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        record.insert(ID_KEY.into(), self.id.as_str().into());
        record.insert(CREATED_AT_KEY.into(), self.created_at.to_iso().into());
        record.insert(UPDATED_AT_KEY.into(), self.updated_at.to_iso().into());
        record.insert(CLASS_KEY.into(), kind.into());
        record
    }

    /// The in-memory mapping with timestamps as values, for display.
    #[must_use]
    pub fn raw_attributes(&self) -> RawAttributes<'_> {
        RawAttributes(self)
    }

    /// `[<kind>] (<id>) <raw attributes>`.
    #[must_use]
    pub fn display_as(&self, kind: &str) -> String {
        format!("[{kind}] ({}) {}", self.id, self.raw_attributes())
    }
}

/// Display adapter over a [`BaseModel`]'s fields.
///
/// Renders `{"id": "…", "created_at": 2017-09-28 21:03:54.052298, …}` with
/// identity first and attributes in name order.
pub struct RawAttributes<'a>(&'a BaseModel);

impl fmt::Display for RawAttributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.0;
        write!(
            f,
            "{{{ID_KEY:?}: {:?}, {CREATED_AT_KEY:?}: {}, {UPDATED_AT_KEY:?}: {}",
            base.id.as_str(),
            base.created_at,
            base.updated_at
        )?;
        for (name, value) in &base.attributes {
            write!(f, ", {name:?}: {value}")?;
        }
        f.write_str("}")
    }
}

fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

fn timestamp_field(record: &Record, field: &str) -> ModelResult<Option<Timestamp>> {
    match record.get(field) {
        None => Ok(None),
        Some(serde_json::Value::String(text)) => Timestamp::parse(text)
            .map(Some)
            .map_err(|e| ModelError::conversion(field, e.to_string())),
        Some(other) => Err(ModelError::conversion(
            field,
            format!("expected ISO-8601 text, got {other}"),
        )),
    }
}
