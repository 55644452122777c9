//! The registry of live entities and its backing file.

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use hearth_model::{object_key, split_key, Kind, KindRegistry, Model, ObjectStore, Record, CLASS_KEY};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Process-wide entity registry persisted to one JSON file.
///
/// Keys are composite `"<Kind>.<id>"` strings, so equal ids of different
/// kinds never collide. The registry is only written out on [`save`]; there
/// is no flush on drop.
///
/// [`save`]: FileStorage::save
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    pretty: bool,
    kinds: KindRegistry,
    objects: BTreeMap<String, Box<dyn Model>>,
}

impl FileStorage {
    /// An empty registry backed by `path`. Nothing is read until [`reload`].
    ///
    /// [`reload`]: FileStorage::reload
    pub fn new(path: impl Into<PathBuf>, kinds: KindRegistry) -> Self {
        Self {
            path: path.into(),
            pretty: false,
            kinds,
            objects: BTreeMap::new(),
        }
    }

    pub fn with_config(config: &StorageConfig, kinds: KindRegistry) -> Self {
        Self {
            pretty: config.pretty,
            ..Self::new(config.file_path.clone(), kinds)
        }
    }

    /// Builds a storage from `config` and loads whatever is on disk.
    pub fn open(config: &StorageConfig, kinds: KindRegistry) -> StorageResult<Self> {
        let mut storage = Self::with_config(config, kinds);
        storage.reload()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    /// Lets late-defined kinds register before the next reload.
    pub fn kinds_mut(&mut self) -> &mut KindRegistry {
        &mut self.kinds
    }

    /// Every registered entity, by composite key.
    pub fn all(&self) -> &BTreeMap<String, Box<dyn Model>> {
        &self.objects
    }

    /// Inserts or replaces the entry for `object`'s composite key.
    pub fn register(&mut self, object: Box<dyn Model>) {
        let key = object.key();
        debug!(key = %key, "registering object");
        self.objects.insert(key, object);
    }

    pub fn get(&self, kind: &str, id: &str) -> Option<&dyn Model> {
        self.objects.get(&object_key(kind, id)).map(|object| &**object)
    }

    /// Looks up an entity of kind `K` by id.
    pub fn get_as<K: Kind>(&self, id: &str) -> Option<&K> {
        self.get(K::NAME, id)
            .and_then(|object| object.as_any().downcast_ref::<K>())
    }

    /// All entities of kind `K`, in key order.
    pub fn all_of<K: Kind>(&self) -> impl Iterator<Item = &K> + '_ {
        self.objects
            .values()
            .filter_map(|object| object.as_any().downcast_ref::<K>())
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.objects
            .values()
            .filter(|object| object.kind() == kind)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Writes the whole registry to the backing file.
    ///
    /// The file is replaced atomically: content goes to a temporary file in
    /// the same directory which is then renamed over the target.
    pub fn save(&self) -> StorageResult<()> {
        let snapshot: BTreeMap<&str, Record> = self
            .objects
            .iter()
            .map(|(key, object)| (key.as_str(), object.to_dict()))
            .collect();
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&snapshot)?
        } else {
            serde_json::to_vec(&snapshot)?
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        info!(
            path = %self.path.display(),
            objects = snapshot.len(),
            "saved object store"
        );
        Ok(())
    }

    /// Loads the backing file into the registry.
    ///
    /// Every entry is rebuilt before any is inserted, so an error leaves the
    /// registry exactly as it was. Loaded entries replace in-memory entries
    /// with the same key; other in-memory entries stay. A missing file loads
    /// nothing. Returns the number of entries read.
    pub fn reload(&mut self) -> StorageResult<usize> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "no backing file, registry unchanged");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let saved: BTreeMap<String, Record> = serde_json::from_str(&contents)?;
        let mut staged = Vec::with_capacity(saved.len());
        for (key, record) in &saved {
            staged.push((key.clone(), self.restore_entry(key, record)?));
        }

        let loaded = staged.len();
        self.objects.extend(staged);
        info!(
            path = %self.path.display(),
            loaded,
            total = self.objects.len(),
            "reloaded object store"
        );
        Ok(loaded)
    }

    fn restore_entry(&self, key: &str, record: &Record) -> StorageResult<Box<dyn Model>> {
        let (kind, id) = split_key(key)
            .ok_or_else(|| StorageError::InvalidData(format!("malformed key {key:?}")))?;

        if let Some(class) = record.get(CLASS_KEY) {
            if class.as_str() != Some(kind) {
                return Err(StorageError::InvalidData(format!(
                    "entry {key:?} has {CLASS_KEY} {class}"
                )));
            }
        }

        let object = self.kinds.restore(kind, record)?;
        if object.as_base().id().as_str() != id {
            return Err(StorageError::InvalidData(format!(
                "entry {key:?} has id {:?}",
                object.as_base().id().as_str()
            )));
        }
        debug!(key, "restored object");
        Ok(object)
    }
}

impl ObjectStore for FileStorage {
    type Error = StorageError;

    fn register(&mut self, object: Box<dyn Model>) {
        FileStorage::register(self, object);
    }

    fn save(&mut self) -> StorageResult<()> {
        FileStorage::save(self)
    }
}
