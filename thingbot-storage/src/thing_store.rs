//! File-backed collection of things.

use crate::error::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thingbot_model::{Catalog, Thing};
use thingbot_types::{Context, Document, ThingId};
use tracing::{debug, info, warn};

/// Version tag written next to the stored collection.
pub const FORMAT_VERSION: &str = "2";

#[derive(Deserialize)]
struct StoredCollection {
    #[serde(default)]
    things: BTreeMap<String, Document>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Serialize)]
struct StoredView<'a> {
    things: BTreeMap<&'a str, &'a Document>,
    version: &'static str,
}

/// Things keyed by normalized id, loaded from and saved to one JSON file.
///
/// The serialized collection is derived from the live things on every
/// save, so a thing inserted into the store is always part of the next
/// write.
pub struct ThingStore {
    path: PathBuf,
    catalog: Arc<Catalog>,
    things: BTreeMap<ThingId, Thing>,
}

impl ThingStore {
    /// Creates an empty store bound to `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            path: path.into(),
            catalog,
            things: BTreeMap::new(),
        }
    }

    /// Creates a store and loads whatever is at `path`.
    pub fn open(path: impl Into<PathBuf>, catalog: Arc<Catalog>) -> StorageResult<Self> {
        let mut store = Self::new(path, catalog);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory collection with the contents of the backing
    /// file. A missing or unreadable file yields an empty store; malformed
    /// contents are an error.
    pub fn load(&mut self) -> StorageResult<()> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    info!(path = %self.path.display(), "No store file, starting empty");
                } else {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Store file unreadable, starting empty"
                    );
                }
                self.things.clear();
                return Ok(());
            }
        };

        let stored: StoredCollection = serde_json::from_str(&raw)?;
        match stored.version.as_deref() {
            Some(FORMAT_VERSION) => {}
            Some(other) => return Err(StorageError::UnsupportedFormat(other.to_string())),
            None => warn!(
                path = %self.path.display(),
                "Store has no version tag, assuming current format"
            ),
        }

        let mut things = BTreeMap::new();
        for (key, document) in stored.things {
            let id = ThingId::from_name(&key);
            if id.as_str() != key {
                warn!(key = %key, thing = %id, "Normalizing stored key");
            }
            match things.entry(id) {
                Entry::Occupied(entry) => {
                    warn!(key = %key, thing = %entry.key(), "Duplicate stored key, dropped");
                }
                Entry::Vacant(entry) => {
                    let id = entry.key().clone();
                    entry.insert(Thing::from_document(Arc::clone(&self.catalog), id, document));
                }
            }
        }
        self.things = things;

        info!(count = self.things.len(), path = %self.path.display(), "Loaded things");
        Ok(())
    }

    /// Writes every thing to the backing file.
    ///
    /// The output goes to a temporary file in the same directory, which is
    /// then renamed over the target.
    pub fn save(&self) -> StorageResult<()> {
        let bytes = self.encode()?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        info!(count = self.things.len(), path = %self.path.display(), "Saved things");
        Ok(())
    }

    /// The only valid form of a store key.
    pub fn normalize_id(name: &str) -> ThingId {
        ThingId::from_name(name)
    }

    /// Get-or-create by name.
    ///
    /// An unknown name produces a new thing through [`Thing::create`]. When
    /// `require_facet` is set and the resolved thing lacks that facet this
    /// returns `None` and a new thing is not kept. Otherwise the thing is
    /// stored and returned.
    pub fn get(
        &mut self,
        name: &str,
        ctx: &dyn Context,
        require_facet: Option<&str>,
    ) -> Option<&mut Thing> {
        let lacks = |thing: &Thing| require_facet.is_some_and(|facet| !thing.has_facet(facet));

        match self.things.entry(Self::normalize_id(name)) {
            Entry::Occupied(entry) => {
                if lacks(entry.get()) {
                    return None;
                }
                Some(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                let thing = Thing::create(Arc::clone(&self.catalog), id, name.trim(), ctx);
                if lacks(&thing) {
                    debug!(thing = %thing.id(), "New thing lacks required facet, not stored");
                    return None;
                }
                debug!(thing = %thing.id(), "Created thing");
                Some(entry.insert(thing))
            }
        }
    }

    /// Lookup without creation.
    pub fn find(&self, name: &str) -> Option<&Thing> {
        self.things.get(Self::normalize_id(name).as_str())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Thing> {
        self.things.get_mut(Self::normalize_id(name).as_str())
    }

    /// Stores `thing` under its id, returning any thing it replaced.
    pub fn insert(&mut self, thing: Thing) -> Option<Thing> {
        self.things.insert(thing.id().clone(), thing)
    }

    /// Things in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Thing> + '_ {
        self.things.values()
    }

    pub fn len(&self) -> usize {
        self.things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The collection as it would be saved.
    pub fn to_json(&self) -> StorageResult<serde_json::Value> {
        Ok(serde_json::to_value(self.view())?)
    }

    fn view(&self) -> StoredView<'_> {
        StoredView {
            things: self
                .things
                .iter()
                .map(|(id, thing)| (id.as_str(), thing.document()))
                .collect(),
            version: FORMAT_VERSION,
        }
    }

    fn encode(&self) -> StorageResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.view().serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl std::fmt::Debug for ThingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThingStore")
            .field("path", &self.path)
            .field("things", &self.things.len())
            .finish()
    }
}
