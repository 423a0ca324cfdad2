//! Store implementation: query, save, remove, and clear over one collection.

use rand::Rng;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Collection, Item, StorageBackend, StoreResult};

/// Field equality filter for [`Store::find`].
///
/// An item matches when every query key is present on it with an equal
/// value. An empty query matches every item. The reserved key `id`
/// compares against the item's typed id.
#[derive(Debug, Clone, Default)]
pub struct Query {
    fields: Map<String, Value>,
}

impl Query {
    /// Creates an empty query matching all items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition on `key`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    fn matches(&self, item: &Item) -> bool {
        self.fields.iter().all(|(key, value)| match key.as_str() {
            "id" => Value::from(item.id) == *value,
            _ => item.fields.get(key) == Some(value),
        })
    }
}

/// Persistence for one named todo collection.
///
/// Every operation is a synchronous read-modify-write cycle over the single
/// record persisted under the collection name. Cycles are not atomic with
/// respect to each other: two stores over the same slot can overwrite each
/// other's writes, exactly as two script contexts sharing one storage key
/// would. Callers needing cross-store coordination must serialize access
/// themselves.
#[derive(Debug)]
pub struct Store<B: StorageBackend> {
    name: String,
    backend: B,
}

impl<B: StorageBackend> Store<B> {
    /// Opens the collection named `name`, initializing it to an empty
    /// record when absent. Reopening never resets existing data.
    pub fn open(name: impl Into<String>, backend: B) -> StoreResult<Self> {
        let store = Self {
            name: name.into(),
            backend,
        };
        if !store.backend.contains(&store.name)? {
            debug!(collection = %store.name, "initializing empty collection");
            store.persist(&Collection::default())?;
        }
        Ok(store)
    }

    /// The collection name this store persists under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the items matching every field of `query`, in stored order.
    /// The collection is not modified.
    pub fn find(&self, query: &Query) -> StoreResult<Vec<Item>> {
        let collection = self.load()?;
        Ok(collection
            .todos
            .into_iter()
            .filter(|item| query.matches(item))
            .collect())
    }

    /// Returns the full item sequence. The collection is not modified.
    pub fn find_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self.load()?.todos)
    }

    /// Appends a new item with the given fields, assigning a fresh id.
    ///
    /// Any `id` key in `fields` is discarded; ids are assigned here only.
    /// Returns the newly created item.
    pub fn save(&self, mut fields: Map<String, Value>) -> StoreResult<Item> {
        let mut collection = self.load()?;
        fields.remove("id");
        let item = Item {
            id: fresh_id(&collection.todos),
            fields,
        };
        collection.todos.push(item.clone());
        self.persist(&collection)?;
        debug!(collection = %self.name, id = item.id, "created item");
        Ok(item)
    }

    /// Merges `patch` into the first item whose id equals `id`.
    ///
    /// Patch fields overwrite existing fields and add new ones; the item's
    /// id is never reassigned. When no item matches, the collection is
    /// rewritten unchanged and the call still succeeds. Returns the full
    /// updated sequence.
    pub fn update(&self, id: u64, patch: Map<String, Value>) -> StoreResult<Vec<Item>> {
        let mut collection = self.load()?;
        if let Some(item) = collection.todos.iter_mut().find(|item| item.id == id) {
            for (key, value) in patch {
                if key == "id" {
                    continue;
                }
                item.fields.insert(key, value);
            }
        }
        self.persist(&collection)?;
        Ok(collection.todos)
    }

    /// Removes the first item whose id equals `id`.
    ///
    /// The collection is persisted even when nothing matched. Returns the
    /// resulting sequence.
    pub fn remove(&self, id: u64) -> StoreResult<Vec<Item>> {
        let mut collection = self.load()?;
        if let Some(pos) = collection.todos.iter().position(|item| item.id == id) {
            collection.todos.remove(pos);
            debug!(collection = %self.name, id, "removed item");
        }
        self.persist(&collection)?;
        Ok(collection.todos)
    }

    /// Resets the collection to an empty record. The backing key continues
    /// to exist. Returns the (empty) sequence.
    pub fn clear(&self) -> StoreResult<Vec<Item>> {
        let collection = Collection::default();
        self.persist(&collection)?;
        debug!(collection = %self.name, "cleared collection");
        Ok(collection.todos)
    }

    fn load(&self) -> StoreResult<Collection> {
        match self.backend.get(&self.name)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Collection::default()),
        }
    }

    fn persist(&self, collection: &Collection) -> StoreResult<()> {
        let text = serde_json::to_string(collection)?;
        self.backend.set(&self.name, &text)
    }
}

/// Draws an id uniformly from the 6-digit decimal space, re-drawing while
/// it collides with any existing item.
fn fresh_id(todos: &[Item]) -> u64 {
    let mut rng = rand::thread_rng();
    loop {
        let id = rng.gen_range(0..1_000_000);
        if !todos.iter().any(|item| item.id == id) {
            return id;
        }
    }
}
