//! Item and collection definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single task record: a distinguished integer id plus arbitrary
/// caller-defined fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the collection. Assigned on creation,
    /// never reassigned.
    pub id: u64,
    /// Caller-defined fields (title, completed flag, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Returns the value of a caller-defined field, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// The persisted record: the full item sequence for one collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Collection {
    pub todos: Vec<Item>,
}
