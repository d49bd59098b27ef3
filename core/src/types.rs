//! Item DTOs.
//!
//! # Design
//! The backend owns the item schema. The client keeps items as opaque JSON
//! objects so that nothing the server sends is dropped or renamed, and treats
//! ids as tokens that are only ever echoed back into URLs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque item identifier. Numeric and string ids are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a single percent-encoded URL path segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ItemId(s.clone())),
            Value::Number(n) => Some(ItemId(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId(id.to_string())
    }
}

/// A backend record, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// The backend-assigned id, if the record carries a string or numeric `id`.
    pub fn id(&self) -> Option<ItemId> {
        self.0.get("id").and_then(ItemId::from_json)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Item(fields)
    }
}
