//! Open key/value map behind the session record.
//!
//! Unknown keys are carried through load and save untouched; only
//! `last_category_id` has a typed accessor.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Option key holding the last viewed category id.
pub const LAST_CATEGORY_ID_KEY: &str = "last_category_id";

/// Named session options.
///
/// Serialized as a flat JSON object. Unknown keys are kept as-is so newer
/// options survive a round-trip through older code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionOptions {
    entries: BTreeMap<String, Value>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Last viewed category, if one is recorded as a valid id string.
    pub fn last_category_id(&self) -> Option<CategoryId> {
        self.get(LAST_CATEGORY_ID_KEY)
            .and_then(Value::as_str)
            .and_then(|value| Uuid::parse_str(value).ok())
    }

    /// Records the last viewed category; `None` clears the option.
    pub fn set_last_category_id(&mut self, id: Option<CategoryId>) {
        match id {
            Some(id) => self.set(LAST_CATEGORY_ID_KEY, id.to_string()),
            None => {
                self.remove(LAST_CATEGORY_ID_KEY);
            }
        }
    }
}

impl From<Map<String, Value>> for SessionOptions {
    fn from(entries: Map<String, Value>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}
