//! String-keyed property bag carried by every vertex.
//!
//! Record readers store dates, names and other payload here. The layout engine never looks at
//! it. Repeated keys are kept side by side as `KEY`, `KEY.2`, `KEY.3`, ... so that a reader can
//! record e.g. several `NAME` entries for the same person.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, Value>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Stores `value` under the first free slot of `key` and returns the key actually used.
    pub fn append(&mut self, key: &str, value: impl Into<Value>) -> String {
        let mut slot = key.to_string();
        let mut count = 2usize;
        while self.entries.contains_key(&slot) {
            slot = numbered_key(key, count);
            count += 1;
        }
        self.entries.insert(slot.clone(), value.into());
        slot
    }

    /// Replaces the `n`th repetition of `key` (0 and 1 both address the bare key).
    pub fn set_nth(&mut self, key: &str, value: impl Into<Value>, n: usize) -> Option<Value> {
        let slot = if n <= 1 {
            key.to_string()
        } else {
            numbered_key(key, n)
        };
        self.entries.insert(slot, value.into())
    }

    /// All repetitions of `key`, in slot order. Stops at the first gap.
    pub fn all(&self, key: &str) -> Vec<&Value> {
        let Some(first) = self.entries.get(key) else {
            return Vec::new();
        };
        let mut out = vec![first];
        for count in 2usize.. {
            match self.entries.get(&numbered_key(key, count)) {
                Some(v) => out.push(v),
                None => break,
            }
        }
        out
    }

    /// Removes `key` together with its numbered repetitions; returns the bare key's value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.entries.remove(key)?;
        for count in 2usize.. {
            if self.entries.remove(&numbered_key(key, count)).is_none() {
                break;
            }
        }
        Some(removed)
    }

    /// Entries by key in lexical order, so `NAME.10` comes before `NAME.2`. Use [`Self::all`]
    /// for the repetitions of one key in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn numbered_key(key: &str, count: usize) -> String {
    format!("{key}.{count}")
}
