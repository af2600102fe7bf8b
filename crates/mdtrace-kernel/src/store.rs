//! Keyed string store: one side of the condition record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable `String -> String` mapping with last-write-wins semantics.
///
/// Backs both the `values` and the `conditions` side of a gating engine.
/// Iteration order is deterministic (key order) but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyedStore {
    entries: BTreeMap<String, String>,
}

impl KeyedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite one entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge `entries` into the store.
    ///
    /// Keys present in `entries` are overwritten; all other keys are kept.
    pub fn set_many<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Lookup one entry. Absent keys yield `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Owned copy of the current entries.
    ///
    /// Later mutations of the store are not reflected in the returned map.
    pub fn get_all(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }

    /// Remove one entry; missing keys are a no-op.
    pub fn clear_one(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for KeyedStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.set_many(iter);
        store
    }
}
