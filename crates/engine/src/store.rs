//! Key-value persistence seam.
//!
//! Square state lives in a flat string-to-string store. The store is
//! synchronous and best-effort: `set` has no acknowledgement, and an
//! implementation that fails to write logs and drops the value.

use std::collections::BTreeMap;

pub trait KeyValueStore {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Record `value` under `key`, replacing any previous value. Must be
    /// visible to the next `get` on the same key.
    fn set(&mut self, key: &str, value: String);

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// In-memory store. Used by tests and as the scratch store of the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
