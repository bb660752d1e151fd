//! Insertion-ordered contextual parameters.

use rustc_hash::FxHashMap;

use incident_value::Value;

/// Ordered mapping of parameter name to value.
///
/// Iteration follows first-insertion order. Re-inserting an existing key
/// replaces its value in place without moving it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamStore {
    entries: Vec<(String, Value)>,
    /// Key -> position in `entries`.
    index: FxHashMap<String, usize>,
}

impl ParamStore {
    pub fn new() -> Self {
        ParamStore::default()
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = ParamStore::new();
        store.extend(iter);
        store
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for ParamStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParamStore {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
