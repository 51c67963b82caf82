//! Case-insensitive string-keyed map

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;

use serde::Serialize;

/// A map whose string keys compare case-insensitively.
///
/// Keys are lowercased on insert and on lookup, so `"FirstName"` and
/// `"firstname"` address the same entry. Iteration yields the lowercased
/// keys; keep the original spelling in the value when it matters
/// (as [`FieldMetadata::name`](super::FieldMetadata::name) does).
///
/// # Example
///
/// ```
/// use filemaker_lib::model::CaseInsensitiveMap;
///
/// let mut map = CaseInsensitiveMap::new();
/// map.insert("FirstName", 1);
///
/// assert_eq!(map.get("firstname"), Some(&1));
/// assert_eq!(map.get("FIRSTNAME"), Some(&1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CaseInsensitiveMap<V> {
    inner: HashMap<String, V>,
}

impl<V> CaseInsensitiveMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Inserts a value, returning the previous value stored under the same
    /// key in any casing.
    pub fn insert(&mut self, key: impl Borrow<str>, value: V) -> Option<V> {
        self.inner.insert(key.borrow().to_lowercase(), value)
    }

    /// Returns the value stored under `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.inner.get(&key.to_lowercase())
    }

    /// Returns `true` if an entry exists for `key`, ignoring case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&key.to_lowercase())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(lowercased key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, V> {
        self.inner.iter()
    }

    /// Iterates over the lowercased keys.
    pub fn keys(&self) -> hash_map::Keys<'_, String, V> {
        self.inner.keys()
    }

    /// Iterates over the values.
    pub fn values(&self) -> hash_map::Values<'_, String, V> {
        self.inner.values()
    }
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Borrow<str>, V> FromIterator<(K, V)> for CaseInsensitiveMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a, V> IntoIterator for &'a CaseInsensitiveMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = hash_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
