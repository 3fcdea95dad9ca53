//! Ordered map type for TOML tables.
//!
//! This module provides [`TomlMap`], a wrapper around [`IndexMap`] that keeps
//! table entries in insertion order. Key order never affects parsing
//! correctness, but a stable order makes diagnostics and generic conversions
//! reproducible across runs.
//!
//! ## Why IndexMap?
//!
//! `TomlMap` uses `IndexMap` instead of `HashMap` to ensure:
//!
//! - **Deterministic iteration**: entries come back in document order
//! - **Reproducible diagnostics**: the same input always prints the same way
//! - **Predictable tests**: no hash-seed-dependent output
//!
//! ## Examples
//!
//! ```rust
//! use toml_ast::{Node, TomlMap, Value};
//!
//! let mut map = TomlMap::new();
//! map.insert("name".to_string(), Node::Value(Value::String("Alice".to_string())));
//! map.insert("port".to_string(), Node::Value(Value::Integer(8080)));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|n| n.as_str()), Some("Alice"));
//! ```

use crate::Node;
use indexmap::IndexMap;

/// An ordered map of key segments to tree nodes.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order,
/// which keeps traversal and diagnostics deterministic.
///
/// # Examples
///
/// ```rust
/// use toml_ast::{Node, TomlMap, Value};
///
/// let mut map = TomlMap::new();
/// map.insert("first".to_string(), Node::Value(Value::Integer(1)));
/// map.insert("second".to_string(), Node::Value(Value::Integer(2)));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TomlMap(IndexMap<String, Node>);

impl TomlMap {
    /// Creates an empty `TomlMap`.
    #[must_use]
    pub fn new() -> Self {
        TomlMap(IndexMap::new())
    }

    /// Creates an empty `TomlMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TomlMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    /// The parser never relies on that: rebinding a key is a hard error
    /// upstream.
    pub fn insert(&mut self, key: String, value: Node) -> Option<Node> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Gets the entry for `key` for in-place create-or-extend access.
    pub fn entry(&mut self, key: String) -> indexmap::map::Entry<'_, String, Node> {
        self.0.entry(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl IntoIterator for TomlMap {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TomlMap {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for TomlMap {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        TomlMap(IndexMap::from_iter(iter))
    }
}
