//! The typed abstract syntax tree produced by a parse.
//!
//! This module provides the [`Node`] sum type over the three concrete tree
//! shapes — [`Table`], [`Array`], and scalar [`Value`] — plus the [`Kind`]
//! discriminant, safe traversal ([`Table::get`]), and conversion into a
//! generic [`serde_json::Value`] for callers that do not need the typed AST.
//!
//! ## Core Types
//!
//! - [`Node`]: any tree node (table, array, or scalar)
//! - [`Table`]: an ordered namespace of key segments to child nodes
//! - [`Array`]: an ordered sequence of nodes (literal arrays and
//!   array-of-tables sequences)
//! - [`Value`]: a scalar leaf (string, integer, float, bool, or one of the
//!   four date/time representations)
//! - [`Kind`]: the discriminant tag every node reports
//!
//! ## Usage Patterns
//!
//! ### Traversing a parsed document
//!
//! ```rust
//! use toml_ast::parse_str;
//!
//! let root = parse_str("[server]\nhost = \"localhost\"\nport = 8080").unwrap();
//!
//! assert_eq!(root.get(&["server", "host"]).and_then(|n| n.as_str()), Some("localhost"));
//! assert_eq!(root.get(&["server", "port"]).and_then(|n| n.as_integer()), Some(8080));
//! assert!(root.get(&["server", "missing"]).is_none());
//! ```
//!
//! ### Checking discriminants
//!
//! ```rust
//! use toml_ast::{parse_str, Kind};
//!
//! let root = parse_str("pi = 3.14").unwrap();
//! assert_eq!(root.get(&["pi"]).map(|n| n.kind()), Some(Kind::Float));
//! ```
//!
//! ### Typed extraction
//!
//! ```rust
//! use toml_ast::parse_str;
//!
//! let root = parse_str("answer = 42").unwrap();
//! let node = root.get(&["answer"]).unwrap();
//!
//! // Fails with a type-mismatch error instead of coercing.
//! let n = i64::try_from(node).unwrap();
//! assert_eq!(n, 42);
//! assert!(String::try_from(node).is_err());
//! ```

use crate::error::Error;
use crate::TomlMap;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// The discriminant tag of a tree node.
///
/// Every [`Node`] reports exactly one `Kind`. Literal arrays are
/// homogeneous: all elements of one array share the same `Kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Integer,
    Float,
    Bool,
    /// Date-time with an explicit UTC offset (RFC 3339).
    Datetime,
    LocalDate,
    LocalTime,
    LocalDatetime,
    Table,
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Datetime => "datetime",
            Kind::LocalDate => "local_date",
            Kind::LocalTime => "local_time",
            Kind::LocalDatetime => "local_datetime",
            Kind::Table => "table",
            Kind::Array => "array",
        };
        f.write_str(name)
    }
}

/// A scalar leaf value.
///
/// Each variant carries its decoded payload; the four date/time variants use
/// the matching `chrono` representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// RFC 3339 instant with an explicit offset.
    Datetime(DateTime<FixedOffset>),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDatetime(NaiveDateTime),
}

impl Value {
    /// Returns the discriminant of this scalar.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Datetime(_) => Kind::Datetime,
            Value::LocalDate(_) => Kind::LocalDate,
            Value::LocalTime(_) => Kind::LocalTime,
            Value::LocalDatetime(_) => Kind::LocalDatetime,
        }
    }
}

/// A namespace mapping key segments to child nodes.
///
/// Within one table a key segment is bound at most once; the parser treats a
/// rebind as a hard error, so lookups never observe shadowed entries.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Table {
    items: TomlMap,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Table {
            items: TomlMap::new(),
        }
    }

    /// Read access to the underlying ordered map.
    #[must_use]
    pub fn items(&self) -> &TomlMap {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut TomlMap {
        &mut self.items
    }

    /// Returns the number of bindings in this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this table has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Walks the tree along the given pre-split key segments.
    ///
    /// Empty segments are skipped. Returns `None` if the path is empty, any
    /// intermediate node is not a table, or any segment is unbound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_ast::parse_str;
    ///
    /// let root = parse_str("[a.b]\nc = 1").unwrap();
    /// assert!(root.get(&["a", "b", "c"]).is_some());
    /// assert!(root.get(&["a", "", "b", "c"]).is_some()); // empty segments skipped
    /// assert!(root.get(&["a", "c"]).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let mut cur: Option<&Node> = None;
        for segment in path {
            if segment.is_empty() {
                continue;
            }
            let table = match cur {
                None => self,
                Some(Node::Table(t)) => t,
                Some(_) => return None,
            };
            cur = Some(table.items.get(segment)?);
        }
        cur
    }

    /// Like [`Table::get`], but converts the located node to a generic
    /// [`serde_json::Value`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_ast::parse_str;
    ///
    /// let root = parse_str("ports = [8001, 8002]").unwrap();
    /// assert_eq!(root.get_generic(&["ports"]), Some(serde_json::json!([8001, 8002])));
    /// ```
    #[must_use]
    pub fn get_generic(&self, path: &[&str]) -> Option<serde_json::Value> {
        self.get(path).map(Node::to_generic)
    }

    fn to_generic(&self) -> serde_json::Value {
        let map = self
            .items
            .iter()
            .map(|(k, v)| (k.clone(), v.to_generic()))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// An ordered sequence of nodes.
///
/// Used both for literal arrays (homogeneous by construction) and for
/// array-of-tables sequences (one table element per repeated header).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Array {
    elems: Vec<Node>,
}

impl Array {
    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns `true` if the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Returns the element at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.elems.get(index)
    }

    /// The elements as a slice.
    #[must_use]
    pub fn elems(&self) -> &[Node] {
        &self.elems
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.elems.iter()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.elems.get_mut(index)
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.elems.push(node);
    }
}

impl From<Vec<Node>> for Array {
    fn from(elems: Vec<Node>) -> Self {
        Array { elems }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

/// Any node of the parsed tree.
///
/// The tree has a single root [`Table`]; every other node is reachable from
/// it through key segments and array indices. Ownership is strictly
/// hierarchical — a node is owned by exactly one parent.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Table(Table),
    Array(Array),
    Value(Value),
}

impl Node {
    /// Returns the discriminant of this node.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Node::Table(_) => Kind::Table,
            Node::Array(_) => Kind::Array,
            Node::Value(v) => v.kind(),
        }
    }

    /// Returns `true` if the node is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    /// Returns `true` if the node is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// If the node is a table, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(t) => Some(t),
            _ => None,
        }
    }

    /// If the node is an array, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If the node is a string scalar, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// If the node is an integer scalar, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Value(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// If the node is a float scalar, returns it. Otherwise returns `None`.
    ///
    /// Integers are not coerced; `as_float` on an integer node returns `None`.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Value(Value::Float(f)) => Some(*f),
            _ => None,
        }
    }

    /// If the node is a boolean scalar, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Value(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// If the node is an offset date-time, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Node::Value(Value::Datetime(dt)) => Some(dt),
            _ => None,
        }
    }

    /// If the node is a local date, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_local_date(&self) -> Option<&NaiveDate> {
        match self {
            Node::Value(Value::LocalDate(d)) => Some(d),
            _ => None,
        }
    }

    /// If the node is a local time, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_local_time(&self) -> Option<&NaiveTime> {
        match self {
            Node::Value(Value::LocalTime(t)) => Some(t),
            _ => None,
        }
    }

    /// If the node is a local date-time, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_local_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Node::Value(Value::LocalDatetime(dt)) => Some(dt),
            _ => None,
        }
    }

    /// Recursively converts this node into a generic [`serde_json::Value`].
    ///
    /// Scalars map to JSON scalars; date/time values become their ISO 8601 /
    /// RFC 3339 text; non-finite floats become `null` (JSON cannot represent
    /// them). Tables become objects in insertion order.
    #[must_use]
    pub fn to_generic(&self) -> serde_json::Value {
        match self {
            Node::Table(t) => t.to_generic(),
            Node::Array(a) => {
                serde_json::Value::Array(a.iter().map(Node::to_generic).collect())
            }
            Node::Value(Value::String(s)) => serde_json::Value::String(s.clone()),
            Node::Value(Value::Integer(i)) => serde_json::Value::from(*i),
            Node::Value(Value::Float(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Node::Value(Value::Bool(b)) => serde_json::Value::Bool(*b),
            Node::Value(Value::Datetime(dt)) => serde_json::Value::String(dt.to_rfc3339()),
            Node::Value(Value::LocalDate(d)) => {
                serde_json::Value::String(d.format("%Y-%m-%d").to_string())
            }
            Node::Value(Value::LocalTime(t)) => {
                serde_json::Value::String(t.format("%H:%M:%S%.f").to_string())
            }
            Node::Value(Value::LocalDatetime(dt)) => {
                serde_json::Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Node::Array(array)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

// Typed extraction: fails with a type-mismatch error instead of coercing.

impl TryFrom<&Node> for i64 {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        node.as_integer()
            .ok_or_else(|| Error::type_mismatch(Kind::Integer, node.kind()))
    }
}

impl TryFrom<&Node> for f64 {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        node.as_float()
            .ok_or_else(|| Error::type_mismatch(Kind::Float, node.kind()))
    }
}

impl TryFrom<&Node> for bool {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        node.as_bool()
            .ok_or_else(|| Error::type_mismatch(Kind::Bool, node.kind()))
    }
}

impl TryFrom<&Node> for String {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        node.as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::type_mismatch(Kind::String, node.kind()))
    }
}

impl TryFrom<&Node> for DateTime<FixedOffset> {
    type Error = Error;

    fn try_from(node: &Node) -> Result<Self, Error> {
        node.as_datetime()
            .copied()
            .ok_or_else(|| Error::type_mismatch(Kind::Datetime, node.kind()))
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, node) in self.items.iter() {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.elems.len()))?;
        for elem in &self.elems {
            seq.serialize_element(elem)?;
        }
        seq.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Datetime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::LocalDate(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Value::LocalTime(t) => serializer.serialize_str(&t.format("%H:%M:%S%.f").to_string()),
            Value::LocalDatetime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Table(t) => t.serialize(serializer),
            Node::Array(a) => a.serialize(serializer),
            Node::Value(v) => v.serialize(serializer),
        }
    }
}
