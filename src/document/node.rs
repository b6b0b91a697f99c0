//! Tree value representation.
//!
//! This module provides the core data structure for every tree handled by
//! treequill. A `TreeValue` is a scalar, an ordered sequence, an ordered
//! mapping, or a typed [`Record`] object. Trees have no fixed schema; their
//! shape is discovered while traversing them.
//!
//! # Example
//!
//! ```
//! use treequill::document::node::{TreeNumber, TreeValue};
//! use indexmap::IndexMap;
//!
//! let mut user = IndexMap::new();
//! user.insert("name".to_string(), TreeValue::from("Alice"));
//! user.insert("age".to_string(), TreeValue::Number(TreeNumber::Integer(30)));
//! let root = TreeValue::Map(user);
//!
//! assert!(root.is_container());
//! assert_eq!(root.to_string(), r#"{"name":"Alice","age":30}"#);
//! ```

use super::record::{records_equal, Entity, Record};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A tree number, either integral or floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeNumber {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for TreeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNumber::Integer(i) => write!(f, "{}", i),
            TreeNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl TreeNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            TreeNumber::Integer(i) => *i as f64,
            TreeNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, TreeNumber::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, TreeNumber::Float(_))
    }
}

/// A tree value.
///
/// Mappings keep their keys in insertion order. Records are typed objects
/// reached through the [`Record`] capability trait rather than by probing
/// arbitrary fields.
#[derive(Debug, Clone, Default)]
pub enum TreeValue {
    /// An absent or explicitly empty value
    #[default]
    Null,
    Boolean(bool),
    Number(TreeNumber),
    String(String),
    /// An ordered sequence of values
    Array(Vec<TreeValue>),
    /// An ordered mapping of string keys to values
    Map(IndexMap<String, TreeValue>),
    /// A typed object with named fields and a supertype lineage
    Record(Box<dyn Record>),
}

impl TreeValue {
    /// Returns an empty mapping, the container created by autovivification.
    pub fn empty_map() -> Self {
        TreeValue::Map(IndexMap::new())
    }

    /// Wraps any record implementation as a tree value.
    pub fn record<R: Record + 'static>(record: R) -> Self {
        TreeValue::Record(Box::new(record))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TreeValue::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TreeValue::Map(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, TreeValue::Record(_))
    }

    /// Returns true if this value can hold children (sequence, mapping or record).
    ///
    /// # Example
    ///
    /// ```
    /// use treequill::document::node::TreeValue;
    ///
    /// assert!(TreeValue::empty_map().is_container());
    /// assert!(TreeValue::Array(vec![]).is_container());
    /// assert!(!TreeValue::from(42).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            TreeValue::Array(_) | TreeValue::Map(_) | TreeValue::Record(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TreeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TreeValue::Number(TreeNumber::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TreeValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<TreeValue>> {
        match self {
            TreeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            TreeValue::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }
}

impl PartialEq for TreeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TreeValue::Null, TreeValue::Null) => true,
            (TreeValue::Boolean(a), TreeValue::Boolean(b)) => a == b,
            (TreeValue::Number(a), TreeValue::Number(b)) => a == b,
            (TreeValue::String(a), TreeValue::String(b)) => a == b,
            (TreeValue::Array(a), TreeValue::Array(b)) => a == b,
            (TreeValue::Map(a), TreeValue::Map(b)) => a == b,
            (TreeValue::Record(a), TreeValue::Record(b)) => records_equal(a.as_ref(), b.as_ref()),
            _ => false,
        }
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Boolean(b) => serializer.serialize_bool(*b),
            TreeValue::Number(TreeNumber::Integer(i)) => serializer.serialize_i64(*i),
            TreeValue::Number(TreeNumber::Float(f)) => serializer.serialize_f64(*f),
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            TreeValue::Record(record) => {
                let names = record.field_names();
                let mut map = serializer.serialize_map(Some(names.len()))?;
                for name in &names {
                    if let Some(value) = record.field(name) {
                        map.serialize_entry(name, value)?;
                    }
                }
                map.end()
            }
        }
    }
}

/// Renders scalars in their plain form and containers as compact JSON.
impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeValue::Null => write!(f, "null"),
            TreeValue::Boolean(b) => write!(f, "{}", b),
            TreeValue::Number(n) => write!(f, "{}", n),
            TreeValue::String(s) => write!(f, "{}", s),
            TreeValue::Record(record) => write!(f, "{}", record),
            TreeValue::Array(_) | TreeValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Boolean(b)
    }
}

impl From<i64> for TreeValue {
    fn from(i: i64) -> Self {
        TreeValue::Number(TreeNumber::Integer(i))
    }
}

impl From<i32> for TreeValue {
    fn from(i: i32) -> Self {
        TreeValue::Number(TreeNumber::Integer(i64::from(i)))
    }
}

impl From<f64> for TreeValue {
    fn from(f: f64) -> Self {
        TreeValue::Number(TreeNumber::Float(f))
    }
}

impl From<TreeNumber> for TreeValue {
    fn from(n: TreeNumber) -> Self {
        TreeValue::Number(n)
    }
}

impl From<Vec<TreeValue>> for TreeValue {
    fn from(items: Vec<TreeValue>) -> Self {
        TreeValue::Array(items)
    }
}

impl From<IndexMap<String, TreeValue>> for TreeValue {
    fn from(entries: IndexMap<String, TreeValue>) -> Self {
        TreeValue::Map(entries)
    }
}

impl From<Entity> for TreeValue {
    fn from(entity: Entity) -> Self {
        TreeValue::Record(Box::new(entity))
    }
}

impl<T: Into<TreeValue>> From<Option<T>> for TreeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TreeValue::Null)
    }
}
