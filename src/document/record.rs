//! Typed objects inside trees.
//!
//! A [`Record`] is the tree's notion of an object: it has a concrete type
//! name, a list of supertypes (parent types and implemented interfaces) and
//! named fields. Path traversal and shape checks reach records only through
//! this trait, so any host type can take part by implementing it.
//!
//! [`Entity`] is the generic key-value record. Documents load tagged YAML
//! mappings as entities, and writes that autovivify below a record create
//! empty entities.
//!
//! # Example
//!
//! ```
//! use treequill::document::record::{Entity, Record};
//!
//! let article = Entity::new("Article")
//!     .with_supertypes(["Node", "IdentifiableInterface"])
//!     .with_field("title", "Hello");
//!
//! assert_eq!(article.type_name(), "Article");
//! assert!(article.has_field("title"));
//! assert_eq!(article.to_string(), r#"{"title":"Hello"}"#);
//! ```

use super::node::TreeValue;
use indexmap::IndexMap;
use std::fmt;

/// Capability interface for object-like tree values.
///
/// `Display` provides the record's natural string form, used when a record
/// is substituted into a template.
pub trait Record: fmt::Debug + fmt::Display {
    /// The concrete type name of this record.
    fn type_name(&self) -> &str;

    /// Every ancestor type and interface, transitively, excluding the
    /// record's own type.
    fn supertypes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Field names in declaration order.
    fn field_names(&self) -> Vec<String>;

    fn field(&self, name: &str) -> Option<&TreeValue>;

    fn field_mut(&mut self, name: &str) -> Option<&mut TreeValue>;

    /// Stores `value` under `name`. Returns false if this record cannot hold
    /// a field with that name.
    fn set_field(&mut self, name: &str, value: TreeValue) -> bool;

    fn clone_record(&self) -> Box<dyn Record>;

    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl Clone for Box<dyn Record> {
    fn clone(&self) -> Self {
        self.clone_record()
    }
}

/// Structural record equality: same type name, same fields in the same order.
pub(crate) fn records_equal(a: &dyn Record, b: &dyn Record) -> bool {
    if a.type_name() != b.type_name() {
        return false;
    }
    let names = a.field_names();
    names == b.field_names() && names.iter().all(|name| a.field(name) == b.field(name))
}

/// A generic key-value record with an explicit type name and lineage.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    type_name: String,
    supertypes: Vec<String>,
    fields: IndexMap<String, TreeValue>,
}

impl Entity {
    /// Type name of entities created without one, e.g. by autovivification.
    pub const GENERIC_TYPE: &'static str = "Entity";

    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            supertypes: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// Sets the full supertype list of this entity.
    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<TreeValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn fields(&self) -> &IndexMap<String, TreeValue> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut IndexMap<String, TreeValue> {
        &mut self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, TreeValue> {
        self.fields
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(Self::GENERIC_TYPE)
    }
}

/// An entity's natural string form is the compact JSON of its fields.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl Record for Entity {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn supertypes(&self) -> Vec<String> {
        self.supertypes.clone()
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn field(&self, name: &str) -> Option<&TreeValue> {
        self.fields.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut TreeValue> {
        self.fields.get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: TreeValue) -> bool {
        self.fields.insert(name.to_string(), value);
        true
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }
}
