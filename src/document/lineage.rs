//! Declared type hierarchies for records.
//!
//! A `TypeLineage` maps a type name to its direct supertypes (parent types
//! and interfaces). [`TypeLineage::resolve`] walks the table to produce the
//! full ancestor list that [`Record::supertypes`](super::record::Record::supertypes)
//! reports for loaded entities.
//!
//! # Example
//!
//! ```
//! use treequill::document::lineage::TypeLineage;
//!
//! let mut lineage = TypeLineage::new();
//! lineage.declare("Article", ["Node"]);
//! lineage.declare("Node", ["ContentEntityBase", "INode"]);
//!
//! assert_eq!(lineage.resolve("Article"), vec!["Node", "ContentEntityBase", "INode"]);
//! assert!(lineage.resolve("Unknown").is_empty());
//! ```

use super::record::Entity;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeLineage {
    parents: IndexMap<String, Vec<String>>,
}

impl TypeLineage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the direct supertypes of `type_name`, replacing any earlier declaration.
    pub fn declare<I, S>(&mut self, type_name: impl Into<String>, supertypes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents.insert(
            type_name.into(),
            supertypes.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn direct_supertypes(&self, type_name: &str) -> &[String] {
        self.parents
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns every transitive supertype of `type_name` in depth-first
    /// declaration order, without duplicates and without `type_name` itself.
    ///
    /// Cyclic declarations are tolerated; each type is visited once.
    pub fn resolve(&self, type_name: &str) -> Vec<String> {
        let mut seen = IndexSet::new();
        seen.insert(type_name.to_string());

        let mut stack: Vec<&str> = self
            .direct_supertypes(type_name)
            .iter()
            .rev()
            .map(String::as_str)
            .collect();

        while let Some(current) = stack.pop() {
            if seen.insert(current.to_string()) {
                stack.extend(
                    self.direct_supertypes(current)
                        .iter()
                        .rev()
                        .map(String::as_str),
                );
            }
        }

        seen.into_iter().skip(1).collect()
    }

    /// Creates an empty entity of `type_name` carrying its resolved supertypes.
    pub fn entity(&self, type_name: &str) -> Entity {
        Entity::new(type_name).with_supertypes(self.resolve(type_name))
    }
}
