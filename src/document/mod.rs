//! In-memory tree documents.
//!
//! A document is a plain [`node::TreeValue`]: scalars, sequences, ordered
//! mappings and [`record::Record`] objects that carry a type name and a
//! supertype lineage. [`tree::DataTree`] wraps one value and exposes the
//! dot-path operations from [`crate::path`] as methods.

pub mod lineage;
pub mod node;
pub mod parser;
pub mod record;
pub mod tree;
