//! TreeQuill - tools for semi-structured YAML/JSON trees.
//!
//! The crate is organised around a single in-memory value type,
//! [`document::node::TreeValue`], and three engines that operate on it:
//!
//! * [`path`] - existence checks, reads and autovivifying writes at
//!   dot-delimited paths such as `user.address.city`.
//! * [`template`] - `{{path|fallback}}` placeholder substitution over strings
//!   and whole trees.
//! * [`shape`] - structural checks of a tree against a declarative
//!   field-to-type contract.
//!
//! [`document::tree::DataTree`] wraps one tree and exposes the path
//! operations as methods. The [`file`] and [`config`] modules back the
//! `treequill` command-line tool.
//!
//! # Example
//!
//! ```
//! use treequill::document::parser::parse_yaml;
//! use treequill::document::tree::DataTree;
//! use treequill::template::{data_resolver, interpolate};
//!
//! let mut data = DataTree::new(parse_yaml("user: {name: Alice}").unwrap());
//! data.set("user.role", "admin".into()).unwrap();
//!
//! let greeting = interpolate("Hi {{ user.name }} ({{user.title|user.role}})", data_resolver(&data), true);
//! assert_eq!(greeting, "Hi Alice (admin)");
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod path;
pub mod shape;
pub mod template;
