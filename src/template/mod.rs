//! `{{ placeholder }}` substitution over strings and trees.
//!
//! A placeholder names one or more candidate paths separated by `|`:
//! `{{ user.nickname|user.name }}`. Candidates are tried left to right
//! through a [`Resolver`]; the first one that yields a string, a number or a
//! record replaces the placeholder. Placeholders nobody can resolve are
//! erased, or left untouched when the erase policy is off.
//!
//! # Syntax
//!
//! - `{{path}}` - a single candidate; whitespace inside the braces is ignored
//! - `{{a|b|c}}` - a fallback chain
//! - paths may contain letters, digits and `_ . / @ -`
//!
//! Placeholders do not nest and the braces cannot be escaped.
//!
//! # Examples
//!
//! ```
//! use treequill::document::parser::parse_yaml;
//! use treequill::template::{data_resolver, interpolate};
//!
//! let data = parse_yaml("x: v1").unwrap();
//! assert_eq!(interpolate("{{y|x}}", data_resolver(&data), true), "v1");
//! assert_eq!(interpolate("{{y|z}}", data_resolver(&data), true), "");
//! assert_eq!(interpolate("{{y|z}}", data_resolver(&data), false), "{{y|z}}");
//! ```

pub mod interpolator;
pub mod placeholder;

pub use interpolator::{data_resolver, interpolate, resolve_tree, DataResolver, Interpolator, Resolver};
pub use placeholder::{placeholders, Placeholder};
