//! Dot-delimited path access into trees.
//!
//! A path such as `user.address.city` names a location inside a tree by
//! splitting on `.` and looking up each segment in turn. Mappings are keyed by
//! segment, records by field name, and sequences by a segment that parses as
//! an index. The empty path names the root value itself.
//!
//! Reads never fail: a path that cannot be followed resolves to `None` (or a
//! caller-supplied fallback). Writes create missing intermediate containers
//! and only fail with [`PathError::NotTraversable`] when they would have to
//! pass through a scalar.
//!
//! # Examples
//!
//! ```
//! use treequill::document::node::TreeValue;
//! use treequill::path::{exists, read, write};
//!
//! let mut tree = TreeValue::empty_map();
//! write(&mut tree, "a.b.c", TreeValue::from(1)).unwrap();
//!
//! assert!(exists(&tree, "a.b", false));
//! assert_eq!(read(&tree, "a.b.c"), Some(&TreeValue::from(1)));
//! assert_eq!(read(&tree, "a.x"), None);
//! ```

pub mod error;
pub mod resolver;

pub use error::PathError;
pub use resolver::{exists, read, read_or, segments, write};
