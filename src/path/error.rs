//! Error types for path writes.

use thiserror::Error;

/// Errors raised while writing into a tree.
///
/// Reads never produce errors; only a write that has to pass through a value
/// that cannot hold children fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The value at `path` cannot hold the child `key`.
    #[error("Cannot write '{key}': value at '{path}' is not traversable")]
    NotTraversable { path: String, key: String },
}

impl PathError {
    pub(crate) fn not_traversable(traversed: &[&str], key: &str) -> Self {
        PathError::NotTraversable {
            path: traversed.join("."),
            key: key.to_string(),
        }
    }

    /// The partial path of the value that blocked the write.
    pub fn path(&self) -> &str {
        match self {
            PathError::NotTraversable { path, .. } => path,
        }
    }

    /// The segment that could not be stored or descended into.
    pub fn key(&self) -> &str {
        match self {
            PathError::NotTraversable { key, .. } => key,
        }
    }
}
