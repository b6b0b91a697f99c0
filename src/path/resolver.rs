//! Path traversal over tree values.
//!
//! Every operation splits its path with [`segments`] and walks the tree one
//! segment at a time. Reads borrow; writes walk a single `&mut` chain so the
//! caller's tree is updated in place.

use super::error::PathError;
use crate::document::node::TreeValue;
use crate::document::record::Entity;
use tracing::{debug, trace};

/// Splits a path into its segments. The empty path has no segments.
///
/// Segments are opaque: `"a..b"` has an empty middle segment and dots cannot
/// be escaped.
pub fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// Parses a segment as a sequence index.
///
/// Only canonical decimal forms count: `"0"`, `"1"`, `"12"`. Signs and
/// leading zeros (`"+1"`, `"01"`) are ordinary keys that no sequence holds.
fn sequence_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

/// Looks up one segment below `node`.
fn child<'a>(node: &'a TreeValue, segment: &str) -> Option<&'a TreeValue> {
    match node {
        TreeValue::Map(entries) => entries.get(segment),
        TreeValue::Record(record) => record.field(segment),
        TreeValue::Array(items) => sequence_index(segment).and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Returns the value at `path`, or `None` as soon as a segment cannot be followed.
///
/// A present null is returned as `Some(&TreeValue::Null)`.
pub fn read<'a>(tree: &'a TreeValue, path: &str) -> Option<&'a TreeValue> {
    segments(path)
        .into_iter()
        .try_fold(tree, |node, segment| child(node, segment))
}

/// Returns the value at `path`, or `fallback` if the path cannot be followed.
pub fn read_or<'a>(tree: &'a TreeValue, path: &str, fallback: &'a TreeValue) -> &'a TreeValue {
    read(tree, path).unwrap_or(fallback)
}

/// Tests whether `path` can be followed to a value.
///
/// Unless `allow_null` is set, a present null counts as absent.
///
/// # Example
///
/// ```
/// use treequill::document::parser::parse_yaml;
/// use treequill::path::exists;
///
/// let tree = parse_yaml("a: {b: ~}").unwrap();
/// assert!(!exists(&tree, "a.b", false));
/// assert!(exists(&tree, "a.b", true));
/// assert!(exists(&tree, "", false));
/// ```
pub fn exists(tree: &TreeValue, path: &str, allow_null: bool) -> bool {
    read(tree, path).is_some_and(|value| allow_null || !value.is_null())
}

/// Stores `value` at `path`, creating missing intermediate containers.
///
/// The empty path replaces the whole tree. A missing key below a mapping or a
/// sequence gets an empty mapping, a missing field below a record gets an
/// empty [`Entity`], and a null on the way is replaced by an empty mapping.
/// Sequences accept an existing index or the index one past their end.
///
/// # Errors
///
/// Returns [`PathError::NotTraversable`] naming the partial path of the first
/// value that cannot hold the next segment. Containers created before the
/// conflict was found are left in place.
///
/// # Example
///
/// ```
/// use treequill::document::parser::parse_yaml;
/// use treequill::document::node::TreeValue;
/// use treequill::path::{write, PathError};
///
/// let mut tree = parse_yaml("a: 1").unwrap();
/// let err = write(&mut tree, "a.b", TreeValue::from(2)).unwrap_err();
/// assert_eq!(err, PathError::NotTraversable { path: "a".into(), key: "b".into() });
/// ```
pub fn write(tree: &mut TreeValue, path: &str, value: TreeValue) -> Result<(), PathError> {
    let segments = segments(path);
    let Some((last, parents)) = segments.split_last() else {
        *tree = value;
        return Ok(());
    };

    let mut current = tree;
    for (depth, segment) in parents.iter().enumerate() {
        current = match child_or_vivify(current, segment) {
            Some(next) => next,
            None => {
                let err = PathError::not_traversable(&parents[..depth], segment);
                debug!(path, error = %err, "write blocked");
                return Err(err);
            }
        };
    }

    if store(current, last, value) {
        Ok(())
    } else {
        let err = PathError::not_traversable(parents, last);
        debug!(path, error = %err, "write blocked");
        Err(err)
    }
}

/// Descends one segment for writing, creating the child if it is missing.
fn child_or_vivify<'a>(node: &'a mut TreeValue, segment: &str) -> Option<&'a mut TreeValue> {
    if node.is_null() {
        *node = TreeValue::empty_map();
    }

    match node {
        TreeValue::Map(entries) => Some(
            entries
                .entry(segment.to_string())
                .or_insert_with(|| {
                    trace!(segment, "creating mapping");
                    TreeValue::empty_map()
                }),
        ),
        TreeValue::Record(record) => {
            if !record.has_field(segment) {
                trace!(segment, record = record.type_name(), "creating entity field");
                if !record.set_field(segment, TreeValue::from(Entity::default())) {
                    return None;
                }
            }
            record.field_mut(segment)
        }
        TreeValue::Array(items) => {
            let index = sequence_index(segment)?;
            if index == items.len() {
                trace!(index, "appending mapping");
                items.push(TreeValue::empty_map());
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Stores `value` under `key` in `node`. Returns false if `node` cannot hold it.
fn store(node: &mut TreeValue, key: &str, value: TreeValue) -> bool {
    if node.is_null() {
        *node = TreeValue::empty_map();
    }

    match node {
        TreeValue::Map(entries) => {
            entries.insert(key.to_string(), value);
            true
        }
        TreeValue::Record(record) => record.set_field(key, value),
        TreeValue::Array(items) => match sequence_index(key) {
            Some(index) if index < items.len() => {
                items[index] = value;
                true
            }
            Some(index) if index == items.len() => {
                items.push(value);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    #[test]
    fn test_segments() {
        assert!(segments("").is_empty());
        assert_eq!(segments("a"), vec!["a"]);
        assert_eq!(segments("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(segments("a..b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_sequence_index_is_canonical() {
        assert_eq!(sequence_index("0"), Some(0));
        assert_eq!(sequence_index("12"), Some(12));
        assert_eq!(sequence_index("01"), None);
        assert_eq!(sequence_index("00"), None);
        assert_eq!(sequence_index("+1"), None);
        assert_eq!(sequence_index("-1"), None);
        assert_eq!(sequence_index(""), None);
    }

    #[test]
    fn test_non_canonical_indices_miss() {
        let mut tree = parse_yaml("items: [a, b]").unwrap();

        assert_eq!(read(&tree, "items.01"), None);
        assert_eq!(read(&tree, "items.+1"), None);
        assert!(!exists(&tree, "items.+0", false));
        assert!(!exists(&tree, "items.01", true));

        let err = write(&mut tree, "items.01", TreeValue::from("z")).unwrap_err();
        assert_eq!(err.path(), "items");
        assert_eq!(err.key(), "01");
        assert!(write(&mut tree, "items.+1.x", TreeValue::from("z")).is_err());
        assert_eq!(tree, parse_yaml("items: [a, b]").unwrap());
    }

    #[test]
    fn test_read_empty_path_is_root() {
        let tree = parse_yaml("a: 1").unwrap();
        assert_eq!(read(&tree, ""), Some(&tree));
    }

    #[test]
    fn test_read_through_scalar_misses() {
        let tree = parse_yaml("a: 1").unwrap();
        assert_eq!(read(&tree, "a.b"), None);
        assert_eq!(read_or(&tree, "a.b", &TreeValue::from("x")), &TreeValue::from("x"));
    }

    #[test]
    fn test_read_sequence_index() {
        let tree = parse_yaml("items: [a, b]").unwrap();
        assert_eq!(read(&tree, "items.1"), Some(&TreeValue::from("b")));
        assert_eq!(read(&tree, "items.2"), None);
        assert_eq!(read(&tree, "items.x"), None);
    }

    #[test]
    fn test_read_record_fields() {
        let tree = TreeValue::from(Entity::new("Page").with_field("title", "Home"));
        assert_eq!(read(&tree, "title"), Some(&TreeValue::from("Home")));
        assert!(!exists(&tree, "body", true));
    }

    #[test]
    fn test_write_autovivifies() {
        let mut tree = TreeValue::empty_map();
        write(&mut tree, "a.b.c", TreeValue::from(1)).unwrap();
        assert_eq!(tree, parse_yaml("a: {b: {c: 1}}").unwrap());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let mut tree = parse_yaml("a: {x: 1}").unwrap();
        write(&mut tree, "a.y", TreeValue::from("v")).unwrap();
        assert_eq!(read(&tree, "a.y"), Some(&TreeValue::from("v")));
        assert_eq!(read(&tree, "a.x"), Some(&TreeValue::from(1)));
    }

    #[test]
    fn test_write_null_then_exists() {
        let mut tree = TreeValue::empty_map();
        write(&mut tree, "a.b", TreeValue::Null).unwrap();
        assert!(!exists(&tree, "a.b", false));
        assert!(exists(&tree, "a.b", true));
    }

    #[test]
    fn test_write_empty_path_replaces_tree() {
        let mut tree = parse_yaml("a: 1").unwrap();
        write(&mut tree, "", TreeValue::from("whole")).unwrap();
        assert_eq!(tree, TreeValue::from("whole"));
    }

    #[test]
    fn test_write_conflict_names_scalar_path() {
        let mut tree = parse_yaml("a: 1").unwrap();
        let err = write(&mut tree, "a.b", TreeValue::from(2)).unwrap_err();
        assert_eq!(err.path(), "a");
        assert_eq!(err.key(), "b");
        assert_eq!(read(&tree, "a"), Some(&TreeValue::from(1)));
    }

    #[test]
    fn test_write_conflict_on_intermediate_scalar() {
        let mut tree = parse_yaml("a: {b: text}").unwrap();
        let err = write(&mut tree, "a.b.c.d", TreeValue::from(2)).unwrap_err();
        assert_eq!(
            err,
            PathError::NotTraversable {
                path: "a.b".to_string(),
                key: "c".to_string()
            }
        );
    }

    #[test]
    fn test_write_into_scalar_root_fails() {
        let mut tree = TreeValue::from(true);
        let err = write(&mut tree, "a", TreeValue::from(1)).unwrap_err();
        assert_eq!(err.path(), "");
        assert_eq!(err.key(), "a");
    }

    #[test]
    fn test_write_vivifies_null() {
        let mut tree = parse_yaml("a: ~").unwrap();
        write(&mut tree, "a.b", TreeValue::from(1)).unwrap();
        assert_eq!(tree, parse_yaml("a: {b: 1}").unwrap());

        let mut root = TreeValue::Null;
        write(&mut root, "x", TreeValue::from(1)).unwrap();
        assert_eq!(root, parse_yaml("x: 1").unwrap());
    }

    #[test]
    fn test_write_sequence_replace_and_append() {
        let mut tree = parse_yaml("items: [a]").unwrap();
        write(&mut tree, "items.0", TreeValue::from("b")).unwrap();
        write(&mut tree, "items.1", TreeValue::from("c")).unwrap();
        write(&mut tree, "items.2.name", TreeValue::from("d")).unwrap();
        assert_eq!(tree, parse_yaml("items: [b, c, {name: d}]").unwrap());

        let err = write(&mut tree, "items.9", TreeValue::from("e")).unwrap_err();
        assert_eq!(err.path(), "items");
        assert_eq!(err.key(), "9");
    }

    #[test]
    fn test_write_below_record_creates_entity() {
        let mut tree = TreeValue::from(Entity::new("Page"));
        write(&mut tree, "meta.author", TreeValue::from("Ann")).unwrap();

        let meta = read(&tree, "meta").unwrap().as_record().unwrap();
        assert_eq!(meta.type_name(), Entity::GENERIC_TYPE);
        assert_eq!(read(&tree, "meta.author"), Some(&TreeValue::from("Ann")));
    }

    #[test]
    fn test_write_keeps_key_order() {
        let mut tree = parse_yaml("a: 1\nb: 2").unwrap();
        write(&mut tree, "a", TreeValue::from(3)).unwrap();
        let keys: Vec<&String> = tree.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
