//! Stateful wrapper around one tree value.
//!
//! `DataTree` owns a single [`TreeValue`] for its lifetime and exposes the
//! [`crate::path`] operations as methods, plus a few conveniences for
//! checking many paths at once and mapping over list-valued paths.
//!
//! # Example
//!
//! ```
//! use treequill::document::tree::DataTree;
//! use treequill::document::node::TreeValue;
//!
//! let mut tree = DataTree::default();
//! tree.set("user.name", "Alice".into())
//!     .unwrap()
//!     .set("user.tags", TreeValue::Array(vec!["a".into(), "b".into()]))
//!     .unwrap();
//!
//! assert!(tree.has("user.name"));
//! assert!(tree.has_all(&["user.name", "user.tags"]));
//!
//! let upper = tree.map_over_list("user.tags", |tag| {
//!     TreeValue::from(tag.value().as_str().unwrap_or_default().to_uppercase())
//! });
//! assert_eq!(upper, vec![TreeValue::from("A"), TreeValue::from("B")]);
//! ```

use super::node::TreeValue;
use crate::path::{self, PathError};

/// A tree value owned by a wrapper with path-based accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTree {
    value: TreeValue,
}

/// A borrowed tree given either raw or wrapped.
///
/// Functions that accept "a tree or a wrapped tree" take `impl Into<TreeRef>`
/// and normalise to the raw value with [`TreeRef::value`] before traversal.
#[derive(Debug, Clone, Copy)]
pub enum TreeRef<'a> {
    Raw(&'a TreeValue),
    Wrapped(&'a DataTree),
}

impl<'a> TreeRef<'a> {
    pub fn value(self) -> &'a TreeValue {
        match self {
            TreeRef::Raw(value) => value,
            TreeRef::Wrapped(tree) => tree.value(),
        }
    }
}

impl<'a> From<&'a TreeValue> for TreeRef<'a> {
    fn from(value: &'a TreeValue) -> Self {
        TreeRef::Raw(value)
    }
}

impl<'a> From<&'a DataTree> for TreeRef<'a> {
    fn from(tree: &'a DataTree) -> Self {
        TreeRef::Wrapped(tree)
    }
}

impl DataTree {
    pub fn new(value: TreeValue) -> Self {
        Self { value }
    }

    /// Tests whether `path` resolves to a non-null value.
    pub fn has(&self, path: &str) -> bool {
        path::exists(&self.value, path, false)
    }

    /// Tests whether `path` resolves to any value, null included.
    pub fn has_allow_null(&self, path: &str) -> bool {
        path::exists(&self.value, path, true)
    }

    /// Returns the value at `path`. The empty path returns the whole value.
    pub fn get(&self, path: &str) -> Option<&TreeValue> {
        path::read(&self.value, path)
    }

    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a TreeValue) -> &'a TreeValue {
        path::read_or(&self.value, path, fallback)
    }

    /// Returns a wrapped copy of the sub-tree at `path`.
    pub fn get_tree(&self, path: &str) -> Option<DataTree> {
        self.get(path).cloned().map(DataTree::new)
    }

    /// Returns a wrapped copy of the sub-tree at `path`, or of `fallback`.
    pub fn get_tree_or(&self, path: &str, fallback: TreeValue) -> DataTree {
        self.get_tree(path)
            .unwrap_or_else(|| DataTree::new(fallback))
    }

    /// Stores `value` at `path`, creating intermediate containers as needed.
    ///
    /// The empty path replaces the whole value. Returns `self` for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotTraversable`] if the path runs through a scalar.
    pub fn set(&mut self, path: &str, value: TreeValue) -> Result<&mut Self, PathError> {
        path::write(&mut self.value, path, value)?;
        Ok(self)
    }

    pub fn value(&self) -> &TreeValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut TreeValue {
        &mut self.value
    }

    pub fn into_value(self) -> TreeValue {
        self.value
    }

    /// Tests that every path resolves to something other than null.
    pub fn has_all<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        self.has_all_with(paths, &TreeValue::Null, &[TreeValue::Null])
    }

    /// Tests that no path resolves to one of `empty_values`.
    ///
    /// Paths that cannot be followed resolve to `fallback`; values are
    /// compared with `==`.
    ///
    /// # Example
    ///
    /// ```
    /// use treequill::document::parser::parse_yaml;
    /// use treequill::document::tree::DataTree;
    /// use treequill::document::node::TreeValue;
    ///
    /// let tree = DataTree::new(parse_yaml("a: x\nb: ''").unwrap());
    /// let blank = [TreeValue::Null, TreeValue::from("")];
    ///
    /// assert!(tree.has_all_with(&["a"], &TreeValue::Null, &blank));
    /// assert!(!tree.has_all_with(&["a", "b"], &TreeValue::Null, &blank));
    /// ```
    pub fn has_all_with<S: AsRef<str>>(
        &self,
        paths: &[S],
        fallback: &TreeValue,
        empty_values: &[TreeValue],
    ) -> bool {
        paths
            .iter()
            .all(|path| !empty_values.contains(self.get_or(path.as_ref(), fallback)))
    }

    /// Applies `f` to each element of the list at `path`, eagerly.
    ///
    /// A value that is not a sequence is treated as a one-element list, and a
    /// path that cannot be followed as a list holding a single null. Each
    /// element is handed to `f` wrapped; a `DataTree` returned by `f` is
    /// unwrapped into its value, any other result is kept as is.
    pub fn map_over_list<F, R>(&self, path: &str, mut f: F) -> Vec<TreeValue>
    where
        F: FnMut(DataTree) -> R,
        R: Into<TreeValue>,
    {
        let items = match self.get(path) {
            Some(TreeValue::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
            None => vec![TreeValue::Null],
        };

        items
            .into_iter()
            .map(|item| f(DataTree::new(item)).into())
            .collect()
    }
}

impl From<TreeValue> for DataTree {
    fn from(value: TreeValue) -> Self {
        DataTree::new(value)
    }
}

impl From<DataTree> for TreeValue {
    fn from(tree: DataTree) -> Self {
        tree.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    fn sample() -> DataTree {
        DataTree::new(
            parse_yaml(
                "user:\n  name: Alice\n  email: ~\nitems:\n  - {id: 1}\n  - {id: 2}\nsingle: {id: 9}",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_empty_path_is_whole_value() {
        let mut tree = sample();
        assert_eq!(tree.get(""), Some(tree.value()));

        tree.set("", TreeValue::from(7)).unwrap();
        assert_eq!(tree.get(""), Some(&TreeValue::from(7)));
    }

    #[test]
    fn test_has_respects_null() {
        let tree = sample();
        assert!(tree.has("user.name"));
        assert!(!tree.has("user.email"));
        assert!(tree.has_allow_null("user.email"));
        assert!(!tree.has_allow_null("user.phone"));
    }

    #[test]
    fn test_get_tree_wraps_copy() {
        let tree = sample();
        let mut user = tree.get_tree("user").unwrap();
        user.set("name", "Bob".into()).unwrap();

        assert_eq!(user.get("name"), Some(&TreeValue::from("Bob")));
        assert_eq!(tree.get("user.name"), Some(&TreeValue::from("Alice")));
        assert_eq!(
            tree.get_tree_or("missing", TreeValue::from("fb")).into_value(),
            TreeValue::from("fb")
        );
    }

    #[test]
    fn test_set_chains_and_reports_conflicts() {
        let mut tree = sample();
        tree.set("a.b", 1.into()).unwrap().set("a.c", 2.into()).unwrap();
        assert_eq!(tree.get("a.c"), Some(&TreeValue::from(2)));

        let err = tree.set("user.name.first", "A".into()).unwrap_err();
        assert_eq!(err.path(), "user.name");
    }

    #[test]
    fn test_value_mut_edits_in_place() {
        let mut tree = sample();
        *tree.value_mut() = TreeValue::from("replaced");
        assert_eq!(tree.value(), &TreeValue::from("replaced"));
        assert!(!tree.has("user"));
    }

    #[test]
    fn test_has_all() {
        let tree = sample();
        assert!(tree.has_all(&["user.name", "items"]));
        assert!(!tree.has_all(&["user.name", "user.email"]));
        assert!(!tree.has_all(&["user.phone"]));
        assert!(tree.has_all::<&str>(&[]));
    }

    #[test]
    fn test_has_all_with_custom_fallback() {
        let tree = sample();
        let fallback = TreeValue::from("default");
        assert!(tree.has_all_with(&["user.phone"], &fallback, &[TreeValue::Null]));
    }

    #[test]
    fn test_map_over_list_collects_raw_results() {
        let tree = sample();
        let ids = tree.map_over_list("items", |item| item.get("id").cloned());
        assert_eq!(ids, vec![TreeValue::from(1), TreeValue::from(2)]);
    }

    #[test]
    fn test_map_over_list_unwraps_wrapped_results() {
        let tree = sample();
        let tagged = tree.map_over_list("items", |mut item| {
            item.set("seen", true.into()).unwrap();
            item
        });
        assert_eq!(tagged[0], parse_yaml("{id: 1, seen: true}").unwrap());
    }

    #[test]
    fn test_map_over_list_treats_scalars_as_single_element() {
        let tree = sample();
        let ids = tree.map_over_list("single", |item| item.get("id").cloned());
        assert_eq!(ids, vec![TreeValue::from(9)]);

        let missing = tree.map_over_list("nothing", |item| item.into_value());
        assert_eq!(missing, vec![TreeValue::Null]);
    }
}
