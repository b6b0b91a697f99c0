//! Runtime type classification and compatibility.

use crate::document::node::{TreeNumber, TreeValue};
use crate::document::record::Record;
use indexmap::IndexSet;

/// The runtime classification of a tree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Integer,
    Double,
    Boolean,
    /// Sequences and mappings alike
    Array,
    /// Records
    Object,
    Null,
}

impl TypeTag {
    pub fn of(value: &TreeValue) -> Self {
        match value {
            TreeValue::String(_) => TypeTag::String,
            TreeValue::Number(TreeNumber::Integer(_)) => TypeTag::Integer,
            TreeValue::Number(TreeNumber::Float(_)) => TypeTag::Double,
            TreeValue::Boolean(_) => TypeTag::Boolean,
            TreeValue::Array(_) | TreeValue::Map(_) => TypeTag::Array,
            TreeValue::Record(_) => TypeTag::Object,
            TreeValue::Null => TypeTag::Null,
        }
    }

    /// The canonical tag name.
    pub fn name(self) -> &'static str {
        self.names()[0]
    }

    /// Every tag name that selects this classification, canonical name first.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            TypeTag::String => &["string"],
            TypeTag::Integer => &["integer"],
            TypeTag::Double => &["double", "float"],
            TypeTag::Boolean => &["boolean", "bool"],
            TypeTag::Array => &["array"],
            TypeTag::Object => &["object"],
            TypeTag::Null => &["null", "NULL"],
        }
    }

    fn accepted_by(self, accepted: &[&str]) -> bool {
        self.names().iter().any(|name| accepted.contains(name))
    }
}

/// A record's own type name followed by all of its supertypes.
pub fn associated_types(record: &dyn Record) -> IndexSet<String> {
    let mut types = IndexSet::new();
    types.insert(record.type_name().to_string());
    types.extend(record.supertypes());
    types
}

/// Drops the first character of a tag, e.g. the `I` of `IComparable`.
fn strip_marker(tag: &str) -> &str {
    let mut chars = tag.chars();
    chars.next();
    chars.as_str()
}

/// Tests whether `value` matches any tag of the `|`-separated `type_spec`.
///
/// # Example
///
/// ```
/// use treequill::document::node::TreeValue;
/// use treequill::document::record::Entity;
/// use treequill::shape::is_from_type;
///
/// assert!(is_from_type("string|integer", &TreeValue::from(5)));
/// assert!(is_from_type("double", &TreeValue::from(5)));
/// assert!(!is_from_type("integer", &TreeValue::from(5.0)));
///
/// let node = TreeValue::from(Entity::new("Article").with_supertypes(["Node", "Comparable"]));
/// assert!(is_from_type("Node", &node));
/// assert!(is_from_type("IComparable", &node));
/// ```
pub fn is_from_type(type_spec: &str, value: &TreeValue) -> bool {
    let accepted: Vec<&str> = type_spec.split('|').collect();
    let tag = TypeTag::of(value);

    if tag.accepted_by(&accepted) {
        return true;
    }
    if tag == TypeTag::Integer && TypeTag::Double.accepted_by(&accepted) {
        return true;
    }
    if let TreeValue::Record(record) = value {
        let associated = associated_types(record.as_ref());
        return accepted
            .iter()
            .any(|name| associated.contains(*name) || associated.contains(strip_marker(name)));
    }
    false
}
