//! Shape checks over trees.

use super::definition::{Shape, ShapeDefinition, ValidationResult};
use super::types::is_from_type;
use crate::document::tree::TreeRef;
use crate::path;
use tracing::debug;

/// Checks every rule of `shape` against `data`.
///
/// A field that is missing or null is recorded in `failed_exists`; a present
/// field whose value matches none of the accepted tags in `failed_types`.
/// All rules are evaluated, in declaration order.
///
/// # Example
///
/// ```
/// use treequill::document::parser::parse_yaml;
/// use treequill::shape::{check_requirements, shape};
///
/// let data = parse_yaml("title: Hello\nviews: many").unwrap();
/// let outcome = check_requirements(
///     &shape([("title", "string"), ("views", "integer"), ("author.name", "string")]),
///     &data,
/// );
///
/// assert!(!outcome.result);
/// assert_eq!(outcome.failed_types, vec!["views"]);
/// assert_eq!(outcome.failed_exists, vec!["author.name"]);
/// ```
pub fn check_requirements<'a>(shape: &Shape, data: impl Into<TreeRef<'a>>) -> ValidationResult {
    let tree = data.into().value();
    let mut outcome = ValidationResult::passed();

    for (field, type_spec) in shape {
        match path::read(tree, field).filter(|value| !value.is_null()) {
            Some(value) => {
                if !is_from_type(type_spec, value) {
                    outcome.fail_type(field);
                }
            }
            None => outcome.fail_exists(field),
        }
    }

    if !outcome.result {
        debug!(
            failed_types = ?outcome.failed_types,
            failed_exists = ?outcome.failed_exists,
            "shape check failed"
        );
    }
    outcome
}

/// Checks `data` against a single shape or a list of alternatives.
///
/// Alternatives are tried in order and the first passing result is returned;
/// if none passes, the result of the last one is. An empty list passes.
pub fn check_full_requirements<'a>(
    definition: &ShapeDefinition,
    data: impl Into<TreeRef<'a>>,
) -> ValidationResult {
    let data = data.into();
    match definition {
        ShapeDefinition::All(shape) => check_requirements(shape, data),
        ShapeDefinition::AnyOf(variants) => {
            let mut outcome = ValidationResult::passed();
            for (index, variant) in variants.iter().enumerate() {
                outcome = check_requirements(variant, data);
                if outcome.result {
                    debug!(variant = index, "shape alternative matched");
                    break;
                }
            }
            outcome
        }
    }
}
