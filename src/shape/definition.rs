//! Shape definitions and validation results.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field path to accepted type tags, checked in declaration order.
pub type Shape = IndexMap<String, String>;

/// Builds a shape from `(field, type_spec)` pairs.
pub fn shape<I, K, T>(rules: I) -> Shape
where
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
    T: Into<String>,
{
    rules
        .into_iter()
        .map(|(field, type_spec)| (field.into(), type_spec.into()))
        .collect()
}

/// A shape that must hold entirely, or alternatives of which one must hold.
///
/// In YAML or JSON a mapping reads as [`ShapeDefinition::All`] and a list of
/// mappings as [`ShapeDefinition::AnyOf`]:
///
/// ```
/// use treequill::shape::ShapeDefinition;
///
/// let all = ShapeDefinition::from_yaml("title: string\ncount: integer|double").unwrap();
/// assert!(matches!(all, ShapeDefinition::All(ref rules) if rules.len() == 2));
///
/// let any = ShapeDefinition::from_yaml("- {email: string}\n- {phone: string}").unwrap();
/// assert!(matches!(any, ShapeDefinition::AnyOf(ref variants) if variants.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeDefinition {
    All(Shape),
    AnyOf(Vec<Shape>),
}

impl ShapeDefinition {
    /// Parses a shape definition from YAML (or JSON) text.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("Failed to parse shape definition")
    }
}

impl From<Shape> for ShapeDefinition {
    fn from(shape: Shape) -> Self {
        ShapeDefinition::All(shape)
    }
}

impl From<Vec<Shape>> for ShapeDefinition {
    fn from(variants: Vec<Shape>) -> Self {
        ShapeDefinition::AnyOf(variants)
    }
}

/// Outcome of a shape check.
///
/// `failed_exists` lists fields that are missing or null, `failed_types`
/// fields whose value has none of the accepted types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub result: bool,
    pub failed_types: Vec<String>,
    pub failed_exists: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no failures.
    pub fn passed() -> Self {
        Self {
            result: true,
            failed_types: Vec::new(),
            failed_exists: Vec::new(),
        }
    }

    pub(crate) fn fail_exists(&mut self, field: &str) {
        self.result = false;
        self.failed_exists.push(field.to_string());
    }

    pub(crate) fn fail_type(&mut self, field: &str) {
        self.result = false;
        self.failed_types.push(field.to_string());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::passed()
    }
}
