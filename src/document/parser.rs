//! YAML and JSON parsing into tree values.
//!
//! This module converts `serde_yaml` and `serde_json` documents into
//! [`TreeValue`]s. Mapping order is preserved. Tagged YAML mappings become
//! [`Entity`](super::record::Entity) records: the tag names the type and a
//! [`TypeLineage`] supplies its supertypes.
//!
//! # Example
//!
//! ```
//! use treequill::document::lineage::TypeLineage;
//! use treequill::document::parser::parse_yaml_with;
//!
//! let mut lineage = TypeLineage::new();
//! lineage.declare("Article", ["Node"]);
//!
//! let tree = parse_yaml_with("post: !Article {title: Hello}", &lineage).unwrap();
//! let post = tree.as_map().unwrap()["post"].as_record().unwrap();
//! assert_eq!(post.type_name(), "Article");
//! assert_eq!(post.supertypes(), vec!["Node"]);
//! ```

use super::lineage::TypeLineage;
use super::node::{TreeNumber, TreeValue};
use super::record::Record;
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use tracing::trace;

/// Parses a YAML (or JSON) document into a tree.
///
/// Tagged mappings become records with no supertypes; use
/// [`parse_yaml_with`] to attach a lineage.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or uses a mapping key that
/// is not a scalar.
pub fn parse_yaml(source: &str) -> Result<TreeValue> {
    parse_yaml_with(source, &TypeLineage::default())
}

/// Parses a YAML document, resolving record supertypes through `lineage`.
pub fn parse_yaml_with(source: &str, lineage: &TypeLineage) -> Result<TreeValue> {
    let value: YamlValue = serde_yaml::from_str(source).context("Failed to parse YAML")?;
    from_yaml_value(value, lineage)
}

/// Parses a JSON document into a tree, keeping key order.
///
/// # Example
///
/// ```
/// use treequill::document::parser::parse_json;
///
/// assert!(parse_json(r#"{"a": [1, 2.5, null]}"#).is_ok());
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(source: &str) -> Result<TreeValue> {
    let value: JsonValue = serde_json::from_str(source).context("Failed to parse JSON")?;
    Ok(from_json_value(value))
}

/// Interprets a command-line value as a YAML scalar or flow collection,
/// falling back to a plain string.
///
/// `"42"` becomes an integer, `"[1, 2]"` a sequence and `"hello world"` a string.
/// Blank text stays a string; use `~` or `null` for null.
pub fn parse_value_literal(text: &str) -> TreeValue {
    if text.trim().is_empty() {
        return TreeValue::String(text.to_string());
    }
    match parse_yaml(text) {
        Ok(value) => value,
        Err(_) => TreeValue::String(text.to_string()),
    }
}

/// Converts a `serde_yaml::Value` into a tree value.
pub fn from_yaml_value(value: YamlValue, lineage: &TypeLineage) -> Result<TreeValue> {
    let converted = match value {
        YamlValue::Null => TreeValue::Null,
        YamlValue::Bool(b) => TreeValue::Boolean(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                TreeValue::Number(TreeNumber::Integer(i))
            } else if let Some(f) = n.as_f64() {
                TreeValue::Number(TreeNumber::Float(f))
            } else {
                bail!("Unsupported YAML number: {}", n);
            }
        }
        YamlValue::String(s) => TreeValue::String(s),
        YamlValue::Sequence(items) => TreeValue::Array(
            items
                .into_iter()
                .map(|item| from_yaml_value(item, lineage))
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => TreeValue::Map(convert_mapping(mapping, lineage)?),
        YamlValue::Tagged(tagged) => {
            let type_name = tagged.tag.to_string().trim_start_matches('!').to_string();
            match tagged.value {
                YamlValue::Mapping(mapping) if type_name.is_empty() => {
                    trace!("non-specific tag on mapping, keeping it untyped");
                    TreeValue::Map(convert_mapping(mapping, lineage)?)
                }
                YamlValue::Mapping(mapping) => {
                    let mut entity = lineage.entity(&type_name);
                    for (key, field) in convert_mapping(mapping, lineage)? {
                        entity.set_field(&key, field);
                    }
                    TreeValue::from(entity)
                }
                other => {
                    trace!(tag = %type_name, "ignoring tag on non-mapping value");
                    from_yaml_value(other, lineage)?
                }
            }
        }
    };
    Ok(converted)
}

fn convert_mapping(
    mapping: serde_yaml::Mapping,
    lineage: &TypeLineage,
) -> Result<IndexMap<String, TreeValue>> {
    let mut entries = IndexMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        entries.insert(mapping_key(key)?, from_yaml_value(value, lineage)?);
    }
    Ok(entries)
}

/// Scalar keys are stringified; collection keys are rejected.
fn mapping_key(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok(String::new()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            bail!("Unsupported mapping key: only scalar keys can be addressed by a path")
        }
    }
}

/// Converts a `serde_json::Value` into a tree value.
pub fn from_json_value(value: JsonValue) -> TreeValue {
    match value {
        JsonValue::Null => TreeValue::Null,
        JsonValue::Bool(b) => TreeValue::Boolean(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => TreeValue::Number(TreeNumber::Integer(i)),
            None => TreeValue::Number(TreeNumber::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::String(s) => TreeValue::String(s),
        JsonValue::Array(items) => {
            TreeValue::Array(items.into_iter().map(from_json_value).collect())
        }
        JsonValue::Object(map) => TreeValue::Map(
            map.into_iter()
                .map(|(key, value)| (key, from_json_value(value)))
                .collect(),
        ),
    }
}
