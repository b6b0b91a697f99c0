//! Tree saving functionality.
//!
//! This module provides functions to serialize trees as YAML or JSON and to
//! save them to files with atomic write operations and optional backups.

use crate::config::{Config, OutputFormat};
use crate::document::node::{TreeNumber, TreeValue};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::value::{Tag, TaggedValue};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Saves a tree to a file with optional backup creation.
///
/// The format follows the target name: `*.json` and `*.json.gz` are written as
/// JSON, anything else as YAML. A target ending in `.gz` is gzip-compressed.
///
/// # Arguments
///
/// * `path` - The path where the file should be saved
/// * `tree` - The tree to serialize and save
/// * `config` - Configuration including indentation and backup settings
///
/// # Examples
///
/// ```no_run
/// use treequill::config::Config;
/// use treequill::document::parser::parse_yaml;
/// use treequill::file::saver::save_tree_file;
///
/// let tree = parse_yaml("name: Alice").unwrap();
/// save_tree_file("output.yaml", &tree, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing to the temp file fails
/// - Renaming the temp file to the target fails
///
/// # Atomic Write
///
/// The tree is written to a temporary file that is then renamed over the
/// target, so the target is never left partially written.
pub fn save_tree_file<P: AsRef<Path>>(path: P, tree: &TreeValue, config: &Config) -> Result<()> {
    let path = path.as_ref();

    // Determine if we should compress based on target filename
    let should_compress = path.to_string_lossy().ends_with(".gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let format = format_for_path(path);
    let mut text = serialize_tree(tree, format, config.indent_size)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    write_file_atomic(path, text.as_bytes(), should_compress)?;
    debug!(path = %path.display(), %format, compressed = should_compress, "saved tree");

    Ok(())
}

/// Serializes a tree to text in the given format.
///
/// JSON output is pretty-printed with `indent_size` spaces per level. YAML
/// output writes records as tagged mappings (`!TypeName`), so they load back
/// as records.
///
/// # Example
///
/// ```
/// use treequill::config::OutputFormat;
/// use treequill::document::parser::parse_yaml;
/// use treequill::file::saver::serialize_tree;
///
/// let tree = parse_yaml("a: [1, 2]").unwrap();
/// assert_eq!(serialize_tree(&tree, OutputFormat::Json, 0).unwrap(), "{\n\"a\": [\n1,\n2\n]\n}");
/// ```
pub fn serialize_tree(tree: &TreeValue, format: OutputFormat, indent_size: usize) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let indent = " ".repeat(indent_size);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buffer = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            tree.serialize(&mut serializer)
                .context("Failed to serialize tree as JSON")?;
            String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&to_yaml_value(tree)).context("Failed to serialize tree as YAML")
        }
    }
}

/// The output format implied by a file name, ignoring a trailing `.gz`.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> OutputFormat {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);
    if base.ends_with(".json") {
        OutputFormat::Json
    } else {
        OutputFormat::Yaml
    }
}

/// Converts a tree to a YAML value, tagging records with their type name.
fn to_yaml_value(value: &TreeValue) -> serde_yaml::Value {
    use serde_yaml::{Mapping, Value};

    match value {
        TreeValue::Null => Value::Null,
        TreeValue::Boolean(b) => Value::Bool(*b),
        TreeValue::Number(TreeNumber::Integer(i)) => Value::Number((*i).into()),
        TreeValue::Number(TreeNumber::Float(f)) => Value::Number((*f).into()),
        TreeValue::String(s) => Value::String(s.clone()),
        TreeValue::Array(items) => Value::Sequence(items.iter().map(to_yaml_value).collect()),
        TreeValue::Map(entries) => {
            let mut mapping = Mapping::new();
            for (key, item) in entries {
                mapping.insert(Value::String(key.clone()), to_yaml_value(item));
            }
            Value::Mapping(mapping)
        }
        TreeValue::Record(record) => {
            let mut mapping = Mapping::new();
            for name in record.field_names() {
                if let Some(item) = record.field(&name) {
                    mapping.insert(Value::String(name), to_yaml_value(item));
                }
            }
            // serde_yaml rejects empty tags
            let type_name = record.type_name().trim_start_matches('!');
            if type_name.is_empty() {
                return Value::Mapping(mapping);
            }
            Value::Tagged(Box::new(TaggedValue {
                tag: Tag::new(type_name),
                value: Value::Mapping(mapping),
            }))
        }
    }
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a file atomically, optionally compressing with gzip.
///
/// # Errors
///
/// Returns an error if:
/// - Creating the temp file fails
/// - Writing or compressing fails
/// - Renaming the temp file fails
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;
    Ok(())
}
