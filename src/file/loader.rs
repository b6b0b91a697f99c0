//! Document loading functionality.
//!
//! This module provides functions to load trees from files or stdin, and to
//! read the shape definitions and templates the command-line tool works with.
//! Files ending in `.gz` are decompressed transparently.

use crate::document::lineage::TypeLineage;
use crate::document::node::TreeValue;
use crate::document::parser::{parse_json, parse_yaml_with};
use crate::shape::ShapeDefinition;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and parses a YAML or JSON file from the filesystem.
///
/// Files named `*.json` (optionally `*.json.gz`) are parsed as JSON; anything
/// else is parsed as YAML, with tagged mappings resolved through `lineage`.
///
/// # Examples
///
/// ```no_run
/// use treequill::document::lineage::TypeLineage;
/// use treequill::file::loader::load_tree_file;
///
/// let tree = load_tree_file("config.yaml", &TypeLineage::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip data
/// - The contents are not valid YAML/JSON
pub fn load_tree_file<P: AsRef<Path>>(path: P, lineage: &TypeLineage) -> Result<TreeValue> {
    let path_ref = path.as_ref();
    let content = load_text_file(path_ref)?;

    debug!(path = %path_ref.display(), bytes = content.len(), "loaded document");

    let parsed = if determine_json_format(path_ref) {
        parse_json(&content)
    } else {
        parse_yaml_with(&content, lineage)
    };
    parsed.with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads and parses a tree from standard input.
///
/// Gzip input is detected by its magic bytes. JSON is tried first, then YAML.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is neither valid JSON nor valid YAML
pub fn load_tree_from_stdin(lineage: &TypeLineage) -> Result<TreeValue> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    if let Ok(tree) = parse_json(&content) {
        return Ok(tree);
    }

    parse_yaml_with(&content, lineage)
        .context("Failed to parse stdin: input is neither valid JSON nor valid YAML")
}

/// Loads a shape definition (a mapping or a list of mappings) from a file.
pub fn load_shape_file<P: AsRef<Path>>(path: P) -> Result<ShapeDefinition> {
    let path_ref = path.as_ref();
    let content = load_text_file(path_ref)?;
    ShapeDefinition::from_yaml(&content)
        .with_context(|| format!("Invalid shape file {}", path_ref.display()))
}

/// Reads a text file, decompressing it if its name ends in `.gz`.
pub fn load_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_gzipped {
        read_gzipped_file(path_ref)
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))
    }
}

/// Determines if a file is JSON based on its name.
///
/// Handles the .gz suffix:
/// - `data.json` → true
/// - `data.json.gz` → true
/// - `data.yaml.gz` → false
fn determine_json_format<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();

    // Remove .gz suffix if present
    let base = if let Some(stripped) = path_str.strip_suffix(".gz") {
        stripped
    } else {
        &path_str
    };

    base.ends_with(".json")
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
