//! Configuration system for treequill.
//!
//! This module provides the configuration structure for treequill with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments by the binary.
//!
//! # Example
//!
//! ```
//! use treequill::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.erase_unknown);
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! ```
//!
//! # File format
//!
//! ```toml
//! erase_unknown = false
//! output_format = "json"
//!
//! [lineage]
//! Article = ["Node", "IPublishable"]
//! Node = ["ContentEntityBase"]
//! ```

use crate::document::lineage::TypeLineage;
use crate::template::Interpolator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Serialization format for trees written by treequill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{}'", other)),
        }
    }
}

/// Configuration for the treequill application.
///
/// All fields have sensible defaults via `Config::default()`.
///
/// # Fields
///
/// * `erase_unknown` - Remove placeholders that cannot be resolved (default: true)
/// * `output_format` - Format used when printing trees (default: yaml)
/// * `indent_size` - Spaces per indentation level for JSON output (default: 2)
/// * `create_backup` - Create .bak files before overwriting (default: false)
/// * `lineage` - Supertypes of record types loaded from tagged YAML (default: empty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remove placeholders that cannot be resolved
    #[serde(default = "default_erase_unknown")]
    pub erase_unknown: bool,

    /// Format used when printing trees
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Spaces per indentation level for JSON output
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Create .bak files before overwriting
    #[serde(default)]
    pub create_backup: bool,

    /// Direct supertypes per record type name
    #[serde(default)]
    pub lineage: TypeLineage,
}

/// Returns the default erase policy.
fn default_erase_unknown() -> bool {
    true
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `erase_unknown`: true
    /// * `output_format`: yaml
    /// * `indent_size`: 2
    /// * `create_backup`: false
    /// * `lineage`: empty
    fn default() -> Self {
        Self {
            erase_unknown: default_erase_unknown(),
            output_format: OutputFormat::default(),
            indent_size: default_indent_size(),
            create_backup: false,
            lineage: TypeLineage::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treequill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treequill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    ///
    /// A file that exists but cannot be read or parsed is reported with a
    /// warning before the defaults are used.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// An interpolator using this configuration's erase policy.
    pub fn interpolator(&self) -> Interpolator {
        Interpolator::new(self.erase_unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erase_unknown_default() {
        let config = Config::default();
        assert!(config.erase_unknown);
        assert!(config.interpolator().erase_unknown());
    }

    #[test]
    fn test_erase_unknown_can_be_disabled() {
        let config = Config {
            erase_unknown: false,
            ..Default::default()
        };
        assert!(!config.interpolator().erase_unknown());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("YAML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
