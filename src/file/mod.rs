//! File I/O operations for tree documents.
//!
//! This module provides functionality to load YAML/JSON trees, shape
//! definitions and templates from disk or stdin, and to save trees back to
//! files with atomic writes and optional backups.

pub mod loader;
pub mod saver;
