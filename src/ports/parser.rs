// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! File-backed sources delegate format handling to a `ConfigParser`, which turns
//! raw file content into a flat table of typed values.

use crate::domain::{ConfigValue, Result};
use std::collections::HashMap;

/// A trait for parsing configuration files.
///
/// # Key Format
///
/// Nested mappings are flattened using dot notation, while sequences stay
/// intact as [`ConfigValue::List`]. A YAML document like:
///
/// ```yaml
/// database:
///   host: localhost
///   replicas: [a, b]
/// ```
///
/// parses into:
/// - `database.host` -> `"localhost"`
/// - `database.replicas` -> `["a", "b"]`
///
/// Entries with no value (YAML `~`) are left out so they read as absent.
///
/// # Examples
///
/// ```rust
/// use srcchain::ports::ConfigParser;
/// use srcchain::domain::{ConfigValue, Result};
/// use std::collections::HashMap;
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), ConfigValue::from(v.trim())))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["kv"]
///     }
/// }
///
/// let values = KeyValueParser.parse("env = PROD").unwrap();
/// assert_eq!(values.get("env"), Some(&ConfigValue::from("PROD")));
/// ```
pub trait ConfigParser {
    /// Parses configuration content into a flat key-value map.
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];
}
