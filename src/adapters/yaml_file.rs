// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration source adapter.
//!
//! The file is read and parsed once, at construction. Nested mappings are
//! flattened into dotted keys; sequences become list values.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Context, Result};
use crate::ports::{ConfigParser, ConfigSource};
use directories::ProjectDirs;
use serde_yaml::Value as Yaml;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::YamlParser;
/// use srcchain::domain::ConfigValue;
/// use srcchain::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml_content = "database:\n  host: localhost\n  port: 5432";
/// let result = parser.parse(yaml_content).unwrap();
/// assert_eq!(result.get("database.host"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(result.get("database.port"), Some(&ConfigValue::Integer(5432)));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Flattens nested mappings into `result` using dot notation keys.
    fn flatten_yaml(value: &Yaml, prefix: &str, result: &mut HashMap<String, ConfigValue>) {
        match value {
            Yaml::Mapping(map) => {
                for (key, val) in map {
                    if let Some(key_str) = key.as_str() {
                        let new_prefix = if prefix.is_empty() {
                            key_str.to_string()
                        } else {
                            format!("{}.{}", prefix, key_str)
                        };
                        Self::flatten_yaml(val, &new_prefix, result);
                    }
                }
            }
            Yaml::Tagged(tagged) => Self::flatten_yaml(&tagged.value, prefix, result),
            other => {
                if let Some(converted) = Self::convert(other) {
                    result.insert(prefix.to_string(), converted);
                }
            }
        }
    }

    /// Converts a YAML node into a value, keeping its structure. Null is absent.
    fn convert(value: &Yaml) -> Option<ConfigValue> {
        match value {
            Yaml::Null => None,
            Yaml::Bool(b) => Some(ConfigValue::Bool(*b)),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Integer(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            Yaml::String(s) => Some(ConfigValue::String(s.clone())),
            Yaml::Sequence(seq) => Some(ConfigValue::List(
                seq.iter().filter_map(Self::convert).collect(),
            )),
            Yaml::Mapping(map) => {
                let entries: BTreeMap<String, ConfigValue> = map
                    .iter()
                    .filter_map(|(k, v)| Some((k.as_str()?.to_string(), Self::convert(v)?)))
                    .collect();
                Some(ConfigValue::Map(entries))
            }
            Yaml::Tagged(tagged) => Self::convert(&tagged.value),
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
        let value: Yaml = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

        let mut result = HashMap::new();
        match &value {
            Yaml::Null => {}
            Yaml::Mapping(_) => Self::flatten_yaml(&value, "", &mut result),
            other => {
                return Err(ConfigError::ParseError {
                    message: format!(
                        "YAML configuration must be a mapping at the top level, found {}",
                        yaml_kind(other)
                    ),
                    source: None,
                })
            }
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

fn yaml_kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn source_error(message: String, cause: Option<std::io::Error>) -> ConfigError {
    ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message,
        source: cause.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

/// Reads a file after checking it against [`MAX_YAML_FILE_SIZE`].
fn read_limited(path: &Path) -> Result<String> {
    let len = fs::metadata(path)
        .map_err(|e| source_error(format!("Failed to read file metadata: {}", display_name(path)), Some(e)))?
        .len();
    if len > MAX_YAML_FILE_SIZE {
        return Err(source_error(
            format!("Configuration file too large: {} bytes (max {} bytes)", len, MAX_YAML_FILE_SIZE),
            None,
        ));
    }
    fs::read_to_string(path)
        .map_err(|e| source_error(format!("Failed to read configuration file: {}", display_name(path)), Some(e)))
}

/// Configuration source adapter for YAML files.
///
/// # Examples
///
/// ```rust,no_run
/// use srcchain::adapters::YamlFileSource;
/// use srcchain::ports::ConfigSource;
///
/// // Load from a specific file
/// let source = YamlFileSource::from_file("/path/to/config.yaml").unwrap();
///
/// // Load from default OS location
/// let source = YamlFileSource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Parsed configuration values
    values: HashMap<String, ConfigValue>,
}

impl YamlFileSource {
    /// Creates a new YAML file source from a specific file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref();

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path.canonicalize().map_err(|e| {
            source_error(format!("Invalid or inaccessible path: {}", display_name(file_path)), Some(e))
        })?;

        let content = read_limited(&canonical_path)?;
        let values = YamlParser::new().parse(&content)?;
        tracing::debug!(
            "Loaded {} keys from {}",
            values.len(),
            canonical_path.display()
        );

        Ok(Self {
            file_path: canonical_path,
            values,
        })
    }

    /// Creates a new YAML file source from `config.yaml` in the OS-appropriate
    /// configuration directory for the application.
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, "config.yaml")
    }

    /// Creates a new YAML file source with a custom file name in the default location.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name)
            .ok_or_else(|| source_error("Failed to determine project directories".to_string(), None))?;

        Self::from_file(proj_dirs.config_dir().join(filename))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for YamlFileSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn get_value(&self, key: &ConfigKey, _context: Option<&Context>) -> Result<Option<ConfigValue>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
