// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! The environment is read once, when the source is constructed. A `.env` file
//! can be merged in as part of that construction; it never overrides a variable
//! that is already set in the process environment and it never modifies the
//! process environment itself.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Context, Result};
use crate::ports::{ConfigSource, SecretSource};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// Keys are the variable names exactly as they appear in the environment
/// (minus the prefix, if one is configured). Every value is a string; an empty
/// variable is a present, empty value.
///
/// The environment source is usually placed in both the regular and the secret
/// source lists, which is why it is also a [`SecretSource`].
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::EnvSource;
/// use srcchain::ports::ConfigSource;
/// use std::collections::HashMap;
///
/// // Snapshot of the whole process environment
/// let source = EnvSource::new();
///
/// // Only variables starting with "APP_", with the prefix stripped
/// let source = EnvSource::with_prefix("APP_");
///
/// // Fixed values, handy in tests
/// let source = EnvSource::with_values(HashMap::from([
///     ("env".to_string(), "DEV".to_string()),
/// ]));
/// assert_eq!(source.get_str("env").unwrap().unwrap().as_str(), Some("DEV"));
/// ```
#[derive(Debug, Clone)]
pub struct EnvSource {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Variables captured at construction
    values: HashMap<String, String>,
    /// The `.env` file merged into `values`, if any
    env_file: Option<PathBuf>,
}

impl EnvSource {
    /// Creates a source holding every variable of the process environment.
    pub fn new() -> Self {
        Self::capture(None)
    }

    /// Creates a source holding the variables starting with `prefix`.
    ///
    /// The prefix is stripped from the keys.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::capture(Some(prefix.into()))
    }

    /// Creates a source with pre-populated values instead of the process environment.
    ///
    /// **Note**: This method is primarily intended for testing.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            values,
            env_file: None,
        }
    }

    /// Creates a source from the process environment plus a `.env` file found
    /// in the current directory or one of its parents.
    ///
    /// A missing `.env` file is not an error; a malformed one is.
    pub fn load_dotenv() -> Result<Self> {
        let source = Self::new();
        match find_dotenv() {
            Some(path) => source.with_env_file(path),
            None => {
                tracing::debug!("No .env file found, using process environment only");
                Ok(source)
            }
        }
    }

    /// Merges the variables of a `.env` file at `path`.
    ///
    /// Variables already present (from the process environment or an earlier
    /// file) take precedence over the file's entries. The prefix filter applies
    /// to the file as well.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `ParseError` if a line
    /// cannot be parsed.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| match e {
            dotenvy::Error::Io(io) => ConfigError::IoError(io),
            other => dotenv_error(other),
        })?;

        let before = self.values.len();
        for item in iter {
            let (key, value) = item.map_err(dotenv_error)?;
            self.merge_file_entry(key, value);
        }

        tracing::debug!(
            "Merged {} new variables from {}",
            self.values.len() - before,
            path.display()
        );
        self.env_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// The `.env` file merged into this source, if any.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variable was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn capture(prefix: Option<String>) -> Self {
        let mut source = Self {
            prefix,
            values: HashMap::new(),
            env_file: None,
        };

        for (key, value) in env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                tracing::trace!("Skipping non UTF-8 environment variable");
                continue;
            };
            if let Some(key) = source.accept(key, value) {
                source.values.insert(key, value.to_string());
            }
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?})",
            source.values.len(),
            source.prefix
        );
        source
    }

    fn merge_file_entry(&mut self, key: String, value: String) {
        if let Some(key) = self.accept(&key, &value) {
            self.values.entry(key).or_insert(value);
        }
    }

    /// Applies size limits and prefix filtering, returning the key to store.
    fn accept(&self, key: &str, value: &str) -> Option<String> {
        // Validate input sizes to prevent DoS
        if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
            tracing::debug!(
                "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                key.len(),
                value.len(),
                MAX_ENV_KEY_LEN,
                MAX_ENV_VALUE_LEN
            );
            return None;
        }

        match &self.prefix {
            Some(prefix) => key.strip_prefix(prefix.as_str()).map(str::to_string),
            None => Some(key.to_string()),
        }
    }
}

/// Looks for `.env` in the current directory and then in each parent.
fn find_dotenv() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}

fn dotenv_error(err: dotenvy::Error) -> ConfigError {
    ConfigError::ParseError {
        message: format!("Failed to load .env file: {}", err),
        source: Some(Box::new(err)),
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get_value(&self, key: &ConfigKey, _context: Option<&Context>) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

impl SecretSource for EnvSource {}
