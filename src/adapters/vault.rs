// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault secret source adapter.
//!
//! Keeps secrets as `secrecy::SecretString` so they stay redacted in `Debug`
//! output and are only exposed at the moment a lookup returns them.

use crate::domain::{ConfigKey, ConfigValue, Context, Result};
use crate::ports::{ConfigSource, SecretSource};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Secret source answering from a set of vault entries.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::VaultSource;
/// use srcchain::ports::ConfigSource;
///
/// let vault = VaultSource::new().with_secret("password", "regergerg");
/// let value = vault.get_str("password").unwrap().unwrap();
/// assert_eq!(value.as_str(), Some("regergerg"));
///
/// // Secrets never show up in debug output.
/// assert!(!format!("{:?}", vault).contains("regergerg"));
/// ```
#[derive(Debug, Default)]
pub struct VaultSource {
    secrets: HashMap<String, SecretString>,
}

impl VaultSource {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a secret.
    pub fn with_secret(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets
            .insert(key.into(), SecretString::from(secret.into()));
        self
    }

    /// Adds several secrets.
    pub fn with_secrets<I, K, V>(self, secrets: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        secrets
            .into_iter()
            .fold(self, |vault, (k, v)| vault.with_secret(k, v))
    }

    /// Number of stored secrets.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Returns `true` if the vault holds no secrets.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl ConfigSource for VaultSource {
    fn name(&self) -> &str {
        "vault"
    }

    fn get_value(&self, key: &ConfigKey, _context: Option<&Context>) -> Result<Option<ConfigValue>> {
        Ok(self
            .secrets
            .get(key.as_str())
            .map(|secret| ConfigValue::from(secret.expose_secret())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.secrets.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

impl SecretSource for VaultSource {}
