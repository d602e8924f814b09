// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static configuration source adapter.
//!
//! Holds baseline values compiled into the application: constants, and values
//! computed on demand (such as the current time).

use crate::adapters::handlers::{HandlerTable, Params};
use crate::domain::{ConfigKey, ConfigValue, Context, Result};
use crate::ports::ConfigSource;

/// Configuration source backed by an in-memory handler table.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::StaticSource;
/// use srcchain::domain::ConfigValue;
/// use srcchain::ports::ConfigSource;
///
/// let source = StaticSource::new()
///     .with_value("env", "PROD")
///     .with_handler("current_time", &[], |_| {
///         Ok(Some(ConfigValue::from(chrono::Utc::now())))
///     });
///
/// assert_eq!(source.get_str("env").unwrap(), Some(ConfigValue::from("PROD")));
/// assert!(source.get_str("current_time").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct StaticSource {
    table: HandlerTable,
}

impl StaticSource {
    /// Creates an empty static source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a static source from a prepared handler table.
    pub fn from_table(table: HandlerTable) -> Self {
        Self { table }
    }

    /// Adds a constant value.
    pub fn with_value(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.table = self.table.with_value(key, value);
        self
    }

    /// Adds a computed value whose handler accepts the given context parameters.
    pub fn with_handler<F>(mut self, key: impl Into<ConfigKey>, params: &[&str], handler: F) -> Self
    where
        F: Fn(&Params<'_>) -> Result<Option<ConfigValue>> + Send + Sync + 'static,
    {
        self.table = self.table.with_handler(key, params, handler);
        self
    }
}

impl ConfigSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn get_value(&self, key: &ConfigKey, context: Option<&Context>) -> Result<Option<ConfigValue>> {
        self.table.dispatch(self.name(), key, context)
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.table.keys())
    }
}
