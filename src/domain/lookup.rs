// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup requests.
//!
//! A [`Lookup`] bundles everything a caller can say about one resolution:
//! the key, an optional default, whether the key is secret, an optional
//! context for the sources, and an optional value processor.

use crate::domain::{ConfigKey, ConfigValue, Context, Result};
use crate::ports::ConfigSource;
use std::fmt;

/// Post-retrieval transformation applied to a found value.
///
/// Receives the source that produced the value and the value itself. It is
/// never applied to defaults.
pub type ValueProcessor<'a> =
    Box<dyn FnOnce(&dyn ConfigSource, ConfigValue) -> Result<ConfigValue> + 'a>;

/// A single resolution request.
///
/// # Examples
///
/// ```
/// use srcchain::domain::{Context, Lookup};
///
/// let lookup = Lookup::new("all_columns")
///     .with_context(Context::new().with("table_id", "t1"))
///     .with_processor(|_source, value| Ok(value));
///
/// assert_eq!(lookup.key().as_str(), "all_columns");
/// assert!(!lookup.is_secret());
/// ```
pub struct Lookup<'a> {
    pub(crate) key: ConfigKey,
    pub(crate) default: Option<ConfigValue>,
    pub(crate) secret: bool,
    pub(crate) context: Option<Context>,
    pub(crate) processor: Option<ValueProcessor<'a>>,
}

impl<'a> Lookup<'a> {
    /// Creates a lookup for a regular (non-secret) key with no default.
    pub fn new(key: impl Into<ConfigKey>) -> Self {
        Self {
            key: key.into(),
            default: None,
            secret: false,
            context: None,
            processor: None,
        }
    }

    /// Sets the value returned verbatim when no source has the key.
    pub fn with_default(mut self, default: impl Into<ConfigValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the key as secret, routing the lookup to secret sources only.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Sets the secret flag explicitly.
    pub fn with_secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    /// Sets the context forwarded to every queried source.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the processor applied to a found value.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::Lookup;
    ///
    /// // Environment variables only carry flat strings; split them into lists.
    /// let lookup = Lookup::new("all_columns").with_processor(|source, value| {
    ///     Ok(if source.name() == "env" { value.split(",") } else { value })
    /// });
    /// # let _ = lookup;
    /// ```
    pub fn with_processor<F>(mut self, processor: F) -> Self
    where
        F: FnOnce(&dyn ConfigSource, ConfigValue) -> Result<ConfigValue> + 'a,
    {
        self.processor = Some(Box::new(processor));
        self
    }

    /// The requested key.
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// The default, if any.
    pub fn default_value(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    /// Whether the key is secret.
    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// The context, if any.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Whether a processor is attached.
    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }
}

impl fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("secret", &self.secret)
            .field("context", &self.context)
            .field("processor", &self.processor.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
