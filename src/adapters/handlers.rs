// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key to handler dispatch for computed sources.
//!
//! A [`HandlerTable`] maps each supported key to a handler function together
//! with the names of the context parameters that handler accepts. Dispatch
//! narrows the caller's context to those names before invoking the handler, so
//! callers may pass a context carrying more than any single handler uses.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Context, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Signature of a handler.
pub type HandlerFn = dyn Fn(&Params<'_>) -> Result<Option<ConfigValue>> + Send + Sync;

/// The parameters visible to one handler invocation.
///
/// Only the parameters the handler declared are present.
pub struct Params<'a> {
    source_name: &'a str,
    key: &'a ConfigKey,
    values: Context,
}

impl<'a> Params<'a> {
    /// Returns a parameter if the caller supplied it.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Returns a parameter, failing with [`ConfigError::MissingParameter`] if absent.
    pub fn require(&self, name: &str) -> Result<&ConfigValue> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::MissingParameter {
                source_name: self.source_name.to_string(),
                key: self.key.to_string(),
                parameter: name.to_string(),
            })
    }

    /// Returns a string parameter, failing if it is absent or not a string.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| {
            ConfigError::incompatible_type(name, "string", value.type_name())
        })
    }

    /// Number of parameters visible to the handler.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the handler sees no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The key being resolved.
    pub fn key(&self) -> &ConfigKey {
        self.key
    }
}

struct Handler {
    params: Vec<String>,
    func: Box<HandlerFn>,
}

/// Explicit mapping from key to handler.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::HandlerTable;
/// use srcchain::domain::{ConfigKey, ConfigValue, Context};
///
/// let table = HandlerTable::new()
///     .with_value("env", "PROD")
///     .with_handler("greeting", &["name"], |params| {
///         let name = params.require_str("name")?;
///         Ok(Some(ConfigValue::from(format!("hello {}", name))))
///     });
///
/// let ctx = Context::new().with("name", "ada").with("unused", 1);
/// let value = table
///     .dispatch("demo", &ConfigKey::from("greeting"), Some(&ctx))
///     .unwrap();
/// assert_eq!(value, Some(ConfigValue::from("hello ada")));
///
/// // Unknown keys are absent, not errors.
/// assert!(table.dispatch("demo", &ConfigKey::from("nope"), None).unwrap().is_none());
/// ```
#[derive(Default)]
pub struct HandlerTable {
    handlers: BTreeMap<ConfigKey, Handler>,
}

impl HandlerTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler accepting the given context parameters.
    ///
    /// Registering the same key twice replaces the earlier handler.
    pub fn with_handler<F>(mut self, key: impl Into<ConfigKey>, params: &[&str], handler: F) -> Self
    where
        F: Fn(&Params<'_>) -> Result<Option<ConfigValue>> + Send + Sync + 'static,
    {
        self.handlers.insert(
            key.into(),
            Handler {
                params: params.iter().map(|p| p.to_string()).collect(),
                func: Box::new(handler),
            },
        );
        self
    }

    /// Registers a constant value.
    pub fn with_value(self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        let value = value.into();
        self.with_handler(key, &[], move |_| Ok(Some(value.clone())))
    }

    /// Invokes the handler registered for `key`.
    ///
    /// Returns `Ok(None)` if no handler is registered. Errors raised by the
    /// handler are returned unchanged.
    pub fn dispatch(
        &self,
        source_name: &str,
        key: &ConfigKey,
        context: Option<&Context>,
    ) -> Result<Option<ConfigValue>> {
        let Some(handler) = self.handlers.get(key) else {
            return Ok(None);
        };

        let values = match context {
            Some(ctx) => ctx.filtered(handler.params.as_slice()),
            None => Context::new(),
        };
        let params = Params {
            source_name,
            key,
            values,
        };
        (handler.func)(&params)
    }

    /// Returns `true` if a handler is registered for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Returns the declared parameter names for `key`.
    pub fn params(&self, key: &str) -> Option<&[String]> {
        self.handlers.get(key).map(|h| h.params.as_slice())
    }

    /// Returns every registered key in sorted order.
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.handlers.keys().cloned().collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(k, h)| (k.as_str(), &h.params)))
            .finish()
    }
}
