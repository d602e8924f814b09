// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! `ConfigurationService` is the interface callers program against. A single
//! required method, [`ConfigurationService::resolve`], carries the full
//! resolution contract; the provided methods are shorthands for the common
//! request shapes.

use crate::domain::{ConfigValue, Context, Lookup, Result};

/// The main configuration service trait.
///
/// # Examples
///
/// ```rust
/// use srcchain::domain::{ConfigError, ConfigValue, ConfigurationService, Lookup, Result};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn resolve(&self, lookup: Lookup<'_>) -> Result<ConfigValue> {
///         if lookup.key().as_str() == "env" {
///             return Ok(ConfigValue::from("PROD"));
///         }
///         match lookup.default_value() {
///             Some(default) => Ok(default.clone()),
///             None => Err(ConfigError::not_found(
///                 lookup.key().as_str(),
///                 lookup.context().cloned(),
///                 lookup.is_secret(),
///             )),
///         }
///     }
/// }
///
/// let service = Fixed;
/// assert_eq!(service.get("env").unwrap(), "PROD");
/// assert_eq!(service.get_or("connection_timeout", 30).unwrap(), ConfigValue::from(30));
/// assert!(!service.has("missing").unwrap());
/// ```
pub trait ConfigurationService {
    /// Resolves a lookup.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigValue)` - the found value (after processing) or the default
    /// * `Err(ConfigError::ValueNotFound)` / `Err(ConfigError::SecretNotFound)` -
    ///   nothing was found and no default was given
    /// * any other `Err` - a source failed while being queried
    fn resolve(&self, lookup: Lookup<'_>) -> Result<ConfigValue>;

    /// Retrieves a regular value with no default and no context.
    fn get(&self, key: &str) -> Result<ConfigValue> {
        self.resolve(Lookup::new(key))
    }

    /// Retrieves a regular value, returning `default` verbatim when no source has it.
    ///
    /// Source failures are still reported.
    fn get_or(&self, key: &str, default: impl Into<ConfigValue>) -> Result<ConfigValue>
    where
        Self: Sized,
    {
        self.resolve(Lookup::new(key).with_default(default))
    }

    /// Retrieves a secret with no default and no context.
    fn get_secret(&self, key: &str) -> Result<ConfigValue> {
        self.resolve(Lookup::new(key).secret())
    }

    /// Retrieves a regular value, forwarding `context` to the sources.
    fn get_with_context(&self, key: &str, context: Context) -> Result<ConfigValue> {
        self.resolve(Lookup::new(key).with_context(context))
    }

    /// Checks whether any regular source has the key.
    ///
    /// A failing source is reported as an error rather than as `false`.
    fn has(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
