// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definitions.
//!
//! This module defines the two ports every source plugs into: [`ConfigSource`],
//! the plain key lookup, and [`SecretSource`], the capability tag a source
//! carries when it is trusted to answer secret-classified keys.

use crate::domain::{ConfigKey, ConfigValue, Context, Result};

/// A trait for configuration sources.
///
/// # Contract
///
/// - `Ok(Some(value))`: the source knows the key. Empty strings, `false`, `0`
///   and empty lists are all answers.
/// - `Ok(None)`: the source does not know the key. The configuration manager
///   moves on to the next source.
/// - `Err(_)`: the source itself failed (backend unreachable, corrupt data,
///   a required context parameter is missing). The configuration manager does
///   not retry or skip; the error reaches the caller unchanged.
///
/// Lookups must not have side effects visible to the caller. Implementations
/// may cache or initialize lazily behind interior mutability.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the configuration manager is shared
/// between threads without locking.
///
/// # Examples
///
/// ```rust
/// use srcchain::ports::ConfigSource;
/// use srcchain::domain::{ConfigKey, ConfigValue, Context, Result};
///
/// struct MySource;
///
/// impl ConfigSource for MySource {
///     fn name(&self) -> &str {
///         "my-source"
///     }
///
///     fn get_value(&self, key: &ConfigKey, _context: Option<&Context>) -> Result<Option<ConfigValue>> {
///         if key.as_str() == "app.name" {
///             Ok(Some(ConfigValue::from("MyApp")))
///         } else {
///             Ok(None)
///         }
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("app.name")])
///     }
/// }
///
/// let source = MySource;
/// assert!(source.get_str("app.name").unwrap().is_some());
/// assert!(source.get_str("app.version").unwrap().is_none());
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// Used for logging, error messages, and by value processors that need to
    /// know which kind of source produced a value.
    fn name(&self) -> &str;

    /// Retrieves the value for `key`, using `context` if the source needs
    /// parameters to compute it.
    fn get_value(&self, key: &ConfigKey, context: Option<&Context>)
        -> Result<Option<ConfigValue>>;

    /// Returns all keys this source can answer.
    ///
    /// For sources that compute values from parameters, a listed key may still
    /// require a context to resolve.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Retrieves a value for a key string without context.
    ///
    /// Convenience for `get_value(&ConfigKey::from(key), None)`.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get_value(&ConfigKey::from(key), None)
    }
}

/// Views any sized source as a `&dyn ConfigSource`.
///
/// Blanket-implemented for every [`ConfigSource`]; it lets the configuration
/// manager hand a secret source to a value processor that expects a plain
/// source.
pub trait AsConfigSource {
    /// Returns `self` as a plain configuration source.
    fn as_config_source(&self) -> &dyn ConfigSource;
}

impl<T: ConfigSource> AsConfigSource for T {
    fn as_config_source(&self) -> &dyn ConfigSource {
        self
    }
}

/// Marker for sources permitted to answer secret-classified lookups.
///
/// A secret lookup only ever consults sources carrying this tag, so a generic
/// source (static metadata, a YAML file) can never leak into a secret answer.
///
/// # Examples
///
/// ```rust
/// use srcchain::ports::{ConfigSource, SecretSource};
/// use srcchain::domain::{ConfigKey, ConfigValue, Context, Result};
///
/// struct Keyring;
///
/// impl ConfigSource for Keyring {
///     fn name(&self) -> &str { "keyring" }
///     fn get_value(&self, _key: &ConfigKey, _ctx: Option<&Context>) -> Result<Option<ConfigValue>> {
///         Ok(None)
///     }
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> { Ok(vec![]) }
/// }
///
/// impl SecretSource for Keyring {}
/// ```
pub trait SecretSource: ConfigSource + AsConfigSource {}
