// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration manager: ordered first-match resolution over two source lists.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Context, Lookup, Result};
use crate::ports::{ConfigSource, SecretSource};
use std::fmt;
use std::sync::Arc;

/// Processor signature accepted by [`ConfigurationManager::get_with`].
pub type ProcessorFn<'a> = &'a dyn Fn(&dyn ConfigSource, ConfigValue) -> Result<ConfigValue>;

/// Resolves keys against an ordered list of regular sources and a separate
/// ordered list of secret sources.
///
/// The first source in list order that reports a value wins; a present value
/// is never skipped, even when it is `false`, `0` or empty. A secret lookup
/// consults only the secret list and a regular lookup only the regular list.
///
/// The manager is immutable after construction and can be shared between
/// threads.
///
/// # Examples
///
/// ```rust
/// use srcchain::prelude::*;
/// use srcchain::adapters::{StaticSource, VaultSource};
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let manager = ConfigurationManager::builder()
///     .with_source(Arc::new(StaticSource::new().with_value("env", "PROD")))
///     .with_secret_source(Arc::new(VaultSource::new().with_secret("password", "s3cret")))
///     .build()?;
///
/// assert_eq!(manager.get("env")?, "PROD");
/// assert_eq!(manager.get_secret("password")?, "s3cret");
/// assert!(manager.get("password").unwrap_err().is_not_found());
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationManager {
    config_sources: Vec<Arc<dyn ConfigSource>>,
    secret_sources: Vec<Arc<dyn SecretSource>>,
}

impl ConfigurationManager {
    /// Creates a manager over the given lists. List order is precedence order.
    ///
    /// The same source may appear in both lists.
    pub fn new(
        config_sources: Vec<Arc<dyn ConfigSource>>,
        secret_sources: Vec<Arc<dyn SecretSource>>,
    ) -> Self {
        Self {
            config_sources,
            secret_sources,
        }
    }

    /// Creates a new manager builder.
    pub fn builder() -> ConfigurationManagerBuilder {
        ConfigurationManagerBuilder::new()
    }

    /// The regular sources, in precedence order.
    pub fn config_sources(&self) -> &[Arc<dyn ConfigSource>] {
        &self.config_sources
    }

    /// The secret sources, in precedence order.
    pub fn secret_sources(&self) -> &[Arc<dyn SecretSource>] {
        &self.secret_sources
    }

    /// Names of the sources in one list, in precedence order.
    pub fn source_names(&self, secret: bool) -> Vec<&str> {
        if secret {
            self.secret_sources.iter().map(|s| s.name()).collect()
        } else {
            self.config_sources.iter().map(|s| s.name()).collect()
        }
    }

    /// Resolves a key with every option spelled out.
    ///
    /// Equivalent to building a [`Lookup`] and calling
    /// [`ConfigurationService::resolve`].
    ///
    /// ```rust
    /// use srcchain::prelude::*;
    /// use srcchain::adapters::StaticSource;
    /// use std::sync::Arc;
    ///
    /// # fn main() -> Result<()> {
    /// let manager = ConfigurationManager::builder()
    ///     .with_source(Arc::new(StaticSource::new().with_value("tags", "a, b")))
    ///     .build()?;
    ///
    /// let split = |_: &dyn ConfigSource, value: ConfigValue| Ok(value.split(","));
    /// let tags = manager.get_with("tags", None, false, None, Some(&split))?;
    /// assert_eq!(tags, ConfigValue::from(vec!["a", "b"]));
    ///
    /// let timeout = manager.get_with("connection_timeout", Some(30.into()), false, None, Some(&split))?;
    /// assert_eq!(timeout, ConfigValue::from(30));
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_with(
        &self,
        key: &str,
        default: Option<ConfigValue>,
        is_secret: bool,
        context: Option<Context>,
        processor: Option<ProcessorFn<'_>>,
    ) -> Result<ConfigValue> {
        let mut lookup = Lookup::new(key).with_secret(is_secret);
        if let Some(default) = default {
            lookup = lookup.with_default(default);
        }
        if let Some(context) = context {
            lookup = lookup.with_context(context);
        }
        if let Some(processor) = processor {
            lookup = lookup.with_processor(move |source, value| processor(source, value));
        }
        self.resolve(lookup)
    }
}

/// Returns the first source in `sources` reporting a value for `key`.
///
/// A failing source stops the search and its error is returned.
fn first_match<'s, I>(
    sources: I,
    key: &ConfigKey,
    context: Option<&Context>,
) -> Result<Option<(&'s dyn ConfigSource, ConfigValue)>>
where
    I: IntoIterator<Item = &'s dyn ConfigSource>,
{
    for source in sources {
        match source.get_value(key, context) {
            Ok(Some(value)) => return Ok(Some((source, value))),
            Ok(None) => {
                tracing::trace!("Source '{}' has no value for '{}'", source.name(), key);
            }
            Err(e) => {
                tracing::debug!(
                    "Error querying source '{}' for key '{}': {}",
                    source.name(),
                    key,
                    e
                );
                return Err(e);
            }
        }
    }
    Ok(None)
}

impl ConfigurationService for ConfigurationManager {
    fn resolve(&self, lookup: Lookup<'_>) -> Result<ConfigValue> {
        let Lookup {
            key,
            default,
            secret,
            context,
            processor,
        } = lookup;

        let found = if secret {
            first_match(
                self.secret_sources.iter().map(|s| (**s).as_config_source()),
                &key,
                context.as_ref(),
            )?
        } else {
            first_match(
                self.config_sources
                    .iter()
                    .map(|s| s.as_ref() as &dyn ConfigSource),
                &key,
                context.as_ref(),
            )?
        };

        if let Some((source, value)) = found {
            if secret {
                tracing::debug!("Secret '{}' found in source '{}'", key, source.name());
            } else {
                tracing::debug!("Key '{}' found in source '{}'", key, source.name());
            }
            return match processor {
                Some(process) => process(source, value),
                None => Ok(value),
            };
        }

        match default {
            Some(value) => {
                tracing::debug!("Key '{}' not found, using default", key);
                Ok(value)
            }
            None => Err(ConfigError::not_found(key.into_string(), context, secret)),
        }
    }
}

impl fmt::Debug for ConfigurationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("config_sources", &self.source_names(false))
            .field("secret_sources", &self.source_names(true))
            .finish()
    }
}

/// Builder for constructing a [`ConfigurationManager`].
///
/// Sources are queried in the order they are added.
///
/// # Examples
///
/// ```rust
/// use srcchain::service::ConfigurationManagerBuilder;
/// use srcchain::adapters::{EnvSource, StaticSource};
/// use std::sync::Arc;
///
/// # fn main() -> srcchain::domain::Result<()> {
/// let manager = ConfigurationManagerBuilder::new()
///     .with_env(EnvSource::new())
///     .with_source(Arc::new(StaticSource::new().with_value("env", "PROD")))
///     .build()?;
///
/// assert_eq!(manager.source_names(false), vec!["env", "static"]);
/// assert_eq!(manager.source_names(true), vec!["env"]);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigurationManagerBuilder {
    config_sources: Vec<Arc<dyn ConfigSource>>,
    secret_sources: Vec<Arc<dyn SecretSource>>,
}

impl ConfigurationManagerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a regular source.
    pub fn with_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.config_sources.push(source);
        self
    }

    /// Appends a secret source.
    pub fn with_secret_source(mut self, source: Arc<dyn SecretSource>) -> Self {
        self.secret_sources.push(source);
        self
    }

    /// Appends an environment source to both lists.
    #[cfg(feature = "env")]
    pub fn with_env(self, env: crate::adapters::EnvSource) -> Self {
        let env = Arc::new(env);
        self.with_source(env.clone()).with_secret_source(env)
    }

    /// Appends a YAML file as a regular source.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlFileSource;
        let source = YamlFileSource::from_file(path)?;
        Ok(self.with_source(Arc::new(source)))
    }

    /// Appends command-line arguments as a regular source.
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CliSource;
        self.with_source(Arc::new(CliSource::from_args(args)))
    }

    /// Builds the manager.
    pub fn build(self) -> Result<ConfigurationManager> {
        tracing::debug!(
            "Building configuration manager with {} regular and {} secret sources",
            self.config_sources.len(),
            self.secret_sources.len()
        );
        Ok(ConfigurationManager::new(
            self.config_sources,
            self.secret_sources,
        ))
    }
}
