// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standard source wiring.

use crate::adapters::{EnvSource, MetadataSource, StaticSource, VaultSource};
use crate::domain::{ConfigValue, Result};
use crate::service::ConfigurationManager;
use std::sync::Arc;

/// Builds configuration managers with the standard source lists.
///
/// Regular lookups consult, in order: the environment, the static baseline
/// (`env`, `current_time`), then table metadata (`all_tables`, `all_columns`).
/// Secret lookups consult the environment, then the vault.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationFactory;

impl ConfigurationFactory {
    /// Creates the default manager from the process environment.
    ///
    /// A `.env` file in the current directory (or a parent) is merged into the
    /// environment source if one exists.
    ///
    /// # Errors
    ///
    /// Fails if a `.env` file exists but cannot be parsed.
    ///
    /// ```rust,no_run
    /// use srcchain::prelude::*;
    ///
    /// # fn main() -> Result<()> {
    /// let config = ConfigurationFactory::create_default_manager()?;
    /// let tables = config.get("all_tables")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_default_manager() -> Result<ConfigurationManager> {
        let env = EnvSource::load_dotenv()?;
        Self::create_manager(env)
    }

    /// Creates the standard manager around a prepared environment source.
    pub fn create_manager(env: EnvSource) -> Result<ConfigurationManager> {
        ConfigurationManager::builder()
            .with_env(env)
            .with_source(Arc::new(Self::base_source()))
            .with_source(Arc::new(Self::metadata_source()))
            .with_secret_source(Arc::new(Self::vault_source()))
            .build()
    }

    /// Baseline values: the deployment environment and the current time.
    pub fn base_source() -> StaticSource {
        StaticSource::new()
            .with_value("env", "PROD")
            .with_handler("current_time", &[], |_| {
                Ok(Some(ConfigValue::from(chrono::Utc::now())))
            })
    }

    /// The known tables and their columns.
    pub fn metadata_source() -> MetadataSource {
        MetadataSource::new()
            .with_table("t1", ["c1", "c2", "c3"])
            .with_table("t2", Vec::<String>::new())
            .with_table("t3", Vec::<String>::new())
    }

    /// The standard vault contents.
    pub fn vault_source() -> VaultSource {
        VaultSource::new().with_secret("password", "regergerg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, ConfigurationService, Context};
    use std::collections::HashMap;

    fn manager_with(values: &[(&str, &str)]) -> ConfigurationManager {
        let env = EnvSource::with_values(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        );
        ConfigurationFactory::create_manager(env).unwrap()
    }

    #[test]
    fn test_factory_source_order() {
        let manager = manager_with(&[]);
        assert_eq!(manager.source_names(false), vec!["env", "static", "metadata"]);
        assert_eq!(manager.source_names(true), vec!["env", "vault"]);
    }

    #[test]
    fn test_factory_static_baseline() {
        let manager = manager_with(&[]);
        assert_eq!(manager.get("env").unwrap(), "PROD");
        assert!(manager.get("current_time").unwrap().as_timestamp().is_some());
    }

    #[test]
    fn test_factory_env_overrides_baseline() {
        let manager = manager_with(&[("env", "DEV")]);
        assert_eq!(manager.get("env").unwrap(), "DEV");
    }

    #[test]
    fn test_factory_metadata() {
        let manager = manager_with(&[]);
        assert_eq!(
            manager.get("all_tables").unwrap(),
            ConfigValue::from(vec!["t1", "t2", "t3"])
        );
        let columns = manager
            .get_with_context("all_columns", Context::new().with("table_id", "t2"))
            .unwrap();
        assert_eq!(columns, ConfigValue::List(vec![]));
    }

    #[test]
    fn test_factory_vault_secret() {
        let manager = manager_with(&[]);
        assert_eq!(manager.get_secret("password").unwrap(), "regergerg");
        assert!(matches!(
            manager.get("password"),
            Err(ConfigError::ValueNotFound { .. })
        ));
    }

    #[test]
    fn test_factory_env_secret_takes_precedence() {
        let manager = manager_with(&[("password", "from-env")]);
        assert_eq!(manager.get_secret("password").unwrap(), "from-env");
    }
}
