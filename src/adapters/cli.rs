// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.

use crate::domain::{ConfigKey, ConfigValue, Context, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// Configuration source adapter for command-line arguments.
///
/// Supported argument formats:
/// - `--key=value`: Long form with equals sign
/// - `--key value`: Long form with space-separated value
/// - `-k value`: Short form with space-separated value
///
/// A flag followed by another flag, or by nothing, is ignored. Positional
/// arguments are ignored. When a key repeats, the last value wins.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::CliSource;
/// use srcchain::ports::ConfigSource;
///
/// let args = vec!["--database.host=localhost", "--port", "5432"];
/// let source = CliSource::from_args(args);
/// assert_eq!(source.get_str("port").unwrap().unwrap().as_str(), Some("5432"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CliSource {
    /// Parsed configuration values
    values: HashMap<String, ConfigValue>,
}

impl CliSource {
    /// Creates a command-line source with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a command-line source from a list of arguments.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        let mut source = Self::new();
        source.parse_args(&args);
        tracing::debug!("Parsed {} command-line options", source.values.len());
        source
    }

    /// Creates a command-line source from the process's command-line arguments,
    /// skipping the program name.
    pub fn from_env_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_args(args)
    }

    /// Creates a command-line source from arguments already parsed by clap.
    ///
    /// Every argument the user supplied (on the command line or through a
    /// clap-managed environment variable) is keyed by its clap id. Clap
    /// defaults are skipped so that later sources in the chain can answer.
    /// Arguments given several values become lists.
    ///
    /// ```rust
    /// use clap::{Arg, Command};
    /// use srcchain::adapters::CliSource;
    /// use srcchain::ports::ConfigSource;
    ///
    /// let matches = Command::new("demo")
    ///     .arg(Arg::new("table_id").long("table-id"))
    ///     .arg(Arg::new("env").long("env").default_value("DEV"))
    ///     .get_matches_from(["demo", "--table-id", "t1"]);
    ///
    /// let source = CliSource::from_arg_matches(&matches);
    /// assert_eq!(source.get_str("table_id").unwrap().unwrap().as_str(), Some("t1"));
    /// assert!(source.get_str("env").unwrap().is_none());
    /// ```
    #[cfg(feature = "cli")]
    pub fn from_arg_matches(matches: &clap::ArgMatches) -> Self {
        use clap::parser::ValueSource;

        let mut source = Self::new();
        for id in matches.ids() {
            if matches!(matches.value_source(id.as_str()), None | Some(ValueSource::DefaultValue)) {
                continue;
            }
            // Groups and arguments without values have no raw values
            let Ok(Some(raw)) = matches.try_get_raw(id.as_str()) else {
                continue;
            };
            let mut values: Vec<ConfigValue> = raw
                .filter_map(|v| v.to_str())
                .map(ConfigValue::from)
                .collect();
            let value = match values.len() {
                0 => continue,
                1 => values.remove(0),
                _ => ConfigValue::List(values),
            };
            source.values.insert(id.as_str().to_string(), value);
        }
        tracing::debug!("Collected {} command-line options from clap", source.values.len());
        source
    }

    /// Parses command-line arguments and populates the values map.
    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();

            let key = if let Some(long) = arg.strip_prefix("--") {
                // Handle --key=value format
                if let Some((key, value)) = long.split_once('=') {
                    self.insert(key, value);
                    i += 1;
                    continue;
                }
                long
            } else if let Some(short) = arg.strip_prefix('-').filter(|s| s.chars().count() == 1) {
                short
            } else {
                i += 1;
                continue;
            };

            // Handle --key value and -k value; the next argument must not be a flag
            match args.get(i + 1).map(|next| next.as_ref()) {
                Some(next) if !next.starts_with('-') => {
                    self.insert(key, next);
                    i += 2;
                }
                _ => i += 1,
            }
        }
    }

    fn insert(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        self.values
            .insert(key.to_string(), ConfigValue::from(value));
    }
}

impl ConfigSource for CliSource {
    fn name(&self) -> &str {
        "cli"
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
