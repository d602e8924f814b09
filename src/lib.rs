// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered-source configuration and secret resolution.
//!
//! An application asks for a value by key; the crate consults an ordered list
//! of sources and returns the first value found. Secrets are classified per
//! request and resolved against a separate, restricted list of sources.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `Context`,
//!   `Lookup`, errors) and the `ConfigurationService` trait
//! - **Ports**: Trait definitions for sources (`ConfigSource`, `SecretSource`)
//!   and file parsers (`ConfigParser`)
//! - **Adapters**: Concrete sources (environment, static baseline, table
//!   metadata, vault, YAML files, command line)
//! - **Service**: The `ConfigurationManager` that runs first-match resolution
//!   and the `ConfigurationFactory` that wires the standard sources
//!
//! # Resolution rules
//!
//! - The first source in list order reporting a value wins. `false`, `0`, `""`
//!   and `[]` are values like any other.
//! - A secret lookup consults only secret sources; a regular lookup only
//!   regular sources.
//! - A value processor sees the winning source and its value, and its result is
//!   returned. It never sees a default.
//! - With nothing found, the default is returned verbatim; without a default,
//!   `ValueNotFound` or `SecretNotFound` is raised.
//! - A failing source aborts the lookup with its error.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable and `.env` support (default)
//! - `cli`: Enable the clap `ArgMatches` bridge for the command-line source (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use srcchain::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigurationFactory::create_default_manager()?;
//!
//! let env = config.get("env")?;
//! let columns = config.get_with_context("all_columns", Context::new().with("table_id", "t1"))?;
//! let password = config.get_secret("password")?;
//! let timeout = config.get_or("connection_timeout", 30)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Resolution emits `tracing` events (`debug` for hits and defaults, `trace` for
//! misses). Secret values are never logged. Install a subscriber to see them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, ConfigurationService, Context, Lookup, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, SecretSource};
    pub use crate::service::{ConfigurationManager, ConfigurationManagerBuilder};

    #[cfg(feature = "env")]
    pub use crate::service::ConfigurationFactory;
}
