// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! Keys, values, contexts, lookup requests and the error taxonomy live here,
//! together with the [`ConfigurationService`] trait that callers use.

pub mod config_key;
pub mod config_value;
pub mod context;
pub mod errors;
pub mod lookup;
pub mod service;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use context::Context;
pub use errors::{ConfigError, Result};
pub use lookup::{Lookup, ValueProcessor};
pub use service::ConfigurationService;
