// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the source traits defined
//! in the ports layer. Sources that hold credentials also implement
//! `SecretSource` so they can be placed in the secret chain.

pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod handlers;
pub mod metadata;
pub mod static_source;
pub mod vault;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use cli::CliSource;
#[cfg(feature = "env")]
pub use env_var::EnvSource;
pub use handlers::{HandlerFn, HandlerTable, Params};
pub use metadata::MetadataSource;
pub use static_source::StaticSource;
pub use vault::VaultSource;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileSource, YamlParser};
