// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams of the crate: adapters implement them, and the
//! configuration manager consumes them without knowing which adapter is behind.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::{AsConfigSource, ConfigSource, SecretSource};
