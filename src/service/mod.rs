// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration manager.
//!
//! [`ConfigurationManager`] implements the `ConfigurationService` trait over two
//! ordered source lists; [`ConfigurationFactory`] wires the standard lists.

#[cfg(feature = "env")]
pub mod factory;
pub mod manager;

// Re-export commonly used types
#[cfg(feature = "env")]
pub use factory::ConfigurationFactory;
pub use manager::{ConfigurationManager, ConfigurationManagerBuilder, ProcessorFn};
