// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Only two kinds are "resolvable" by the caller: a missing value and a missing
//! secret. Everything else describes a source that failed and is surfaced
//! untouched by the configuration manager. All errors use `thiserror`.

use crate::domain::Context;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use srcchain::domain::errors::ConfigError;
///
/// fn get_config_value() -> Result<String, ConfigError> {
///     Err(ConfigError::ValueNotFound {
///         key: "database.host".to_string(),
///         context: None,
///     })
/// }
///
/// let err = get_config_value().unwrap_err();
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No regular source produced a value and no default was supplied.
    #[error("Configuration value with key '{key}'{} not found", render_context(.context))]
    ValueNotFound {
        /// The key that was not found
        key: String,
        /// The context the lookup was made with
        context: Option<Context>,
    },

    /// No secret source produced a value and no default was supplied.
    ///
    /// The context is kept for diagnostics but is never rendered.
    #[error("Secret with key '{key}' not found")]
    SecretNotFound {
        /// The secret key that was not found
        key: String,
        /// The context the lookup was made with
        context: Option<Context>,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A source handler needed a context parameter that the caller did not supply.
    #[error("Source '{source_name}' requires parameter '{parameter}' to resolve '{key}'")]
    MissingParameter {
        /// The source whose handler was invoked
        source_name: String,
        /// The key being resolved
        key: String,
        /// The missing parameter name
        parameter: String,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or value.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn render_context(context: &Option<Context>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!(" with context {}", ctx),
        _ => String::new(),
    }
}

impl ConfigError {
    /// Creates the "not found" error matching the kind of lookup that was made.
    pub fn not_found(key: impl Into<String>, context: Option<Context>, secret: bool) -> Self {
        let key = key.into();
        if secret {
            ConfigError::SecretNotFound { key, context }
        } else {
            ConfigError::ValueNotFound { key, context }
        }
    }

    /// Returns `true` for [`ConfigError::ValueNotFound`] and [`ConfigError::SecretNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ValueNotFound { .. } | ConfigError::SecretNotFound { .. }
        )
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError for a value whose variant cannot be converted at all.
    pub fn incompatible_type(key: &str, target_type: &str, found: &str) -> Self {
        ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: target_type.to_string(),
            source: format!("found {} value", found).into(),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_not_found_without_context() {
        let error = ConfigError::ValueNotFound {
            key: "missing_key".to_string(),
            context: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration value with key 'missing_key' not found"
        );
    }

    #[test]
    fn test_value_not_found_with_context() {
        let error = ConfigError::ValueNotFound {
            key: "all_columns".to_string(),
            context: Some(Context::new().with("table_id", "t9")),
        };
        assert_eq!(
            error.to_string(),
            "Configuration value with key 'all_columns' with context {table_id: t9} not found"
        );
    }

    #[test]
    fn test_value_not_found_with_empty_context() {
        let error = ConfigError::ValueNotFound {
            key: "k".to_string(),
            context: Some(Context::new()),
        };
        assert_eq!(error.to_string(), "Configuration value with key 'k' not found");
    }

    #[test]
    fn test_secret_not_found_hides_context() {
        let error = ConfigError::SecretNotFound {
            key: "password".to_string(),
            context: Some(Context::new().with("tenant", "acme")),
        };
        assert_eq!(error.to_string(), "Secret with key 'password' not found");
    }

    #[test]
    fn test_not_found_constructor_picks_variant() {
        assert!(matches!(
            ConfigError::not_found("k", None, false),
            ConfigError::ValueNotFound { .. }
        ));
        assert!(matches!(
            ConfigError::not_found("k", None, true),
            ConfigError::SecretNotFound { .. }
        ));
    }

    #[test]
    fn test_is_not_found() {
        assert!(ConfigError::not_found("k", None, false).is_not_found());
        assert!(ConfigError::not_found("k", None, true).is_not_found());

        let error = ConfigError::SourceError {
            source_name: "vault".to_string(),
            message: "connection refused".to_string(),
            source: None,
        };
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_missing_parameter() {
        let error = ConfigError::MissingParameter {
            source_name: "metadata".to_string(),
            key: "all_columns".to_string(),
            parameter: "table_id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Source 'metadata' requires parameter 'table_id' to resolve 'all_columns'"
        );
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "env".to_string(),
            message: "Failed to read environment".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Configuration source 'env' error: Failed to read environment"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration: Invalid YAML"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_err = "not_a_number".parse::<i32>().unwrap_err();
        let error = ConfigError::from_parse_int_error("test.key".to_string(), parse_err);
        assert!(matches!(error, ConfigError::TypeConversionError { .. }));
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn test_incompatible_type() {
        let error = ConfigError::incompatible_type("all_tables", "integer", "list");
        assert!(error.to_string().contains("all_tables"));
        assert!(error.to_string().contains("found list value"));
    }
}
