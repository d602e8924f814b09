// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! Sources answer with values of very different shapes: environment variables
//! are always strings, metadata tables answer with lists, computed handlers may
//! answer with timestamps. `ConfigValue` carries all of them. There is no null
//! variant; a source that has nothing to say returns `None` instead, so `false`,
//! `0`, `""` and `[]` are all legitimate answers.

use crate::domain::errors::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A typed configuration value.
///
/// # Examples
///
/// ```
/// use srcchain::domain::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), Some("42"));
/// assert_eq!(value.as_i32("test.key").unwrap(), 42);
///
/// let columns = ConfigValue::from(vec!["c1", "c2"]);
/// assert_eq!(columns.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// An ordered list of values.
    List(Vec<ConfigValue>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns a short name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Timestamp(_) => "timestamp",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a list value.
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a map value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a timestamp value.
    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            ConfigValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Returns `true` for an empty string, list or map.
    ///
    /// An empty value is still a found value; this is only a convenience for
    /// callers that want to treat it specially.
    pub fn is_empty(&self) -> bool {
        match self {
            ConfigValue::String(s) => s.is_empty(),
            ConfigValue::List(items) => items.is_empty(),
            ConfigValue::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Converts the value to a boolean.
    ///
    /// String values recognize the following (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::ConfigValue;
    ///
    /// assert!(ConfigValue::from("yes").as_bool("debug").unwrap());
    /// assert!(!ConfigValue::from(false).as_bool("debug").unwrap());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self {
            ConfigValue::Bool(b) => Ok(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(ConfigError::incompatible_type(
                key,
                "boolean",
                other.type_name(),
            )),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.integer(key)
    }

    /// Converts the value to an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from(30).as_i64("connection_timeout").unwrap(), 30);
    /// assert_eq!(ConfigValue::from("30").as_i64("connection_timeout").unwrap(), 30);
    /// ```
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.integer(key)
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.integer(key)
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.integer(key)
    }

    /// Converts the value to an `f64`. Integers are widened.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(i) => Ok(*i as f64),
            ConfigValue::String(s) => s
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(ConfigError::incompatible_type(key, "float", other.type_name())),
        }
    }

    fn integer<T>(&self, key: &str) -> Result<T>
    where
        T: TryFrom<i64> + FromStr<Err = std::num::ParseIntError>,
        <T as TryFrom<i64>>::Error: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ConfigValue::Integer(i) => {
                T::try_from(*i).map_err(|e| ConfigError::TypeConversionError {
                    key: key.to_string(),
                    target_type: std::any::type_name::<T>().to_string(),
                    source: Box::new(e),
                })
            }
            ConfigValue::String(s) => s
                .parse::<T>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(ConfigError::incompatible_type(
                key,
                std::any::type_name::<T>(),
                other.type_name(),
            )),
        }
    }

    /// Parses the value's textual form into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("bind.address").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let parsed = match self {
            ConfigValue::String(s) => s.parse::<T>(),
            other => other.to_string().parse::<T>(),
        };
        parsed.map_err(|e| ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: std::any::type_name::<T>().to_string(),
            source: Box::new(e),
        })
    }

    /// Splits a delimited string into a list of trimmed strings.
    ///
    /// Flat sources such as environment variables can only carry lists as
    /// delimited text. Non-string values are returned unchanged, and an empty
    /// string becomes an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::ConfigValue;
    ///
    /// let value = ConfigValue::from("c1, c2,c3").split(",");
    /// assert_eq!(value, ConfigValue::from(vec!["c1", "c2", "c3"]));
    /// ```
    pub fn split(self, delimiter: &str) -> ConfigValue {
        match self {
            ConfigValue::String(s) if s.is_empty() => ConfigValue::List(Vec::new()),
            ConfigValue::String(s) => ConfigValue::List(
                s.split(delimiter)
                    .map(|part| ConfigValue::String(part.trim().to_string()))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<u32> for ConfigValue {
    fn from(i: u32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<DateTime<Utc>> for ConfigValue {
    fn from(ts: DateTime<Utc>) -> Self {
        ConfigValue::Timestamp(ts)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(map: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(map)
    }
}

impl PartialEq<&str> for ConfigValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            ConfigValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ConfigValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::net::IpAddr;

    #[test]
    fn test_as_str_only_for_strings() {
        assert_eq!(ConfigValue::from("PROD").as_str(), Some("PROD"));
        assert_eq!(ConfigValue::from(1).as_str(), None);
    }

    #[test]
    fn test_as_bool_true_variants() {
        for val in ["true", "True", "TRUE", "yes", "YES", "1", "on", "ON"] {
            let value = ConfigValue::from(val);
            assert!(value.as_bool("test.key").unwrap(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_as_bool_false_variants() {
        for val in ["false", "False", "no", "NO", "0", "off", "Off"] {
            let value = ConfigValue::from(val);
            assert!(!value.as_bool("test.key").unwrap(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_as_bool_native_and_invalid() {
        assert!(ConfigValue::from(true).as_bool("k").unwrap());
        assert!(ConfigValue::from("invalid").as_bool("k").is_err());
        assert!(ConfigValue::from(vec!["a"]).as_bool("k").is_err());
    }

    #[test]
    fn test_integers_from_native_and_string() {
        assert_eq!(ConfigValue::from(42).as_i32("k").unwrap(), 42);
        assert_eq!(ConfigValue::from("-42").as_i64("k").unwrap(), -42);
        assert_eq!(ConfigValue::from("4294967295").as_u32("k").unwrap(), 4294967295);
        assert_eq!(
            ConfigValue::from("18446744073709551615").as_u64("k").unwrap(),
            18446744073709551615
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        let value = ConfigValue::from(-1);
        assert!(matches!(
            value.as_u32("k"),
            Err(ConfigError::TypeConversionError { .. })
        ));
        assert!(ConfigValue::from(i64::MAX).as_i32("k").is_err());
    }

    #[test]
    fn test_integer_invalid() {
        assert!(ConfigValue::from("3.5").as_i32("k").is_err());
        assert!(ConfigValue::from(3.5).as_i64("k").is_err());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(ConfigValue::from(2.5).as_f64("k").unwrap(), 2.5);
        assert_eq!(ConfigValue::from(3).as_f64("k").unwrap(), 3.0);
        assert_eq!(ConfigValue::from("-0.5").as_f64("k").unwrap(), -0.5);
        assert!(ConfigValue::from(true).as_f64("k").is_err());
    }

    #[test]
    fn test_parse_custom_type() {
        let value = ConfigValue::from("127.0.0.1");
        let ip: IpAddr = value.parse("test.key").unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");

        let port: u16 = ConfigValue::from(8080).parse("port").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_invalid() {
        let value = ConfigValue::from("not_an_ip");
        let result: Result<IpAddr> = value.parse("test.key");
        assert!(result.is_err());
    }

    #[test]
    fn test_split_delimited_string() {
        let value = ConfigValue::from("c1,c2,c3").split(",");
        assert_eq!(value, ConfigValue::from(vec!["c1", "c2", "c3"]));
    }

    #[test]
    fn test_split_empty_string_is_empty_list() {
        let value = ConfigValue::from("").split(",");
        assert_eq!(value, ConfigValue::List(vec![]));
    }

    #[test]
    fn test_split_leaves_lists_alone() {
        let list = ConfigValue::from(vec!["a,b"]);
        assert_eq!(list.clone().split(","), list);
    }

    #[test]
    fn test_is_empty() {
        assert!(ConfigValue::from("").is_empty());
        assert!(ConfigValue::List(vec![]).is_empty());
        assert!(!ConfigValue::from(0).is_empty());
        assert!(!ConfigValue::from(false).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfigValue::from("PROD").to_string(), "PROD");
        assert_eq!(ConfigValue::from(vec!["c1", "c2"]).to_string(), "[c1, c2]");

        let mut map = BTreeMap::new();
        map.insert("b".to_string(), ConfigValue::from(2));
        map.insert("a".to_string(), ConfigValue::from(true));
        assert_eq!(ConfigValue::from(map).to_string(), "{a: true, b: 2}");

        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            ConfigValue::from(ts).to_string(),
            "2024-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_eq_str() {
        assert_eq!(ConfigValue::from("PROD"), "PROD");
        assert_ne!(ConfigValue::from(1), "1");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(ConfigValue::from(1).type_name(), "integer");
        assert_eq!(ConfigValue::from(vec![1]).type_name(), "list");
    }
}
