// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup context.
//!
//! A context carries auxiliary parameters a source may need to compute its
//! answer (for example the table whose columns are requested). The
//! configuration manager never interprets it; it is forwarded as-is to every
//! source it queries.

use crate::domain::ConfigValue;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Named parameters forwarded to configuration sources.
///
/// Entries are kept sorted so a context renders the same way every time it
/// appears in an error message or a log line.
///
/// # Examples
///
/// ```
/// use srcchain::domain::Context;
///
/// let ctx = Context::new().with("table_id", "t1");
/// assert_eq!(ctx.get("table_id").and_then(|v| v.as_str()), Some("t1"));
/// assert_eq!(ctx.to_string(), "{table_id: t1}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Context(BTreeMap<String, ConfigValue>);

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the context for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value of a parameter.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.0.get(name)
    }

    /// Returns `true` if the parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameter names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over the parameters in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy holding only the named parameters.
    ///
    /// Names that are not present are ignored, as are parameters that are not
    /// named.
    ///
    /// # Examples
    ///
    /// ```
    /// use srcchain::domain::Context;
    ///
    /// let ctx = Context::new().with("table_id", "t1").with("user", "bob");
    /// let filtered = ctx.filtered(&["table_id", "schema"]);
    /// assert_eq!(filtered.len(), 1);
    /// assert!(filtered.contains("table_id"));
    /// ```
    pub fn filtered<S: AsRef<str>>(&self, names: &[S]) -> Context {
        Context(
            self.0
                .iter()
                .filter(|(k, _)| names.iter().any(|n| n.as_ref() == k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Context(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_with_and_get() {
        let ctx = Context::new().with("table_id", "t1").with("limit", 10);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get("limit"), Some(&ConfigValue::from(10)));
        assert!(ctx.get("missing").is_none());
    }

    #[test]
    fn test_context_insert_replaces() {
        let mut ctx = Context::new();
        ctx.insert("table_id", "t1");
        ctx.insert("table_id", "t2");
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("table_id"), Some(&ConfigValue::from("t2")));
    }

    #[test]
    fn test_context_filtered_drops_undeclared() {
        let ctx = Context::new()
            .with("table_id", "t1")
            .with("unused", true)
            .with("other", 3);

        let filtered = ctx.filtered(&["table_id"]);
        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["table_id"]);
    }

    #[test]
    fn test_context_filtered_with_no_names() {
        let ctx = Context::new().with("table_id", "t1");
        let names: [&str; 0] = [];
        assert!(ctx.filtered(&names).is_empty());
    }

    #[test]
    fn test_context_display_is_sorted() {
        let ctx = Context::new().with("b", 2).with("a", "x");
        assert_eq!(ctx.to_string(), "{a: x, b: 2}");
    }

    #[test]
    fn test_context_from_iterator() {
        let ctx: Context = vec![("table_id", "t1"), ("schema", "public")]
            .into_iter()
            .collect();
        assert!(ctx.contains("schema"));
        assert_eq!(ctx.iter().count(), 2);
    }
}
