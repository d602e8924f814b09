// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table metadata configuration source adapter.
//!
//! Answers questions about a known set of tables. Two keys are supported:
//!
//! - `all_tables`: the table ids, in registration order
//! - `all_columns`: the columns of the table named by the `table_id` context
//!   parameter; an unknown table, or a `table_id` that is not a string, has
//!   no columns

use crate::adapters::handlers::HandlerTable;
use crate::domain::{ConfigKey, ConfigValue, Context, Result};
use crate::ports::ConfigSource;
use std::sync::Arc;

/// Key listing every table id.
pub const ALL_TABLES: &str = "all_tables";

/// Key listing the columns of one table.
pub const ALL_COLUMNS: &str = "all_columns";

/// Context parameter naming the table for [`ALL_COLUMNS`].
pub const TABLE_ID: &str = "table_id";

/// Configuration source exposing table and column metadata.
///
/// # Examples
///
/// ```rust
/// use srcchain::adapters::MetadataSource;
/// use srcchain::domain::{ConfigKey, ConfigValue, Context};
/// use srcchain::ports::ConfigSource;
///
/// let source = MetadataSource::new()
///     .with_table("t1", ["c1", "c2", "c3"])
///     .with_table("t2", Vec::<String>::new());
///
/// let ctx = Context::new().with("table_id", "t1");
/// let columns = source
///     .get_value(&ConfigKey::from("all_columns"), Some(&ctx))
///     .unwrap();
/// assert_eq!(columns, Some(ConfigValue::from(vec!["c1", "c2", "c3"])));
/// ```
#[derive(Debug)]
pub struct MetadataSource {
    tables: Arc<Vec<(String, Vec<String>)>>,
    table: HandlerTable,
}

impl MetadataSource {
    /// Creates a metadata source with no tables.
    pub fn new() -> Self {
        Self::from_tables(Vec::new())
    }

    /// Adds a table and its columns. Re-adding a table replaces its columns.
    pub fn with_table<I, S>(self, table_id: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table_id = table_id.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut tables = (*self.tables).clone();
        match tables.iter_mut().find(|(id, _)| *id == table_id) {
            Some((_, existing)) => *existing = columns,
            None => tables.push((table_id, columns)),
        }
        Self::from_tables(tables)
    }

    /// Returns the registered table ids in registration order.
    pub fn table_ids(&self) -> Vec<&str> {
        self.tables.iter().map(|(id, _)| id.as_str()).collect()
    }

    fn from_tables(tables: Vec<(String, Vec<String>)>) -> Self {
        let tables = Arc::new(tables);

        let for_tables = Arc::clone(&tables);
        let for_columns = Arc::clone(&tables);
        let table = HandlerTable::new()
            .with_handler(ALL_TABLES, &[], move |_| {
                let ids: Vec<&str> = for_tables.iter().map(|(id, _)| id.as_str()).collect();
                Ok(Some(ConfigValue::from(ids)))
            })
            .with_handler(ALL_COLUMNS, &[TABLE_ID], move |params| {
                let table_id = params.require(TABLE_ID)?.as_str();
                let columns = for_columns
                    .iter()
                    .find(|(id, _)| Some(id.as_str()) == table_id)
                    .map(|(_, cols)| cols.clone())
                    .unwrap_or_default();
                Ok(Some(ConfigValue::from(columns)))
            });

        Self { tables, table }
    }
}

impl Default for MetadataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for MetadataSource {
    fn name(&self) -> &str {
        "metadata"
    }

    fn get_value(&self, key: &ConfigKey, context: Option<&Context>) -> Result<Option<ConfigValue>> {
        self.table.dispatch(self.name(), key, context)
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.table.keys())
    }
}
