//! Insert-or-replace statement.
//!
//! The rendering is entirely up to the dialect's compiler: SQLite uses
//! `REPLACE INTO`, PostgreSQL `ON CONFLICT`, MySQL `ON DUPLICATE KEY`.

use std::collections::BTreeMap;

use super::{Build, Statement};
use crate::value::{SqlValue, ToSqlValue};

/// An upsert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upsert {
    pub(crate) table: String,
    pub(crate) keys: Vec<String>,
    pub(crate) values: BTreeMap<String, SqlValue>,
}

impl Upsert {
    /// Creates an upsert into `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            ..Self::default()
        }
    }

    /// Sets the conflict target columns.
    #[must_use]
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets one column value.
    #[must_use]
    pub fn value<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.values
            .insert(String::from(column), value.to_sql_value());
        self
    }

    /// Sets several column values.
    #[must_use]
    pub fn values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        self.values.extend(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value())),
        );
        self
    }

    /// Returns the target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the conflict target columns.
    #[must_use]
    pub fn conflict_keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the columns that are not part of the conflict target.
    #[must_use]
    pub fn update_columns(&self) -> Vec<&str> {
        self.values
            .keys()
            .filter(|k| !self.keys.contains(*k))
            .map(String::as_str)
            .collect()
    }
}

impl Build for Upsert {
    fn statement(&self) -> Statement<'_> {
        Statement::Upsert(self)
    }
}
