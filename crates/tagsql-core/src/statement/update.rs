//! UPDATE statement builder.

use std::collections::BTreeMap;

use super::{Build, Statement};
use crate::expr::{Clause, ColumnRef};
use crate::value::{SqlValue, ToSqlValue};

/// An UPDATE statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub(crate) table: String,
    pub(crate) set: BTreeMap<String, SqlValue>,
    pub(crate) where_clause: Option<Clause>,
    pub(crate) returning: Vec<ColumnRef>,
}

impl Update {
    /// Creates an UPDATE of `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            ..Self::default()
        }
    }

    /// Sets a column to a value.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.set.insert(String::from(column), value.to_sql_value());
        self
    }

    /// Sets several columns.
    #[must_use]
    pub fn set_all<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        self.set.extend(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value())),
        );
        self
    }

    /// Sets the WHERE clause. Calling it again combines with `AND`.
    #[must_use]
    pub fn where_clause(mut self, clause: Clause) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(clause),
            None => clause,
        });
        self
    }

    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning<I: IntoIterator<Item = ColumnRef>>(mut self, columns: I) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Build for Update {
    fn statement(&self) -> Statement<'_> {
        Statement::Update(self)
    }
}
