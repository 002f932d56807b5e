//! INSERT statement builder.

use std::collections::BTreeMap;

use super::{Build, Statement};
use crate::expr::ColumnRef;
use crate::value::{SqlValue, ToSqlValue};

/// An INSERT statement.
///
/// Values are keyed by column name and rendered in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub(crate) table: String,
    pub(crate) values: BTreeMap<String, SqlValue>,
    pub(crate) returning: Vec<ColumnRef>,
}

impl Insert {
    /// Creates an INSERT into `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            ..Self::default()
        }
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

    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning<I: IntoIterator<Item = ColumnRef>>(mut self, columns: I) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Build for Insert {
    fn statement(&self) -> Statement<'_> {
        Statement::Insert(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DefaultDialect, MysqlDialect, PostgresDialect};
    use crate::error::Error;
    use crate::expr::col;

    #[test]
    fn test_insert_sorted_keys() {
        let (sql, binds) = Insert::new("users")
            .value("name", "alice")
            .value("email", "alice@example.com")
            .value("age", 30)
            .build(&DefaultDialect::new())
            .unwrap();

        assert_eq!(sql, "INSERT INTO users (age, email, name) VALUES (?, ?, ?)");
        assert_eq!(
            binds,
            vec![
                SqlValue::Int(30),
                SqlValue::Text(String::from("alice@example.com")),
                SqlValue::Text(String::from("alice")),
            ]
        );
    }

    #[test]
    fn test_insert_numbered_placeholders() {
        let (sql, binds) = Insert::new("users")
            .values([("a", 1), ("b", 2)])
            .returning([col("id")])
            .build(&PostgresDialect::new())
            .unwrap();
        assert_eq!(sql, "INSERT INTO users (a, b) VALUES ($1, $2) RETURNING id");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn test_empty_insert() {
        let (sql, binds) = Insert::new("events").build(&DefaultDialect::new()).unwrap();
        assert_eq!(sql, "INSERT INTO events DEFAULT VALUES");
        assert!(binds.is_empty());

        let (sql, _) = Insert::new("events").build(&MysqlDialect::new()).unwrap();
        assert_eq!(sql, "INSERT INTO events () VALUES ()");
    }

    #[test]
    fn test_returning_unsupported() {
        let result = Insert::new("users")
            .value("a", 1)
            .returning([col("id")])
            .build(&MysqlDialect::new());
        assert!(matches!(result, Err(Error::Unsupported { .. })));
    }
}
