//! The table model.
//!
//! A [`Table`] aggregates columns, constraints, primary key columns, foreign
//! key references and indexes for one logical table. It is built once,
//! either by hand or by the [`Mapper`](crate::mapper::Mapper), and then only
//! read while compiling statements.
//!
//! ```rust
//! use tagsql_core::table::{Column, Table};
//! use tagsql_core::types::Type;
//!
//! let mut table = Table::new("default", "users");
//! table.add_column(Column::new("id", Type::big_int()));
//! table.add_column(Column::new("email", Type::varchar().size(128)).unique());
//! table.add_primary("id");
//!
//! assert_eq!(
//!     table.sql().unwrap(),
//!     "CREATE TABLE users (id BIGINT, email VARCHAR(128) UNIQUE, PRIMARY KEY (id))"
//! );
//! ```

mod column;
mod constraint;

pub use column::{Column, ColumnOptions};
pub use constraint::Constraint;

use serde::{Deserialize, Serialize};

use crate::compiler;
use crate::dialect::{self, Dialect};
use crate::error::Result;
use crate::schema::Model;
use crate::statement::{Build, Delete, Insert, Statement, Update, Upsert};
use crate::value::ToSqlValue;

/// A foreign key, possibly spanning several column pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local columns.
    pub cols: Vec<String>,
    /// Referenced table.
    pub ref_table: String,
    /// Referenced columns, paired with `cols` by position.
    pub ref_cols: Vec<String>,
}

/// A secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Indexed columns, in order.
    pub columns: Vec<String>,
}

impl Index {
    /// Returns the index name, `idx_<table>_<col1>_<col2>...`.
    #[must_use]
    pub fn name(&self, table: &str) -> String {
        format!("idx_{table}_{}", self.columns.join("_"))
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    driver: String,
    columns: Vec<Column>,
    constraints: Vec<Constraint>,
    primary_cols: Vec<String>,
    refs: Vec<ForeignKey>,
    indexes: Vec<Index>,
}

impl Table {
    /// Creates an empty table rendered through the dialect registered for `driver`.
    #[must_use]
    pub fn new(driver: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            primary_cols: Vec::new(),
            refs: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the driver name.
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the directly added table constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the columns of the trailing `PRIMARY KEY` clause.
    #[must_use]
    pub fn primary_cols(&self) -> &[String] {
        &self.primary_cols
    }

    /// Returns every primary key column, trailing or inline.
    #[must_use]
    pub fn primary_key(&self) -> Vec<String> {
        let inline = self
            .columns
            .iter()
            .filter(|c| c.options.inline_primary_key)
            .map(|c| c.name.clone());
        inline.chain(self.primary_cols.iter().cloned()).collect()
    }

    /// Returns the foreign keys, one per referenced table.
    #[must_use]
    pub fn refs(&self) -> &[ForeignKey] {
        &self.refs
    }

    /// Returns the secondary indexes.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Appends a column and attaches it to this table.
    pub fn add_column(&mut self, mut column: Column) {
        column.table = Some(self.name.clone());
        self.columns.push(column);
    }

    /// Appends a table constraint, rendered after keys.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds a column to the `PRIMARY KEY` clause.
    pub fn add_primary(&mut self, col: &str) {
        if !self.primary_cols.iter().any(|c| c == col) {
            self.primary_cols.push(String::from(col));
        }
    }

    /// Adds a foreign key pair.
    ///
    /// Pairs referencing the same table accumulate into one `FOREIGN KEY`.
    pub fn add_ref(&mut self, col: &str, ref_table: &str, ref_col: &str) {
        if let Some(fk) = self.refs.iter_mut().find(|r| r.ref_table == ref_table) {
            fk.cols.push(String::from(col));
            fk.ref_cols.push(String::from(ref_col));
            return;
        }
        self.refs.push(ForeignKey {
            cols: vec![String::from(col)],
            ref_table: String::from(ref_table),
            ref_cols: vec![String::from(ref_col)],
        });
    }

    /// Adds an index over the given columns. Duplicates are ignored.
    pub fn add_index<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = Index {
            columns: columns.into_iter().map(Into::into).collect(),
        };
        if !index.columns.is_empty() && !self.indexes.contains(&index) {
            self.indexes.push(index);
        }
    }

    /// Renders `CREATE TABLE` with the dialect registered for the table's driver.
    ///
    /// # Errors
    ///
    /// Fails when no dialect is registered for the driver or when a column
    /// breaks a dialect precondition.
    pub fn sql(&self) -> Result<String> {
        let dialect = dialect::new_dialect(&self.driver)?;
        self.compile(dialect.as_ref())
    }

    /// Renders `CREATE TABLE` with an explicit dialect.
    ///
    /// # Errors
    ///
    /// Fails when a column breaks a dialect precondition.
    pub fn compile(&self, dialect: &dyn Dialect) -> Result<String> {
        let (sql, _) = self.build(dialect)?;
        Ok(sql)
    }

    /// Renders one `CREATE INDEX` per index.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors.
    pub fn index_sql(&self, dialect: &dyn Dialect) -> Result<Vec<String>> {
        self.indexes
            .iter()
            .map(|index| {
                compiler::compile(dialect, Statement::CreateIndex(self, index)).map(|(sql, _)| sql)
            })
            .collect()
    }

    /// Builds an `INSERT` from column/value pairs. Keys are not validated.
    #[must_use]
    pub fn insert<I, K, V>(&self, values: I) -> Insert
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        Insert::new(&self.name).values(values)
    }

    /// Builds an `INSERT` from a model's values.
    #[must_use]
    pub fn insert_model<M: Model>(&self, model: &M) -> Insert {
        self.insert(model.to_values())
    }

    /// Builds an `UPDATE` from column/value pairs. Keys are not validated.
    #[must_use]
    pub fn update<I, K, V>(&self, values: I) -> Update
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        Update::new(&self.name).set_all(values)
    }

    /// Builds a `DELETE` on this table.
    #[must_use]
    pub fn delete(&self) -> Delete {
        Delete::new(&self.name)
    }

    /// Builds an upsert keyed on the table's primary key.
    #[must_use]
    pub fn upsert<I, K, V>(&self, values: I) -> Upsert
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        Upsert::new(&self.name)
            .keys(self.primary_key())
            .values(values)
    }

    /// Builds an upsert from a model's values.
    #[must_use]
    pub fn upsert_model<M: Model>(&self, model: &M) -> Upsert {
        self.upsert(model.to_values())
    }
}

impl Build for Table {
    fn statement(&self) -> Statement<'_> {
        Statement::CreateTable(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn users() -> Table {
        let mut table = Table::new("default", "users");
        table.add_column(Column::new("id", Type::int()));
        table.add_column(Column::new("email", Type::varchar()).not_null().unique());
        table
    }

    #[test]
    fn test_add_column_sets_table() {
        let table = users();
        assert_eq!(table.column("id").unwrap().table.as_deref(), Some("users"));
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_refs_merge_per_table() {
        let mut table = users();
        table.add_ref("org_id", "orgs", "id");
        table.add_ref("org_region", "orgs", "region");
        table.add_ref("owner_id", "users", "id");

        assert_eq!(table.refs().len(), 2);
        assert_eq!(table.refs()[0].cols, vec!["org_id", "org_region"]);
        assert_eq!(table.refs()[0].ref_cols, vec!["id", "region"]);
        assert_eq!(table.refs()[1].ref_table, "users");
    }

    #[test]
    fn test_create_table_order() {
        let mut table = users();
        table.add_column(Column::new("org_id", Type::int()));
        table.add_primary("id");
        table.add_ref("org_id", "orgs", "id");
        table.add_constraint(Constraint::raw("CHECK (id > 0)"));

        assert_eq!(
            table.sql().unwrap(),
            "CREATE TABLE users (id INT, email VARCHAR(255) NOT NULL UNIQUE, org_id INT, \
             PRIMARY KEY (id), FOREIGN KEY (org_id) REFERENCES orgs(id), CHECK (id > 0))"
        );
    }

    #[test]
    fn test_primary_key_includes_inline_columns() {
        let mut table = Table::new("default", "events");
        table.add_column(Column::new("id", Type::int()).auto_increment().primary_key());
        table.add_column(Column::new("tenant", Type::int()));
        table.add_primary("tenant");
        table.add_primary("tenant");

        assert_eq!(table.primary_cols(), ["tenant"]);
        assert_eq!(table.primary_key(), vec!["id", "tenant"]);
    }

    #[test]
    fn test_index_names() {
        let mut table = users();
        table.add_index(["email"]);
        table.add_index(["email"]);
        table.add_index(["email", "id"]);

        assert_eq!(table.indexes().len(), 2);
        assert_eq!(table.indexes()[1].name("users"), "idx_users_email_id");
        assert_eq!(
            table.index_sql(&crate::dialect::DefaultDialect::new()).unwrap(),
            vec![
                "CREATE INDEX idx_users_email ON users (email)",
                "CREATE INDEX idx_users_email_id ON users (email, id)",
            ]
        );
    }

    #[test]
    fn test_unknown_driver() {
        let table = Table::new("oracle", "users");
        assert!(matches!(
            table.sql(),
            Err(crate::error::Error::UnknownDialect(driver)) if driver == "oracle"
        ));
    }

    #[test]
    fn test_serde_snapshot() {
        let table = users();
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
