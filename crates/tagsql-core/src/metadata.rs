//! A collection of tables for one driver.

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::mapper::Mapper;
use crate::schema::Model;
use crate::statement::{Build, DropTable};
use crate::table::Table;

/// Holds the tables of a schema in registration order.
#[derive(Debug, Clone)]
pub struct MetaData {
    mapper: Mapper,
    tables: Vec<Table>,
}

impl MetaData {
    /// Creates an empty collection for `driver`.
    #[must_use]
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            mapper: Mapper::new(driver),
            tables: Vec::new(),
        }
    }

    /// Maps a model and adds its table.
    ///
    /// # Errors
    ///
    /// Propagates mapping errors; nothing is added on failure.
    pub fn add<M: Model>(&mut self) -> Result<&Table> {
        let table = self.mapper.convert_model::<M>()?;
        Ok(self.add_table(table))
    }

    /// Adds a table, replacing any earlier table with the same name.
    pub fn add_table(&mut self, table: Table) -> &Table {
        let index = match self.tables.iter().position(|t| t.name() == table.name()) {
            Some(index) => {
                debug!(table = table.name(), "replacing table");
                self.tables[index] = table;
                index
            }
            None => {
                self.tables.push(table);
                self.tables.len() - 1
            }
        };
        &self.tables[index]
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Returns every table in registration order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Renders CREATE TABLE for every table, followed by its CREATE INDEX
    /// statements, in registration order.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors.
    pub fn create_all_sql(&self, dialect: &dyn Dialect) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.push(table.compile(dialect)?);
            statements.extend(table.index_sql(dialect)?);
        }
        Ok(statements)
    }

    /// Renders DROP TABLE for every table, in reverse registration order.
    ///
    /// # Errors
    ///
    /// Propagates compilation errors.
    pub fn drop_all_sql(&self, dialect: &dyn Dialect) -> Result<Vec<String>> {
        self.tables
            .iter()
            .rev()
            .map(|table| {
                DropTable::new(table.name())
                    .build(dialect)
                    .map(|(sql, _)| sql)
            })
            .collect()
    }
}
