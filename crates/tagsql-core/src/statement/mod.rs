//! Top-level statements.
//!
//! Every statement builder implements [`Build`], which compiles it with a
//! dialect into SQL text plus the ordered bindings:
//!
//! ```rust
//! use tagsql_core::dialect::DefaultDialect;
//! use tagsql_core::expr::col;
//! use tagsql_core::statement::{Build, Select};
//! use tagsql_core::value::SqlValue;
//!
//! let (sql, binds) = Select::new([col("id"), col("name")])
//!     .from("users")
//!     .where_clause(col("id").in_([1, 2, 3]))
//!     .build(&DefaultDialect::new())
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT id, name FROM users WHERE id IN (?, ?, ?)");
//! assert_eq!(binds, vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]);
//! ```

mod delete;
mod drop;
mod insert;
mod select;
mod update;
mod upsert;

pub use delete::Delete;
pub use drop::DropTable;
pub use insert::Insert;
pub use select::{HasFrom, Join, JoinKind, NoFrom, Order, Select};
pub use update::Update;
pub use upsert::Upsert;

use crate::compiler;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::table::{Index, Table};
use crate::value::SqlValue;

/// A borrowed view of any top-level statement, dispatched on by the compiler.
#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    /// `SELECT`.
    Select(&'a Select<HasFrom>),
    /// `INSERT`.
    Insert(&'a Insert),
    /// `UPDATE`.
    Update(&'a Update),
    /// `DELETE`.
    Delete(&'a Delete),
    /// Insert-or-replace.
    Upsert(&'a Upsert),
    /// `CREATE TABLE`.
    CreateTable(&'a Table),
    /// `CREATE INDEX` for one index of a table.
    CreateIndex(&'a Table, &'a Index),
    /// `DROP TABLE`.
    DropTable(&'a DropTable),
}

/// Compiles a statement into SQL text and bindings.
pub trait Build {
    /// Returns the statement view handed to the compiler.
    fn statement(&self) -> Statement<'_>;

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the dialect cannot render the statement or the statement is
    /// incomplete.
    fn build(&self, dialect: &dyn Dialect) -> Result<(String, Vec<SqlValue>)> {
        compiler::compile(dialect, self.statement())
    }
}
