//! # tagsql-sqlite
//!
//! SQLite dialect for `tagsql-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **Upsert**: rendered as [`REPLACE INTO`], which deletes the conflicting
//!   row and inserts the new one.
//! - **[RETURNING]**: supported on INSERT, UPDATE and DELETE (since SQLite
//!   3.35.0).
//! - **Identifier quoting**: double quotes (`"`), the standard style, though
//!   SQLite also accepts backticks and square brackets.
//! - **[Type affinity]**: there is no native UUID type, so UUID columns are
//!   declared `VARCHAR(36)`.
//! - **[Auto-increment]**: only an `INTEGER PRIMARY KEY` column aliases the
//!   rowid, so auto-increment columns must carry an inline primary key.
//! - **Errors**: classified by [result code] rather than SQLSTATE.
//!
//! [`REPLACE INTO`]: https://www.sqlite.org/lang_replace.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//! [Auto-increment]: https://www.sqlite.org/autoinc.html
//! [result code]: https://www.sqlite.org/rescode.html
//!
//! ## Example
//!
//! ```rust
//! use tagsql_core::mapper::Mapper;
//! use tagsql_core::schema::{Field, FieldKind, ModelSchema};
//!
//! tagsql_sqlite::register();
//!
//! let schema = ModelSchema::new("Device")
//!     .field(Field::new("ID", FieldKind::Int64).tag("constraints:primary_key,auto_increment"))
//!     .field(Field::new("Serial", FieldKind::Uuid).tag("constraints:unique"));
//!
//! let table = Mapper::new("sqlite3").convert(&schema).unwrap();
//! assert_eq!(
//!     table.sql().unwrap(),
//!     "CREATE TABLE device (id INTEGER PRIMARY KEY, serial VARCHAR(36) UNIQUE)"
//! );
//! ```

mod dialect;

pub use dialect::{classify_code, SqliteCompiler, SqliteDialect};

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use tagsql_core::dialect::{register_dialect, Dialect};
use tagsql_core::value::SqlValue;

fn sqlite_dialect() -> Box<dyn Dialect> {
    Box::new(SqliteDialect::new())
}

/// Installs the SQLite dialect under the `sqlite3` and `sqlite` driver names.
///
/// Calling it more than once is harmless.
pub fn register() {
    register_dialect("sqlite3", sqlite_dialect);
    register_dialect("sqlite", sqlite_dialect);
}

/// Prepares a `sqlx` query from compiled SQL and its bindings, in order.
#[must_use]
pub fn query(sql: &str, params: Vec<SqlValue>) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    params
        .into_iter()
        .fold(sqlx::query(sql), |query, value| match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Blob(b) => query.bind(b),
            SqlValue::Timestamp(ts) => query.bind(ts),
        })
}
