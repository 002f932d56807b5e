//! SQLite dialect implementation.

use tagsql_core::compiler::{Compiler, CompilerContext};
use tagsql_core::dialect::Dialect;
use tagsql_core::error::{classify_transport, DriverError, Error, ErrorKind, Result};
use tagsql_core::statement::Upsert;
use tagsql_core::table::Column;
use tracing::trace;

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect {
    escaping: bool,
}

impl SqliteDialect {
    /// Creates a new SQLite dialect with escaping off.
    #[must_use]
    pub const fn new() -> Self {
        Self { escaping: false }
    }
}

impl Dialect for SqliteDialect {
    fn driver(&self) -> &'static str {
        "sqlite3"
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }

    fn supports_returning(&self) -> bool {
        true // SQLite 3.35.0+
    }

    fn type_overrides(&self) -> &'static [(&'static str, &'static str)] {
        &[("UUID", "VARCHAR(36)")]
    }

    /// Only an inline `INTEGER PRIMARY KEY` aliases the rowid, so that is the
    /// one shape SQLite can auto-increment.
    fn auto_increment(&self, column: &Column) -> Result<String> {
        if column.options.inline_primary_key {
            Ok(String::from("INTEGER PRIMARY KEY"))
        } else {
            Err(Error::DialectPrecondition(format!(
                "sqlite3: auto_increment column `{}` must be the primary key",
                column.name
            )))
        }
    }

    fn wrap_error(&self, err: sqlx::Error) -> DriverError {
        let kind = classify_transport(&err).unwrap_or_else(|| match &err {
            sqlx::Error::Database(db) => db
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map_or(ErrorKind::Database, classify_code),
            _ => ErrorKind::Database,
        });
        trace!(%kind, "classified sqlite error");
        DriverError::new(kind, err)
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &SqliteCompiler
    }
}

/// Classifies a SQLite result code.
///
/// Extended codes are reduced to their primary code (the low byte) first.
#[must_use]
pub const fn classify_code(code: i32) -> ErrorKind {
    match code & 0xff {
        // SQLITE_INTERNAL, SQLITE_NOMEM, SQLITE_NOTFOUND
        2 | 7 | 12 => ErrorKind::Internal,
        // SQLITE_ERROR, SQLITE_PERM ... SQLITE_EMPTY, except CORRUPT and NOTFOUND
        1 | 3 | 4 | 5 | 6 | 8 | 9 | 10 | 13 | 14 | 15 | 16 | 17 => ErrorKind::Operational,
        // SQLITE_CORRUPT
        11 => ErrorKind::Database,
        // SQLITE_TOOBIG
        18 => ErrorKind::Data,
        // SQLITE_CONSTRAINT, SQLITE_MISMATCH
        19 | 20 => ErrorKind::Integrity,
        // SQLITE_MISUSE
        21 => ErrorKind::Programming,
        _ => ErrorKind::Database,
    }
}

/// Compiler rendering upserts as `REPLACE INTO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteCompiler;

impl Compiler for SqliteCompiler {
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &Upsert) -> Result<String> {
        let (columns, placeholders) = self.visit_upsert_values(ctx, upsert)?;
        let table = self.visit_label(ctx, upsert.table());
        Ok(format!(
            "REPLACE INTO {table} ({columns}) VALUES ({placeholders})"
        ))
    }
}
