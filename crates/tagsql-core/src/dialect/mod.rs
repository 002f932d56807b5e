//! SQL dialect support.
//!
//! Different databases quote identifiers, number placeholders, name types and
//! report errors differently. A [`Dialect`] captures those differences and
//! hands out the [`Compiler`] that renders statements for it.
//!
//! Dialects are looked up by driver name through a process-wide registry.
//! `default`, `postgres`/`postgresql` and `mysql` are always available;
//! other crates install theirs with [`register_dialect`] at startup.

mod default;
mod mysql;
mod postgres;
mod registry;

pub use default::DefaultDialect;
pub use mysql::{MysqlCompiler, MysqlDialect};
pub use postgres::{PostgresCompiler, PostgresDialect};
pub use registry::{new_dialect, register_dialect, registered_drivers, DialectConstructor};

use std::fmt;

use crate::compiler::{Compiler, SqlCompiler};
use crate::error::{classify_sqlstate, classify_transport, DriverError, ErrorKind, Result};
use crate::table::Column;
use crate::types::Type;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the driver name the dialect is registered under.
    fn driver(&self) -> &'static str;

    /// Returns whether identifiers are quoted.
    fn escaping(&self) -> bool;

    /// Turns identifier quoting on or off.
    fn set_escaping(&mut self, escaping: bool);

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier when escaping is on.
    ///
    /// Already quoted identifiers are returned unchanged, so escaping twice
    /// is the same as escaping once.
    fn escape(&self, ident: &str) -> String {
        if !self.escaping() {
            return String::from(ident);
        }
        let quote = self.quote_char();
        if ident.len() >= 2 && ident.starts_with(quote) && ident.ends_with(quote) {
            return String::from(ident);
        }
        format!("{quote}{ident}{quote}")
    }

    /// Escapes every identifier.
    fn escape_all(&self, idents: &[String]) -> Vec<String> {
        idents.iter().map(|i| self.escape(i)).collect()
    }

    /// Returns the placeholder for the binding at `position` (1-based).
    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }

    /// Returns whether INSERT/UPDATE/DELETE accept RETURNING.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Returns whether integer types accept the UNSIGNED modifier.
    fn supports_unsigned(&self) -> bool {
        false
    }

    /// Type names rendered differently by this dialect, as `(name, sql)`.
    fn type_overrides(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Renders a column type, applying the dialect's overrides.
    fn compile_type(&self, ty: &Type) -> String {
        self.type_overrides()
            .iter()
            .find(|(name, _)| *name == ty.name())
            .map_or_else(
                || ty.sql(self.supports_unsigned()),
                |(_, sql)| String::from(*sql),
            )
    }

    /// Renders the type and keywords of an auto-increment column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DialectPrecondition`] when the dialect cannot make
    /// this column auto-increment.
    ///
    /// [`Error::DialectPrecondition`]: crate::error::Error::DialectPrecondition
    fn auto_increment(&self, column: &Column) -> Result<String> {
        let mut sql = format!("{} AUTO_INCREMENT", self.compile_type(&column.ty));
        if column.options.inline_primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        Ok(sql)
    }

    /// Classifies a native driver error.
    ///
    /// Database errors are classified by SQLSTATE class.
    fn wrap_error(&self, err: sqlx::Error) -> DriverError {
        let kind = classify_transport(&err).unwrap_or_else(|| match &err {
            sqlx::Error::Database(db) => db
                .code()
                .map_or(ErrorKind::Database, |code| classify_sqlstate(&code)),
            _ => ErrorKind::Database,
        });
        DriverError::new(kind, err)
    }

    /// Returns the compiler that renders statements for this dialect.
    fn compiler(&self) -> &'static dyn Compiler {
        &SqlCompiler
    }
}
