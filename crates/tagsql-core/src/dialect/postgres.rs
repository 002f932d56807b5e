//! PostgreSQL dialect.

use super::Dialect;
use crate::compiler::{unsupported, Compiler, CompilerContext};
use crate::error::Result;
use crate::statement::Upsert;
use crate::table::Column;

/// PostgreSQL dialect: `$N` placeholders, native UUID, SERIAL columns and
/// `ON CONFLICT` upserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect {
    escaping: bool,
}

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect with escaping off.
    #[must_use]
    pub const fn new() -> Self {
        Self { escaping: false }
    }
}

impl Dialect for PostgresDialect {
    fn driver(&self) -> &'static str {
        "postgres"
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${position}")
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn type_overrides(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("TINYINT", "SMALLINT"),
            ("DATETIME", "TIMESTAMP"),
            ("DOUBLE", "DOUBLE PRECISION"),
            ("BLOB", "BYTEA"),
            ("MEDIUMBLOB", "BYTEA"),
            ("LONGBLOB", "BYTEA"),
            ("MEDIUMTEXT", "TEXT"),
            ("LONGTEXT", "TEXT"),
        ]
    }

    fn auto_increment(&self, column: &Column) -> Result<String> {
        let serial = match column.ty.name() {
            "TINYINT" | "SMALLINT" => "SMALLSERIAL",
            "BIGINT" => "BIGSERIAL",
            _ => "SERIAL",
        };
        let mut sql = String::from(serial);
        if column.options.inline_primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        Ok(sql)
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &PostgresCompiler
    }
}

/// Compiler rendering upserts as `INSERT ... ON CONFLICT`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresCompiler;

impl Compiler for PostgresCompiler {
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &Upsert) -> Result<String> {
        if upsert.keys.is_empty() {
            return Err(unsupported(ctx, "upsert without a primary key"));
        }
        let (columns, placeholders) = self.visit_upsert_values(ctx, upsert)?;
        let table = self.visit_label(ctx, &upsert.table);
        let keys = ctx.dialect().escape_all(&upsert.keys).join(", ");

        let updates: Vec<String> = upsert
            .update_columns()
            .into_iter()
            .map(|c| {
                let c = self.visit_label(ctx, c);
                format!("{c} = EXCLUDED.{c}")
            })
            .collect();
        let action = if updates.is_empty() {
            String::from("DO NOTHING")
        } else {
            format!("DO UPDATE SET {}", updates.join(", "))
        };

        Ok(format!(
            "INSERT INTO {table} ({columns}) VALUES ({placeholders}) ON CONFLICT ({keys}) {action}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.driver(), "postgres");
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(12), "$12");
        assert!(dialect.supports_returning());
        assert!(!dialect.supports_unsigned());
    }

    #[test]
    fn test_type_overrides() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.compile_type(&Type::datetime()), "TIMESTAMP");
        assert_eq!(dialect.compile_type(&Type::blob(1024)), "BYTEA");
        assert_eq!(dialect.compile_type(&Type::varchar()), "VARCHAR(255)");
    }

    #[test]
    fn test_serial_columns() {
        let dialect = PostgresDialect::new();
        let id = Column::new("id", Type::big_int()).auto_increment().primary_key();
        assert_eq!(dialect.auto_increment(&id).unwrap(), "BIGSERIAL PRIMARY KEY");

        let seq = Column::new("seq", Type::int()).auto_increment();
        assert_eq!(dialect.auto_increment(&seq).unwrap(), "SERIAL");
    }
}
