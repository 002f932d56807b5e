//! MySQL dialect.

use super::Dialect;
use crate::compiler::{Compiler, CompilerContext};
use crate::error::Result;
use crate::statement::Upsert;

/// MySQL dialect: backtick quoting, UNSIGNED integers, UUID stored as
/// `VARCHAR(36)` and `ON DUPLICATE KEY UPDATE` upserts.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect {
    escaping: bool,
}

impl MysqlDialect {
    /// Creates a new MySQL dialect with escaping off.
    #[must_use]
    pub const fn new() -> Self {
        Self { escaping: false }
    }
}

impl Dialect for MysqlDialect {
    fn driver(&self) -> &'static str {
        "mysql"
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn supports_unsigned(&self) -> bool {
        true
    }

    fn type_overrides(&self) -> &'static [(&'static str, &'static str)] {
        &[("UUID", "VARCHAR(36)")]
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &MysqlCompiler
    }
}

/// Compiler rendering upserts as `INSERT ... ON DUPLICATE KEY UPDATE`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlCompiler;

impl Compiler for MysqlCompiler {
    fn visit_default_values(&self) -> &'static str {
        "() VALUES ()"
    }

    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &Upsert) -> Result<String> {
        let (columns, placeholders) = self.visit_upsert_values(ctx, upsert)?;
        let table = self.visit_label(ctx, &upsert.table);

        // MySQL needs at least one assignment even when every column is a key.
        let mut targets = upsert.update_columns();
        if targets.is_empty() {
            targets = upsert.values.keys().map(String::as_str).collect();
        }
        let updates: Vec<String> = targets
            .into_iter()
            .map(|c| {
                let c = self.visit_label(ctx, c);
                format!("{c} = VALUES({c})")
            })
            .collect();

        Ok(format!(
            "INSERT INTO {table} ({columns}) VALUES ({placeholders}) ON DUPLICATE KEY UPDATE {}",
            updates.join(", ")
        ))
    }
}
