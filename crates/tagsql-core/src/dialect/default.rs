//! Default SQL dialect.

use super::Dialect;

/// A dialect with portable rendering: `"` quoting, `?` placeholders, no
/// RETURNING and no upsert.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDialect {
    escaping: bool,
}

impl DefaultDialect {
    /// Creates a new default dialect with escaping off.
    #[must_use]
    pub const fn new() -> Self {
        Self { escaping: false }
    }
}

impl Dialect for DefaultDialect {
    fn driver(&self) -> &'static str {
        "default"
    }

    fn escaping(&self) -> bool {
        self.escaping
    }

    fn set_escaping(&mut self, escaping: bool) {
        self.escaping = escaping;
    }
}
