//! DROP TABLE statement.

use super::{Build, Statement};

/// A DROP TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    pub(crate) table: String,
    pub(crate) if_exists: bool,
}

impl DropTable {
    /// Creates a DROP TABLE for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            if_exists: false,
        }
    }

    /// Adds IF EXISTS.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

impl Build for DropTable {
    fn statement(&self) -> Statement<'_> {
        Statement::DropTable(self)
    }
}
