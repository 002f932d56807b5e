//! DELETE statement builder.

use super::{Build, Statement};
use crate::expr::{Clause, ColumnRef};

/// A DELETE statement. Without a WHERE clause it deletes every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    pub(crate) table: String,
    pub(crate) where_clause: Option<Clause>,
    pub(crate) returning: Vec<ColumnRef>,
}

impl Delete {
    /// Creates a DELETE from `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            ..Self::default()
        }
    }

    /// Sets the WHERE clause. Calling it again combines with `AND`.
    #[must_use]
    pub fn where_clause(mut self, clause: Clause) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and(clause),
            None => clause,
        });
        self
    }

    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning<I: IntoIterator<Item = ColumnRef>>(mut self, columns: I) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Build for Delete {
    fn statement(&self) -> Statement<'_> {
        Statement::Delete(self)
    }
}
