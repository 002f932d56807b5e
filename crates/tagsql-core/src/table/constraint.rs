//! Column and table constraints.

use serde::{Deserialize, Serialize};

/// A pre-rendered constraint fragment, e.g. `NOT NULL` or `UNIQUE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    /// The SQL text of the constraint.
    pub name: String,
}

impl Constraint {
    /// Creates a constraint from literal SQL text.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self { name: sql.into() }
    }

    /// `NULL`.
    #[must_use]
    pub fn null() -> Self {
        Self::raw("NULL")
    }

    /// `NOT NULL`.
    #[must_use]
    pub fn not_null() -> Self {
        Self::raw("NOT NULL")
    }

    /// `UNIQUE`.
    #[must_use]
    pub fn unique() -> Self {
        Self::raw("UNIQUE")
    }

    /// `DEFAULT (<expr>)`. The expression is not checked.
    #[must_use]
    pub fn default(expr: &str) -> Self {
        Self::raw(format!("DEFAULT ({expr})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_text() {
        assert_eq!(Constraint::null().name, "NULL");
        assert_eq!(Constraint::not_null().name, "NOT NULL");
        assert_eq!(Constraint::unique().name, "UNIQUE");
        assert_eq!(Constraint::default("0").name, "DEFAULT (0)");
        assert_eq!(
            Constraint::raw("CHECK (age > 0)").name,
            "CHECK (age > 0)"
        );
    }
}
