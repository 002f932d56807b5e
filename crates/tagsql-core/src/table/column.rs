//! Table column definitions.

use serde::{Deserialize, Serialize};

use super::constraint::Constraint;
use crate::expr::{Clause, ColumnRef};
use crate::types::Type;
use crate::value::ToSqlValue;

/// Rendering options that change how the column definition is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOptions {
    /// The database generates values for this column.
    pub auto_increment: bool,
    /// The column is the primary key and says so in its own definition.
    pub inline_primary_key: bool,
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column type.
    pub ty: Type,
    /// Owning table, set when the column is added to one.
    pub table: Option<String>,
    /// Column constraints, in rendering order.
    pub constraints: Vec<Constraint>,
    /// Rendering options.
    pub options: ColumnOptions,
}

impl Column {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            table: None,
            constraints: Vec::new(),
            options: ColumnOptions::default(),
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Shorthand for a `NOT NULL` constraint.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.constraint(Constraint::not_null())
    }

    /// Shorthand for a `UNIQUE` constraint.
    #[must_use]
    pub fn unique(self) -> Self {
        self.constraint(Constraint::unique())
    }

    /// Marks the column auto-increment.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.options.auto_increment = true;
        self
    }

    /// Makes the column the inline primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.options.inline_primary_key = true;
        self
    }

    /// Returns an unqualified reference to this column.
    #[must_use]
    pub fn to_ref(&self) -> ColumnRef {
        ColumnRef::new(&self.name)
    }

    /// Returns a reference qualified with the owning table, if any.
    #[must_use]
    pub fn qualified(&self) -> ColumnRef {
        match &self.table {
            Some(table) => ColumnRef::qualified(table, &self.name),
            None => self.to_ref(),
        }
    }

    /// `column = value`.
    #[must_use]
    pub fn eq<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().eq(value)
    }

    /// `column != value`.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().not_eq(value)
    }

    /// `column > value`.
    #[must_use]
    pub fn gt<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().gt(value)
    }

    /// `column >= value`.
    #[must_use]
    pub fn gte<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().gte(value)
    }

    /// `column < value`.
    #[must_use]
    pub fn st<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().st(value)
    }

    /// `column <= value`.
    #[must_use]
    pub fn ste<T: ToSqlValue>(&self, value: T) -> Clause {
        self.to_ref().ste(value)
    }

    /// `column IN (values...)`.
    #[must_use]
    pub fn in_<I, T>(&self, values: I) -> Clause
    where
        I: IntoIterator<Item = T>,
        T: ToSqlValue,
    {
        self.to_ref().in_(values)
    }

    /// `column NOT IN (values...)`.
    #[must_use]
    pub fn not_in<I, T>(&self, values: I) -> Clause
    where
        I: IntoIterator<Item = T>,
        T: ToSqlValue,
    {
        self.to_ref().not_in(values)
    }

    /// `column LIKE pattern`, with the pattern bound.
    #[must_use]
    pub fn like(&self, pattern: &str) -> Clause {
        self.to_ref().like(pattern)
    }
}
