//! SELECT statement builder using the typestate pattern.
//!
//! A query has no FROM until [`Select::from`] is called, and only then do
//! joins, filters and [`Build`] become available.

use std::marker::PhantomData;

use super::{Build, Statement};
use crate::expr::{Clause, ColumnRef};

// Typestate markers (zero-sized types)

/// Marker: No FROM clause specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoFrom;
/// Marker: FROM clause has been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasFrom;

/// Join flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`.
    Inner,
    /// `LEFT JOIN`.
    Left,
    /// `RIGHT JOIN`.
    Right,
    /// `CROSS JOIN`, which takes no condition.
    Cross,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A join against another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Join flavor.
    pub kind: JoinKind,
    /// Joined table.
    pub table: String,
    /// `ON left = right`, absent for cross joins.
    pub on: Option<(ColumnRef, ColumnRef)>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// A SELECT statement.
#[derive(Debug, Clone)]
pub struct Select<State = HasFrom> {
    pub(crate) columns: Vec<ColumnRef>,
    pub(crate) from: String,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_clause: Option<Clause>,
    pub(crate) group_by: Vec<ColumnRef>,
    pub(crate) order_by: Vec<(ColumnRef, Order)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    _state: PhantomData<State>,
}

impl Select<NoFrom> {
    /// Starts a query selecting the given columns.
    #[must_use]
    pub fn new<I: IntoIterator<Item = ColumnRef>>(columns: I) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            from: String::new(),
            joins: vec![],
            where_clause: None,
            group_by: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
            _state: PhantomData,
        }
    }

    // Transition: NoFrom -> HasFrom

    /// Specifies the table to select from.
    #[must_use]
    pub fn from(self, table: &str) -> Select<HasFrom> {
        Select {
            columns: self.columns,
            from: String::from(table),
            joins: self.joins,
            where_clause: self.where_clause,
            group_by: self.group_by,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
            _state: PhantomData,
        }
    }
}

// Methods available after FROM
impl Select<HasFrom> {
    fn push_join(
        mut self,
        kind: JoinKind,
        table: &str,
        on: Option<(ColumnRef, ColumnRef)>,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: String::from(table),
            on,
        });
        self
    }

    /// Adds an `INNER JOIN table ON left = right`.
    #[must_use]
    pub fn join(self, table: &str, left: ColumnRef, right: ColumnRef) -> Self {
        self.push_join(JoinKind::Inner, table, Some((left, right)))
    }

    /// Adds a `LEFT JOIN table ON left = right`.
    #[must_use]
    pub fn left_join(self, table: &str, left: ColumnRef, right: ColumnRef) -> Self {
        self.push_join(JoinKind::Left, table, Some((left, right)))
    }

    /// Adds a `RIGHT JOIN table ON left = right`.
    #[must_use]
    pub fn right_join(self, table: &str, left: ColumnRef, right: ColumnRef) -> Self {
        self.push_join(JoinKind::Right, table, Some((left, right)))
    }

    /// Adds a `CROSS JOIN table`.
    #[must_use]
    pub fn cross_join(self, table: &str) -> Self {
        self.push_join(JoinKind::Cross, table, None)
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

    /// Adds a GROUP BY clause.
    #[must_use]
    pub fn group_by<I: IntoIterator<Item = ColumnRef>>(mut self, columns: I) -> Self {
        self.group_by.extend(columns);
        self
    }

    /// Adds an ORDER BY term.
    #[must_use]
    pub fn order_by(mut self, column: ColumnRef, order: Order) -> Self {
        self.order_by.push((column, order));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl Build for Select<HasFrom> {
    fn statement(&self) -> Statement<'_> {
        Statement::Select(self)
    }
}
