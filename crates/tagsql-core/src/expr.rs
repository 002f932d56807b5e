//! The clause tree.
//!
//! Predicates are plain data. Rendering, placeholder numbering and binding
//! collection all happen in the [`Compiler`](crate::compiler::Compiler),
//! which walks the tree left to right so that the Nth placeholder in the
//! output always corresponds to the Nth binding.

use serde::{Deserialize, Serialize};

use crate::value::{SqlValue, ToSqlValue};

/// Creates an unqualified column reference.
#[must_use]
pub fn col(name: &str) -> ColumnRef {
    ColumnRef::new(name)
}

/// A reference to a column, optionally qualified with its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Creates an unqualified reference.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            table: None,
            name: String::from(name),
        }
    }

    /// Creates a `table.column` reference.
    #[must_use]
    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
        }
    }

    fn compare<T: ToSqlValue>(self, op: CompareOp, value: T) -> Clause {
        Clause::Compare {
            column: self,
            op,
            value: value.to_sql_value(),
        }
    }

    /// `column = value`.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::Eq, value)
    }

    /// `column != value`.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::NotEq, value)
    }

    /// `column > value`.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::Gt, value)
    }

    /// `column >= value`.
    #[must_use]
    pub fn gte<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::Gte, value)
    }

    /// `column < value`.
    #[must_use]
    pub fn st<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::St, value)
    }

    /// `column <= value`.
    #[must_use]
    pub fn ste<T: ToSqlValue>(self, value: T) -> Clause {
        self.compare(CompareOp::Ste, value)
    }

    /// `column IN (values...)`.
    #[must_use]
    pub fn in_<I, T>(self, values: I) -> Clause
    where
        I: IntoIterator<Item = T>,
        T: ToSqlValue,
    {
        Clause::In {
            column: self,
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (values...)`.
    #[must_use]
    pub fn not_in<I, T>(self, values: I) -> Clause
    where
        I: IntoIterator<Item = T>,
        T: ToSqlValue,
    {
        Clause::In {
            column: self,
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
            negated: true,
        }
    }

    /// `column LIKE pattern`. The pattern is bound, never inlined.
    #[must_use]
    pub fn like(self, pattern: &str) -> Clause {
        Clause::Like {
            column: self,
            pattern: String::from(pattern),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    St,
    /// `<=`
    Ste,
}

impl CompareOp {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::St => "<",
            Self::Ste => "<=",
        }
    }
}

/// A node of the clause tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// A bare column reference.
    Column(ColumnRef),
    /// `column <op> value`.
    Compare {
        /// Left-hand column.
        column: ColumnRef,
        /// Operator.
        op: CompareOp,
        /// Bound right-hand value.
        value: SqlValue,
    },
    /// `column [NOT] IN (values...)`.
    In {
        /// Tested column.
        column: ColumnRef,
        /// Bound members.
        values: Vec<SqlValue>,
        /// `NOT IN` when set.
        negated: bool,
    },
    /// `column LIKE pattern`.
    Like {
        /// Tested column.
        column: ColumnRef,
        /// Bound pattern.
        pattern: String,
    },
    /// Conjunction.
    And(Vec<Clause>),
    /// Disjunction.
    Or(Vec<Clause>),
    /// Negation.
    Not(Box<Clause>),
}

impl Clause {
    /// Combines with `AND`, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut clauses) => {
                clauses.push(other);
                Self::And(clauses)
            }
            clause => Self::And(vec![clause, other]),
        }
    }

    /// Combines with `OR`, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut clauses) => {
                clauses.push(other);
                Self::Or(clauses)
            }
            clause => Self::Or(vec![clause, other]),
        }
    }

    /// Wraps in `NOT`.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl From<ColumnRef> for Clause {
    fn from(column: ColumnRef) -> Self {
        Self::Column(column)
    }
}

/// `AND` over every clause.
#[must_use]
pub fn and<I: IntoIterator<Item = Clause>>(clauses: I) -> Clause {
    Clause::And(clauses.into_iter().collect())
}

/// `OR` over every clause.
#[must_use]
pub fn or<I: IntoIterator<Item = Clause>>(clauses: I) -> Clause {
    Clause::Or(clauses.into_iter().collect())
}

/// `NOT clause`.
#[must_use]
pub fn not(clause: Clause) -> Clause {
    clause.not()
}
