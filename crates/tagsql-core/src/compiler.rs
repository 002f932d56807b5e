//! Statement compilation.
//!
//! A [`Compiler`] walks a [`Statement`] and its clause tree, producing SQL
//! text while pushing literal values into a [`CompilerContext`]. Every
//! visitor renders its placeholders in the same order it binds values, so
//! binding N always belongs to the Nth placeholder in the output.
//!
//! Dialects customize rendering by returning their own compiler from
//! [`Dialect::compiler`] and overriding individual `visit_*` methods, the
//! way SQLite overrides [`Compiler::visit_upsert`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::expr::{Clause, ColumnRef, CompareOp};
use crate::statement::{
    Delete, DropTable, HasFrom, Insert, Join, Order, Select, Statement, Update, Upsert,
};
use crate::table::{Column, Index, Table};
use crate::value::SqlValue;

/// Mutable state of a single compilation.
///
/// Owned by one compilation call and never shared.
#[derive(Debug)]
pub struct CompilerContext<'a> {
    binds: Vec<SqlValue>,
    dialect: &'a dyn Dialect,
}

impl<'a> CompilerContext<'a> {
    /// Creates an empty context.
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            binds: Vec::new(),
            dialect,
        }
    }

    /// Returns the active dialect.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Appends a binding and returns its placeholder.
    pub fn bind(&mut self, value: SqlValue) -> String {
        self.binds.push(value);
        self.dialect.placeholder(self.binds.len())
    }

    /// Escapes an identifier with the active dialect.
    #[must_use]
    pub fn escape(&self, ident: &str) -> String {
        self.dialect.escape(ident)
    }

    /// Returns the bindings collected so far.
    #[must_use]
    pub fn binds(&self) -> &[SqlValue] {
        &self.binds
    }

    /// Consumes the context, returning the bindings.
    #[must_use]
    pub fn into_binds(self) -> Vec<SqlValue> {
        self.binds
    }
}

/// Compiles a statement with a dialect into SQL text and ordered bindings.
///
/// # Errors
///
/// Fails when the dialect cannot render the statement or the statement is
/// incomplete.
pub fn compile(dialect: &dyn Dialect, statement: Statement<'_>) -> Result<(String, Vec<SqlValue>)> {
    let mut ctx = CompilerContext::new(dialect);
    let sql = dialect.compiler().compile(&mut ctx, statement)?;
    let binds = ctx.into_binds();
    debug!(
        driver = dialect.driver(),
        sql = %sql,
        bindings = binds.len(),
        "compiled statement"
    );
    Ok((sql, binds))
}

/// Renders statements and clauses.
///
/// Every method has a default; dialect compilers override only what differs.
pub trait Compiler: Send + Sync {
    /// Dispatches a statement to its visitor.
    ///
    /// # Errors
    ///
    /// Propagates visitor errors.
    fn compile(&self, ctx: &mut CompilerContext<'_>, statement: Statement<'_>) -> Result<String> {
        match statement {
            Statement::Select(select) => self.visit_select(ctx, select),
            Statement::Insert(insert) => self.visit_insert(ctx, insert),
            Statement::Update(update) => self.visit_update(ctx, update),
            Statement::Delete(delete) => self.visit_delete(ctx, delete),
            Statement::Upsert(upsert) => self.visit_upsert(ctx, upsert),
            Statement::CreateTable(table) => self.visit_create_table(ctx, table),
            Statement::CreateIndex(table, index) => Ok(self.visit_create_index(ctx, table, index)),
            Statement::DropTable(drop) => Ok(self.visit_drop_table(ctx, drop)),
        }
    }

    /// Dispatches a clause to its visitor.
    fn visit(&self, ctx: &mut CompilerContext<'_>, clause: &Clause) -> String {
        match clause {
            Clause::Column(column) => self.visit_column(ctx, column),
            Clause::Compare { column, op, value } => self.visit_compare(ctx, column, *op, value),
            Clause::In {
                column,
                values,
                negated,
            } => self.visit_in(ctx, column, values, *negated),
            Clause::Like { column, pattern } => self.visit_like(ctx, column, pattern),
            Clause::And(clauses) => self.visit_and(ctx, clauses),
            Clause::Or(clauses) => self.visit_or(ctx, clauses),
            Clause::Not(clause) => self.visit_not(ctx, clause),
        }
    }

    /// Renders a table or column name.
    fn visit_label(&self, ctx: &mut CompilerContext<'_>, name: &str) -> String {
        ctx.escape(name)
    }

    /// Renders a column reference, escaping each part.
    fn visit_column(&self, ctx: &mut CompilerContext<'_>, column: &ColumnRef) -> String {
        match &column.table {
            Some(table) => format!(
                "{}.{}",
                self.visit_label(ctx, table),
                self.visit_label(ctx, &column.name)
            ),
            None => self.visit_label(ctx, &column.name),
        }
    }

    /// Renders `column <op> ?`.
    fn visit_compare(
        &self,
        ctx: &mut CompilerContext<'_>,
        column: &ColumnRef,
        op: CompareOp,
        value: &SqlValue,
    ) -> String {
        let column = self.visit_column(ctx, column);
        let placeholder = ctx.bind(value.clone());
        format!("{column} {} {placeholder}", op.as_str())
    }

    /// Renders `column [NOT] IN (?, ...)`.
    ///
    /// With no values, IN renders the always-false `1 = 0` and NOT IN the
    /// always-true `1 = 1`.
    fn visit_in(
        &self,
        ctx: &mut CompilerContext<'_>,
        column: &ColumnRef,
        values: &[SqlValue],
        negated: bool,
    ) -> String {
        if values.is_empty() {
            return String::from(if negated { "1 = 1" } else { "1 = 0" });
        }
        let column = self.visit_column(ctx, column);
        let placeholders: Vec<String> = values.iter().map(|v| ctx.bind(v.clone())).collect();
        let op = if negated { "NOT IN" } else { "IN" };
        format!("{column} {op} ({})", placeholders.join(", "))
    }

    /// Renders `column LIKE ?`.
    fn visit_like(&self, ctx: &mut CompilerContext<'_>, column: &ColumnRef, pattern: &str) -> String {
        let column = self.visit_column(ctx, column);
        let placeholder = ctx.bind(SqlValue::Text(String::from(pattern)));
        format!("{column} LIKE {placeholder}")
    }

    /// Renders a conjunction. An empty one is `1 = 1`.
    fn visit_and(&self, ctx: &mut CompilerContext<'_>, clauses: &[Clause]) -> String {
        junction(self, ctx, clauses, " AND ", "1 = 1")
    }

    /// Renders a disjunction. An empty one is `1 = 0`.
    fn visit_or(&self, ctx: &mut CompilerContext<'_>, clauses: &[Clause]) -> String {
        junction(self, ctx, clauses, " OR ", "1 = 0")
    }

    /// Renders `NOT (clause)`.
    fn visit_not(&self, ctx: &mut CompilerContext<'_>, clause: &Clause) -> String {
        format!("NOT ({})", self.visit(ctx, clause))
    }

    /// Renders a SELECT.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatement`] when no columns are selected or
    /// when OFFSET is given without LIMIT.
    fn visit_select(&self, ctx: &mut CompilerContext<'_>, select: &Select<HasFrom>) -> Result<String> {
        if select.columns.is_empty() {
            return Err(Error::InvalidStatement(String::from("SELECT without columns")));
        }

        let columns: Vec<String> = select
            .columns
            .iter()
            .map(|c| self.visit_column(ctx, c))
            .collect();
        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            self.visit_label(ctx, &select.from)
        );

        for join in &select.joins {
            sql.push(' ');
            sql.push_str(&self.visit_join(ctx, join));
        }

        if let Some(clause) = &select.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.visit(ctx, clause));
        }

        if !select.group_by.is_empty() {
            let columns: Vec<String> = select
                .group_by
                .iter()
                .map(|c| self.visit_column(ctx, c))
                .collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&columns.join(", "));
        }

        if !select.order_by.is_empty() {
            let terms: Vec<String> = select
                .order_by
                .iter()
                .map(|(c, order)| {
                    let dir = match order {
                        Order::Asc => "ASC",
                        Order::Desc => "DESC",
                    };
                    format!("{} {dir}", self.visit_column(ctx, c))
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = select.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = select.offset {
            if select.limit.is_none() {
                return Err(Error::InvalidStatement(String::from(
                    "OFFSET without LIMIT",
                )));
            }
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(sql)
    }

    /// Renders one join.
    fn visit_join(&self, ctx: &mut CompilerContext<'_>, join: &Join) -> String {
        let table = self.visit_label(ctx, &join.table);
        match &join.on {
            Some((left, right)) => format!(
                "{} {table} ON {} = {}",
                join.kind.as_str(),
                self.visit_column(ctx, left),
                self.visit_column(ctx, right)
            ),
            None => format!("{} {table}", join.kind.as_str()),
        }
    }

    /// Renders the column list and placeholder list of a value map.
    fn visit_values(
        &self,
        ctx: &mut CompilerContext<'_>,
        values: &BTreeMap<String, SqlValue>,
    ) -> (String, String) {
        let mut columns = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        for (column, value) in values {
            columns.push(self.visit_label(ctx, column));
            placeholders.push(ctx.bind(value.clone()));
        }
        (columns.join(", "), placeholders.join(", "))
    }

    /// The tail of an INSERT that supplies no columns.
    fn visit_default_values(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    /// Renders an INSERT.
    ///
    /// # Errors
    ///
    /// Fails when RETURNING is requested but unsupported.
    fn visit_insert(&self, ctx: &mut CompilerContext<'_>, insert: &Insert) -> Result<String> {
        let table = self.visit_label(ctx, &insert.table);
        let mut sql = if insert.values.is_empty() {
            format!("INSERT INTO {table} {}", self.visit_default_values())
        } else {
            let (columns, placeholders) = self.visit_values(ctx, &insert.values);
            format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})")
        };
        sql.push_str(&self.visit_returning(ctx, &insert.returning)?);
        Ok(sql)
    }

    /// Renders an UPDATE.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatement`] when nothing is set, and fails when
    /// RETURNING is requested but unsupported.
    fn visit_update(&self, ctx: &mut CompilerContext<'_>, update: &Update) -> Result<String> {
        if update.set.is_empty() {
            return Err(Error::InvalidStatement(format!(
                "UPDATE {} without assignments",
                update.table
            )));
        }

        let table = self.visit_label(ctx, &update.table);
        let mut assignments = Vec::with_capacity(update.set.len());
        for (column, value) in &update.set {
            let column = self.visit_label(ctx, column);
            let placeholder = ctx.bind(value.clone());
            assignments.push(format!("{column} = {placeholder}"));
        }

        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
        if let Some(clause) = &update.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.visit(ctx, clause));
        }
        sql.push_str(&self.visit_returning(ctx, &update.returning)?);
        Ok(sql)
    }

    /// Renders a DELETE.
    ///
    /// # Errors
    ///
    /// Fails when RETURNING is requested but unsupported.
    fn visit_delete(&self, ctx: &mut CompilerContext<'_>, delete: &Delete) -> Result<String> {
        let mut sql = format!("DELETE FROM {}", self.visit_label(ctx, &delete.table));
        if let Some(clause) = &delete.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.visit(ctx, clause));
        }
        sql.push_str(&self.visit_returning(ctx, &delete.returning)?);
        Ok(sql)
    }

    /// Renders ` RETURNING ...`, or nothing for an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when the dialect has no RETURNING.
    fn visit_returning(&self, ctx: &mut CompilerContext<'_>, columns: &[ColumnRef]) -> Result<String> {
        if columns.is_empty() {
            return Ok(String::new());
        }
        if !ctx.dialect().supports_returning() {
            return Err(unsupported(ctx, "RETURNING"));
        }
        let columns: Vec<String> = columns.iter().map(|c| self.visit_column(ctx, c)).collect();
        Ok(format!(" RETURNING {}", columns.join(", ")))
    }

    /// Renders the column and placeholder lists of an upsert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatement`] when the upsert carries no values.
    fn visit_upsert_values(
        &self,
        ctx: &mut CompilerContext<'_>,
        upsert: &Upsert,
    ) -> Result<(String, String)> {
        if upsert.values.is_empty() {
            return Err(Error::InvalidStatement(format!(
                "upsert into {} without values",
                upsert.table
            )));
        }
        Ok(self.visit_values(ctx, &upsert.values))
    }

    /// Renders an upsert. There is no portable form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] unless a dialect compiler overrides it.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, _upsert: &Upsert) -> Result<String> {
        Err(unsupported(ctx, "upsert"))
    }

    /// Renders one column definition.
    ///
    /// # Errors
    ///
    /// Propagates [`Dialect::auto_increment`] precondition failures.
    fn visit_column_def(&self, ctx: &mut CompilerContext<'_>, column: &Column) -> Result<String> {
        let dialect = ctx.dialect();
        let ty = if column.options.auto_increment {
            dialect.auto_increment(column)?
        } else if column.options.inline_primary_key {
            format!("{} PRIMARY KEY", dialect.compile_type(&column.ty))
        } else {
            dialect.compile_type(&column.ty)
        };

        let mut sql = format!("{} {ty}", self.visit_label(ctx, &column.name));
        for constraint in &column.constraints {
            sql.push(' ');
            sql.push_str(&constraint.name);
        }
        Ok(sql)
    }

    /// Renders CREATE TABLE: columns, then the primary key, then foreign keys,
    /// then table constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatement`] for a table without columns or
    /// with an inline primary key next to another primary key, and
    /// propagates column definition errors.
    fn visit_create_table(&self, ctx: &mut CompilerContext<'_>, table: &Table) -> Result<String> {
        if table.columns().is_empty() {
            return Err(Error::InvalidStatement(format!(
                "table {} has no columns",
                table.name()
            )));
        }

        let inline_keys = table
            .columns()
            .iter()
            .filter(|c| c.options.inline_primary_key)
            .count();
        if inline_keys > 0 && inline_keys + table.primary_cols().len() > 1 {
            return Err(Error::InvalidStatement(format!(
                "table {} declares more than one primary key",
                table.name()
            )));
        }

        let mut parts = Vec::new();
        for column in table.columns() {
            parts.push(self.visit_column_def(ctx, column)?);
        }

        let dialect = ctx.dialect();
        if !table.primary_cols().is_empty() {
            parts.push(format!(
                "PRIMARY KEY ({})",
                dialect.escape_all(table.primary_cols()).join(", ")
            ));
        }

        for fk in table.refs() {
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                dialect.escape_all(&fk.cols).join(", "),
                self.visit_label(ctx, &fk.ref_table),
                dialect.escape_all(&fk.ref_cols).join(", ")
            ));
        }

        parts.extend(table.constraints().iter().map(|c| c.name.clone()));

        Ok(format!(
            "CREATE TABLE {} ({})",
            self.visit_label(ctx, table.name()),
            parts.join(", ")
        ))
    }

    /// Renders CREATE INDEX for one index of a table.
    fn visit_create_index(&self, ctx: &mut CompilerContext<'_>, table: &Table, index: &Index) -> String {
        let columns = ctx.dialect().escape_all(&index.columns);
        format!(
            "CREATE INDEX {} ON {} ({})",
            self.visit_label(ctx, &index.name(table.name())),
            self.visit_label(ctx, table.name()),
            columns.join(", ")
        )
    }

    /// Renders DROP TABLE.
    fn visit_drop_table(&self, ctx: &mut CompilerContext<'_>, drop: &DropTable) -> String {
        let table = self.visit_label(ctx, &drop.table);
        if drop.if_exists {
            format!("DROP TABLE IF EXISTS {table}")
        } else {
            format!("DROP TABLE {table}")
        }
    }
}

/// The portable compiler, used by dialects that need no overrides.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlCompiler;

impl Compiler for SqlCompiler {}

fn junction<C: Compiler + ?Sized>(
    compiler: &C,
    ctx: &mut CompilerContext<'_>,
    clauses: &[Clause],
    separator: &str,
    empty: &str,
) -> String {
    match clauses {
        [] => String::from(empty),
        [single] => compiler.visit(ctx, single),
        _ => {
            let parts: Vec<String> = clauses
                .iter()
                .map(|clause| match clause {
                    Clause::And(_) | Clause::Or(_) => format!("({})", compiler.visit(ctx, clause)),
                    _ => compiler.visit(ctx, clause),
                })
                .collect();
            parts.join(separator)
        }
    }
}

/// Builds the error for a statement form the active dialect cannot render.
#[must_use]
pub fn unsupported(ctx: &CompilerContext<'_>, feature: &str) -> Error {
    Error::Unsupported {
        dialect: String::from(ctx.dialect().driver()),
        feature: String::from(feature),
    }
}
