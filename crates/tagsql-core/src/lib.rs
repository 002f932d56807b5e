//! # tagsql-core
//!
//! A SQL statement builder and tag-driven schema mapper.
//!
//! This crate provides:
//! - A compact tag grammar describing column types and constraints
//! - A mapper deriving table definitions from model descriptions
//! - A clause tree compiled into SQL text plus ordered bindings
//! - Pluggable dialects selected by driver name
//!
//! ## Mapping a model
//!
//! ```rust
//! use tagsql_core::mapper::Mapper;
//! use tagsql_core::schema::{Field, FieldKind, ModelSchema};
//!
//! let schema = ModelSchema::new("User")
//!     .field(Field::new("ID", FieldKind::Int64).tag("constraints:primary_key"))
//!     .field(Field::new("Email", FieldKind::String).tag("type:varchar(128);constraints:unique,notnull"))
//!     .field(Field::new("Scratch", FieldKind::String).tag("-"));
//!
//! let table = Mapper::new("postgres").convert(&schema).unwrap();
//! assert_eq!(
//!     table.sql().unwrap(),
//!     "CREATE TABLE user (id BIGINT, email VARCHAR(128) UNIQUE NOT NULL, PRIMARY KEY (id))"
//! );
//! ```
//!
//! ## Building statements
//!
//! Values are never inlined into SQL text:
//!
//! ```rust
//! use tagsql_core::dialect::PostgresDialect;
//! use tagsql_core::expr::col;
//! use tagsql_core::statement::{Build, Update};
//! use tagsql_core::value::SqlValue;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = Update::new("users")
//!     .set("name", user_input)
//!     .where_clause(col("id").eq(1))
//!     .build(&PostgresDialect::new())
//!     .unwrap();
//!
//! assert_eq!(sql, "UPDATE users SET name = $1 WHERE id = $2");
//! assert_eq!(params[0], SqlValue::Text(String::from(user_input)));
//! ```

pub mod compiler;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod mapper;
pub mod metadata;
pub mod schema;
pub mod statement;
pub mod table;
pub mod tag;
pub mod types;
pub mod value;

pub use compiler::{Compiler, CompilerContext, SqlCompiler};
pub use dialect::{new_dialect, register_dialect, Dialect};
pub use error::{DriverError, Error, ErrorKind, Result};
pub use expr::{col, Clause, ColumnRef};
pub use mapper::Mapper;
pub use metadata::MetaData;
pub use schema::{Field, FieldKind, Model, ModelSchema};
pub use statement::{Build, Delete, DropTable, Insert, Select, Statement, Update, Upsert};
pub use table::{Column, Constraint, Table};
pub use types::Type;
pub use value::{SqlValue, ToSqlValue};
