//! Schema description of model types.
//!
//! A [`ModelSchema`] lists a record's members with their declared kind and
//! raw tag, in declaration order. It is what the [`Mapper`] consumes to build
//! a [`Table`]. The `#[derive(Model)]` macro from `tagsql-derive` generates
//! the [`Model`] implementation, but schemas can also be written by hand:
//!
//! ```rust
//! use tagsql_core::schema::{Field, FieldKind, ModelSchema};
//!
//! let schema = ModelSchema::new("User")
//!     .field(Field::new("ID", FieldKind::Int64).tag("constraints:primary_key"))
//!     .field(Field::new("Email", FieldKind::String).tag("constraints:unique,notnull"));
//!
//! assert_eq!(schema.fields.len(), 2);
//! ```
//!
//! [`Mapper`]: crate::mapper::Mapper
//! [`Table`]: crate::table::Table

use crate::value::SqlValue;

/// Declared kind of a model member, used to infer its column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Text.
    String,
    /// 32-bit (or narrower) integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// Boolean.
    Bool,
    /// Date and time.
    DateTime,
    /// Optional date and time.
    NullableDateTime,
    /// UUID.
    Uuid,
    /// Any other type, by name.
    Other(String),
}

/// One member of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Member name as declared, e.g. `FullName`.
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
    /// Raw tag text, empty when untagged.
    pub tag: String,
}

impl Field {
    /// Creates an untagged field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tag: String::new(),
        }
    }

    /// Sets the raw tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// The member list of a model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Type name, e.g. `UserProfile`.
    pub name: String,
    /// Explicit table name, used verbatim instead of the derived one.
    pub table: Option<String>,
    /// Members in declaration order.
    pub fields: Vec<Field>,
}

impl ModelSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    /// Overrides the table name.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Appends a member.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// A record type that maps onto a table.
pub trait Model {
    /// Describes the record's members.
    fn schema() -> ModelSchema;

    /// Returns `(column, value)` pairs for every mapped member.
    ///
    /// Ignored members are left out.
    fn to_values(&self) -> Vec<(String, SqlValue)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder() {
        let schema = ModelSchema::new("UserProfile")
            .table("profiles")
            .field(Field::new("ID", FieldKind::Int64))
            .field(Field::new("Bio", FieldKind::String).tag("type:text"));

        assert_eq!(schema.table.as_deref(), Some("profiles"));
        assert_eq!(schema.fields[0].tag, "");
        assert_eq!(schema.fields[1].tag, "type:text");
        assert_eq!(schema.fields[1].kind, FieldKind::String);
    }
}
