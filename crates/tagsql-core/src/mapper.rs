//! Model to table mapping.
//!
//! The [`Mapper`] turns a [`ModelSchema`] into a [`Table`]. For each member,
//! in declaration order, it derives the column name, parses the tag, maps
//! constraint tokens and resolves the column type.
//!
//! Column and table names are the snake case of the member and type names,
//! as produced by `heck`: `Email` → `email`, `FullName` → `full_name`,
//! `FacebookID` → `facebook_id`, `HTTPServer` → `http_server`.
//!
//! Recognized constraint tokens:
//!
//! | token | effect |
//! |---|---|
//! | `null` | `NULL` |
//! | `notnull`, `not_null` | `NOT NULL` |
//! | `unique` | `UNIQUE` |
//! | `key`, `index` | single column index |
//! | `index:<a>,<b>` (bare tag field) | composite index |
//! | `default(<expr>)` | `DEFAULT (<expr>)` |
//! | `auto_increment`, `autoincrement` | auto-increment column |
//! | `primary_key` | member joins the primary key |
//! | `ref(<table>.<column>)` | foreign key to `<table>(<column>)` |

use heck::ToSnakeCase;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::schema::{FieldKind, Model, ModelSchema};
use crate::table::{Column, Constraint, Table};
use crate::tag;
use crate::types::Type;

/// Maps model schemas onto tables for one driver.
#[derive(Debug, Clone)]
pub struct Mapper {
    driver: String,
}

impl Mapper {
    /// Creates a mapper producing tables for `driver`.
    #[must_use]
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
        }
    }

    /// Returns the driver name.
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Returns the table name of a model.
    #[must_use]
    pub fn model_name(&self, schema: &ModelSchema) -> String {
        schema
            .table
            .clone()
            .unwrap_or_else(|| schema.name.to_snake_case())
    }

    /// Returns the column name of a member.
    #[must_use]
    pub fn col_name(&self, field: &str) -> String {
        field.to_snake_case()
    }

    /// Resolves a column type.
    ///
    /// An explicit tag type is uppercased and used verbatim. Otherwise the
    /// declared kind decides, falling back to `VARCHAR`.
    #[must_use]
    pub fn convert_type(&self, kind: &FieldKind, tag_type: Option<&str>) -> Type {
        if let Some(ty) = tag_type {
            return Type::raw(ty.to_uppercase());
        }
        match kind {
            FieldKind::Int32 => Type::int(),
            FieldKind::Int64 => Type::big_int(),
            FieldKind::Float32 | FieldKind::Float64 => Type::float(),
            FieldKind::Bool => Type::boolean(),
            FieldKind::DateTime | FieldKind::NullableDateTime => Type::timestamp(),
            FieldKind::Uuid => Type::uuid(),
            FieldKind::String | FieldKind::Other(_) => Type::varchar(),
        }
    }

    /// Converts a schema into a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TagParse`] for a malformed tag and [`Error::Mapping`]
    /// for an unknown constraint token. No partial table is returned.
    pub fn convert(&self, schema: &ModelSchema) -> Result<Table> {
        let mut table = Table::new(&self.driver, self.model_name(schema));

        for field in &schema.fields {
            let tag = tag::parse(&field.tag)?;
            if tag.ignore {
                trace!(field = %field.name, "ignored member");
                continue;
            }

            let col_name = self.col_name(&field.name);
            let mut column = Column::new(
                &col_name,
                self.convert_type(&field.kind, tag.ty.as_deref()),
            );
            let mut primary = false;

            for token in &tag.constraints {
                match token.as_str() {
                    "null" => column.constraints.push(Constraint::null()),
                    "notnull" | "not_null" => column.constraints.push(Constraint::not_null()),
                    "unique" => column.constraints.push(Constraint::unique()),
                    "key" | "index" => table.add_index([col_name.clone()]),
                    "auto_increment" | "autoincrement" => column.options.auto_increment = true,
                    "primary_key" => primary = true,
                    _ => {
                        if let Some(columns) = token.strip_prefix("index:") {
                            let columns: Vec<String> = columns
                                .split(',')
                                .filter(|c| !c.is_empty())
                                .map(|c| self.col_name(c))
                                .collect();
                            table.add_index(columns);
                        } else if let Some(expr) = payload(token, "default") {
                            if expr.is_empty() {
                                return Err(invalid(field.name.as_str(), token));
                            }
                            column.constraints.push(Constraint::default(expr));
                        } else if let Some((ref_table, ref_col)) =
                            payload(token, "ref").and_then(|target| target.split_once('.'))
                        {
                            if ref_table.is_empty() || ref_col.is_empty() {
                                return Err(invalid(field.name.as_str(), token));
                            }
                            table.add_ref(&col_name, ref_table, ref_col);
                        } else {
                            return Err(invalid(field.name.as_str(), token));
                        }
                    }
                }
            }

            if primary {
                if column.options.auto_increment {
                    column.options.inline_primary_key = true;
                } else {
                    table.add_primary(&col_name);
                }
            }

            trace!(column = %col_name, ty = %column.ty.name(), "mapped column");
            table.add_column(column);
        }

        debug!(
            table = table.name(),
            columns = table.columns().len(),
            driver = %self.driver,
            "mapped model"
        );
        Ok(table)
    }

    /// Converts a [`Model`] type into a table.
    ///
    /// # Errors
    ///
    /// See [`Mapper::convert`].
    pub fn convert_model<M: Model>(&self) -> Result<Table> {
        self.convert(&M::schema())
    }
}

/// Extracts `x` from `name(x)`.
fn payload<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    token
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn invalid(field: &str, token: &str) -> Error {
    Error::Mapping {
        field: String::from(field),
        token: String::from(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn mapper() -> Mapper {
        Mapper::new("default")
    }

    #[test]
    fn test_names() {
        let m = mapper();
        assert_eq!(m.col_name("Email"), "email");
        assert_eq!(m.col_name("FullName"), "full_name");
        assert_eq!(m.col_name("FacebookID"), "facebook_id");
        assert_eq!(m.col_name("UserID"), "user_id");
        assert_eq!(m.col_name("HTTPServer"), "http_server");
        assert_eq!(m.col_name("already_snake"), "already_snake");

        assert_eq!(m.model_name(&ModelSchema::new("UserProfile")), "user_profile");
        assert_eq!(
            m.model_name(&ModelSchema::new("UserProfile").table("Profiles")),
            "Profiles"
        );
    }

    #[test]
    fn test_type_inference() {
        let m = mapper();
        assert_eq!(m.convert_type(&FieldKind::String, None), Type::varchar());
        assert_eq!(m.convert_type(&FieldKind::Int32, None), Type::int());
        assert_eq!(m.convert_type(&FieldKind::Int64, None), Type::big_int());
        assert_eq!(m.convert_type(&FieldKind::Float32, None), Type::float());
        assert_eq!(m.convert_type(&FieldKind::Float64, None), Type::float());
        assert_eq!(m.convert_type(&FieldKind::Bool, None), Type::boolean());
        assert_eq!(m.convert_type(&FieldKind::DateTime, None), Type::timestamp());
        assert_eq!(
            m.convert_type(&FieldKind::NullableDateTime, None),
            Type::timestamp()
        );
        assert_eq!(
            m.convert_type(&FieldKind::Other(String::from("Point")), None),
            Type::varchar()
        );
        assert_eq!(
            m.convert_type(&FieldKind::Int32, Some("varchar(36)")).name(),
            "VARCHAR(36)"
        );
    }

    #[test]
    fn test_constraints_in_order() {
        let schema = ModelSchema::new("User")
            .field(Field::new("Email", FieldKind::String).tag("constraints:unique,notnull"));
        let table = mapper().convert(&schema).unwrap();
        let email = table.column("email").unwrap();
        assert_eq!(
            email.constraints,
            vec![Constraint::unique(), Constraint::not_null()]
        );
    }

    #[test]
    fn test_primary_and_foreign_keys() {
        let schema = ModelSchema::new("Membership")
            .field(Field::new("UserID", FieldKind::Int64).tag("constraints:primary_key,ref(users.id)"))
            .field(Field::new("UserRegion", FieldKind::String).tag("constraints:ref(users.region)"))
            .field(Field::new("OrgID", FieldKind::Int64).tag("constraints:primary_key,ref(orgs.id)"));
        let table = mapper().convert(&schema).unwrap();

        assert_eq!(table.primary_cols(), ["user_id", "org_id"]);
        assert_eq!(table.refs().len(), 2);
        assert!(table.columns().iter().all(|c| c.constraints.is_empty()));
        assert_eq!(
            table.sql().unwrap(),
            "CREATE TABLE membership (user_id BIGINT, user_region VARCHAR(255), org_id BIGINT, \
             PRIMARY KEY (user_id, org_id), \
             FOREIGN KEY (user_id, user_region) REFERENCES users(id, region), \
             FOREIGN KEY (org_id) REFERENCES orgs(id))"
        );
    }

    #[test]
    fn test_default_and_indexes() {
        let schema = ModelSchema::new("Post")
            .field(Field::new("Title", FieldKind::String).tag("constraints:notnull,index"))
            .field(Field::new("Views", FieldKind::Int32).tag("constraints:default(0)"))
            .field(Field::new("Author", FieldKind::String).tag("index:author,title"));
        let table = mapper().convert(&schema).unwrap();

        assert_eq!(
            table.column("views").unwrap().constraints,
            vec![Constraint::default("0")]
        );
        assert_eq!(table.indexes().len(), 2);
        assert_eq!(table.indexes()[0].columns, vec!["title"]);
        assert_eq!(table.indexes()[1].columns, vec!["author", "title"]);
    }

    #[test]
    fn test_auto_increment_primary_key_is_inline() {
        let schema = ModelSchema::new("Event")
            .field(Field::new("ID", FieldKind::Int64).tag("constraints:primary_key,auto_increment"));
        let table = mapper().convert(&schema).unwrap();
        let id = table.column("id").unwrap();

        assert!(id.options.auto_increment);
        assert!(id.options.inline_primary_key);
        assert!(table.primary_cols().is_empty());
        assert_eq!(
            table.sql().unwrap(),
            "CREATE TABLE event (id BIGINT AUTO_INCREMENT PRIMARY KEY)"
        );
    }

    #[test]
    fn test_ignored_members() {
        let schema = ModelSchema::new("Session")
            .field(Field::new("Token", FieldKind::String))
            .field(Field::new("Cache", FieldKind::Other(String::from("Cache"))).tag("-"));
        let table = mapper().convert(&schema).unwrap();
        assert_eq!(table.columns().len(), 1);
        assert!(table.column("cache").is_none());
    }

    #[test]
    fn test_unknown_constraint_aborts() {
        let schema = ModelSchema::new("User")
            .field(Field::new("Name", FieldKind::String))
            .field(Field::new("Email", FieldKind::String).tag("constraints:unique,uniq"));
        let err = mapper().convert(&schema).unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping { ref field, ref token } if field == "Email" && token == "uniq"
        ));
    }

    #[test]
    fn test_malformed_ref() {
        let schema = ModelSchema::new("User")
            .field(Field::new("OrgID", FieldKind::Int64).tag("constraints:ref(orgs)"));
        assert!(matches!(
            mapper().convert(&schema),
            Err(Error::Mapping { .. })
        ));

        let schema = ModelSchema::new("User")
            .field(Field::new("OrgID", FieldKind::Int64).tag("constraints:ref(.id)"));
        assert!(matches!(
            mapper().convert(&schema),
            Err(Error::Mapping { .. })
        ));
    }

    #[test]
    fn test_malformed_tag_propagates() {
        let schema = ModelSchema::new("User")
            .field(Field::new("Name", FieldKind::String).tag("size:10"));
        assert!(matches!(
            mapper().convert(&schema),
            Err(Error::TagParse { .. })
        ));
    }

    #[test]
    fn test_uuid_member() {
        let schema = ModelSchema::new("Token").field(Field::new("ID", FieldKind::Uuid));
        let table = Mapper::new("postgres").convert(&schema).unwrap();
        assert_eq!(table.sql().unwrap(), "CREATE TABLE token (id UUID)");

        let table = Mapper::new("mysql").convert(&schema).unwrap();
        assert_eq!(table.sql().unwrap(), "CREATE TABLE token (id VARCHAR(36))");
    }

    #[test]
    fn test_empty_default_is_rejected() {
        let schema = ModelSchema::new("Counter")
            .field(Field::new("Hits", FieldKind::Int32).tag("constraints:default()"));
        let err = mapper().convert(&schema).unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping { ref token, .. } if token == "default()"
        ));
    }

    #[test]
    fn test_second_primary_key_next_to_auto_increment_fails_to_render() {
        let schema = ModelSchema::new("T")
            .field(Field::new("A", FieldKind::Int64).tag("constraints:primary_key,auto_increment"))
            .field(Field::new("B", FieldKind::Int64).tag("constraints:primary_key"));
        let table = Mapper::new("postgres").convert(&schema).unwrap();
        assert!(matches!(table.sql(), Err(Error::InvalidStatement(_))));
    }
}
