//! Tests for mapping derived models onto tables, per dialect.

mod common;
use common::*;

use tagsql_core::error::Error;
use tagsql_core::mapper::Mapper;
use tagsql_core::metadata::MetaData;
use tagsql_core::schema::{FieldKind, Model};
use tagsql_core::table::Table;

#[test]
fn derived_schema() {
    let schema = UserProfile::schema();
    assert_eq!(schema.name, "UserProfile");
    assert_eq!(schema.table, None);
    assert_eq!(schema.fields.len(), 10);
    assert_eq!(schema.fields[0].tag, "constraints:primary_key");
    assert_eq!(schema.fields[3].kind, FieldKind::Int32);
    assert_eq!(schema.fields[6].kind, FieldKind::Uuid);
    assert_eq!(schema.fields[8].kind, FieldKind::NullableDateTime);
    assert_eq!(schema.fields[9].tag, "-");

    assert_eq!(AuditEntry::schema().table.as_deref(), Some("audit_log"));
}

#[test]
fn postgres_table() {
    let table = Mapper::new("postgres").convert_model::<UserProfile>().unwrap();
    assert_eq!(
        table.sql().unwrap(),
        "CREATE TABLE user_profile (id BIGINT, email VARCHAR(128) UNIQUE NOT NULL, \
         full_name VARCHAR(255), age INT, score FLOAT, active BOOLEAN, external_id UUID, \
         created_at TIMESTAMP, deleted_at TIMESTAMP, PRIMARY KEY (id))"
    );
}

#[test]
fn uuid_column_per_driver() {
    let columns = |driver: &str| {
        let table = Mapper::new(driver).convert_model::<UserProfile>().unwrap();
        table.sql().unwrap()
    };
    assert!(columns("postgres").contains("external_id UUID"));
    assert!(columns("mysql").contains("external_id VARCHAR(36)"));
}

#[test]
fn auto_increment_primary_key_per_driver() {
    let create = |driver: &str| {
        let table = Mapper::new(driver).convert_model::<AuditEntry>().unwrap();
        table.sql().unwrap()
    };
    assert_eq!(
        create("postgres"),
        "CREATE TABLE audit_log (id BIGSERIAL PRIMARY KEY, user_id BIGINT, action TEXT, \
         FOREIGN KEY (user_id) REFERENCES user_profile(id))"
    );
    assert_eq!(
        create("mysql"),
        "CREATE TABLE audit_log (id BIGINT AUTO_INCREMENT PRIMARY KEY, user_id BIGINT, \
         action TEXT, FOREIGN KEY (user_id) REFERENCES user_profile(id))"
    );
}

#[test]
fn composite_index() {
    let table = Mapper::new("default").convert_model::<AuditEntry>().unwrap();
    let dialect = tagsql_core::dialect::DefaultDialect::new();
    assert_eq!(
        table.index_sql(&dialect).unwrap(),
        vec!["CREATE INDEX idx_audit_log_user_id_action ON audit_log (user_id, action)"]
    );
}

#[test]
fn unknown_constraint_is_rejected() {
    let err = Mapper::new("default").convert_model::<Broken>().unwrap_err();
    match err {
        Error::Mapping { field, token } => {
            assert_eq!(field, "id");
            assert_eq!(token, "sparkly");
        }
        other => panic!("expected a mapping error, got {other:?}"),
    }
}

#[test]
fn unknown_tag_key_is_rejected() {
    let err = Mapper::new("default").convert_model::<BadTag>().unwrap_err();
    assert!(matches!(err, Error::TagParse { .. }));
}

#[test]
fn model_values_skip_ignored_fields() {
    let values = profile().to_values();
    let columns: Vec<&str> = values.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(
        columns,
        vec![
            "id",
            "email",
            "full_name",
            "age",
            "score",
            "active",
            "external_id",
            "created_at",
            "deleted_at",
        ]
    );
    assert!(values[8].1.is_null());
}

#[test]
fn metadata_create_and_drop() {
    let mut metadata = MetaData::new("postgres");
    metadata.add::<UserProfile>().unwrap();
    metadata.add::<AuditEntry>().unwrap();
    assert!(metadata.add::<Broken>().is_err());

    let dialect = tagsql_core::dialect::PostgresDialect::new();
    let create = metadata.create_all_sql(&dialect).unwrap();
    assert_eq!(create.len(), 3);
    assert!(create[0].starts_with("CREATE TABLE user_profile"));
    assert!(create[1].starts_with("CREATE TABLE audit_log"));
    assert!(create[2].starts_with("CREATE INDEX idx_audit_log_user_id_action"));

    assert_eq!(
        metadata.drop_all_sql(&dialect).unwrap(),
        vec!["DROP TABLE audit_log", "DROP TABLE user_profile"]
    );
}

#[test]
fn table_snapshot_round_trips_through_json() {
    let table = Mapper::new("postgres").convert_model::<AuditEntry>().unwrap();
    let json = serde_json::to_value(&table).unwrap();

    assert_eq!(json["name"], "audit_log");
    assert_eq!(json["columns"][0]["options"]["inline_primary_key"], true);
    assert_eq!(json["refs"][0]["ref_table"], "user_profile");

    let restored: Table = serde_json::from_value(json).unwrap();
    assert_eq!(restored, table);
}
