#![allow(dead_code)]

use chrono::NaiveDateTime;
use tagsql_core::dialect::new_dialect;
use tagsql_core::statement::Build;
use tagsql_core::value::SqlValue;
use tagsql_derive::Model;
use uuid::Uuid;

#[derive(Debug, Clone, Model)]
pub struct UserProfile {
    #[tagsql("constraints:primary_key")]
    pub id: i64,
    #[tagsql("type:varchar(128);constraints:unique,notnull")]
    pub email: String,
    pub full_name: String,
    pub age: u8,
    pub score: f64,
    pub active: bool,
    pub external_id: Uuid,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    #[tagsql("-")]
    pub password_plain: String,
}

#[derive(Debug, Clone, Model)]
#[tagsql(table = "audit_log")]
pub struct AuditEntry {
    #[tagsql("constraints:primary_key,auto_increment")]
    pub id: i64,
    #[tagsql("constraints:ref(user_profile.id)")]
    pub user_id: i64,
    #[tagsql("type:text;index:user_id,action")]
    pub action: String,
}

#[derive(Debug, Clone, Model)]
pub struct Broken {
    #[tagsql("constraints:primary_key,sparkly")]
    pub id: i64,
}

#[derive(Debug, Clone, Model)]
pub struct BadTag {
    #[tagsql("colour:blue")]
    pub id: i64,
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: 1,
        email: String::from("ada@example.com"),
        full_name: String::from("Ada Lovelace"),
        age: 36,
        score: 9.5,
        active: true,
        external_id: Uuid::nil(),
        created_at: NaiveDateTime::parse_from_str("1843-07-01 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap(),
        deleted_at: None,
        password_plain: String::from("secret"),
    }
}

/// Compiles a statement with the dialect registered for `driver`.
pub fn compile<B: Build>(driver: &str, statement: &B) -> (String, Vec<SqlValue>) {
    let dialect = new_dialect(driver).unwrap_or_else(|e| panic!("{driver}: {e}"));
    statement
        .build(dialect.as_ref())
        .unwrap_or_else(|e| panic!("{driver}: {e}"))
}
