#![allow(dead_code)]

use chrono::NaiveDateTime;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tagsql_core::dialect::Dialect;
use tagsql_core::error::DriverError;
use tagsql_core::statement::Build;
use tagsql_derive::Model;
use tagsql_sqlite::SqliteDialect;
use uuid::Uuid;

#[derive(Debug, Clone, Model)]
pub struct Account {
    #[tagsql("constraints:primary_key,auto_increment")]
    pub id: i64,
    #[tagsql("type:varchar(64);constraints:unique,notnull")]
    pub email: String,
    #[tagsql("constraints:index")]
    pub display_name: Option<String>,
    pub external_id: Uuid,
    pub created_at: NaiveDateTime,
    #[tagsql("-")]
    pub session_token: String,
}

#[derive(Debug, Clone, Model)]
#[tagsql(table = "account_notes")]
pub struct Note {
    #[tagsql("constraints:primary_key")]
    pub id: i64,
    #[tagsql("constraints:notnull,ref(account.id)")]
    pub account_id: i64,
    #[tagsql("type:text")]
    pub body: String,
}

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// One connection, so every statement sees the same in-memory database.
pub async fn pool() -> SqlitePool {
    init_tracing();
    tagsql_sqlite::register();
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

pub fn created_at() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn account(id: i64, email: &str) -> Account {
    Account {
        id,
        email: String::from(email),
        display_name: None,
        external_id: Uuid::new_v4(),
        created_at: created_at(),
        session_token: String::from("not persisted"),
    }
}

/// Compiles and runs a statement, classifying any driver error.
pub async fn run<B: Build>(pool: &SqlitePool, statement: &B) -> Result<u64, DriverError> {
    let dialect = SqliteDialect::new();
    let (sql, params) = statement.build(&dialect).expect("statement compiles");
    tagsql_sqlite::query(&sql, params)
        .execute(pool)
        .await
        .map(|done| done.rows_affected())
        .map_err(|err| dialect.wrap_error(err))
}

/// Runs raw DDL text.
pub async fn run_sql(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql)
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("failed to run {sql}: {e}"));
}
