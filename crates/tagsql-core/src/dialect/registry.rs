//! Process-wide dialect registry.
//!
//! Registration is expected at startup; lookups afterwards only take the
//! read lock, so concurrent compilations do not contend.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use tracing::debug;

use super::{DefaultDialect, Dialect, MysqlDialect, PostgresDialect};
use crate::error::{Error, Result};

/// Builds a fresh dialect instance.
pub type DialectConstructor = fn() -> Box<dyn Dialect>;

fn default_dialect() -> Box<dyn Dialect> {
    Box::new(DefaultDialect::new())
}

fn postgres_dialect() -> Box<dyn Dialect> {
    Box::new(PostgresDialect::new())
}

fn mysql_dialect() -> Box<dyn Dialect> {
    Box::new(MysqlDialect::new())
}

static REGISTRY: LazyLock<RwLock<HashMap<String, DialectConstructor>>> = LazyLock::new(|| {
    let builtin: [(&str, DialectConstructor); 4] = [
        ("default", default_dialect),
        ("postgres", postgres_dialect),
        ("postgresql", postgres_dialect),
        ("mysql", mysql_dialect),
    ];
    RwLock::new(
        builtin
            .into_iter()
            .map(|(driver, constructor)| (String::from(driver), constructor))
            .collect(),
    )
});

/// Registers a dialect constructor under a driver name.
///
/// A later registration for the same name replaces the earlier one.
pub fn register_dialect(driver: &str, constructor: DialectConstructor) {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry.insert(String::from(driver), constructor);
    debug!(driver, "registered dialect");
}

/// Creates a new instance of the dialect registered for `driver`.
///
/// # Errors
///
/// Returns [`Error::UnknownDialect`] when nothing is registered under that name.
pub fn new_dialect(driver: &str) -> Result<Box<dyn Dialect>> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry
        .get(driver)
        .map(|constructor| constructor())
        .ok_or_else(|| Error::UnknownDialect(String::from(driver)))
}

/// Returns every registered driver name, sorted.
#[must_use]
pub fn registered_drivers() -> Vec<String> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut drivers: Vec<String> = registry.keys().cloned().collect();
    drivers.sort();
    drivers
}
