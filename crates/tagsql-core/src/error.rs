//! Error types for schema mapping, compilation and driver errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced while parsing tags, mapping models or compiling statements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field tag could not be parsed.
    #[error("invalid tag `{tag}`: {reason}")]
    TagParse {
        /// The raw tag text.
        tag: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A field could not be converted into a column.
    #[error("cannot map field `{field}`: invalid constraint `{token}`")]
    Mapping {
        /// The field being mapped.
        field: String,
        /// The offending constraint token.
        token: String,
    },

    /// The schema violates a hard requirement of the dialect.
    #[error("dialect precondition violated: {0}")]
    DialectPrecondition(String),

    /// No dialect is registered under the driver name.
    #[error("no dialect registered for driver `{0}`")]
    UnknownDialect(String),

    /// The dialect has no rendering for the requested statement form.
    #[error("dialect `{dialect}` does not support {feature}")]
    Unsupported {
        /// Driver name of the dialect.
        dialect: String,
        /// The missing feature.
        feature: String,
    },

    /// The statement is incomplete and cannot be rendered.
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    /// A classified error coming back from the database driver.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of native driver errors.
///
/// Callers use the kind to decide whether an operation is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The database hit an internal error.
    Internal,
    /// A failure of the database's operation, not the statement (locks, I/O, connection).
    Operational,
    /// Catch-all for database errors, including corruption.
    Database,
    /// A value could not be processed (too large, out of range).
    Data,
    /// A constraint was violated.
    Integrity,
    /// The statement or the driver API was misused.
    Programming,
}

impl ErrorKind {
    /// Returns the stable name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::Operational => "Operational",
            Self::Database => "Database",
            Self::Data => "Data",
            Self::Integrity => "Integrity",
            Self::Programming => "Programming",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A native driver error together with its classification.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {source}")]
pub struct DriverError {
    /// The classified kind.
    pub kind: ErrorKind,
    /// The original driver error.
    pub source: sqlx::Error,
}

impl DriverError {
    /// Wraps a driver error with an explicit kind.
    #[must_use]
    pub const fn new(kind: ErrorKind, source: sqlx::Error) -> Self {
        Self { kind, source }
    }
}

/// Classifies errors that never reached the database (transport, pool).
///
/// Returns `None` for database errors so the dialect can inspect their code.
#[must_use]
pub fn classify_transport(err: &sqlx::Error) -> Option<ErrorKind> {
    match err {
        sqlx::Error::Database(_) => None,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Some(ErrorKind::Operational),
        sqlx::Error::Protocol(_) => Some(ErrorKind::Internal),
        sqlx::Error::Configuration(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::TypeNotFound { .. } => Some(ErrorKind::Programming),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => Some(ErrorKind::Data),
        _ => Some(ErrorKind::Database),
    }
}

/// Classifies a five-character SQLSTATE by its class (first two characters).
#[must_use]
pub fn classify_sqlstate(code: &str) -> ErrorKind {
    match code.get(..2).unwrap_or_default() {
        "XX" => ErrorKind::Internal,
        "08" | "40" | "53" | "55" | "57" | "58" | "HY" => ErrorKind::Operational,
        "22" => ErrorKind::Data,
        "23" => ErrorKind::Integrity,
        "0A" | "2B" | "34" | "3D" | "3F" | "42" | "44" => ErrorKind::Programming,
        _ => ErrorKind::Database,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlstate_classes() {
        assert_eq!(classify_sqlstate("23505"), ErrorKind::Integrity);
        assert_eq!(classify_sqlstate("22001"), ErrorKind::Data);
        assert_eq!(classify_sqlstate("42601"), ErrorKind::Programming);
        assert_eq!(classify_sqlstate("08006"), ErrorKind::Operational);
        assert_eq!(classify_sqlstate("40001"), ErrorKind::Operational);
        assert_eq!(classify_sqlstate("XX000"), ErrorKind::Internal);
        assert_eq!(classify_sqlstate("P0001"), ErrorKind::Database);
        assert_eq!(classify_sqlstate(""), ErrorKind::Database);
    }

    #[test]
    fn test_transport_errors() {
        assert_eq!(
            classify_transport(&sqlx::Error::PoolTimedOut),
            Some(ErrorKind::Operational)
        );
        assert_eq!(
            classify_transport(&sqlx::Error::ColumnNotFound("id".into())),
            Some(ErrorKind::Programming)
        );
        assert_eq!(
            classify_transport(&sqlx::Error::RowNotFound),
            Some(ErrorKind::Database)
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::Mapping {
            field: String::from("email"),
            token: String::from("uniq"),
        };
        assert_eq!(
            err.to_string(),
            "cannot map field `email`: invalid constraint `uniq`"
        );

        let err = DriverError::new(ErrorKind::Operational, sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("Operational error: "));
    }
}
