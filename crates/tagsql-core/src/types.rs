//! Column types.
//!
//! A [`Type`] is a logical SQL type name plus its rendered parameters. The
//! dialect decides the final text through [`Dialect::compile_type`], which
//! can replace a type by name (for example `UUID` under SQLite).
//!
//! [`Dialect::compile_type`]: crate::dialect::Dialect::compile_type

use serde::{Deserialize, Serialize};

const DEFAULT_CHAR_SIZE: usize = 1;
const DEFAULT_VARCHAR_SIZE: usize = 255;
const DEFAULT_NUMERIC_PRECISION: u32 = 6;
const DEFAULT_NUMERIC_SCALE: u32 = 2;

/// A SQL column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    name: String,
    params: Vec<String>,
    unsigned: bool,
}

impl Type {
    /// Creates a type with a name and no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            unsigned: false,
        }
    }

    /// Creates a type from literal SQL text, used verbatim.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql)
    }

    fn with_params(name: &str, params: Vec<String>) -> Self {
        Self {
            name: String::from(name),
            params,
            unsigned: false,
        }
    }

    /// `CHAR(n)`, size 1 unless set with [`Type::size`].
    #[must_use]
    pub fn char() -> Self {
        Self::with_params("CHAR", vec![DEFAULT_CHAR_SIZE.to_string()])
    }

    /// `VARCHAR(n)`, size 255 unless set with [`Type::size`].
    #[must_use]
    pub fn varchar() -> Self {
        Self::with_params("VARCHAR", vec![DEFAULT_VARCHAR_SIZE.to_string()])
    }

    /// `TEXT`.
    #[must_use]
    pub fn text() -> Self {
        Self::new("TEXT")
    }

    /// `MEDIUMTEXT` (mysql).
    #[must_use]
    pub fn medium_text() -> Self {
        Self::new("MEDIUMTEXT")
    }

    /// `LONGTEXT` (mysql).
    #[must_use]
    pub fn long_text() -> Self {
        Self::new("LONGTEXT")
    }

    /// `TINYINT`.
    #[must_use]
    pub fn tiny_int() -> Self {
        Self::new("TINYINT")
    }

    /// `SMALLINT`.
    #[must_use]
    pub fn small_int() -> Self {
        Self::new("SMALLINT")
    }

    /// `INT`.
    #[must_use]
    pub fn int() -> Self {
        Self::new("INT")
    }

    /// `BIGINT`.
    #[must_use]
    pub fn big_int() -> Self {
        Self::new("BIGINT")
    }

    /// `SERIAL` (postgres).
    #[must_use]
    pub fn serial() -> Self {
        Self::new("SERIAL")
    }

    /// `BIGSERIAL` (postgres).
    #[must_use]
    pub fn big_serial() -> Self {
        Self::new("BIGSERIAL")
    }

    /// `NUMERIC(p, s)`, (6, 2) unless set with [`Type::precision`].
    #[must_use]
    pub fn numeric() -> Self {
        Self::with_params(
            "NUMERIC",
            vec![
                DEFAULT_NUMERIC_PRECISION.to_string(),
                DEFAULT_NUMERIC_SCALE.to_string(),
            ],
        )
    }

    /// `FLOAT`, or `FLOAT(p)` with [`Type::binary_precision`].
    #[must_use]
    pub fn float() -> Self {
        Self::new("FLOAT")
    }

    /// `DOUBLE(p, s)` (mysql).
    #[must_use]
    pub fn double(precision: u32, scale: u32) -> Self {
        Self::with_params("DOUBLE", vec![precision.to_string(), scale.to_string()])
    }

    /// `DOUBLE PRECISION` (postgres).
    #[must_use]
    pub fn double_precision() -> Self {
        Self::new("DOUBLE PRECISION")
    }

    /// `DATE`.
    #[must_use]
    pub fn date() -> Self {
        Self::new("DATE")
    }

    /// `TIME`.
    #[must_use]
    pub fn time() -> Self {
        Self::new("TIME")
    }

    /// `DATETIME` (mysql).
    #[must_use]
    pub fn datetime() -> Self {
        Self::new("DATETIME")
    }

    /// `TIMESTAMP`.
    #[must_use]
    pub fn timestamp() -> Self {
        Self::new("TIMESTAMP")
    }

    /// `YEAR` (mysql).
    #[must_use]
    pub fn year() -> Self {
        Self::new("YEAR")
    }

    /// `INTERVAL(p)` (postgres), p being the fractional second digits.
    #[must_use]
    pub fn interval(precision: u32) -> Self {
        Self::with_params("INTERVAL", vec![precision.to_string()])
    }

    /// `BYTEA` (postgres).
    #[must_use]
    pub fn bytea() -> Self {
        Self::new("BYTEA")
    }

    /// `BLOB(n)` (mysql).
    #[must_use]
    pub fn blob(size: usize) -> Self {
        Self::with_params("BLOB", vec![size.to_string()])
    }

    /// `MEDIUMBLOB(n)` (mysql).
    #[must_use]
    pub fn medium_blob(size: usize) -> Self {
        Self::with_params("MEDIUMBLOB", vec![size.to_string()])
    }

    /// `LONGBLOB` (mysql).
    #[must_use]
    pub fn long_blob() -> Self {
        Self::new("LONGBLOB")
    }

    /// `MONEY` (postgres).
    #[must_use]
    pub fn money() -> Self {
        Self::new("MONEY")
    }

    /// `BOOLEAN`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new("BOOLEAN")
    }

    /// `UUID`.
    #[must_use]
    pub fn uuid() -> Self {
        Self::new("UUID")
    }

    /// `ENUM('a', 'b', ...)` (mysql).
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let params = values
            .into_iter()
            .map(|v| format!("'{}'", v.as_ref().replace('\'', "''")))
            .collect();
        Self::with_params("ENUM", params)
    }

    /// Sets the size of a `CHAR`/`VARCHAR`.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.params = vec![size.to_string()];
        self
    }

    /// Sets precision and scale of a `NUMERIC`.
    #[must_use]
    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.params = vec![precision.to_string(), scale.to_string()];
        self
    }

    /// Sets the binary precision of a `FLOAT`.
    #[must_use]
    pub fn binary_precision(mut self, precision: u32) -> Self {
        self.params = vec![precision.to_string()];
        self
    }

    /// Marks an integer type unsigned.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Returns the logical type name, e.g. `VARCHAR`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rendered parameters.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns whether the type is unsigned.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Renders the type.
    ///
    /// Unsigned integers keep the `UNSIGNED` suffix when the dialect supports
    /// it, otherwise they are widened one size so the value range still fits.
    #[must_use]
    pub fn sql(&self, supports_unsigned: bool) -> String {
        let name = if self.unsigned && !supports_unsigned {
            widen(&self.name)
        } else {
            self.name.as_str()
        };

        let mut sql = String::from(name);
        if !self.params.is_empty() {
            sql.push('(');
            sql.push_str(&self.params.join(", "));
            sql.push(')');
        }
        if self.unsigned && supports_unsigned {
            sql.push_str(" UNSIGNED");
        }
        sql
    }
}

fn widen(name: &str) -> &str {
    match name {
        "TINYINT" => "SMALLINT",
        "SMALLINT" => "INT",
        "INT" | "INTEGER" | "BIGINT" => "BIGINT",
        other => other,
    }
}
