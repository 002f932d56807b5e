//! Field tag parsing.
//!
//! A tag is a compact annotation attached to a model field:
//!
//! ```text
//! type:varchar(36);constraints:primary_key,notnull
//! constraints:ref(users.id);index
//! -
//! ```
//!
//! Fields are separated by `;`. A field is either a bare sentinel (`-` to
//! ignore the member, or anything starting with `index`) or a `key:value`
//! pair where the key is `type`, `constraints` or `constraint`. Whitespace
//! is removed before parsing.

use crate::error::{Error, Result};

/// A parsed field tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Explicit type override, as written.
    pub ty: Option<String>,
    /// Raw constraint tokens in declaration order.
    pub constraints: Vec<String>,
    /// The member is excluded from the table.
    pub ignore: bool,
}

impl Tag {
    fn ignored() -> Self {
        Self {
            ignore: true,
            ..Self::default()
        }
    }
}

/// Parses a raw tag.
///
/// # Errors
///
/// Returns [`Error::TagParse`] for a field that is not a known sentinel and
/// does not split into exactly one key and one value, for an unknown key,
/// and for an empty `type:` value.
pub fn parse(raw: &str) -> Result<Tag> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let fields: Vec<&str> = cleaned.split(';').filter(|f| !f.is_empty()).collect();

    if fields.iter().any(|f| *f == "-") {
        return Ok(Tag::ignored());
    }

    let mut tag = Tag::default();
    for field in fields {
        if field.starts_with("index") {
            tag.constraints.push(String::from(field));
            continue;
        }

        let parts: Vec<&str> = field.split(':').collect();
        let [key, value] = parts.as_slice() else {
            return Err(invalid(raw, format!("malformed field `{field}`")));
        };

        match *key {
            "type" => {
                if value.is_empty() {
                    return Err(invalid(raw, String::from("empty type")));
                }
                tag.ty = Some(String::from(*value));
            }
            "constraints" | "constraint" => {
                tag.constraints.extend(
                    value
                        .split(',')
                        .filter(|c| !c.is_empty())
                        .map(String::from),
                );
            }
            other => return Err(invalid(raw, format!("unknown key `{other}`"))),
        }
    }

    Ok(tag)
}

fn invalid(raw: &str, reason: String) -> Error {
    Error::TagParse {
        tag: String::from(raw),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_and_constraints() {
        let tag = parse("type:varchar(36); constraints:primary_key, notnull").unwrap();
        assert_eq!(tag.ty.as_deref(), Some("varchar(36)"));
        assert_eq!(tag.constraints, vec!["primary_key", "notnull"]);
        assert!(!tag.ignore);
    }

    #[test]
    fn test_singular_constraint_key() {
        let tag = parse("constraint:unique").unwrap();
        assert_eq!(tag.constraints, vec!["unique"]);
    }

    #[test]
    fn test_empty_tokens_are_discarded() {
        let tag = parse("constraints:unique,,notnull,;;").unwrap();
        assert_eq!(tag.constraints, vec!["unique", "notnull"]);
    }

    #[test]
    fn test_ignore_clears_everything_else() {
        let tag = parse("type:int;constraints:unique;-").unwrap();
        assert!(tag.ignore);
        assert_eq!(tag.ty, None);
        assert!(tag.constraints.is_empty());

        assert!(parse(" - ").unwrap().ignore);
    }

    #[test]
    fn test_index_sentinel() {
        let tag = parse("constraints:notnull;index").unwrap();
        assert_eq!(tag.constraints, vec!["notnull", "index"]);

        let tag = parse("index:email,name").unwrap();
        assert_eq!(tag.constraints, vec!["index:email,name"]);
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(parse("").unwrap(), Tag::default());
    }

    #[test]
    fn test_malformed_fields() {
        assert!(matches!(parse("primary_key"), Err(Error::TagParse { .. })));
        assert!(matches!(parse("type:a:b"), Err(Error::TagParse { .. })));
        assert!(matches!(parse("type:"), Err(Error::TagParse { .. })));

        let err = parse("size:10").unwrap_err();
        assert_eq!(err.to_string(), "invalid tag `size:10`: unknown key `size`");
    }
}
