use crate::error::NlsqlError;
use std::fmt;

const MAX_IDENTIFIER_LEN: usize = 128;

/// Words that may never be used as a table name, compared case-insensitively.
const SQL_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ATTACH", "BEGIN", "BY", "CASE", "CAST", "COMMIT",
    "CREATE", "CROSS", "DELETE", "DETACH", "DISTINCT", "DROP", "ELSE", "END", "EXCEPT", "EXEC",
    "EXECUTE", "EXISTS", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT",
    "INTERSECT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON",
    "OR", "ORDER", "OUTER", "PRAGMA", "REINDEX", "RENAME", "REPLACE", "REVOKE", "RIGHT",
    "ROLLBACK", "SELECT", "SET", "TABLE", "THEN", "TRANSACTION", "TRIGGER", "TRUNCATE", "UNION",
    "UPDATE", "VACUUM", "VALUES", "VIEW", "WHEN", "WHERE", "WITH",
];

const INTERNAL_TABLE_PREFIX: &str = "sqlite_";

/// A table name that passed [`validate_identifier`] and is safe to interpolate into SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for TableName {
    type Error = NlsqlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_identifier(value)
    }
}

/// Checks that `name` is a plain SQL identifier and not a reserved keyword.
///
/// Accepted: `[A-Za-z_][A-Za-z0-9_]*`, at most 128 chars, not an SQLite internal table.
pub fn validate_identifier(name: &str) -> Result<TableName, NlsqlError> {
    if name.is_empty() {
        return Err(NlsqlError::Validation("identifier must not be empty".to_string()));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(NlsqlError::Validation(format!(
            "identifier is longer than {MAX_IDENTIFIER_LEN} characters"
        )));
    }

    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(NlsqlError::Validation(format!(
            "invalid identifier {name:?}: only letters, digits and underscores are allowed, \
             and it must not start with a digit"
        )));
    }

    if SQL_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(name))
    {
        return Err(NlsqlError::Validation(format!(
            "identifier {name:?} is a reserved SQL keyword"
        )));
    }

    if name
        .get(..INTERNAL_TABLE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(INTERNAL_TABLE_PREFIX))
    {
        return Err(NlsqlError::Validation(format!(
            "identifier {name:?} refers to an internal table"
        )));
    }

    Ok(TableName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(name: &str) -> bool {
        matches!(validate_identifier(name), Err(NlsqlError::Validation(_)))
    }

    #[test]
    fn accepts_plain_names() {
        for name in ["products", "_staging", "Orders2024", "user_events"] {
            let table = validate_identifier(name).unwrap();
            assert_eq!(table.as_str(), name);
        }
    }

    #[test]
    fn rejects_keywords_in_any_case() {
        assert!(rejected("SELECT"));
        assert!(rejected("select"));
        assert!(rejected("Drop"));
        assert!(rejected("pragma"));
    }

    #[test]
    fn rejects_unsafe_characters() {
        assert!(rejected(""));
        assert!(rejected("1users"));
        assert!(rejected("users; DROP TABLE users"));
        assert!(rejected("users--"));
        assert!(rejected("\"users\""));
        assert!(rejected("naïve"));
        assert!(rejected(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
    }

    #[test]
    fn rejects_internal_tables() {
        assert!(rejected("sqlite_master"));
        assert!(rejected("SQLITE_sequence"));
        assert!(validate_identifier("sqlitely").is_ok());
    }
}
