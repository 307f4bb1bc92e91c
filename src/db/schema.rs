//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `query_favorites` table (saved natural-language query + generated SQL)
///
/// `query_text` uniqueness is enforced by the database actor, not by a constraint, so that a
/// duplicate surfaces as a domain error instead of a constraint violation.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Query favorites
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS query_favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query_text TEXT NOT NULL,
    sql_text TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339, UTC
);
"#;
