//! Table export: identifier validation and CSV rendering of a table snapshot.

mod identifier;
mod render;

pub use identifier::{TableName, validate_identifier};
pub use render::render_csv;

/// Full in-memory snapshot of one table.
///
/// `columns` follow declaration order; every row has exactly `columns.len()` cells, already
/// rendered as text (`NULL` becomes an empty cell).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDump {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
