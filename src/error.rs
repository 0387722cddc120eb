use crate::data_type::DataType;

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, DbError>;

/// The error taxonomy of the store.
///
/// Every failure a command can produce is one of these kinds, detected before
/// any mutation happens: a command either applies fully or not at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DbError {
    /// `create_table` with a name that is already defined.
    #[error("table {0:?} already exists")]
    DuplicateTable(String),

    /// Any operation referencing a table that is not defined.
    #[error("table {0:?} does not exist")]
    UnknownTable(String),

    /// A `create_table` column list naming the same column twice, or naming
    /// the implicit `ID` column.
    #[error("duplicate column name {0:?}")]
    DuplicateColumnName(String),

    /// A `create_table` column spec with a type outside `int`, `str`, `bool`.
    #[error("invalid column type {0:?}, expected int, str or bool")]
    InvalidColumnType(String),

    /// A `where` or `set` clause naming a column absent from the schema.
    #[error("column {0:?} does not exist")]
    UnknownColumn(String),

    /// An `insert` whose value count does not match the non-ID column count.
    #[error("expected {expected} value(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },

    /// A literal whose runtime type disagrees with its column's declared type.
    #[error("column {column:?} holds {expected} values, got a {found} value")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },

    /// Input that does not match any recognized command shape.
    #[error("syntax error: {0}")]
    Syntax(String),
}
