use crate::value::Value;

/// A fully parsed command, one variant per grammar shape.
///
/// The parser produces this once and the executor consumes it exhaustively;
/// nothing downstream re-inspects the raw command text.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable { name: String, columns: Vec<ColumnSpec> },
    ListTables,
    DropTable { name: String },
    Insert { table: String, values: Vec<Value> },
    Select { table: String, predicate: Option<Predicate> },
    Update { table: String, column: String, value: Value, predicate: Predicate },
    Delete { table: String, predicate: Predicate },
    Help,
    Exit,
}

/// One `name:type` pair from a `create_table` column list.
///
/// The type is kept as the raw token here; the catalog resolves it when the
/// table is defined, so surface syntax and schema validation stay separate.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub type_name: String,
}

/// A single column-equals-literal condition from a `where` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: Value,
}

impl Predicate {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}
