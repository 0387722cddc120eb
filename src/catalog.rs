use std::collections::HashMap;
use std::fmt;

use crate::command::ColumnSpec;
use crate::data_type::DataType;
use crate::error::{DbError, Result};

/// One column of a table schema: a name and its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

/// The named, ordered column definition of a table.
///
/// Invariant: the first column is always `ID:int`, inserted by
/// [Catalog::define] and never supplied by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Returns the names of all columns, `ID` first.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

impl fmt::Display for TableSchema {
    /// Renders the schema as `name (ID:int, col:type, ...)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.name)?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", col.name, col.data_type)?;
        }
        write!(f, ")")
    }
}

/// The schema registry: owns every defined table schema.
///
/// Creation order is tracked in a side vector so [Catalog::list] iterates
/// the same stable order every time.
#[derive(Debug, Default)]
pub struct Catalog {
    schemas: HashMap<String, TableSchema>,
    order: Vec<String>,
}

impl Catalog {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new table schema with `ID:int` prepended to the supplied
    /// columns.
    ///
    /// # Errors
    /// - [DbError::DuplicateTable] if the name is already defined.
    /// - [DbError::InvalidColumnType] if a spec's type is not `int`, `str`
    ///   or `bool`.
    /// - [DbError::DuplicateColumnName] if a spec's name collides with
    ///   another spec or with the implicit `ID` column (checked in any case,
    ///   so `id` cannot shadow it).
    pub fn define(&mut self, name: &str, specs: &[ColumnSpec]) -> Result<&TableSchema> {
        if self.schemas.contains_key(name) {
            return Err(DbError::DuplicateTable(name.to_string()));
        }

        let mut columns = vec![ColumnDef {
            name: "ID".to_string(),
            data_type: DataType::Int,
        }];

        for spec in specs {
            if spec.name.eq_ignore_ascii_case("ID") {
                return Err(DbError::DuplicateColumnName(spec.name.clone()));
            }
            if columns.iter().any(|c| c.name == spec.name) {
                return Err(DbError::DuplicateColumnName(spec.name.clone()));
            }
            columns.push(ColumnDef {
                name: spec.name.clone(),
                data_type: DataType::parse(&spec.type_name)?,
            });
        }

        let schema = TableSchema {
            name: name.to_string(),
            columns,
        };
        self.order.push(name.to_string());
        self.schemas.insert(name.to_string(), schema);
        Ok(&self.schemas[name])
    }

    /// Retrieves a schema by table name.
    pub fn lookup(&self, name: &str) -> Result<&TableSchema> {
        self.schemas
            .get(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))
    }

    /// Removes and returns a schema by table name.
    pub fn remove(&mut self, name: &str) -> Result<TableSchema> {
        let schema = self
            .schemas
            .remove(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))?;
        self.order.retain(|n| n != name);
        Ok(schema)
    }

    /// Returns true if a table with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Iterates all schemas in creation order. Restartable and finite.
    pub fn list(&self) -> impl Iterator<Item = &TableSchema> {
        self.order.iter().map(|name| &self.schemas[name])
    }
}
