use std::sync::Arc;

use bitvec::prelude::*;

use crate::data_type::DataType;
use crate::error::{DbError, Result};
use crate::value::Value;

/// Physical storage for column data.
/// Each variant wraps a collection of a specific type so values of one column
/// sit in contiguous memory (columnar storage).
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Vector of 64-bit integers.
    Int(Vec<i64>),
    /// Vector of reference-counted strings.
    Str(Vec<Arc<str>>),
    /// Compact bit-vector for boolean values.
    Bool(BitVec),
}

/// One column of a table: metadata (name, declared type) plus the data.
#[derive(Debug, Clone)]
pub struct Column {
    /// The name of the column.
    pub name: String,
    /// The declared data type of the column.
    pub data_type: DataType,
    /// The actual values stored in the column.
    data: ColumnData,
}

impl Column {
    /// Creates a new, empty column with the specified name and data type.
    pub fn new(name: String, data_type: DataType) -> Self {
        let data = match data_type {
            DataType::Int => ColumnData::Int(vec![]),
            DataType::Str => ColumnData::Str(vec![]),
            DataType::Bool => ColumnData::Bool(bitvec!()),
        };
        Self {
            name,
            data_type,
            data,
        }
    }

    /// Appends a new value to the end of the column.
    ///
    /// # Errors
    /// Returns [DbError::TypeMismatch] if the value's runtime type does not
    /// match the column's declared type. Nothing is stored on error.
    ///
    /// # Example
    /// ```
    /// # use minirel::column::Column;
    /// # use minirel::data_type::DataType;
    /// # use minirel::value::Value;
    /// let mut col = Column::new("age".into(), DataType::Int);
    /// col.push(Value::Int(30)).unwrap();
    ///
    /// assert_eq!(col.len(), 1);
    /// assert_eq!(col.get(0), Some(Value::Int(30)));
    /// ```
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (&mut self.data, value) {
            (ColumnData::Int(col), Value::Int(v)) => col.push(v),
            (ColumnData::Str(col), Value::Str(v)) => col.push(v),
            (ColumnData::Bool(col), Value::Bool(v)) => col.push(v),
            (_, value) => {
                return Err(DbError::TypeMismatch {
                    column: self.name.clone(),
                    expected: self.data_type,
                    found: value.data_type(),
                });
            }
        }
        Ok(())
    }

    /// Returns the number of rows currently stored in the column.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(col) => col.len(),
            ColumnData::Str(col) => col.len(),
            ColumnData::Bool(col) => col.len(),
        }
    }

    /// Returns true if there is no row in the column.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieves the value at the specified row index, or `None` if the
    /// index is out of bounds.
    pub fn get(&self, row_idx: usize) -> Option<Value> {
        if row_idx >= self.len() {
            return None;
        }
        match &self.data {
            ColumnData::Int(col) => Some(Value::Int(col[row_idx])),
            ColumnData::Str(col) => Some(Value::Str(col[row_idx].clone())),
            ColumnData::Bool(col) => Some(Value::Bool(col[row_idx])),
        }
    }

    /// Replaces the value at the specified row index in place.
    ///
    /// # Errors
    /// Returns [DbError::TypeMismatch] if the value's type does not match
    /// the column's declared type.
    ///
    /// # Panics
    /// Panics if `row_idx` is out of bounds, like [Vec] indexing; callers
    /// only pass indices below [Column::len].
    pub fn set(&mut self, row_idx: usize, value: &Value) -> Result<()> {
        match (&mut self.data, value) {
            (ColumnData::Int(col), Value::Int(v)) => col[row_idx] = *v,
            (ColumnData::Str(col), Value::Str(v)) => col[row_idx] = Arc::clone(v),
            (ColumnData::Bool(col), Value::Bool(v)) => {
                col.set(row_idx, *v);
            }
            (_, value) => {
                return Err(DbError::TypeMismatch {
                    column: self.name.clone(),
                    expected: self.data_type,
                    found: value.data_type(),
                });
            }
        }
        Ok(())
    }

    /// Removes the value at the specified row index, shifting later rows up.
    pub fn remove(&mut self, row_idx: usize) {
        match &mut self.data {
            ColumnData::Int(col) => {
                col.remove(row_idx);
            }
            ColumnData::Str(col) => {
                col.remove(row_idx);
            }
            ColumnData::Bool(col) => {
                col.remove(row_idx);
            }
        }
    }
}
