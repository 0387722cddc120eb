use crate::catalog::TableSchema;
use crate::column::Column;
use crate::command::Predicate;
use crate::error::{DbError, Result};
use crate::value::Value;

/// A materialized row: one value per schema column, `ID` first.
pub type Row = Vec<Value>;

/// In-memory storage for one table.
///
/// Rows live in columnar form — one [Column] per schema column, index 0
/// holding the auto-generated `ID`. Row order is insertion order. The
/// `next_id` counter starts at 1 and is never reused, even after deletions.
#[derive(Debug)]
pub struct Table {
    /// The name of the table.
    pub name: String,
    columns: Vec<Column>,
    next_id: i64,
    row_count: usize,
}

impl Table {
    /// Creates empty storage shaped after the given schema.
    pub fn new(schema: &TableSchema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|col| Column::new(col.name.clone(), col.data_type))
            .collect();
        Self {
            name: schema.name.clone(),
            columns,
            next_id: 1,
            row_count: 0,
        }
    }

    /// Returns the number of rows currently stored.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Inserts one row from values given positionally for every column
    /// except `ID`, which is assigned from the counter.
    ///
    /// Arity and every value's type are validated before anything is stored,
    /// so a failed insert leaves the table untouched. Returns the created
    /// row, `ID` included.
    ///
    /// # Errors
    /// - [DbError::ArityMismatch] if the value count differs from the
    ///   non-ID column count.
    /// - [DbError::TypeMismatch] naming the first offending column.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<Row> {
        let expected = self.columns.len() - 1;
        if values.len() != expected {
            return Err(DbError::ArityMismatch {
                expected,
                got: values.len(),
            });
        }

        for (value, column) in values.iter().zip(&self.columns[1..]) {
            if value.data_type() != column.data_type {
                return Err(DbError::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type,
                    found: value.data_type(),
                });
            }
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut row = Vec::with_capacity(self.columns.len());
        row.push(Value::Int(id));
        row.extend(values);

        for (column, value) in self.columns.iter_mut().zip(row.iter()) {
            column.push(value.clone())?;
        }
        self.row_count += 1;

        Ok(row)
    }

    /// Returns an owned snapshot of the rows matching the predicate (or of
    /// every row when the predicate is absent), in storage order.
    ///
    /// # Errors
    /// [DbError::UnknownColumn] if the predicate names a column absent from
    /// the schema.
    pub fn scan(&self, predicate: Option<&Predicate>) -> Result<Vec<Row>> {
        let matches = self.matching_rows(predicate)?;
        Ok(matches.into_iter().map(|idx| self.row(idx)).collect())
    }

    /// Sets `column` to `value` on every row matching the predicate, in
    /// place. Returns the number of rows updated; 0 is a valid result.
    ///
    /// # Errors
    /// - [DbError::UnknownColumn] if the target or predicate column is
    ///   absent from the schema.
    /// - [DbError::TypeMismatch] if the new value's type disagrees with the
    ///   target column's declared type.
    pub fn update(&mut self, column: &str, value: &Value, predicate: &Predicate) -> Result<usize> {
        // Validate both columns and the value type before mutating anything
        let target_idx = self.column_index(column)?;
        let target = &self.columns[target_idx];
        if value.data_type() != target.data_type {
            return Err(DbError::TypeMismatch {
                column: target.name.clone(),
                expected: target.data_type,
                found: value.data_type(),
            });
        }

        let matches = self.matching_rows(Some(predicate))?;
        let count = matches.len();
        let target = &mut self.columns[target_idx];
        for row_idx in matches {
            target.set(row_idx, value)?;
        }

        Ok(count)
    }

    /// Removes every row matching the predicate, preserving the relative
    /// order of the remainder. Returns the number of rows removed; 0 is a
    /// valid result. Retired IDs are never reassigned.
    ///
    /// # Errors
    /// [DbError::UnknownColumn] if the predicate names a column absent from
    /// the schema.
    pub fn delete(&mut self, predicate: &Predicate) -> Result<usize> {
        let matches = self.matching_rows(Some(predicate))?;
        let count = matches.len();

        // Remove back to front so pending indices stay valid
        for &row_idx in matches.iter().rev() {
            for column in &mut self.columns {
                column.remove(row_idx);
            }
        }
        self.row_count -= count;

        Ok(count)
    }

    /// Materializes the row at `row_idx` across all columns.
    fn row(&self, row_idx: usize) -> Row {
        self.columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .unwrap_or_else(|| unreachable!("row {} within row_count", row_idx))
            })
            .collect()
    }

    /// Collects the indices of rows matching the predicate, in storage
    /// order. Without a predicate every row matches.
    ///
    /// Equality compares value and declared type at once, so a predicate
    /// literal of the wrong type is a valid predicate that matches nothing.
    fn matching_rows(&self, predicate: Option<&Predicate>) -> Result<Vec<usize>> {
        let Some(predicate) = predicate else {
            return Ok((0..self.row_count).collect());
        };

        let column = &self.columns[self.column_index(&predicate.column)?];
        Ok((0..self.row_count)
            .filter(|&idx| column.get(idx).is_some_and(|v| v == predicate.value))
            .collect())
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|col| col.name == name)
            .ok_or_else(|| DbError::UnknownColumn(name.to_string()))
    }
}
