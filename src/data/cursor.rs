use std::fmt;
use std::sync::Arc;

use super::{Cell, ColumnType, ReferenceTable, Row, split_list};
use crate::error::{DataError, DataResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    BeforeFirst,
    At(usize),
    Exhausted,
}

/// Cursor over a shared [`ReferenceTable`].
///
/// The cursor starts before the first row; call [`advance`](Self::advance)
/// before reading any cell. Several cursors may walk the same table.
#[derive(Debug, Clone)]
pub struct ExpectedData {
    table: Arc<ReferenceTable>,
    position: Position,
    list_separator: char,
}

impl ExpectedData {
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self::with_list_separator(table, ';')
    }

    pub fn with_list_separator(table: Arc<ReferenceTable>, list_separator: char) -> Self {
        Self {
            table,
            position: Position::BeforeFirst,
            list_separator,
        }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Moves to the next row. Returns `false` once the rows are exhausted,
    /// and keeps returning `false` afterwards.
    pub fn advance(&mut self) -> bool {
        let next = match self.position {
            Position::BeforeFirst => 0,
            Position::At(index) => index + 1,
            Position::Exhausted => return false,
        };
        if next < self.table.rows.len() {
            self.position = Position::At(next);
            true
        } else {
            self.position = Position::Exhausted;
            false
        }
    }

    /// The row under the cursor.
    pub fn current_row(&self) -> DataResult<&Row> {
        match self.position {
            Position::At(index) => Ok(&self.table.rows[index]),
            _ => Err(DataError::NoActiveRow),
        }
    }

    fn cell(&self, column: usize, requested: ColumnType) -> DataResult<&Cell> {
        let row = self.current_row()?;
        let declared = *self
            .table
            .columns
            .get(column)
            .ok_or(DataError::ColumnOutOfRange {
                column,
                arity: self.table.columns.len(),
            })?;
        if declared != requested {
            return Err(DataError::WrongType {
                column,
                declared,
                requested,
            });
        }
        Ok(&row.cells[column])
    }

    fn null_cell(&self, column: usize) -> DataError {
        let row = self.current_row().map(|r| r.line).unwrap_or_default();
        DataError::NullCell { column, row }
    }

    pub fn get_string_or_null(&self, column: usize) -> DataResult<Option<&str>> {
        match self.cell(column, ColumnType::String)? {
            Cell::Text(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    pub fn get_string(&self, column: usize) -> DataResult<&str> {
        self.get_string_or_null(column)?
            .ok_or_else(|| self.null_cell(column))
    }

    pub fn get_int_or_null(&self, column: usize) -> DataResult<Option<i32>> {
        match self.cell(column, ColumnType::Integer)? {
            Cell::Integer(v) => Ok(Some(*v)),
            _ => Ok(None),
        }
    }

    pub fn get_int(&self, column: usize) -> DataResult<i32> {
        self.get_int_or_null(column)?
            .ok_or_else(|| self.null_cell(column))
    }

    /// Reads a double, or NaN when the cell is empty.
    pub fn get_double(&self, column: usize) -> DataResult<f64> {
        match self.cell(column, ColumnType::Double)? {
            Cell::Double(v) => Ok(*v),
            _ => Ok(f64::NAN),
        }
    }

    pub fn get_boolean(&self, column: usize) -> DataResult<bool> {
        match self.cell(column, ColumnType::Boolean)? {
            Cell::Boolean(v) => Ok(*v),
            _ => Err(self.null_cell(column)),
        }
    }

    /// Reads a list-valued string column. An empty cell gives an empty list.
    pub fn get_string_list(&self, column: usize) -> DataResult<Vec<String>> {
        let value = self.get_string_or_null(column)?;
        Ok(split_list(value, self.list_separator))
    }
}

impl fmt::Display for ExpectedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpectedData[")?;
        match self.position {
            Position::At(index) => {
                write!(f, "{}", index)?;
                let mut separator = ": ";
                for cell in &self.table.rows[index].cells {
                    write!(f, "{}{}", separator, cell)?;
                    separator = ", ";
                }
            }
            _ => write!(f, "no active row")?,
        }
        write!(f, "]")
    }
}
