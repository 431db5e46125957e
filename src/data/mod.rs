//! Reference tables: typed rows parsed from the GIGS-style text resources.
//!
//! One logical record per line. Blank lines and lines starting with `#` are
//! ignored. Fields are separated by [`DataFormat::column_separator`] and may
//! be quoted, in which case the separator is ordinary text and an escaped
//! quote is kept as a literal quote. Column types are declared by the caller.

pub mod catalog;
pub mod cursor;

pub use catalog::{Dataset, ResourceSet, TableCache};
pub use cursor::ExpectedData;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DataError, DataResult};

/// Semantic type of a column, declared per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Integer,
    Double,
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "String",
            ColumnType::Integer => "Integer",
            ColumnType::Double => "Double",
            ColumnType::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

/// Syntax of the reference resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFormat {
    #[serde(default = "default_column_separator")]
    pub column_separator: char,
    #[serde(default = "default_quote")]
    pub quote: char,
    #[serde(default = "default_escape")]
    pub escape: char,
    #[serde(default = "default_list_separator")]
    pub list_separator: char,
}

fn default_column_separator() -> char {
    ','
}

fn default_quote() -> char {
    '"'
}

fn default_escape() -> char {
    '\\'
}

fn default_list_separator() -> char {
    ';'
}

impl Default for DataFormat {
    fn default() -> Self {
        Self {
            column_separator: default_column_separator(),
            quote: default_quote(),
            escape: default_escape(),
            list_separator: default_list_separator(),
        }
    }
}

/// A parsed cell. `Null` stands for an empty field.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Integer(i32),
    Double(f64),
    Boolean(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("null"),
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Double(v) => write!(f, "{}", v),
            Cell::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// One record, with the line it was read from for error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: usize,
    pub cells: Vec<Cell>,
}

/// An immutable sequence of typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    resource: String,
    columns: Vec<ColumnType>,
    rows: Vec<Row>,
}

impl ReferenceTable {
    /// Parses the full text of a resource.
    pub fn parse(
        resource: &str,
        text: &str,
        columns: &[ColumnType],
        format: &DataFormat,
    ) -> DataResult<Self> {
        let mut rows = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let number = index + 1;
            let cells = parse_row(line, columns, format).map_err(|e| e.locate(resource, number))?;
            rows.push(Row {
                line: number,
                cells,
            });
        }
        tracing::debug!(resource, rows = rows.len(), "Parsed reference table");
        Ok(Self {
            resource: resource.to_string(),
            columns: columns.to_vec(),
            rows,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row-level failure, before the resource name and line number are known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RowError {
    UnbalancedQuote,
    ColumnCount { expected: usize, found: usize },
    InvalidCell { column: usize, text: String, ty: ColumnType },
}

impl RowError {
    fn locate(self, resource: &str, line: usize) -> DataError {
        let resource = resource.to_string();
        match self {
            RowError::UnbalancedQuote => DataError::UnbalancedQuote { resource, line },
            RowError::ColumnCount { expected, found } => DataError::ColumnCount {
                resource,
                line,
                expected,
                found,
            },
            RowError::InvalidCell { column, text, ty } => DataError::InvalidCell {
                resource,
                line,
                column,
                text,
                ty,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Plain(String),
    Quoted(String),
}

impl Field {
    /// Trimmed content, or `None` for an empty field.
    fn into_text(self) -> Option<String> {
        let text = match self {
            Field::Plain(s) | Field::Quoted(s) => s,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == text.len() {
            Some(text)
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Splits a trimmed, non-comment line into raw fields.
fn split_fields(line: &str, format: &DataFormat) -> Result<Vec<Field>, RowError> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek() == Some(&format.quote) {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c == format.escape && chars.peek() == Some(&format.quote) {
                    text.push(format.quote);
                    chars.next();
                } else if c == format.quote {
                    closed = true;
                    break;
                } else {
                    text.push(c);
                }
            }
            if !closed {
                return Err(RowError::UnbalancedQuote);
            }
            // Only blanks may sit between the closing quote and the separator.
            loop {
                match chars.next() {
                    None => {
                        fields.push(Field::Quoted(text));
                        return Ok(fields);
                    }
                    Some(c) if c == format.column_separator => break,
                    Some(c) if c.is_whitespace() => continue,
                    Some(_) => return Err(RowError::UnbalancedQuote),
                }
            }
            fields.push(Field::Quoted(text));
        } else {
            let mut text = String::new();
            let mut ended = true;
            for c in chars.by_ref() {
                if c == format.column_separator {
                    ended = false;
                    break;
                }
                text.push(c);
            }
            fields.push(Field::Plain(text));
            if ended {
                return Ok(fields);
            }
        }
    }
}

fn convert(column: usize, text: String, ty: ColumnType) -> Result<Cell, RowError> {
    let invalid = |text: String| RowError::InvalidCell { column, text, ty };
    match ty {
        ColumnType::String => Ok(Cell::Text(text)),
        ColumnType::Integer => text.parse().map(Cell::Integer).map_err(|_| invalid(text)),
        ColumnType::Double => text.parse().map(Cell::Double).map_err(|_| invalid(text)),
        ColumnType::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Cell::Boolean(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Cell::Boolean(false))
            } else {
                Err(invalid(text))
            }
        }
    }
}

/// Parses one line into exactly `columns.len()` cells.
pub(crate) fn parse_row(
    line: &str,
    columns: &[ColumnType],
    format: &DataFormat,
) -> Result<Vec<Cell>, RowError> {
    let fields = split_fields(line, format)?;
    if fields.len() != columns.len() {
        return Err(RowError::ColumnCount {
            expected: columns.len(),
            found: fields.len(),
        });
    }
    fields
        .into_iter()
        .zip(columns)
        .enumerate()
        .map(|(column, (field, &ty))| match field.into_text() {
            None => Ok(Cell::Null),
            Some(text) => convert(column, text, ty),
        })
        .collect()
}

/// Splits a list-valued cell on `separator`. A missing cell is an empty list.
pub fn split_list(value: Option<&str>, separator: char) -> Vec<String> {
    match value.map(str::trim) {
        None | Some("") => Vec::new(),
        Some(text) => text.split(separator).map(|s| s.trim().to_string()).collect(),
    }
}
