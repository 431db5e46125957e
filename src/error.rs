use std::fmt;

use thiserror::Error;

use crate::config::CapabilityKey;
use crate::data::ColumnType;

/// A broken reference resource. Never recovered: it means the dataset is
/// corrupt, not that the implementation under test is wrong.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    #[error("Reference resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Can not read {resource}: {message}")]
    Io { resource: String, message: String },

    #[error("{resource}:{line}: unbalanced quote")]
    UnbalancedQuote { resource: String, line: usize },

    #[error("{resource}:{line}: found {found} fields, expected {expected}")]
    ColumnCount {
        resource: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{resource}:{line}: can not parse {text:?} in column {column} as {ty}")]
    InvalidCell {
        resource: String,
        line: usize,
        column: usize,
        text: String,
        ty: ColumnType,
    },

    #[error("No active row")]
    NoActiveRow,

    #[error("Column {column} is declared as {declared}, not {requested}")]
    WrongType {
        column: usize,
        declared: ColumnType,
        requested: ColumnType,
    },

    #[error("Column {column} is empty in row {row}")]
    NullCell { column: usize, row: usize },

    #[error("Column {column} out of range, table has {arity} columns")]
    ColumnOutOfRange { column: usize, arity: usize },

    #[error("Unknown {field} in reference data: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("Inconsistent reference values for code {code}: {message}")]
    Inconsistent { code: i32, message: String },
}

impl DataError {
    pub fn io(resource: impl Into<String>, err: &std::io::Error) -> Self {
        DataError::Io {
            resource: resource.into(),
            message: err.to_string(),
        }
    }
}

/// Failure reported by the authority factory under test.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FactoryError {
    /// The implementation does not know this code. Turned into a skip.
    #[error("No {object_type} found for code {authority}:{code}")]
    NoSuchCode {
        object_type: String,
        authority: String,
        code: String,
    },

    #[error("Factory failure: {message}")]
    Failed { message: String },
}

impl FactoryError {
    pub fn no_such_code(
        object_type: impl Into<String>,
        authority: impl Into<String>,
        code: impl fmt::Display,
    ) -> Self {
        FactoryError::NoSuchCode {
            object_type: object_type.into(),
            authority: authority.into(),
            code: code.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        FactoryError::Failed {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for FactoryError {
    fn from(err: anyhow::Error) -> Self {
        FactoryError::Failed {
            message: format!("{:#}", err),
        }
    }
}

/// A mismatch between the expected and the constructed object.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{}{}", .message, see_capability(.capability))]
pub struct AssertionFailure {
    pub message: String,
    /// The capability that gated the failing check, if any. An implementation
    /// can switch that flag off to declare the property unsupported.
    pub capability: Option<CapabilityKey>,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            capability: None,
        }
    }

    pub fn with_capability(mut self, key: CapabilityKey) -> Self {
        self.capability.get_or_insert(key);
        self
    }
}

fn see_capability(capability: &Option<CapabilityKey>) -> String {
    match capability {
        Some(key) => format!(" (see {})", key),
        None => String::new(),
    }
}

/// The reason a case was not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedCode {
    pub object_type: String,
    pub code: String,
}

impl UnsupportedCode {
    pub fn new(object_type: impl Into<String>, code: impl fmt::Display) -> Self {
        Self {
            object_type: object_type.into(),
            code: code.to_string(),
        }
    }
}

impl fmt::Display for UnsupportedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeric = !self.code.is_empty() && self.code.chars().all(|c| c.is_ascii_digit());
        if numeric {
            write!(f, "{}[{}] not supported.", self.object_type, self.code)
        } else {
            write!(f, "{}[\"{}\"] not supported.", self.object_type, self.code)
        }
    }
}

/// Why a case was recorded as not applicable instead of passed or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The factory reported the code as unknown.
    UnsupportedCode(UnsupportedCode),
    /// No factory of the needed kind was supplied.
    MissingFactory(&'static str),
    /// The code is deprecated and deprecated object creation is switched off.
    DeprecatedObject(UnsupportedCode),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedCode(code) => write!(f, "{}", code),
            SkipReason::MissingFactory(kind) => write!(f, "No {} available.", kind),
            SkipReason::DeprecatedObject(code) => write!(
                f,
                "{}[{}] is deprecated and deprecated object creation is disabled.",
                code.object_type, code.code
            ),
        }
    }
}

/// Everything that can end a verification case early.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaseError {
    #[error("{0}")]
    Skipped(SkipReason),

    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type DataResult<T> = Result<T, DataError>;
pub type CaseResult<T> = Result<T, CaseError>;
