#![forbid(unsafe_code)]

use crate::types::{ColumnType, ElementType, TypeCode};

pub type FrameResult<T> = Result<T, FrameError>;

/// Errors surfaced by column and table operations.
///
/// Every error is reported before any column is touched, so a failed row or column mutation
/// leaves the table exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error("row index {index} out of bounds for table with {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("column index {index} out of bounds for table with {columns} columns")]
    ColumnOutOfBounds { index: usize, columns: usize },

    #[error("slot {index} out of bounds for column with capacity {capacity}")]
    SlotOutOfBounds { index: usize, capacity: usize },

    #[error("invalid row range {from}..{to} for table with {rows} rows")]
    InvalidRange { from: usize, to: usize, rows: usize },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("table has no column names")]
    NoColumnNames,

    #[error("type mismatch: column holds {expected}, got {found}")]
    TypeMismatch { expected: ColumnType, found: String },

    #[error("cannot convert {value:?} from {from} to {to}")]
    Conversion {
        from: ColumnType,
        to: ColumnType,
        value: String,
    },

    #[error("unknown column type code {}", .0.get())]
    UnknownTypeCode(TypeCode),

    #[error("join key types differ: {left} vs {right}")]
    KeyTypeMismatch {
        left: ElementType,
        right: ElementType,
    },

    #[error("row count mismatch: expected {expected} rows, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("row length mismatch: expected {expected} values, got {actual}")]
    RowLength { expected: usize, actual: usize },

    #[error("expected {expected} column names, got {actual}")]
    NameCountMismatch { expected: usize, actual: usize },

    #[error("column capacity mismatch: expected {expected}, got {actual}")]
    CapacityMismatch { expected: usize, actual: usize },

    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
