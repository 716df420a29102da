use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::{Observable, SweepKind};
use crate::layout::{GridCell, GridShape};

/// Failure to turn a file on disk into an [`ObservableTable`](crate::data::model::ObservableTable).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("{}: file does not exist", .0.display())]
    Missing(PathBuf),

    #[error("{}: no data rows", .0.display())]
    Empty(PathBuf),

    #[error("{}: line {line} has {found} columns, expected {expected}", .path.display())]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{}: line {line}, column {column}: '{text}' is not a number", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        column: usize,
        text: String,
    },

    /// Input the csv reader rejects before any cell is parsed, e.g. invalid UTF-8.
    #[error("{}: line {line}: malformed input: {message}", .path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("{}: expected a single vector, found {rows}x{columns} table", .path.display())]
    NotAVector {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },

    #[error("{}: {kind} sweep needs {required} columns, found {found}", .path.display())]
    MissingColumns {
        path: PathBuf,
        kind: SweepKind,
        required: usize,
        found: usize,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A panel request that does not fit the declared grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid shape {rows}x{columns} has no cells")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("cell {cell} with span {row_span}x{col_span} lies outside the {shape} grid")]
    OutOfBounds {
        cell: GridCell,
        row_span: usize,
        col_span: usize,
        shape: GridShape,
    },

    #[error("cell {0} is already covered by another panel")]
    CellOccupied(GridCell),
}

/// Column selections that cannot be drawn without misrepresenting the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("column {index} out of range for a table with {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },

    #[error("x has {x_len} rows but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("{kind} sweep does not carry {observable:?}")]
    MissingObservable {
        kind: SweepKind,
        observable: Observable,
    },
}
