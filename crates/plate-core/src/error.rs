//! Error types for table-producing plate operations.

use plate_model::ModelError;
use polars::error::PolarsError;
use thiserror::Error;

/// Errors raised while compiling, rescaling, combining, or reshaping tables.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Coordinate/range/shape error from the data model.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Underlying DataFrame error.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// Array-valued rule assignment whose shape fits the target range in
    /// none of the recognized forms (exact grid, row vector, column vector).
    #[error(
        "value for variable {variable} does not fit range {range} ({rows} rows x {columns} columns)"
    )]
    ShapeMismatch {
        range: String,
        variable: String,
        rows: usize,
        columns: usize,
    },

    /// No well-identifying column found in a table.
    #[error(
        "cannot find a column identifying the wells; expected a column named \
         \"well\" or \"wells\" (case insensitive), or a column of well-like \
         strings (e.g. \"A1\"); table has columns: {columns}"
    )]
    MissingWellColumn { columns: String },

    /// Combine layout grid does not tile the destination plate.
    #[error("layout covers {have} {axis} but the destination plate has {need}")]
    LayoutMismatch {
        axis: &'static str,
        have: usize,
        need: usize,
    },

    /// Wide-format table has a column header that is not a plate column.
    #[error("wide table column is not a 1-based column number: {name}")]
    WideHeader { name: String },

    /// Wide-format table has a row label that is not a plate row.
    #[error("wide table row label is not a plate row: {label}")]
    WideRowLabel { label: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
