//! Error types for the microplate data model.

use thiserror::Error;

/// Errors raised by coordinate, range, and shape operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// String fails the well-name grammar (`<letters><digits>`).
    #[error("invalid well name: {name}")]
    InvalidWellName { name: String },

    /// Expression matches none of the range grammars and is not a well name.
    #[error("range expression matches no known grammar: {expr}")]
    InvalidRange { expr: String },

    /// Well count is not one of the supported plate sizes.
    #[error("unknown plate size: {wells} wells")]
    UnknownPlateSize { wells: usize },

    /// Target plate dimensions are not integer multiples of the source's.
    #[error(
        "cannot map a {from}-well plate onto a {to}-well plate: dimensions are not integer multiples"
    )]
    IncompatibleShapes { from: usize, to: usize },

    /// Named well does not exist on the given plate.
    #[error("well {well} does not exist on a {wells}-well plate")]
    WellOutsideShape { well: String, wells: usize },

    /// Plate-size inference called with no wells.
    #[error("cannot infer a plate shape from an empty well list")]
    EmptyWellList,

    /// No supported plate accommodates the named wells.
    #[error("no supported plate shape has at least {rows} rows and {columns} columns")]
    NoFittingShape { rows: usize, columns: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
