//! Platemap compilation and plate-table operations on Polars.
//!
//! This crate turns the `plate-model` value types into tidy DataFrames and
//! reshapes them between plates:
//!
//! - **compile**: platemap programs to one-row-per-well tables, with value
//!   spooling; cherry-picking convenience
//! - **fortify**: well-column discovery and canonicalization
//! - **position**: physical row/column columns derived from well names
//! - **rescale**: replicating a plate's rows onto a larger plate
//! - **combine**: tiling several plates onto one larger plate
//! - **reshape**: converting between tidy and physical (wide) layouts

pub mod combine;
pub mod compile;
pub mod error;
pub mod fortify;
mod frame_utils;
pub mod position;
pub mod rescale;
pub mod reshape;

pub use combine::{CombineOptions, combine_plates};
pub use compile::{cherrypick, compile_platemap};
pub use error::{CoreError, Result};
pub use fortify::{WELL_COLUMN, fortify, fortify_in_place, well_names};
pub use position::{PositionOptions, add_physical_position};
pub use rescale::rescale_table;
pub use reshape::{tidy_to_wide, wide_to_tidy};
