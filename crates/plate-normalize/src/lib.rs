//! Grouped normalization of plate measurements.
//!
//! This crate normalizes measured values (optical density, fluorescence)
//! against reference conditions, group-wise:
//!
//! - **normalize**: the grouping/transform/reassembly engine
//! - **transforms**: the common reference transforms (subtract the zero
//!   timepoint, divide by a control, subtract a blank mean)

pub mod error;
pub mod normalize;
pub mod transforms;

pub use error::{NormalizeError, Result};
pub use normalize::{GroupKey, NormalizeGroup, NormalizeOptions, normalize};
pub use transforms::{divide_by_at, identity, subtract_at, subtract_mean_at};
