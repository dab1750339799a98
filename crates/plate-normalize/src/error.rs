//! Error types for grouped normalization.

use polars::error::PolarsError;
use thiserror::Error;

/// Errors raised while normalizing grouped measurements.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Underlying DataFrame error.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// A named column is not present in the table.
    #[error("column not found: {name}")]
    MissingColumn { name: String },

    /// Transform returned a series of the wrong length for its group.
    #[error("transform returned {actual} values for a group of {expected}")]
    GroupLength { expected: usize, actual: usize },

    /// A group has no row whose index matches the reference anchor.
    #[error("no row with index value {anchor} in group {group}")]
    MissingAnchor { anchor: String, group: String },

    /// Error raised by a user transform, propagated unmodified.
    #[error("transform failed: {message}")]
    Transform { message: String },
}

impl NormalizeError {
    /// Wraps an arbitrary message as a transform failure.
    pub fn transform(message: impl Into<String>) -> Self {
        NormalizeError::Transform {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
