//! Well-column discovery.
//!
//! Tables arriving from instrument exports name their well column
//! inconsistently (`Well`, `wells`, or nothing at all when the wells are just
//! the first column of strings). Fortifying a table finds that column and
//! renames it to the canonical `well` so the rest of the crate can key on it.

use plate_model::is_well_name;
use polars::prelude::DataFrame;

use crate::error::{CoreError, Result};
use crate::frame_utils::string_column;

/// Canonical name of the well-identifying column.
pub const WELL_COLUMN: &str = "well";

const WELL_COLUMN_NAMES: [&str; 2] = ["well", "wells"];

/// Renames the well-identifying column of `df` to `well`, in place.
///
/// Searches, in order: a column named `well` or `wells` (case-insensitive),
/// then any column whose every value is a well-like string (e.g. "A1").
/// Fails with [`CoreError::MissingWellColumn`] when neither exists.
pub fn fortify_in_place(df: &mut DataFrame) -> Result<()> {
    let found = find_well_column(df)?;
    if found != WELL_COLUMN {
        df.rename(&found, WELL_COLUMN.into())?;
    }
    Ok(())
}

/// Copying variant of [`fortify_in_place`].
pub fn fortify(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    fortify_in_place(&mut out)?;
    Ok(out)
}

/// The canonical well names of a fortified-or-fortifiable table, in row order.
///
/// Well strings are normalized through the codec, so `a1` reads as `A1`.
pub fn well_names(df: &DataFrame) -> Result<Vec<String>> {
    let found = find_well_column(df)?;
    let mut names = Vec::with_capacity(df.height());
    for raw in string_column(df, &found)? {
        names.push(plate_model::parse_well(&raw).map(|c| c.name())?);
    }
    Ok(names)
}

fn find_well_column(df: &DataFrame) -> Result<String> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    for candidate in WELL_COLUMN_NAMES {
        if let Some(name) = columns.iter().find(|name| name.eq_ignore_ascii_case(candidate)) {
            return Ok(name.clone());
        }
    }

    // Fall back to the first column that holds only well-like strings.
    for name in &columns {
        let values = string_column(df, name)?;
        if !values.is_empty() && values.iter().all(|value| is_well_name(value)) {
            return Ok(name.clone());
        }
    }

    Err(CoreError::MissingWellColumn {
        columns: columns.join(", "),
    })
}
