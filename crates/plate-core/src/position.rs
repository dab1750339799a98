//! Physical row/column columns.
//!
//! Derives the plate's physical coordinates from the well column, for
//! joining against instrument data or plotting by position.

use plate_model::{parse_well, row_to_letters};
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::fortify::well_names;

/// Options for [`add_physical_position`].
#[derive(Debug, Clone)]
pub struct PositionOptions {
    /// Name of the new row column.
    pub row_column: String,
    /// Name of the new column column.
    pub column_column: String,
    /// `true` to label rows "A", "B", ... and columns 1, 2, ...;
    /// `false` for zero-based indices on both axes.
    pub natural: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            row_column: "row".to_string(),
            column_column: "column".to_string(),
            natural: false,
        }
    }
}

/// Adds physical row/column columns derived from the well column.
///
/// # Examples
///
/// ```
/// use plate_core::{PositionOptions, add_physical_position};
/// use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
///
/// let df = DataFrame::new(vec![
///     Series::new("well".into(), vec!["A1", "A2", "B3"]).into(),
///     Series::new("od600".into(), vec![0.25, 0.30, 0.21]).into(),
/// ])
/// .unwrap();
/// let df = add_physical_position(&df, &PositionOptions::default()).unwrap();
/// assert_eq!(df.column("row").unwrap().get(2).unwrap(), AnyValue::Int64(1));
/// assert_eq!(df.column("column").unwrap().get(2).unwrap(), AnyValue::Int64(2));
/// ```
pub fn add_physical_position(df: &DataFrame, options: &PositionOptions) -> Result<DataFrame> {
    let wells = well_names(df)?;
    let mut out = df.clone();
    if options.natural {
        let mut rows = Vec::with_capacity(wells.len());
        let mut columns = Vec::with_capacity(wells.len());
        for well in &wells {
            let coord = parse_well(well)?;
            rows.push(row_to_letters(coord.row));
            columns.push((coord.column + 1) as i64);
        }
        out.with_column(Series::new(options.row_column.as_str().into(), rows))?;
        out.with_column(Series::new(options.column_column.as_str().into(), columns))?;
    } else {
        let mut rows = Vec::with_capacity(wells.len());
        let mut columns = Vec::with_capacity(wells.len());
        for well in &wells {
            let coord = parse_well(well)?;
            rows.push(coord.row as i64);
            columns.push(coord.column as i64);
        }
        out.with_column(Series::new(options.row_column.as_str().into(), rows))?;
        out.with_column(Series::new(options.column_column.as_str().into(), columns))?;
    }
    Ok(out)
}
