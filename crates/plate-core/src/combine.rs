//! Multi-plate combination.
//!
//! Tiles several smaller plates onto one larger plate, the way a plate
//! stamper or acoustic dispenser consolidates four 96-well plates into a
//! 384-well plate. Placement is block-contiguous by default; either axis can
//! instead interleave, taking one row (or column) from each source plate
//! before advancing.

use std::collections::BTreeMap;

use plate_model::{PlateShape, Scalar, parse_well, well_name};
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};

use crate::error::{CoreError, Result};
use crate::fortify::fortify;
use crate::frame_utils::{any_to_scalar, typed_column};

/// Options for [`combine_plates`].
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Shape of every source plate.
    pub from: PlateShape,
    /// Shape of the destination plate.
    pub to: PlateShape,
    /// Take one row from each source plate before advancing to the next.
    pub interleave_rows: bool,
    /// Take one column from each source plate before advancing to the next.
    pub interleave_columns: bool,
    /// When set, adds a column of this name recording each destination
    /// well's origin well on its source plate.
    pub source_well_column: Option<String>,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            from: PlateShape::Wells96,
            to: PlateShape::Wells384,
            interleave_rows: false,
            interleave_columns: false,
            source_well_column: None,
        }
    }
}

/// Combines a grid of plate tables into one table for the larger plate.
///
/// `layout[i][j]` is placed in the i-th row and j-th column of the
/// destination grid: `[[a, b], [c, d]]` puts `a` top-left, `b` top-right,
/// `c` bottom-left, `d` bottom-right. The grid must tile the destination
/// exactly: `from.rows() * layout.len() == to.rows()`, and likewise for
/// columns. Output rows are ordered by destination well, row-major.
pub fn combine_plates(layout: &[Vec<&DataFrame>], options: &CombineOptions) -> Result<DataFrame> {
    let (from_rows, from_columns) = options.from.dims();
    let (to_rows, to_columns) = options.to.dims();
    let grid_rows = layout.len();
    let grid_columns = layout.first().map_or(0, Vec::len);

    if from_rows * grid_rows != to_rows {
        return Err(CoreError::LayoutMismatch {
            axis: "rows",
            have: from_rows * grid_rows,
            need: to_rows,
        });
    }
    for row in layout {
        if from_columns * row.len() != to_columns {
            return Err(CoreError::LayoutMismatch {
                axis: "columns",
                have: from_columns * row.len(),
                need: to_columns,
            });
        }
    }
    let ratio_rows = to_rows / from_rows;
    let ratio_columns = to_columns / from_columns;

    // Destination well -> variable -> value, keyed by coordinates so the
    // output comes out in row-major plate order.
    let mut records: BTreeMap<(usize, usize), BTreeMap<String, Scalar>> = BTreeMap::new();
    let mut column_order: Vec<String> = Vec::new();

    for (i, grid_row) in layout.iter().enumerate() {
        for (j, plate) in grid_row.iter().enumerate() {
            let fortified = fortify(plate)?;
            let wells = crate::fortify::well_names(&fortified)?;
            let names: Vec<String> = fortified
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .filter(|name| name != "well")
                .collect();
            for name in &names {
                if !column_order.contains(name) {
                    column_order.push(name.clone());
                }
            }

            for (index, well) in wells.iter().enumerate() {
                let coord = parse_well(well)?;
                if !options.from.contains(coord) {
                    return Err(plate_model::ModelError::WellOutsideShape {
                        well: well.clone(),
                        wells: options.from.wells(),
                    }
                    .into());
                }
                let destination_row = if options.interleave_rows {
                    ratio_rows * coord.row + (i % ratio_rows)
                } else {
                    coord.row + from_rows * i
                };
                let destination_column = if options.interleave_columns {
                    ratio_columns * coord.column + (j % ratio_columns)
                } else {
                    coord.column + from_columns * j
                };

                let record = records
                    .entry((destination_row, destination_column))
                    .or_default();
                for name in &names {
                    let value = fortified.column(name)?.get(index).unwrap_or(AnyValue::Null);
                    record.insert(name.clone(), any_to_scalar(value));
                }
                if let Some(source_column) = &options.source_well_column {
                    record.insert(source_column.clone(), Scalar::Str(well.clone()));
                }
            }
        }
    }

    if let Some(source_column) = &options.source_well_column
        && !column_order.contains(source_column)
    {
        column_order.push(source_column.clone());
    }

    tracing::debug!(
        grid_rows,
        grid_columns,
        wells_out = records.len(),
        "combining plate tables"
    );

    let wells: Vec<String> = records
        .keys()
        .map(|(row, column)| well_name(*row, *column))
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(column_order.len() + 1);
    columns.push(Series::new("well".into(), wells).into());
    for name in &column_order {
        let values: Vec<Scalar> = records
            .values()
            .map(|record| record.get(name).cloned().unwrap_or(Scalar::Null))
            .collect();
        columns.push(typed_column(name, &values));
    }
    Ok(DataFrame::new(columns)?)
}
