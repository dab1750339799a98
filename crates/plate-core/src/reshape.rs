//! Tidy/wide reshaping.
//!
//! Instrument exports lay measurements out like the physical plate: one row
//! per plate row, one column per plate column. The tidy layout used
//! everywhere else in this workspace has one row per well. These two
//! functions convert between the layouts; they are the seam where file
//! readers plug in.

use plate_model::{Scalar, infer_plate_shape, letters_to_row, parse_well, row_to_letters, well_name};
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};

use crate::error::{CoreError, Result};
use crate::fortify::well_names;
use crate::frame_utils::{any_to_scalar, scalar_column, typed_column};

/// Pivots a tidy table into the physical plate layout.
///
/// The output has a `row` column of plate-row letters and one column per
/// plate column, named "1" through "N". The plate shape is the smallest one
/// accommodating every well present; wells absent from the input are null.
/// When the same well appears twice, the later row wins.
pub fn tidy_to_wide(df: &DataFrame, value_column: &str) -> Result<DataFrame> {
    let wells = well_names(df)?;
    let values = scalar_column(df, value_column)?;
    let shape = infer_plate_shape(&wells, None)?;
    let (rows, columns) = shape.dims();

    let mut grid: Vec<Vec<Scalar>> = vec![vec![Scalar::Null; columns]; rows];
    for (well, value) in wells.iter().zip(values) {
        let coord = parse_well(well)?;
        grid[coord.row][coord.column] = value;
    }

    let mut out: Vec<Column> = Vec::with_capacity(columns + 1);
    let row_labels: Vec<String> = (0..rows).map(row_to_letters).collect();
    out.push(Series::new("row".into(), row_labels).into());
    for column in 0..columns {
        let cells: Vec<Scalar> = (0..rows).map(|row| grid[row][column].clone()).collect();
        out.push(typed_column(&(column + 1).to_string(), &cells));
    }
    Ok(DataFrame::new(out)?)
}

/// Melts a physical plate layout back into a tidy table.
///
/// The first column must hold the plate-row labels (letters like "A", or
/// zero-based indices), and every other column header must be a 1-based
/// plate column number. Null cells are skipped; the output has a `well`
/// column and one value column, in row-major well order.
pub fn wide_to_tidy(df: &DataFrame, value_column: &str) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let Some((label_column, data_columns)) = names.split_first() else {
        return Err(CoreError::WideHeader {
            name: String::new(),
        });
    };

    let mut plate_columns = Vec::with_capacity(data_columns.len());
    for name in data_columns {
        let number: usize = name
            .trim()
            .parse()
            .map_err(|_| CoreError::WideHeader { name: name.clone() })?;
        if number == 0 {
            return Err(CoreError::WideHeader { name: name.clone() });
        }
        plate_columns.push(number - 1);
    }

    let labels = crate::frame_utils::string_column(df, label_column)?;
    let mut wells = Vec::new();
    let mut values = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        let row = parse_row_label(label)?;
        for (name, plate_column) in data_columns.iter().zip(&plate_columns) {
            let value = any_to_scalar(df.column(name)?.get(index).unwrap_or(AnyValue::Null));
            if value.is_null() {
                continue;
            }
            wells.push(well_name(row, *plate_column));
            values.push(value);
        }
    }

    let columns: Vec<Column> = vec![
        Series::new("well".into(), wells).into(),
        typed_column(value_column, &values),
    ];
    Ok(DataFrame::new(columns)?)
}

/// A plate-row label: letters ("A", "AB") or a zero-based index ("0").
fn parse_row_label(label: &str) -> Result<usize> {
    if let Ok(row) = letters_to_row(label) {
        return Ok(row);
    }
    label
        .trim()
        .parse()
        .map_err(|_| CoreError::WideRowLabel {
            label: label.to_string(),
        })
}
