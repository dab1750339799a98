//! Platemap compilation.
//!
//! Turns an ordered [`Platemap`] program into a tidy DataFrame with one row
//! per well of the plate. Each rule's range is resolved against the plate
//! shape; scalar values broadcast over the range, array values spool
//! element-wise when their shape matches it.

use std::collections::BTreeMap;

use plate_model::{
    ModelError, Platemap, PlateShape, RuleValue, Scalar, SegmentTarget, Traversal, WellCoordinate,
    resolve_segment,
};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{CoreError, Result};
use crate::frame_utils::typed_column;

/// Well-indexed accumulation of one output column.
struct VariableColumn {
    name: String,
    values: Vec<Scalar>,
}

/// Compiles a platemap to a tidy DataFrame.
///
/// The output has one row per well of `shape` (row-major: A1, A2, ..), a
/// `well` column, optional zero-based `row`/`column` columns, and one column
/// per variable assigned by any rule. Wells no rule touches hold nulls.
///
/// Rules apply in order, and later rules overwrite earlier assignments of
/// the same variable to the same well. A platemap's `wells` field overrides
/// `shape` for the whole compilation.
///
/// # Examples
///
/// ```
/// use plate_core::compile_platemap;
/// use plate_model::{Platemap, PlateShape, grid_values};
///
/// let platemap = Platemap::new().rule(
///     "A1:A3",
///     [
///         ("strain", "PAO1".into()),
///         ("concentration", grid_values([[0i64, 10, 100]])),
///     ],
/// );
/// let table = compile_platemap(&platemap, PlateShape::Wells96, false).unwrap();
/// assert_eq!(table.height(), 96);
/// ```
pub fn compile_platemap(
    platemap: &Platemap,
    shape: PlateShape,
    include_physical_position: bool,
) -> Result<DataFrame> {
    let shape = platemap.wells.unwrap_or(shape);
    let columns = shape.columns();
    let wells: Vec<WellCoordinate> = shape.iter_wells().collect();

    let mut variables: Vec<VariableColumn> = Vec::new();

    for rule in &platemap.rules {
        tracing::debug!(
            range = %rule.range,
            variables = rule.values.len(),
            "applying platemap rule"
        );
        for segment in rule.range.split(',') {
            let target = resolve_segment(segment, shape)?;
            match target {
                SegmentTarget::Rectangle(range) => {
                    if !shape.contains(range.end) {
                        return Err(ModelError::WellOutsideShape {
                            well: range.end.name(),
                            wells: shape.wells(),
                        }
                        .into());
                    }
                    let (height, width) = (range.rows(), range.columns());
                    for (name, value) in &rule.values {
                        for (offset, coord) in range.iter(Traversal::ByRow).enumerate() {
                            let cell =
                                spooled_value(value, offset / width, offset % width, height, width)
                                    .ok_or_else(|| shape_mismatch(segment, name, height, width))?;
                            let index = coord.row * columns + coord.column;
                            assign(&mut variables, name, shape.wells(), index, cell);
                        }
                    }
                }
                SegmentTarget::Single(coord) => {
                    if !shape.contains(coord) {
                        return Err(ModelError::WellOutsideShape {
                            well: coord.name(),
                            wells: shape.wells(),
                        }
                        .into());
                    }
                    for (name, value) in &rule.values {
                        // Arrays never spool onto a single-well target.
                        let RuleValue::Scalar(cell) = value else {
                            return Err(shape_mismatch(segment, name, 1, 1));
                        };
                        let index = coord.row * columns + coord.column;
                        assign(&mut variables, name, shape.wells(), index, cell.clone());
                    }
                }
            }
        }
    }

    let mut out: Vec<Column> = Vec::with_capacity(variables.len() + 3);
    let names: Vec<String> = wells.iter().map(WellCoordinate::name).collect();
    out.push(Series::new("well".into(), names).into());
    if include_physical_position {
        let phys_rows: Vec<i64> = wells.iter().map(|c| c.row as i64).collect();
        let phys_columns: Vec<i64> = wells.iter().map(|c| c.column as i64).collect();
        out.push(Series::new("row".into(), phys_rows).into());
        out.push(Series::new("column".into(), phys_columns).into());
    }
    for variable in &variables {
        out.push(typed_column(&variable.name, &variable.values));
    }
    Ok(DataFrame::new(out)?)
}

/// The value one well receives from a rule, or `None` on a shape mismatch.
///
/// `a`/`b` are the well's row/column offsets within the range; `height` and
/// `width` are the range dimensions. Recognized forms, tried in order: an
/// exact-shape grid (element-wise), a 1-D sequence along a single-column or
/// single-row range (by offset), and a plain scalar (broadcast).
fn spooled_value(
    value: &RuleValue,
    a: usize,
    b: usize,
    height: usize,
    width: usize,
) -> Option<Scalar> {
    match value {
        RuleValue::Scalar(scalar) => Some(scalar.clone()),
        RuleValue::Grid(grid) => {
            if grid.len() == height && grid.iter().all(|row| row.len() == width) {
                return Some(grid[a][b].clone());
            }
            let line = squeeze(grid)?;
            spool_line(&line, a, b, height, width)
        }
        RuleValue::Row(line) => spool_line(line, a, b, height, width),
    }
}

/// Collapses a grid with a single row, or single-element rows, to 1-D.
fn squeeze(grid: &[Vec<Scalar>]) -> Option<Vec<&Scalar>> {
    if grid.len() == 1 {
        return Some(grid[0].iter().collect());
    }
    if !grid.is_empty() && grid.iter().all(|row| row.len() == 1) {
        return Some(grid.iter().map(|row| &row[0]).collect());
    }
    None
}

fn spool_line<S: std::borrow::Borrow<Scalar>>(
    line: &[S],
    a: usize,
    b: usize,
    height: usize,
    width: usize,
) -> Option<Scalar> {
    if line.len() == height && width == 1 {
        return Some(line[a].borrow().clone());
    }
    if line.len() == width && height == 1 {
        return Some(line[b].borrow().clone());
    }
    None
}

fn shape_mismatch(segment: &str, variable: &str, rows: usize, columns: usize) -> CoreError {
    tracing::warn!(
        range = segment.trim(),
        variable,
        rows,
        columns,
        "array value does not fit the target range"
    );
    CoreError::ShapeMismatch {
        range: segment.trim().to_string(),
        variable: variable.to_string(),
        rows,
        columns,
    }
}

fn assign(
    variables: &mut Vec<VariableColumn>,
    name: &str,
    wells: usize,
    index: usize,
    value: Scalar,
) {
    let position = match variables.iter().position(|v| v.name == name) {
        Some(found) => found,
        None => {
            variables.push(VariableColumn {
                name: name.to_string(),
                values: vec![Scalar::Null; wells],
            });
            variables.len() - 1
        }
    };
    variables[position].values[index] = value;
}

/// Builds a table assigning `values` to the picked wells and `others` to
/// every remaining well of the plate.
///
/// A convenience over [`compile_platemap`] for the common "mark these wells"
/// case. Pass an empty `others` map to leave unpicked wells null.
pub fn cherrypick<S: AsRef<str>>(
    picked_wells: &[S],
    values: &BTreeMap<String, RuleValue>,
    others: &BTreeMap<String, RuleValue>,
    shape: PlateShape,
) -> Result<DataFrame> {
    // Canonicalize through the codec so "a1" and "A1" name the same well.
    let mut picked: Vec<String> = Vec::with_capacity(picked_wells.len());
    for well in picked_wells {
        picked.push(plate_model::parse_well(well.as_ref())?.name());
    }
    let picked_set: std::collections::BTreeSet<&str> =
        picked.iter().map(String::as_str).collect();
    let rest: Vec<String> = shape
        .iter_wells()
        .map(|coord| coord.name())
        .filter(|name| !picked_set.contains(name.as_str()))
        .collect();

    let mut platemap = Platemap::new();
    if !picked.is_empty() && !values.is_empty() {
        platemap = platemap.rule(picked.join(","), values.clone());
    }
    if !rest.is_empty() && !others.is_empty() {
        platemap = platemap.rule(rest.join(","), others.clone());
    }
    compile_platemap(&platemap, shape, false)
}
