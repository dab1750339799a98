//! Plate rescaling.
//!
//! Replicates a smaller plate's per-well rows onto the corresponding wells
//! of a larger plate, e.g. a 96-well platemap onto the 384-well plate it was
//! stamped into.

use plate_model::{PlateShape, build_conversion_map, parse_well};
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::fortify::fortify;
use crate::frame_utils::{has_column, select_columns, take_rows};

/// Rescales a tidy plate table onto a larger plate.
///
/// Every row of `df` is replicated onto each destination well its source
/// well expands to. With `include_physical_position`, `row`/`column` columns
/// are written with the destination plate's zero-based coordinates
/// (overwriting any existing ones); without it, pre-existing `row`/`column`
/// columns are dropped, since the source coordinates would be wrong on the
/// destination plate.
pub fn rescale_table(
    df: &DataFrame,
    from: PlateShape,
    to: PlateShape,
    include_physical_position: bool,
) -> Result<DataFrame> {
    let fortified = fortify(df)?;
    let map = build_conversion_map(from, to)?;
    let wells = crate::fortify::well_names(&fortified)?;

    let expansion_len = map.expansion_len();
    let mut indices: Vec<u32> = Vec::with_capacity(wells.len() * expansion_len);
    let mut new_wells: Vec<String> = Vec::with_capacity(wells.len() * expansion_len);
    let mut new_rows: Vec<i64> = Vec::with_capacity(wells.len() * expansion_len);
    let mut new_columns: Vec<i64> = Vec::with_capacity(wells.len() * expansion_len);
    for (index, well) in wells.iter().enumerate() {
        let expansion =
            map.expansion(well)
                .ok_or_else(|| plate_model::ModelError::WellOutsideShape {
                    well: well.clone(),
                    wells: from.wells(),
                })?;
        for destination in expansion {
            let coord = parse_well(destination)?;
            indices.push(index as u32);
            new_wells.push(destination.clone());
            new_rows.push(coord.row as i64);
            new_columns.push(coord.column as i64);
        }
    }

    tracing::debug!(
        from = from.wells(),
        to = to.wells(),
        rows_in = fortified.height(),
        rows_out = new_wells.len(),
        "rescaling plate table"
    );

    let mut out = take_rows(&fortified, indices)?;
    out.with_column(Series::new("well".into(), new_wells))?;
    if include_physical_position {
        out.with_column(Series::new("row".into(), new_rows))?;
        out.with_column(Series::new("column".into(), new_columns))?;
    } else if has_column(&out, "row") || has_column(&out, "column") {
        let keep: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .filter(|name| name != "row" && name != "column")
            .collect();
        out = select_columns(&out, &keep)?;
    }
    Ok(out)
}
