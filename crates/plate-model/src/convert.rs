//! Plate-to-plate well mapping.
//!
//! When a plate's contents are replicated onto a larger plate (96 -> 384 is
//! the usual case), each source well expands to a rectangle of destination
//! wells. The destination dimensions must be integer multiples of the source
//! dimensions; the expansions partition the destination plate exactly.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::shape::PlateShape;
use crate::well::well_name;

/// Precomputed mapping from each source well to its destination wells.
#[derive(Debug, Clone)]
pub struct ConversionMap {
    from: PlateShape,
    to: PlateShape,
    map: BTreeMap<String, Vec<String>>,
}

impl ConversionMap {
    pub fn from_shape(&self) -> PlateShape {
        self.from
    }

    pub fn to_shape(&self) -> PlateShape {
        self.to
    }

    /// Destination wells for a source well, in row-major order.
    pub fn expansion(&self, well: &str) -> Option<&[String]> {
        self.map.get(well).map(Vec::as_slice)
    }

    /// Iterates `(source well, destination wells)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.map
            .iter()
            .map(|(well, expansion)| (well.as_str(), expansion.as_slice()))
    }

    /// Number of destination wells each source well expands to.
    pub fn expansion_len(&self) -> usize {
        self.to.wells() / self.from.wells()
    }
}

/// Builds the conversion map for a `(from, to)` plate pair.
///
/// Fails when the destination's row or column count is not an integer
/// multiple of the source's.
///
/// # Examples
///
/// ```
/// use plate_model::{PlateShape, build_conversion_map};
///
/// let map = build_conversion_map(PlateShape::Wells96, PlateShape::Wells384).unwrap();
/// assert_eq!(map.expansion("A1").unwrap(), ["A1", "A2", "B1", "B2"]);
/// assert_eq!(map.expansion("B3").unwrap(), ["C5", "C6", "D5", "D6"]);
/// ```
pub fn build_conversion_map(from: PlateShape, to: PlateShape) -> Result<ConversionMap> {
    let (from_rows, from_columns) = from.dims();
    let (to_rows, to_columns) = to.dims();
    if to_rows % from_rows != 0 || to_columns % from_columns != 0 {
        return Err(ModelError::IncompatibleShapes {
            from: from.wells(),
            to: to.wells(),
        });
    }
    let ratio_rows = to_rows / from_rows;
    let ratio_columns = to_columns / from_columns;

    let mut map = BTreeMap::new();
    for source in from.iter_wells() {
        let mut expansion = Vec::with_capacity(ratio_rows * ratio_columns);
        for row in ratio_rows * source.row..ratio_rows * (source.row + 1) {
            for column in ratio_columns * source.column..ratio_columns * (source.column + 1) {
                expansion.push(well_name(row, column));
            }
        }
        map.insert(source.name(), expansion);
    }
    Ok(ConversionMap { from, to, map })
}
