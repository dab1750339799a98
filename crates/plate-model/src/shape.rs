//! Supported plate shapes and plate-size inference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::well::{WellCoordinate, parse_well};

/// One of the standard microplate footprints, keyed by total well count.
///
/// The dimension table is fixed: there is no support for arbitrary grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PlateShape {
    Wells6,
    Wells12,
    Wells24,
    Wells48,
    Wells96,
    Wells384,
    Wells1536,
}

impl PlateShape {
    /// All supported shapes, smallest first.
    pub const ALL: [PlateShape; 7] = [
        PlateShape::Wells6,
        PlateShape::Wells12,
        PlateShape::Wells24,
        PlateShape::Wells48,
        PlateShape::Wells96,
        PlateShape::Wells384,
        PlateShape::Wells1536,
    ];

    /// Looks up a shape by total well count.
    pub fn from_wells(wells: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.wells() == wells)
            .ok_or(ModelError::UnknownPlateSize { wells })
    }

    /// `(rows, columns)` dimensions.
    pub fn dims(&self) -> (usize, usize) {
        match self {
            PlateShape::Wells6 => (2, 3),
            PlateShape::Wells12 => (3, 4),
            PlateShape::Wells24 => (4, 6),
            PlateShape::Wells48 => (6, 8),
            PlateShape::Wells96 => (8, 12),
            PlateShape::Wells384 => (16, 24),
            PlateShape::Wells1536 => (32, 48),
        }
    }

    pub fn rows(&self) -> usize {
        self.dims().0
    }

    pub fn columns(&self) -> usize {
        self.dims().1
    }

    /// Total well count.
    pub fn wells(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Whether the coordinate exists on this plate.
    pub fn contains(&self, coord: WellCoordinate) -> bool {
        coord.row < self.rows() && coord.column < self.columns()
    }

    /// Enumerates every well on the plate in row-major order (A1, A2, ...).
    pub fn iter_wells(self) -> impl Iterator<Item = WellCoordinate> {
        let (rows, columns) = self.dims();
        (0..rows).flat_map(move |row| (0..columns).map(move |column| WellCoordinate { row, column }))
    }
}

impl fmt::Display for PlateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-well", self.wells())
    }
}

impl TryFrom<usize> for PlateShape {
    type Error = ModelError;

    fn try_from(wells: usize) -> Result<Self> {
        Self::from_wells(wells)
    }
}

impl From<PlateShape> for usize {
    fn from(shape: PlateShape) -> usize {
        shape.wells()
    }
}

/// All shapes that accommodate every named well, smallest first.
pub fn possible_plate_shapes<I, S>(wells: I) -> Result<Vec<PlateShape>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut max_row = None;
    let mut max_column = None;
    for name in wells {
        let coord = parse_well(name.as_ref())?;
        max_row = Some(max_row.map_or(coord.row, |r: usize| r.max(coord.row)));
        max_column = Some(max_column.map_or(coord.column, |c: usize| c.max(coord.column)));
    }
    let (Some(max_row), Some(max_column)) = (max_row, max_column) else {
        return Err(ModelError::EmptyWellList);
    };
    Ok(PlateShape::ALL
        .into_iter()
        .filter(|shape| shape.rows() > max_row && shape.columns() > max_column)
        .collect())
}

/// Infers the plate shape from a set of well names.
///
/// Returns the smallest shape that accommodates every well, unless `prefer`
/// names a (possibly larger) shape that also fits.
///
/// # Examples
///
/// ```
/// use plate_model::{PlateShape, infer_plate_shape};
///
/// assert_eq!(infer_plate_shape(["A6"], None).unwrap(), PlateShape::Wells24);
/// assert_eq!(
///     infer_plate_shape(["A6"], Some(PlateShape::Wells96)).unwrap(),
///     PlateShape::Wells96,
/// );
/// assert_eq!(
///     infer_plate_shape(["H13"], Some(PlateShape::Wells96)).unwrap(),
///     PlateShape::Wells384,
/// );
/// ```
pub fn infer_plate_shape<I, S>(wells: I, prefer: Option<PlateShape>) -> Result<PlateShape>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut max_row = 0;
    let mut max_column = 0;
    let mut seen = false;
    for name in wells {
        let coord = parse_well(name.as_ref())?;
        max_row = max_row.max(coord.row);
        max_column = max_column.max(coord.column);
        seen = true;
    }
    if !seen {
        return Err(ModelError::EmptyWellList);
    }
    let possible: Vec<PlateShape> = PlateShape::ALL
        .into_iter()
        .filter(|shape| shape.rows() > max_row && shape.columns() > max_column)
        .collect();
    if let Some(preferred) = prefer
        && possible.contains(&preferred)
    {
        return Ok(preferred);
    }
    possible
        .into_iter()
        .next()
        .ok_or(ModelError::NoFittingShape {
            rows: max_row + 1,
            columns: max_column + 1,
        })
}
