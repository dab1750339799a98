//! Sequential well walker.
//!
//! Walks wells across the whole plate in reading order, not confined to a
//! rectangle, wrapping from the end of one row (or column) to the next and
//! from the last well back to A1. The tracked variant counts those
//! plate-to-plate wraps, which is how sample lists longer than one plate get
//! spread across consecutive plates without manual bookkeeping.

use crate::error::Result;
use crate::range::Traversal;
use crate::shape::PlateShape;
use crate::well::{WellCoordinate, parse_well, well_name};

/// Iterator over sequential wells, yielding `(plate_index, well_name)`.
#[derive(Debug, Clone)]
pub struct PlateWalk {
    row: usize,
    column: usize,
    plate: usize,
    remaining: usize,
    shape: PlateShape,
    order: Traversal,
}

impl PlateWalk {
    fn new(
        count: usize,
        start: WellCoordinate,
        start_plate: usize,
        shape: PlateShape,
        order: Traversal,
    ) -> Self {
        Self {
            row: start.row,
            column: start.column,
            plate: start_plate,
            remaining: count,
            shape,
            order,
        }
    }

    fn advance(&mut self) {
        let (rows, columns) = self.shape.dims();
        match self.order {
            Traversal::ByRow => {
                self.column += 1;
                if self.column >= columns {
                    self.column = 0;
                    self.row += 1;
                }
                if self.row >= rows {
                    self.row = 0;
                    self.plate += 1;
                }
            }
            Traversal::ByColumn => {
                self.row += 1;
                if self.row >= rows {
                    self.row = 0;
                    self.column += 1;
                }
                if self.column >= columns {
                    self.column = 0;
                    self.plate += 1;
                }
            }
        }
    }
}

impl Iterator for PlateWalk {
    type Item = (usize, String);

    fn next(&mut self) -> Option<(usize, String)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = (self.plate, well_name(self.row, self.column));
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PlateWalk {}

/// Walks `count` sequential wells starting at `start`, tracking plate
/// overflow from `start_plate`.
///
/// # Examples
///
/// ```
/// use plate_model::{PlateShape, Traversal, walk_plates};
///
/// let wells: Vec<(usize, String)> =
///     walk_plates(2, "H12", 0, PlateShape::Wells96, Traversal::ByRow)
///         .unwrap()
///         .collect();
/// assert_eq!(wells[0], (0, "H12".to_string()));
/// assert_eq!(wells[1], (1, "A1".to_string()));
/// ```
pub fn walk_plates(
    count: usize,
    start: &str,
    start_plate: usize,
    shape: PlateShape,
    order: Traversal,
) -> Result<PlateWalk> {
    let coord = parse_well(start)?;
    if !shape.contains(coord) {
        return Err(crate::error::ModelError::WellOutsideShape {
            well: start.to_string(),
            wells: shape.wells(),
        });
    }
    Ok(PlateWalk::new(count, coord, start_plate, shape, order))
}

/// Walks `count` sequential well names starting at `start`, wrapping back to
/// A1 past the end of the plate.
pub fn walk_plate(
    count: usize,
    start: &str,
    shape: PlateShape,
    order: Traversal,
) -> Result<impl Iterator<Item = String>> {
    Ok(walk_plates(count, start, 0, shape, order)?.map(|(_, name)| name))
}
