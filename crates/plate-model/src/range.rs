//! Range expressions over plate wells.
//!
//! A range expression addresses one or more wells of a plate:
//!
//! - a single well: `"B6"`
//! - a rectangle between two corner wells: `"A1:B7"`
//! - a full-row span: `"A:C"` (every column of rows A through C)
//! - a full-column span: `"2:4"` (every row of columns 2 through 4)
//! - a comma-separated union of any of the above: `"A1:B1,C2:D2"`
//!
//! Row and column spans need a [`PlateShape`] to resolve the open dimension.
//! Endpoints may be written in either order; `"C:B"` resolves like `"B:C"`.

use crate::error::{ModelError, Result};
use crate::shape::PlateShape;
use crate::well::{WellCoordinate, is_well_name, letters_to_row, parse_well};

/// Enumeration order for rectangular ranges and plate walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Walk each row left to right before moving down.
    #[default]
    ByRow,
    /// Walk each column top to bottom before moving right.
    ByColumn,
}

/// A rectangle of wells, normalized so `start` is the top-left corner and
/// `end` the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellRange {
    pub start: WellCoordinate,
    pub end: WellCoordinate,
}

impl WellRange {
    /// Builds a range from two corners, in any order.
    pub fn new(a: WellCoordinate, b: WellCoordinate) -> Self {
        Self {
            start: WellCoordinate::new(a.row.min(b.row), a.column.min(b.column)),
            end: WellCoordinate::new(a.row.max(b.row), a.column.max(b.column)),
        }
    }

    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Number of columns covered.
    pub fn columns(&self) -> usize {
        self.end.column - self.start.column + 1
    }

    /// Total number of wells covered.
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the covered coordinates in the given order.
    pub fn iter(&self, order: Traversal) -> RectIter {
        RectIter {
            range: *self,
            order,
            next: 0,
        }
    }
}

/// Iterator over the wells of a [`WellRange`].
#[derive(Debug, Clone)]
pub struct RectIter {
    range: WellRange,
    order: Traversal,
    next: usize,
}

impl Iterator for RectIter {
    type Item = WellCoordinate;

    fn next(&mut self) -> Option<WellCoordinate> {
        if self.next >= self.range.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let (height, width) = (self.range.rows(), self.range.columns());
        let (row_offset, column_offset) = match self.order {
            Traversal::ByRow => (index / width, index % width),
            Traversal::ByColumn => (index % height, index / height),
        };
        Some(WellCoordinate::new(
            self.range.start.row + row_offset,
            self.range.start.column + column_offset,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RectIter {}

/// Parses a single (comma-free) range expression against a plate shape.
///
/// Grammars are tried in order: `well:well`, `letters:letters` (full rows),
/// `digits:digits` (full columns, 1-based). Returns `None` when the
/// expression matches none of them, so callers can fall back to single-well
/// parsing.
///
/// # Examples
///
/// ```
/// use plate_model::{PlateShape, WellCoordinate, parse_range};
///
/// let range = parse_range("A:A", PlateShape::Wells96).unwrap();
/// assert_eq!(range.start, WellCoordinate::new(0, 0));
/// assert_eq!(range.end, WellCoordinate::new(0, 11));
/// assert!(parse_range("B6", PlateShape::Wells96).is_none());
/// ```
pub fn parse_range(expr: &str, shape: PlateShape) -> Option<WellRange> {
    let (left, right) = expr.split_once(':')?;
    if left.contains(':') || right.contains(':') {
        return None;
    }

    if let (Ok(a), Ok(b)) = (parse_well(left), parse_well(right)) {
        return Some(WellRange::new(a, b));
    }

    if let (Ok(a), Ok(b)) = (letters_to_row(left), letters_to_row(right)) {
        let (top, bottom) = (a.min(b), a.max(b));
        return Some(WellRange::new(
            WellCoordinate::new(top, 0),
            WellCoordinate::new(bottom, shape.columns() - 1),
        ));
    }

    let columns = (parse_column(left), parse_column(right));
    if let (Some(a), Some(b)) = columns {
        let (first, last) = (a.min(b), a.max(b));
        return Some(WellRange::new(
            WellCoordinate::new(0, first),
            WellCoordinate::new(shape.rows() - 1, last),
        ));
    }

    None
}

/// Parses a 1-based column label to a zero-based column index.
fn parse_column(label: &str) -> Option<usize> {
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let column: usize = label.parse().ok()?;
    if column == 0 { None } else { Some(column - 1) }
}

/// One comma-separated segment of a range expression, resolved.
///
/// Single wells stay distinct from 1x1 rectangles: array-valued platemap
/// rules spool over rectangles but not over single-well targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTarget {
    Rectangle(WellRange),
    Single(WellCoordinate),
}

impl SegmentTarget {
    /// The coordinates covered, in the given order.
    pub fn coordinates(&self, order: Traversal) -> Vec<WellCoordinate> {
        match self {
            SegmentTarget::Rectangle(range) => range.iter(order).collect(),
            SegmentTarget::Single(coord) => vec![*coord],
        }
    }
}

/// Resolves one segment as a range or a single well, failing loudly.
///
/// Unlike [`parse_range`], an expression that matches no grammar is an
/// error: a segment that silently contributes nothing almost always means a
/// typo in the platemap.
pub fn resolve_segment(expr: &str, shape: PlateShape) -> Result<SegmentTarget> {
    let expr = expr.trim();
    if let Some(range) = parse_range(expr, shape) {
        return Ok(SegmentTarget::Rectangle(range));
    }
    if is_well_name(expr) {
        return Ok(SegmentTarget::Single(parse_well(expr)?));
    }
    Err(ModelError::InvalidRange {
        expr: expr.to_string(),
    })
}

/// Expands a comma-separated range expression to well names.
///
/// Each segment is enumerated independently in the given order, and the
/// segment lists are concatenated.
///
/// # Examples
///
/// ```
/// use plate_model::{PlateShape, Traversal, expand_ranges};
///
/// let wells = expand_ranges("A1:B2", PlateShape::Wells96, Traversal::ByRow).unwrap();
/// assert_eq!(wells, ["A1", "A2", "B1", "B2"]);
/// let wells = expand_ranges("A1:B2", PlateShape::Wells96, Traversal::ByColumn).unwrap();
/// assert_eq!(wells, ["A1", "B1", "A2", "B2"]);
/// ```
pub fn expand_ranges(expr: &str, shape: PlateShape, order: Traversal) -> Result<Vec<String>> {
    let mut wells = Vec::new();
    for segment in expr.split(',') {
        match resolve_segment(segment, shape)? {
            SegmentTarget::Rectangle(range) => {
                wells.extend(range.iter(order).map(|coord| coord.name()));
            }
            SegmentTarget::Single(coord) => wells.push(coord.name()),
        }
    }
    Ok(wells)
}
