//! Microplate data model.
//!
//! Pure value types and coordinate algebra for microplate work:
//!
//! - **well**: the well-name codec (bijective base-26 rows, 1-based columns)
//! - **shape**: the fixed table of supported plate footprints and plate-size
//!   inference from well names
//! - **range**: range expressions (`"A1:B7"`, `"A:C"`, `"2:4"`, comma unions)
//!   and rectangle enumeration
//! - **walk**: sequential whole-plate well walking with overflow tracking
//! - **platemap**: ordered rule programs mapping ranges to variable values
//! - **convert**: small-to-large plate well mappings
//!
//! Everything here is plain data; the DataFrame-producing operations live in
//! `plate-core` and `plate-normalize`.

pub mod convert;
pub mod error;
pub mod platemap;
pub mod range;
pub mod shape;
pub mod walk;
pub mod well;

pub use convert::{ConversionMap, build_conversion_map};
pub use error::{ModelError, Result};
pub use platemap::{Platemap, Rule, RuleValue, Scalar, grid_values, row_values};
pub use range::{
    RectIter, SegmentTarget, Traversal, WellRange, expand_ranges, parse_range, resolve_segment,
};
pub use shape::{PlateShape, infer_plate_shape, possible_plate_shapes};
pub use walk::{PlateWalk, walk_plate, walk_plates};
pub use well::{
    WellCoordinate, is_well_name, letters_to_row, parse_well, row_to_letters, well_name,
};
