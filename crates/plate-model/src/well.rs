//! Well-name codec.
//!
//! Wells are addressed by a row letter string and a 1-based column number
//! ("A1", "H12", "AB10"). Row letters use bijective base-26, the same scheme
//! as spreadsheet column letters: "A" = 0, "Z" = 25, "AA" = 26, "AB" = 27,
//! "BA" = 52. Coordinates are zero-based in both axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

const ALPHABET_LEN: usize = 26;

/// Zero-based physical position of a well on a plate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct WellCoordinate {
    pub row: usize,
    pub column: usize,
}

impl WellCoordinate {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// The well name for this coordinate, e.g. `(7, 9)` -> `"H10"`.
    pub fn name(&self) -> String {
        well_name(self.row, self.column)
    }
}

impl fmt::Display for WellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WellCoordinate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        parse_well(s)
    }
}

/// Converts a row letter string to a zero-based row index.
///
/// This is bijective base-26, not plain base-26: every digit is shifted by
/// one before the next multiplication, so there is no letter for "zero"
/// beyond the first position.
///
/// # Examples
///
/// ```
/// use plate_model::letters_to_row;
///
/// assert_eq!(letters_to_row("A").unwrap(), 0);
/// assert_eq!(letters_to_row("Z").unwrap(), 25);
/// assert_eq!(letters_to_row("AA").unwrap(), 26);
/// assert_eq!(letters_to_row("BA").unwrap(), 52);
/// ```
pub fn letters_to_row(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(ModelError::InvalidWellName {
            name: letters.to_string(),
        });
    }
    let mut row = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(ModelError::InvalidWellName {
                name: letters.to_string(),
            });
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize);
        row = row * ALPHABET_LEN + digit + 1;
    }
    Ok(row - 1)
}

/// Converts a zero-based row index to its letter string.
///
/// # Examples
///
/// ```
/// use plate_model::row_to_letters;
///
/// assert_eq!(row_to_letters(7), "H");
/// assert_eq!(row_to_letters(27), "AB");
/// assert_eq!(row_to_letters(55), "BD");
/// ```
pub fn row_to_letters(row: usize) -> String {
    let mut letters = Vec::new();
    let mut value = row;
    loop {
        letters.push((b'A' + (value % ALPHABET_LEN) as u8) as char);
        if value < ALPHABET_LEN {
            break;
        }
        value = value / ALPHABET_LEN - 1;
    }
    letters.iter().rev().collect()
}

/// Parses a well name into a zero-based coordinate.
///
/// Letters are case-insensitive; the column digits are 1-based. The whole
/// string must match the grammar, and a column of `0` is rejected.
pub fn parse_well(name: &str) -> Result<WellCoordinate> {
    let invalid = || ModelError::InvalidWellName {
        name: name.to_string(),
    };
    let letters_len = name.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let (letters, digits) = name.split_at(letters_len);
    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let column: usize = digits.parse().map_err(|_| invalid())?;
    if column == 0 {
        return Err(invalid());
    }
    Ok(WellCoordinate {
        row: letters_to_row(letters)?,
        column: column - 1,
    })
}

/// Builds a well name from a zero-based coordinate pair.
pub fn well_name(row: usize, column: usize) -> String {
    format!("{}{}", row_to_letters(row), column + 1)
}

/// Whether the string is a syntactically valid well name.
///
/// # Examples
///
/// ```
/// use plate_model::is_well_name;
///
/// assert!(is_well_name("A1"));
/// assert!(is_well_name("BC256"));
/// assert!(!is_well_name("H 12"));
/// assert!(!is_well_name("5S"));
/// ```
pub fn is_well_name(name: &str) -> bool {
    parse_well(name).is_ok()
}
