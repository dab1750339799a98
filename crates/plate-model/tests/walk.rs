//! Sequential well-walker tests.

use plate_model::{PlateShape, Traversal, walk_plate, walk_plates};

fn walked(count: usize, start: &str) -> Vec<String> {
    walk_plate(count, start, PlateShape::Wells96, Traversal::ByRow)
        .unwrap()
        .collect()
}

#[test]
fn walk_wraps_past_the_last_well() {
    assert_eq!(walked(2, "H12"), ["H12", "A1"]);
}

#[test]
fn walk_wraps_rows() {
    assert_eq!(
        walked(13, "A1"),
        ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "A10", "A11", "A12", "B1"],
    );
}

#[test]
fn walk_stays_within_count() {
    assert_eq!(
        walked(9, "A1"),
        ["A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9"],
    );
}

#[test]
fn walk_by_column_wraps_columns() {
    let wells: Vec<String> = walk_plate(9, "A1", PlateShape::Wells96, Traversal::ByColumn)
        .unwrap()
        .collect();
    assert_eq!(wells, ["A1", "B1", "C1", "D1", "E1", "F1", "G1", "H1", "A2"]);
}

#[test]
fn tracked_walk_counts_plate_overflow() {
    let wells: Vec<(usize, String)> =
        walk_plates(3, "H12", 0, PlateShape::Wells96, Traversal::ByRow)
            .unwrap()
            .collect();
    assert_eq!(wells[0], (0, "H12".to_string()));
    assert_eq!(wells[1], (1, "A1".to_string()));
    assert_eq!(wells[2], (1, "A2".to_string()));
}

#[test]
fn tracked_walk_starts_at_the_given_plate() {
    let wells: Vec<(usize, String)> =
        walk_plates(2, "A1", 3, PlateShape::Wells96, Traversal::ByRow)
            .unwrap()
            .collect();
    assert_eq!(wells, [(3, "A1".to_string()), (3, "A2".to_string())]);
}

#[test]
fn walk_rejects_starts_off_the_plate() {
    assert!(walk_plate(1, "I1", PlateShape::Wells96, Traversal::ByRow).is_err());
    assert!(walk_plate(1, "A13", PlateShape::Wells96, Traversal::ByRow).is_err());
}

#[test]
fn full_plate_walk_covers_every_well_once() {
    let wells: Vec<String> = walked(96, "A1");
    assert_eq!(wells.len(), 96);
    assert_eq!(wells[0], "A1");
    assert_eq!(wells[95], "H12");
    let unique: std::collections::BTreeSet<&str> = wells.iter().map(String::as_str).collect();
    assert_eq!(unique.len(), 96);
}
