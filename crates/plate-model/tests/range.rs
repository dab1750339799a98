//! Range grammar and enumeration tests.

use std::collections::BTreeSet;

use plate_model::{
    ModelError, PlateShape, SegmentTarget, Traversal, WellCoordinate, expand_ranges, parse_range,
    resolve_segment, walk_plate,
};

fn corners(expr: &str, shape: PlateShape) -> (String, String) {
    let range = parse_range(expr, shape).unwrap();
    (range.start.name(), range.end.name())
}

#[test]
fn well_to_well_ranges_sort_corners() {
    assert_eq!(corners("A1:B1", PlateShape::Wells96), corners("B1:A1", PlateShape::Wells96));
    assert_eq!(corners("A1:B1", PlateShape::Wells96), ("A1".into(), "B1".into()));
    assert_eq!(corners("A11:A12", PlateShape::Wells96), ("A11".into(), "A12".into()));
}

#[test]
fn row_spans_resolve_against_plate_columns() {
    assert_eq!(corners("A:B", PlateShape::Wells96), ("A1".into(), "B12".into()));
    assert_eq!(corners("A:A", PlateShape::Wells96), ("A1".into(), "A12".into()));
    assert_eq!(corners("B:D", PlateShape::Wells96), ("B1".into(), "D12".into()));
    assert_eq!(corners("C:B", PlateShape::Wells96), ("B1".into(), "C12".into()));
    assert_eq!(corners("A:A", PlateShape::Wells384), ("A1".into(), "A24".into()));
    assert_eq!(corners("I:I", PlateShape::Wells384), ("I1".into(), "I24".into()));
}

#[test]
fn column_spans_resolve_against_plate_rows() {
    assert_eq!(corners("1:1", PlateShape::Wells96), ("A1".into(), "H1".into()));
    assert_eq!(corners("1:3", PlateShape::Wells96), ("A1".into(), "H3".into()));
    assert_eq!(corners("2:10", PlateShape::Wells96), corners("10:2", PlateShape::Wells96));
    assert_eq!(corners("2:10", PlateShape::Wells96), ("A2".into(), "H10".into()));
    assert_eq!(corners("23:23", PlateShape::Wells384), ("A23".into(), "P23".into()));
}

#[test]
fn range_coordinates_normalize() {
    let range = parse_range("C10:A1", PlateShape::Wells96).unwrap();
    assert_eq!(range.start, WellCoordinate::new(0, 0));
    assert_eq!(range.end, WellCoordinate::new(2, 9));

    let range = parse_range("G10:G7", PlateShape::Wells96).unwrap();
    assert_eq!(range.start, WellCoordinate::new(6, 6));
    assert_eq!(range.end, WellCoordinate::new(6, 9));

    let range = parse_range("A:A", PlateShape::Wells384).unwrap();
    assert_eq!(range.start, WellCoordinate::new(0, 0));
    assert_eq!(range.end, WellCoordinate::new(0, 23));
}

#[test]
fn non_range_expressions_parse_to_none() {
    assert!(parse_range("B6", PlateShape::Wells96).is_none());
    assert!(parse_range("A1:B2:C3", PlateShape::Wells96).is_none());
    assert!(parse_range("A1:", PlateShape::Wells96).is_none());
    assert!(parse_range("x:y1", PlateShape::Wells96).is_none());
}

#[test]
fn rectangle_enumeration_orders() {
    assert_eq!(
        expand_ranges("A1:A2", PlateShape::Wells96, Traversal::ByRow).unwrap(),
        ["A1", "A2"],
    );
    assert_eq!(
        expand_ranges("A1:B2", PlateShape::Wells96, Traversal::ByRow).unwrap(),
        ["A1", "A2", "B1", "B2"],
    );
    assert_eq!(
        expand_ranges("A1:B2", PlateShape::Wells96, Traversal::ByColumn).unwrap(),
        ["A1", "B1", "A2", "B2"],
    );
}

#[test]
fn comma_unions_concatenate_segments() {
    assert_eq!(
        expand_ranges("A1:B1,C2:D2", PlateShape::Wells96, Traversal::ByRow).unwrap(),
        ["A1", "B1", "C2", "D2"],
    );
    assert_eq!(
        expand_ranges("A1, B6", PlateShape::Wells96, Traversal::ByRow).unwrap(),
        ["A1", "B6"],
    );
}

#[test]
fn single_wells_resolve_as_single_targets() {
    match resolve_segment("B6", PlateShape::Wells96).unwrap() {
        SegmentTarget::Single(coord) => assert_eq!(coord, WellCoordinate::new(1, 5)),
        other => panic!("expected single-well target, got {other:?}"),
    }
}

#[test]
fn unparsable_segments_fail_loudly() {
    let err = resolve_segment("H 12", PlateShape::Wells96).unwrap_err();
    assert!(matches!(err, ModelError::InvalidRange { .. }));
    assert!(expand_ranges("A1:A3,whoops", PlateShape::Wells96, Traversal::ByRow).is_err());
}

#[test]
fn row_span_covers_same_wells_as_walking() {
    let spanned: BTreeSet<String> = expand_ranges("A:B", PlateShape::Wells96, Traversal::ByRow)
        .unwrap()
        .into_iter()
        .collect();
    let walked: BTreeSet<String> = walk_plate(24, "A1", PlateShape::Wells96, Traversal::ByRow)
        .unwrap()
        .collect();
    assert_eq!(spanned.len(), 24);
    assert_eq!(spanned, walked);
}
