//! Conversion-map tests.

use std::collections::BTreeSet;

use plate_model::{ModelError, PlateShape, build_conversion_map};

#[test]
fn map_24_to_96_expands_each_well_to_four() {
    let map = build_conversion_map(PlateShape::Wells24, PlateShape::Wells96).unwrap();
    assert_eq!(map.expansion_len(), 4);
    assert_eq!(map.expansion("A1").unwrap(), ["A1", "A2", "B1", "B2"]);
    assert_eq!(map.expansion("A2").unwrap(), ["A3", "A4", "B3", "B4"]);
    assert_eq!(map.expansion("B1").unwrap(), ["C1", "C2", "D1", "D2"]);
    assert_eq!(map.expansion("D6").unwrap(), ["G11", "G12", "H11", "H12"]);
}

#[test]
fn map_96_to_1536_expands_each_well_to_sixteen() {
    let map = build_conversion_map(PlateShape::Wells96, PlateShape::Wells1536).unwrap();
    assert_eq!(map.expansion_len(), 16);
    let expansion = map.expansion("A1").unwrap();
    assert_eq!(expansion.len(), 16);
    assert_eq!(expansion[0], "A1");
    assert_eq!(expansion[15], "D4");
}

#[test]
fn expansions_partition_the_destination_plate() {
    let pairs = [
        (PlateShape::Wells24, PlateShape::Wells96),
        (PlateShape::Wells96, PlateShape::Wells384),
        (PlateShape::Wells96, PlateShape::Wells1536),
        (PlateShape::Wells384, PlateShape::Wells1536),
    ];
    for (from, to) in pairs {
        let map = build_conversion_map(from, to).unwrap();
        let mut seen = BTreeSet::new();
        for (_, expansion) in map.iter() {
            for well in expansion {
                assert!(seen.insert(well.clone()), "{well} expanded twice ({from} -> {to})");
            }
        }
        let all: BTreeSet<String> = to.iter_wells().map(|coord| coord.name()).collect();
        assert_eq!(seen, all, "{from} -> {to} does not cover the plate");
    }
}

#[test]
fn identity_mapping_is_allowed() {
    let map = build_conversion_map(PlateShape::Wells96, PlateShape::Wells96).unwrap();
    assert_eq!(map.expansion("C7").unwrap(), ["C7"]);
}

#[test]
fn non_multiple_dimensions_are_rejected() {
    // 12-well is 3x4; 96-well is 8x12, and 8 is not a multiple of 3.
    let err = build_conversion_map(PlateShape::Wells12, PlateShape::Wells96).unwrap_err();
    assert!(matches!(err, ModelError::IncompatibleShapes { from: 12, to: 96 }));
    // Downscaling is likewise not a multiple.
    assert!(build_conversion_map(PlateShape::Wells384, PlateShape::Wells96).is_err());
}
