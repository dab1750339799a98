//! Plate rescaling tests.

use plate_common::{any_to_f64, any_to_string};
use plate_core::{compile_platemap, rescale_table};
use plate_model::{Platemap, PlateShape, grid_values};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

fn find_row(df: &DataFrame, well: &str) -> usize {
    let wells = df.column("well").unwrap();
    (0..df.height())
        .find(|idx| any_to_string(wells.get(*idx).unwrap_or(AnyValue::Null)) == well)
        .unwrap_or_else(|| panic!("no row for well {well}"))
}

fn cell<'a>(df: &'a DataFrame, well: &str, column: &str) -> AnyValue<'a> {
    df.column(column)
        .unwrap()
        .get(find_row(df, well))
        .unwrap_or(AnyValue::Null)
}

fn cell_str(df: &DataFrame, well: &str, column: &str) -> String {
    any_to_string(cell(df, well, column))
}

#[test]
fn values_replicate_onto_expansion_wells() {
    let table = DataFrame::new(vec![
        Series::new("well".into(), vec!["A1"]).into(),
        Series::new("sample".into(), vec!["X"]).into(),
    ])
    .unwrap();
    let scaled = rescale_table(&table, PlateShape::Wells96, PlateShape::Wells384, true).unwrap();
    assert_eq!(scaled.height(), 4);
    for (well, row, column) in [("A1", 0, 0), ("A2", 0, 1), ("B1", 1, 0), ("B2", 1, 1)] {
        assert_eq!(cell_str(&scaled, well, "sample"), "X");
        assert_eq!(cell(&scaled, well, "row"), AnyValue::Int64(row));
        assert_eq!(cell(&scaled, well, "column"), AnyValue::Int64(column));
    }
}

#[test]
fn whole_platemaps_rescale_96_to_384() {
    let platemap = Platemap::new().rule("A1", [("strain", "B. theta")]);
    let table = compile_platemap(&platemap, PlateShape::Wells96, false).unwrap();
    let scaled = rescale_table(&table, PlateShape::Wells96, PlateShape::Wells384, true).unwrap();
    assert_eq!(scaled.height(), 384);
    for well in ["A1", "A2", "B1", "B2"] {
        assert_eq!(cell_str(&scaled, well, "strain"), "B. theta");
    }
    assert_eq!(cell(&scaled, "A1", "row"), cell(&scaled, "A2", "row"));
    assert_eq!(cell(&scaled, "A2", "row"), AnyValue::Int64(0));
    assert_eq!(cell(&scaled, "A2", "column"), AnyValue::Int64(1));
    assert!(matches!(cell(&scaled, "C1", "strain"), AnyValue::Null));
}

#[test]
fn dropping_positions_removes_the_columns() {
    let platemap =
        Platemap::new().rule("A1:A2", [("strain", grid_values([["B. theta", "C. diff"]]))]);
    let table = compile_platemap(&platemap, PlateShape::Wells96, true).unwrap();
    let scaled = rescale_table(&table, PlateShape::Wells96, PlateShape::Wells384, false).unwrap();
    assert_eq!(cell_str(&scaled, "B2", "strain"), "B. theta");
    assert_eq!(cell_str(&scaled, "B4", "strain"), "C. diff");
    assert!(scaled.column("row").is_err());
    assert!(scaled.column("column").is_err());
}

#[test]
fn bottom_corner_wells_land_at_the_bottom_corner() {
    let platemap = Platemap::new().rule("F12:G12", [("conc", grid_values([[0i64], [10]]))]);
    let table = compile_platemap(&platemap, PlateShape::Wells96, false).unwrap();
    let scaled = rescale_table(&table, PlateShape::Wells96, PlateShape::Wells384, true).unwrap();
    assert_eq!(any_to_f64(cell(&scaled, "L23", "conc")), Some(0.0));
    assert_eq!(any_to_f64(cell(&scaled, "N24", "conc")), Some(10.0));
}

#[test]
fn incompatible_shapes_fail_before_any_output() {
    let table = DataFrame::new(vec![
        Series::new("well".into(), vec!["A1"]).into(),
    ])
    .unwrap();
    assert!(rescale_table(&table, PlateShape::Wells384, PlateShape::Wells96, true).is_err());
    assert!(rescale_table(&table, PlateShape::Wells12, PlateShape::Wells96, true).is_err());
}

#[test]
fn wells_off_the_source_plate_are_rejected() {
    let table = DataFrame::new(vec![
        Series::new("well".into(), vec!["I1"]).into(),
    ])
    .unwrap();
    assert!(rescale_table(&table, PlateShape::Wells96, PlateShape::Wells384, true).is_err());
}
