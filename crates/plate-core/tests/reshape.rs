//! Tidy/wide reshaping tests.

use plate_common::{any_to_f64, any_to_string};
use plate_core::{tidy_to_wide, wide_to_tidy};
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

fn tidy_six_wells() -> DataFrame {
    DataFrame::new(vec![
        Series::new("well".into(), vec!["A1", "A2", "A3", "B1", "B2", "B3"]).into(),
        Series::new("od600".into(), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).into(),
    ])
    .unwrap()
}

#[test]
fn tidy_pivots_to_the_physical_layout() {
    let wide = tidy_to_wide(&tidy_six_wells(), "od600").unwrap();
    let names: Vec<String> = wide
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, ["row", "1", "2", "3"]);
    assert_eq!(wide.height(), 2);
    assert_eq!(
        any_to_string(wide.column("row").unwrap().get(1).unwrap_or(AnyValue::Null)),
        "B",
    );
    assert_eq!(
        any_to_f64(wide.column("3").unwrap().get(0).unwrap_or(AnyValue::Null)),
        Some(0.3),
    );
    assert_eq!(
        any_to_f64(wide.column("1").unwrap().get(1).unwrap_or(AnyValue::Null)),
        Some(0.4),
    );
}

#[test]
fn absent_wells_pivot_to_nulls() {
    let tidy = DataFrame::new(vec![
        Series::new("well".into(), vec!["A1", "B3"]).into(),
        Series::new("od600".into(), vec![0.1, 0.6]).into(),
    ])
    .unwrap();
    let wide = tidy_to_wide(&tidy, "od600").unwrap();
    assert!(matches!(
        wide.column("2").unwrap().get(0).unwrap_or(AnyValue::Null),
        AnyValue::Null,
    ));
    assert_eq!(
        any_to_f64(wide.column("3").unwrap().get(1).unwrap_or(AnyValue::Null)),
        Some(0.6),
    );
}

#[test]
fn wide_melts_back_to_tidy() {
    let wide = tidy_to_wide(&tidy_six_wells(), "od600").unwrap();
    let tidy = wide_to_tidy(&wide, "od600").unwrap();
    assert_eq!(tidy.height(), 6);
    let wells: Vec<String> = (0..tidy.height())
        .map(|idx| {
            any_to_string(tidy.column("well").unwrap().get(idx).unwrap_or(AnyValue::Null))
        })
        .collect();
    assert_eq!(wells, ["A1", "A2", "A3", "B1", "B2", "B3"]);
    assert_eq!(
        any_to_f64(tidy.column("od600").unwrap().get(4).unwrap_or(AnyValue::Null)),
        Some(0.5),
    );
}

#[test]
fn wide_accepts_zero_based_row_indices() {
    let wide = DataFrame::new(vec![
        Series::new("row".into(), vec!["0", "1"]).into(),
        Series::new("1".into(), vec![Some(1.5), None]).into(),
        Series::new("2".into(), vec![None, Some(2.5)]).into(),
    ])
    .unwrap();
    let tidy = wide_to_tidy(&wide, "signal").unwrap();
    assert_eq!(tidy.height(), 2);
    let wells: Vec<String> = (0..tidy.height())
        .map(|idx| {
            any_to_string(tidy.column("well").unwrap().get(idx).unwrap_or(AnyValue::Null))
        })
        .collect();
    assert_eq!(wells, ["A1", "B2"]);
}

#[test]
fn non_numeric_wide_headers_are_rejected() {
    let wide = DataFrame::new(vec![
        Series::new("row".into(), vec!["A"]).into(),
        Series::new("notacolumn".into(), vec![1.0]).into(),
    ])
    .unwrap();
    assert!(wide_to_tidy(&wide, "signal").is_err());
}
