//! DataFrame cell and column helpers.
//!
//! Internal glue between Polars columns and the [`Scalar`] cell model:
//! extraction of typed values from `AnyValue`s, and construction of typed
//! nullable columns with dtype inference. Missing cells are `Scalar::Null`
//! and become Polars nulls, so integer and boolean columns stay integer and
//! boolean instead of widening to float.

use plate_common::{any_to_string, format_numeric};
use plate_model::Scalar;
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series, UInt32Chunked};

use crate::error::Result;

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Converts one Polars cell to a [`Scalar`].
pub(crate) fn any_to_scalar(value: AnyValue<'_>) -> Scalar {
    match value {
        AnyValue::Null => Scalar::Null,
        AnyValue::Boolean(v) => Scalar::Bool(v),
        AnyValue::Int8(v) => Scalar::Int(i64::from(v)),
        AnyValue::Int16(v) => Scalar::Int(i64::from(v)),
        AnyValue::Int32(v) => Scalar::Int(i64::from(v)),
        AnyValue::Int64(v) => Scalar::Int(v),
        AnyValue::UInt8(v) => Scalar::Int(i64::from(v)),
        AnyValue::UInt16(v) => Scalar::Int(i64::from(v)),
        AnyValue::UInt32(v) => Scalar::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Scalar::Float(v as f64), Scalar::Int),
        AnyValue::Float32(v) => Scalar::Float(f64::from(v)),
        AnyValue::Float64(v) => Scalar::Float(v),
        AnyValue::String(s) => Scalar::Str(s.to_string()),
        AnyValue::StringOwned(s) => Scalar::Str(s.to_string()),
        other => Scalar::Str(any_to_string(other)),
    }
}

/// Extracts a whole column as [`Scalar`]s.
pub(crate) fn scalar_column(df: &DataFrame, name: &str) -> Result<Vec<Scalar>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_scalar(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Extracts a whole column as trimmed strings (nulls become empty strings).
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = any_to_string(series.get(idx).unwrap_or(AnyValue::Null));
        values.push(value.trim().to_string());
    }
    Ok(values)
}

fn scalar_to_string(value: &Scalar) -> String {
    match value {
        Scalar::Null => String::new(),
        Scalar::Bool(v) => v.to_string(),
        Scalar::Int(v) => v.to_string(),
        Scalar::Float(v) => format_numeric(*v),
        Scalar::Str(v) => v.clone(),
    }
}

/// Builds a typed nullable column from scalars.
///
/// Dtype inference over the non-null values: all integers -> Int64, numeric
/// mix -> Float64, all booleans -> Boolean, otherwise String (mixed columns
/// are rendered to strings).
pub(crate) fn typed_column(name: &str, values: &[Scalar]) -> Column {
    let non_null: Vec<&Scalar> = values.iter().filter(|v| !v.is_null()).collect();
    let all_int = !non_null.is_empty() && non_null.iter().all(|v| matches!(v, Scalar::Int(_)));
    let all_numeric = !non_null.is_empty()
        && non_null
            .iter()
            .all(|v| matches!(v, Scalar::Int(_) | Scalar::Float(_)));
    let all_bool = !non_null.is_empty() && non_null.iter().all(|v| matches!(v, Scalar::Bool(_)));

    if all_int {
        let ints: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Scalar::Int(i) => Some(*i),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), ints).into();
    }
    if all_numeric {
        let floats: Vec<Option<f64>> = values.iter().map(Scalar::as_f64).collect();
        return Series::new(name.into(), floats).into();
    }
    if all_bool {
        let bools: Vec<Option<bool>> = values
            .iter()
            .map(|v| match v {
                Scalar::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        return Series::new(name.into(), bools).into();
    }
    let strings: Vec<Option<String>> = values
        .iter()
        .map(|v| match v {
            Scalar::Null => None,
            other => Some(scalar_to_string(other)),
        })
        .collect();
    Series::new(name.into(), strings).into()
}

/// Gathers rows of a DataFrame by index, with repetition allowed.
pub(crate) fn take_rows(df: &DataFrame, indices: Vec<u32>) -> Result<DataFrame> {
    let idx = UInt32Chunked::from_vec("idx".into(), indices);
    Ok(df.take(&idx)?)
}

/// Keeps only the named columns, in the given order.
pub(crate) fn select_columns(df: &DataFrame, names: &[String]) -> Result<DataFrame> {
    let selection: Vec<&str> = names.iter().map(String::as_str).collect();
    Ok(df.select(selection)?)
}
