//! Grouped normalization.
//!
//! Splits a tidy measurement table into groups (one per distinct combination
//! of the grouping columns), hands each group's value series to a transform,
//! and reassembles the table with the transformed values merged back in.
//! The usual application is normalizing a measured value against a reference
//! condition: the zero timepoint, an untreated control column, a blank.

use std::collections::BTreeMap;
use std::fmt;

use plate_common::{any_to_f64, any_to_string};
use plate_model::Scalar;
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series, UInt32Chunked};

use crate::error::{NormalizeError, Result};

/// What to normalize and how to group it.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Column whose values the transform rewrites.
    pub value_column: String,
    /// Column the transform indexes groups by (e.g. `time`); excluded from
    /// the grouping set so a group spans all its index values.
    pub index_column: String,
    /// Columns whose distinct value combinations define the groups.
    pub group_by: Vec<String>,
}

impl NormalizeOptions {
    pub fn new<V, I, G, S>(value_column: V, index_column: I, group_by: G) -> Self
    where
        V: Into<String>,
        I: Into<String>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value_column: value_column.into(),
            index_column: index_column.into(),
            group_by: group_by.into_iter().map(Into::into).collect(),
        }
    }
}

/// The identifying values of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    columns: Vec<String>,
    values: Vec<String>,
}

impl GroupKey {
    /// The group's value for a grouping column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|found| self.values[found].as_str())
    }

    /// Iterates `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(all rows)");
        }
        for (position, (column, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}={value}")?;
        }
        Ok(())
    }
}

/// One group, as the transform sees it.
///
/// Transforms take the whole group and return replacement values for the
/// value column, aligned to the group's row order; `None` entries keep the
/// original value. Callers ignore the fields they don't need.
#[derive(Debug, Clone)]
pub struct NormalizeGroup {
    /// The group's identifying values.
    pub key: GroupKey,
    /// The index column's values, row-aligned.
    pub index: Vec<Scalar>,
    /// The value column's numeric values, row-aligned.
    pub values: Vec<Option<f64>>,
    /// Every column of the group's rows.
    pub table: DataFrame,
}

impl NormalizeGroup {
    /// Positions of the rows whose index equals `anchor`.
    pub fn anchor_positions(&self, anchor: f64) -> Vec<usize> {
        self.index
            .iter()
            .enumerate()
            .filter(|(_, value)| value.as_f64() == Some(anchor))
            .map(|(position, _)| position)
            .collect()
    }
}

/// Normalizes a value column group-wise.
///
/// The table is grouped by the distinct combinations of the grouping columns
/// (minus the index column). Groups are visited in sorted-key order, so the
/// output is deterministic; within a group, input row order is preserved.
/// Transform errors propagate unmodified. The rewritten value column is
/// Float64.
///
/// # Examples
///
/// Normalize OD600 against the zero timepoint of each concentration:
///
/// ```no_run
/// use plate_normalize::{NormalizeOptions, normalize, subtract_at};
/// # let table = polars::prelude::DataFrame::default();
///
/// let options = NormalizeOptions::new("OD600", "time", ["time", "concentration"]);
/// let normalized = normalize(&table, &options, subtract_at(0.0)).unwrap();
/// ```
pub fn normalize<F>(df: &DataFrame, options: &NormalizeOptions, mut how: F) -> Result<DataFrame>
where
    F: FnMut(&NormalizeGroup) -> Result<Vec<Option<f64>>>,
{
    for name in [&options.value_column, &options.index_column]
        .into_iter()
        .chain(&options.group_by)
    {
        if df.column(name).is_err() {
            return Err(NormalizeError::MissingColumn { name: name.clone() });
        }
    }
    let grouping: Vec<&String> = options
        .group_by
        .iter()
        .filter(|name| **name != options.index_column)
        .collect();

    // Row indices per group key, sorted by key.
    let mut groups: BTreeMap<Vec<String>, Vec<u32>> = BTreeMap::new();
    for row in 0..df.height() {
        let mut key = Vec::with_capacity(grouping.len());
        for name in &grouping {
            let value = df.column(name.as_str())?.get(row).unwrap_or(AnyValue::Null);
            key.push(any_to_string(value));
        }
        groups.entry(key).or_default().push(row as u32);
    }

    tracing::debug!(
        groups = groups.len(),
        value_column = %options.value_column,
        index_column = %options.index_column,
        "normalizing grouped values"
    );

    let mut out: Option<DataFrame> = None;
    for (key_values, rows) in groups {
        let idx = UInt32Chunked::from_vec("idx".into(), rows);
        let mut group_df = df.take(&idx)?;

        let mut values = Vec::with_capacity(group_df.height());
        let mut index = Vec::with_capacity(group_df.height());
        for row in 0..group_df.height() {
            let value = group_df
                .column(&options.value_column)?
                .get(row)
                .unwrap_or(AnyValue::Null);
            values.push(any_to_f64(value));
            let value = group_df
                .column(&options.index_column)?
                .get(row)
                .unwrap_or(AnyValue::Null);
            index.push(index_scalar(value));
        }

        let group = NormalizeGroup {
            key: GroupKey {
                columns: grouping.iter().map(|name| (*name).clone()).collect(),
                values: key_values,
            },
            index,
            values,
            table: group_df.clone(),
        };
        let replaced = how(&group)?;
        if replaced.len() != group.values.len() {
            return Err(NormalizeError::GroupLength {
                expected: group.values.len(),
                actual: replaced.len(),
            });
        }
        // Prefer the transform's output; fall back to the original value.
        let merged: Vec<Option<f64>> = replaced
            .into_iter()
            .zip(&group.values)
            .map(|(new, old)| new.or(*old))
            .collect();
        group_df.with_column(Series::new(options.value_column.as_str().into(), merged))?;

        match &mut out {
            Some(result) => {
                result.vstack_mut(&group_df)?;
            }
            None => out = Some(group_df),
        }
    }

    match out {
        Some(result) => Ok(result),
        None => Ok(df.clone()),
    }
}

/// Converts one Polars cell to a [`Scalar`] index value.
fn index_scalar(value: AnyValue<'_>) -> Scalar {
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
