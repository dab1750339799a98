//! Reference transforms.
//!
//! The common normalizations, packaged as closures for [`normalize`]: each
//! anchors on the group rows whose index equals a reference value and
//! rewrites the group's values relative to that reference.
//!
//! [`normalize`]: crate::normalize::normalize

use crate::error::{NormalizeError, Result};
use crate::normalize::NormalizeGroup;

fn reference_value(group: &NormalizeGroup, anchor: f64) -> Result<f64> {
    let positions = group.anchor_positions(anchor);
    let first = positions
        .iter()
        .find_map(|position| group.values[*position]);
    first.ok_or_else(|| NormalizeError::MissingAnchor {
        anchor: anchor.to_string(),
        group: group.key.to_string(),
    })
}

fn reference_mean(group: &NormalizeGroup, anchor: f64) -> Result<f64> {
    let values: Vec<f64> = group
        .anchor_positions(anchor)
        .into_iter()
        .filter_map(|position| group.values[position])
        .collect();
    if values.is_empty() {
        return Err(NormalizeError::MissingAnchor {
            anchor: anchor.to_string(),
            group: group.key.to_string(),
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Subtracts the value at `index == anchor` from every value in the group.
///
/// With multiple anchor rows, the first non-null one is the reference.
pub fn subtract_at(anchor: f64) -> impl FnMut(&NormalizeGroup) -> Result<Vec<Option<f64>>> {
    move |group| {
        let reference = reference_value(group, anchor)?;
        Ok(group
            .values
            .iter()
            .map(|value| value.map(|v| v - reference))
            .collect())
    }
}

/// Divides every value in the group by the value at `index == anchor`.
pub fn divide_by_at(anchor: f64) -> impl FnMut(&NormalizeGroup) -> Result<Vec<Option<f64>>> {
    move |group| {
        let reference = reference_value(group, anchor)?;
        Ok(group
            .values
            .iter()
            .map(|value| value.map(|v| v / reference))
            .collect())
    }
}

/// Subtracts the mean of the values at `index == anchor` from every value.
pub fn subtract_mean_at(anchor: f64) -> impl FnMut(&NormalizeGroup) -> Result<Vec<Option<f64>>> {
    move |group| {
        let reference = reference_mean(group, anchor)?;
        Ok(group
            .values
            .iter()
            .map(|value| value.map(|v| v - reference))
            .collect())
    }
}

/// Leaves every value unchanged. Useful as a baseline and in tests.
pub fn identity() -> impl FnMut(&NormalizeGroup) -> Result<Vec<Option<f64>>> {
    |group| Ok(group.values.clone())
}
