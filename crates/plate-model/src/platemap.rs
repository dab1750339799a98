//! Platemap rule types.
//!
//! A platemap is an ordered list of rules, each mapping a range expression to
//! variable assignments for the wells it covers. Rules are applied in order;
//! when two rules assign the same variable to the same well, the later rule
//! wins. Values are scalars (applied to every well of the range) or arrays
//! (spooled element-wise when their shape matches the range).
//!
//! The types are serde-friendly, so platemaps can be written as JSON:
//!
//! ```json
//! {
//!     "wells": 96,
//!     "rules": [
//!         {
//!             "range": "A1:A3",
//!             "values": {
//!                 "strain": "PAO1",
//!                 "drug": "ampicillin",
//!                 "concentration": [[0, 10, 100]]
//!             }
//!         }
//!     ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shape::PlateShape;

/// One cell-sized value: what a single well's variable can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric view of the scalar, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// The value side of one variable assignment in a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// Applied identically to every well of the range.
    Scalar(Scalar),
    /// A 1-D sequence, spooled along a single-row or single-column range.
    Row(Vec<Scalar>),
    /// A 2-D grid, spooled element-wise over a matching rectangle.
    Grid(Vec<Vec<Scalar>>),
}

impl From<Scalar> for RuleValue {
    fn from(v: Scalar) -> Self {
        RuleValue::Scalar(v)
    }
}

impl From<bool> for RuleValue {
    fn from(v: bool) -> Self {
        RuleValue::Scalar(Scalar::Bool(v))
    }
}

impl From<i64> for RuleValue {
    fn from(v: i64) -> Self {
        RuleValue::Scalar(Scalar::Int(v))
    }
}

impl From<f64> for RuleValue {
    fn from(v: f64) -> Self {
        RuleValue::Scalar(Scalar::Float(v))
    }
}

impl From<&str> for RuleValue {
    fn from(v: &str) -> Self {
        RuleValue::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for RuleValue {
    fn from(v: String) -> Self {
        RuleValue::Scalar(Scalar::Str(v))
    }
}

impl From<Vec<Scalar>> for RuleValue {
    fn from(v: Vec<Scalar>) -> Self {
        RuleValue::Row(v)
    }
}

impl From<Vec<Vec<Scalar>>> for RuleValue {
    fn from(v: Vec<Vec<Scalar>>) -> Self {
        RuleValue::Grid(v)
    }
}

/// One platemap rule: a range expression and the variables it assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Range expression, possibly a comma-separated union.
    pub range: String,
    /// Variable name to value. Spooling applies per variable.
    pub values: BTreeMap<String, RuleValue>,
}

/// An ordered platemap program.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Platemap {
    /// Overrides the compiler's plate shape for the whole platemap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wells: Option<PlateShape>,
    /// Rules in application order; later rules overwrite earlier ones.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Platemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plate-shape override.
    pub fn with_wells(mut self, shape: PlateShape) -> Self {
        self.wells = Some(shape);
        self
    }

    /// Appends a rule.
    pub fn rule<R, K, V, I>(mut self, range: R, values: I) -> Self
    where
        R: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RuleValue>,
    {
        self.rules.push(Rule {
            range: range.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }
}

/// Shorthand for a spooled 1-D value.
pub fn row_values<T: Into<Scalar>>(values: impl IntoIterator<Item = T>) -> RuleValue {
    RuleValue::Row(values.into_iter().map(Into::into).collect())
}

/// Shorthand for a spooled 2-D value.
pub fn grid_values<T, R>(rows: impl IntoIterator<Item = R>) -> RuleValue
where
    R: IntoIterator<Item = T>,
    T: Into<Scalar>,
{
    RuleValue::Grid(
        rows.into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect(),
    )
}
