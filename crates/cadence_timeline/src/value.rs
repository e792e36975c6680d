// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blendable property values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A property value that can be blended toward another value.
///
/// Scalars blend linearly; sequences and mappings blend elementwise,
/// recursing into nested values. Serialized form is plain JSON: a number,
/// an array, or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single number
    Scalar(f64),
    /// An ordered list of values (e.g. a position triple)
    Sequence(Vec<Value>),
    /// Named sub-values (e.g. a color with `r`/`g`/`b` entries)
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Shorthand for a sequence of scalars.
    pub fn seq(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Sequence(values.into_iter().map(Value::Scalar).collect())
    }

    /// Get the scalar payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the sequence payload, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Get the mapping payload, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Mapping(v) => Some(v),
            _ => None,
        }
    }

    /// Blend toward `other` by factor `t`.
    ///
    /// Elements whose shapes disagree (length mismatch, missing key,
    /// different tags) are held at this value's element.
    pub fn blend(&self, other: &Value, t: f64) -> Value {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a + (b - a) * t),
            (Value::Sequence(a), Value::Sequence(b)) => Value::Sequence(
                a.iter()
                    .enumerate()
                    .map(|(i, va)| match b.get(i) {
                        Some(vb) => va.blend(vb, t),
                        None => va.clone(),
                    })
                    .collect(),
            ),
            (Value::Mapping(a), Value::Mapping(b)) => Value::Mapping(
                a.iter()
                    .map(|(k, va)| {
                        let blended = match b.get(k) {
                            Some(vb) => va.blend(vb, t),
                            None => va.clone(),
                        };
                        (k.clone(), blended)
                    })
                    .collect(),
            ),
            _ => self.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}
