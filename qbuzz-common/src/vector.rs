//! Feature vector types
//!
//! A `FeatureVector` is the output of the extraction pipeline for one
//! evaluation point: an ordered sequence of uniquely named signals, each
//! real-valued or boolean. Signal names are qualified with the name of the
//! extractor that produced them (`Length_char`, `GuessBlank_true`, ...) so
//! that two extractors can reuse short signal names without colliding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Signal Values
// ============================================================================

/// A single signal value, real-valued or boolean
///
/// Serializes untagged, so vectors render as plain JSON numbers and booleans
/// for downstream training tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Real-valued signal
    Real(f64),
    /// Boolean signal
    Flag(bool),
}

impl FeatureValue {
    /// True unless the value is a non-finite float
    pub fn is_finite(&self) -> bool {
        match self {
            FeatureValue::Real(v) => v.is_finite(),
            FeatureValue::Flag(_) => true,
        }
    }

    /// Numeric view of the value, with flags mapped to 0.0 / 1.0
    pub fn to_f64(&self) -> f64 {
        match self {
            FeatureValue::Real(v) => *v,
            FeatureValue::Flag(true) => 1.0,
            FeatureValue::Flag(false) => 0.0,
        }
    }
}

/// A named signal emitted by one extractor
///
/// The name here is the extractor-local short name ("char", "similarity");
/// qualification happens when the signal is pushed into a `FeatureVector`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSignal {
    pub name: String,
    pub value: FeatureValue,
}

impl FeatureSignal {
    /// Real-valued signal
    pub fn real(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: FeatureValue::Real(value),
        }
    }

    /// Boolean signal
    pub fn flag(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: FeatureValue::Flag(value),
        }
    }
}

// ============================================================================
// Feature Vector
// ============================================================================

/// Errors raised while assembling a feature vector
#[derive(Debug, Error)]
pub enum VectorError {
    /// The qualified signal name was produced twice for one vector
    #[error("duplicate signal name: {0}")]
    DuplicateSignal(String),

    /// A signal carried a NaN or infinite value
    #[error("non-finite value for signal: {0}")]
    NonFinite(String),
}

/// Ordered, uniquely named signals for one evaluation point
///
/// Iteration and serialization preserve insertion order, which follows the
/// configured extractor order. Two assemblies of the same input under the
/// same configuration therefore produce identical vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    signals: Vec<FeatureSignal>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signal under its qualified name `<extractor>_<signal>`
    ///
    /// Rejects duplicate qualified names and non-finite values; a rejected
    /// push leaves the vector unchanged.
    pub fn push(&mut self, extractor: &str, signal: FeatureSignal) -> Result<(), VectorError> {
        let qualified = format!("{}_{}", extractor, signal.name);
        if !signal.value.is_finite() {
            return Err(VectorError::NonFinite(qualified));
        }
        if self.signals.iter().any(|s| s.name == qualified) {
            return Err(VectorError::DuplicateSignal(qualified));
        }
        self.signals.push(FeatureSignal {
            name: qualified,
            value: signal.value,
        });
        Ok(())
    }

    /// Value of the signal with the given qualified name, if present
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.signals.iter().find(|s| s.name == name).map(|s| s.value)
    }

    /// Signals in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FeatureSignal> {
        self.signals.iter()
    }

    /// Qualified signal names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.signals.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = &'a FeatureSignal;
    type IntoIter = std::slice::Iter<'a, FeatureSignal>;

    fn into_iter(self) -> Self::IntoIter {
        self.signals.iter()
    }
}
