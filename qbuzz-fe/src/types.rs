//! Core trait and error types for feature extraction

use qbuzz_common::{EvalPoint, FeatureSignal, VectorError};
use thiserror::Error;

use crate::nlp::NlpError;

// ============================================================================
// Feature Trait
// ============================================================================

/// One feature extractor
///
/// An extractor evaluates a single (question, run, guess, history) tuple into
/// zero or more named signals. Implementations must be:
/// - **Pure**: same input tuple, same signals, every time
/// - **Read-only**: no mutation of the input or of shared state
/// - **Self-contained at evaluation time**: any expensive resource (an NLP
///   backend, lexicon tables) is taken at construction, never loaded inside
///   [`Feature::evaluate`]
pub trait Feature: Send + Sync {
    /// Extractor name, used to qualify signal names (`<name>_<signal>`)
    ///
    /// Must be unique within a configured extractor set.
    fn name(&self) -> &'static str;

    /// Evaluate one input tuple into named signals
    ///
    /// Signal names are extractor-local short names; the pipeline qualifies
    /// them. An error here aborts the whole vector for this tuple.
    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError>;
}

impl std::fmt::Debug for dyn Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature").field("name", &self.name()).finish()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Feature extraction errors
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The NLP backend failed while evaluating an extractor
    #[error("NLP backend error: {0}")]
    Backend(#[from] NlpError),

    /// A configured extractor name has no registered implementation
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// A backend-dependent extractor was configured without a backend
    #[error("feature {0} requires an NLP backend")]
    BackendMissing(String),

    /// An extractor name appears more than once in a configured set
    #[error("duplicate feature name: {0}")]
    DuplicateFeature(String),

    /// The input tuple violates a basic shape assumption
    #[error(transparent)]
    MalformedInput(#[from] qbuzz_common::Error),

    /// An extractor produced a duplicate or non-finite signal
    #[error("invalid signal: {0}")]
    Signal(#[from] VectorError),
}
