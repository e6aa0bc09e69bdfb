//! Guess-to-run similarity
//!
//! One real signal `similarity`: the backend's pairwise document similarity
//! between the parsed guess and the parsed run. An empty guess or run parses
//! to an empty doc, for which similarity is the defined 0.0 sentinel, so
//! this extractor only fails when the backend itself fails.

use std::sync::Arc;

use qbuzz_common::{EvalPoint, FeatureSignal};

use crate::nlp::Annotator;
use crate::types::{Feature, FeatureError};

/// Semantic similarity between guess and revealed run
pub struct CorrelationFeature {
    backend: Arc<dyn Annotator>,
}

impl CorrelationFeature {
    pub fn new(backend: Arc<dyn Annotator>) -> Self {
        Self { backend }
    }
}

impl Feature for CorrelationFeature {
    fn name(&self) -> &'static str {
        "Correlation"
    }

    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
        let guess = self.backend.parse(point.guess)?;
        let run = self.backend.parse(point.run)?;
        Ok(vec![FeatureSignal::real(
            "similarity",
            guess.similarity(&run),
        )])
    }
}
