//! Shared entity types between guess and run
//!
//! One boolean signal `true`: whether the set of entity labels recognized in
//! the guess intersects the set recognized in the run. Label sets, not span
//! texts: a PERSON guess against a run mentioning any person counts. Parsing
//! an empty text yields no entities, so the signal is false, not an error.

use std::sync::Arc;

use qbuzz_common::{EvalPoint, FeatureSignal};

use crate::nlp::Annotator;
use crate::types::{Feature, FeatureError};

/// Entity-label overlap between guess and revealed run
pub struct EntityFeature {
    backend: Arc<dyn Annotator>,
}

impl EntityFeature {
    pub fn new(backend: Arc<dyn Annotator>) -> Self {
        Self { backend }
    }
}

impl Feature for EntityFeature {
    fn name(&self) -> &'static str {
        "Entity"
    }

    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
        let guess = self.backend.parse(point.guess)?;
        let run = self.backend.parse(point.run)?;

        let guess_labels = guess.entity_labels();
        let run_labels = run.entity_labels();
        let shared = guess_labels.intersection(&run_labels).next().is_some();

        Ok(vec![FeatureSignal::flag("true", shared)])
    }
}
