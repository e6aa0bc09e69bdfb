//! Verb presence in the guess
//!
//! One boolean signal `true`: whether any token in the parsed guess carries
//! the VERB part-of-speech tag. Parses the guess only; the run is never
//! inspected. A verb in a guess usually means the guesser returned a
//! sentence fragment rather than an answer entity, which is evidence
//! against buzzing.

use std::sync::Arc;

use qbuzz_common::{EvalPoint, FeatureSignal};

use crate::nlp::{Annotator, PosTag};
use crate::types::{Feature, FeatureError};

/// Flags guesses containing a verb token
pub struct VerbFeature {
    backend: Arc<dyn Annotator>,
}

impl VerbFeature {
    pub fn new(backend: Arc<dyn Annotator>) -> Self {
        Self { backend }
    }
}

impl Feature for VerbFeature {
    fn name(&self) -> &'static str {
        "Verb"
    }

    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
        let guess = self.backend.parse(point.guess)?;
        Ok(vec![FeatureSignal::flag(
            "true",
            guess.has_pos(PosTag::Verb),
        )])
    }
}
