//! Empty-guess flag
//!
//! One boolean signal, short name `true`, set when the guess has zero
//! length. The qualified column downstream reads `GuessBlank_true`. Pure
//! text check, no backend, never fails.

use qbuzz_common::{EvalPoint, FeatureSignal};

use crate::types::{Feature, FeatureError};

/// Flags evaluation points where the guesser produced nothing
#[derive(Debug, Default)]
pub struct GuessBlankFeature;

impl Feature for GuessBlankFeature {
    fn name(&self) -> &'static str {
        "GuessBlank"
    }

    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
        Ok(vec![FeatureSignal::flag("true", point.guess.is_empty())])
    }
}
