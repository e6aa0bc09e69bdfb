//! Run and guess length signals
//!
//! Three real-valued signals describing how far into the question the reveal
//! has progressed and how long the guess is:
//! - `char`: run length in chars, scaled around a 450-char midpoint
//! - `word`: run length in whitespace-separated words, scaled around a
//!   75-word midpoint
//! - `guess`: log of the guess length, or the -1.0 sentinel when there is no
//!   guess yet
//!
//! The scaled run lengths sit near -1.0 at the start of a question and cross
//! zero at the midpoint, keeping the downstream weights in a small range.

use qbuzz_common::{EvalPoint, FeatureSignal};

use crate::types::{Feature, FeatureError};

/// Scale anchor for the char signal
const CHAR_MIDPOINT: f64 = 450.0;
/// Scale anchor for the word signal
const WORD_MIDPOINT: f64 = 75.0;

/// Length signals for the run and the guess
#[derive(Debug, Default)]
pub struct LengthFeature;

impl Feature for LengthFeature {
    fn name(&self) -> &'static str {
        "Length"
    }

    fn evaluate(&self, point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
        let chars = point.run.chars().count() as f64;
        let words = point.run.split_whitespace().count() as f64;
        let guess_chars = point.guess.chars().count();

        // -1.0 distinguishes "no guess yet" from any real guess length
        let guess_signal = if guess_chars == 0 {
            -1.0
        } else {
            (1.0 + guess_chars as f64).ln()
        };

        Ok(vec![
            FeatureSignal::real("char", (chars - CHAR_MIDPOINT) / CHAR_MIDPOINT),
            FeatureSignal::real("word", (words - WORD_MIDPOINT) / WORD_MIDPOINT),
            FeatureSignal::real("guess", guess_signal),
        ])
    }
}
