//! Question, run, and guess data model
//!
//! These types describe the input side of the buzz decision: a question being
//! read out incrementally, the prefix revealed so far (the "run"), the current
//! best guess from the guessing stage, and the history of earlier guesses for
//! the same question.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Question Types
// ============================================================================

/// A quiz question with its full reference text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier assigned by the dataset
    pub id: String,
    /// Complete question text (the run is always a prefix of this)
    pub text: String,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One earlier (run, guess) pair recorded for a question
///
/// History entries are ordered oldest first. An empty guess is a valid entry:
/// it records that the guesser abstained at that point in the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The revealed prefix at the time of the guess
    pub run: String,
    /// The guess text, possibly empty
    pub guess: String,
}

impl GuessRecord {
    pub fn new(run: impl Into<String>, guess: impl Into<String>) -> Self {
        Self {
            run: run.into(),
            guess: guess.into(),
        }
    }
}

// ============================================================================
// Evaluation Point
// ============================================================================

/// One evaluation point handed to the feature extractors
///
/// Borrows the question, the revealed run, the current guess, and the guess
/// history so that a single question can be evaluated at many reveal positions
/// without cloning its text.
#[derive(Debug, Clone, Copy)]
pub struct EvalPoint<'a> {
    /// The question being read
    pub question: &'a Question,
    /// The prefix of `question.text` revealed so far
    pub run: &'a str,
    /// Current guess text; empty means the guesser produced nothing
    pub guess: &'a str,
    /// Earlier guesses for this question, oldest first
    pub history: &'a [GuessRecord],
}

impl<'a> EvalPoint<'a> {
    pub fn new(
        question: &'a Question,
        run: &'a str,
        guess: &'a str,
        history: &'a [GuessRecord],
    ) -> Self {
        Self {
            question,
            run,
            guess,
            history,
        }
    }

    /// Check the basic shape of the tuple before extraction
    ///
    /// A run longer than the question text cannot be a prefix of it, so such
    /// input is rejected here rather than producing a nonsense vector. Empty
    /// runs and empty guesses are well formed.
    pub fn validate(&self) -> Result<()> {
        let run_chars = self.run.chars().count();
        let text_chars = self.question.text.chars().count();
        if run_chars > text_chars {
            return Err(Error::InvalidInput(format!(
                "run of {} chars exceeds question text of {} chars (question {})",
                run_chars, text_chars, self.question.id
            )));
        }
        Ok(())
    }
}
