//! Scripted NLP backend for tests
//!
//! Returns pre-scripted docs for known texts and a bare fallback doc for
//! everything else, so extractor tests control annotations exactly without
//! depending on the lexicon tables. Texts can also be scripted to fail, for
//! exercising error propagation.

use std::collections::{HashMap, HashSet};

use super::{Annotator, Doc, EntityLabel, EntitySpan, NlpError, PosTag, Token};

/// Scripted backend: exact docs for known texts, failures on demand
#[derive(Debug, Default)]
pub struct MockAnnotator {
    docs: HashMap<String, Doc>,
    failures: HashSet<String>,
}

impl MockAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the exact doc returned for `text`
    pub fn with_doc(mut self, text: &str, doc: Doc) -> Self {
        self.docs.insert(text.to_string(), doc);
        self
    }

    /// Script a doc whose tokens carry the given tags, with no entities
    pub fn with_tagged(mut self, text: &str, tags: &[(&str, PosTag)]) -> Self {
        let tokens = tags.iter().map(|(t, pos)| Token::new(*t, *pos)).collect();
        self.docs
            .insert(text.to_string(), Doc::new(tokens, Vec::new(), Vec::new()));
        self
    }

    /// Script a doc carrying the given entity spans
    pub fn with_entities(mut self, text: &str, entities: &[(&str, EntityLabel)]) -> Self {
        let spans = entities
            .iter()
            .map(|(t, label)| EntitySpan::new(*t, label.clone()))
            .collect();
        self.docs
            .insert(text.to_string(), Doc::new(Vec::new(), spans, Vec::new()));
        self
    }

    /// Script a doc carrying only a similarity vector
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.docs
            .insert(text.to_string(), Doc::new(Vec::new(), Vec::new(), vector));
        self
    }

    /// Make parsing `text` fail
    pub fn failing_on(mut self, text: &str) -> Self {
        self.failures.insert(text.to_string());
        self
    }
}

impl Annotator for MockAnnotator {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn parse(&self, text: &str) -> Result<Doc, NlpError> {
        if self.failures.contains(text) {
            return Err(NlpError::Parse(format!("scripted failure for {text:?}")));
        }
        if let Some(doc) = self.docs.get(text) {
            return Ok(doc.clone());
        }
        if text.is_empty() {
            return Ok(Doc::empty());
        }
        // Unscripted text falls back to bare whitespace tokens
        let tokens = text
            .split_whitespace()
            .map(|w| Token::new(w, PosTag::X))
            .collect();
        Ok(Doc::new(tokens, Vec::new(), Vec::new()))
    }
}
