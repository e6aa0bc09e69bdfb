//! NLP backend adapter
//!
//! Backend-dependent extractors consume exactly one capability surface: parse
//! a text into a [`Doc`] exposing per-token part-of-speech tags, recognized
//! entity spans, and a dense vector for pairwise document similarity.
//!
//! Backends are expensive to initialize, so they are loaded once at startup,
//! wrapped in an `Arc`, and handed to extractor construction. Extractors only
//! ever call [`Annotator::parse`]; nothing in the evaluation path loads
//! resources.

pub mod lexicon;
pub mod mock;

pub use lexicon::LexiconAnnotator;
pub use mock::MockAnnotator;

use std::collections::HashSet;

use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// NLP backend errors
#[derive(Debug, Error)]
pub enum NlpError {
    /// Backend resources failed to load; fatal at startup scope
    #[error("NLP resource load failed: {0}")]
    ResourceLoad(String),

    /// IO error while reading backend resources
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend could not parse the input text
    #[error("parse failed: {0}")]
    Parse(String),
}

// ============================================================================
// Annotations
// ============================================================================

/// Universal part-of-speech tags assigned to tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    /// Conventional uppercase tag string ("NOUN", "VERB", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }
}

/// Entity label attached to a recognized span
///
/// The label set is open: backends may emit labels beyond the common ones,
/// carried through [`EntityLabel::Other`]. Equality is what matters to
/// consumers, not membership in a fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    Place,
    Date,
    Money,
    Percent,
    Quantity,
    Work,
    Other(String),
}

impl EntityLabel {
    /// Parse a conventional uppercase label string
    ///
    /// Unknown labels are preserved as [`EntityLabel::Other`], never dropped.
    pub fn parse(label: &str) -> Self {
        match label {
            "PERSON" => EntityLabel::Person,
            "ORG" => EntityLabel::Org,
            "PLACE" => EntityLabel::Place,
            "DATE" => EntityLabel::Date,
            "MONEY" => EntityLabel::Money,
            "PERCENT" => EntityLabel::Percent,
            "QUANTITY" => EntityLabel::Quantity,
            "WORK" => EntityLabel::Work,
            other => EntityLabel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Place => "PLACE",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
            EntityLabel::Quantity => "QUANTITY",
            EntityLabel::Work => "WORK",
            EntityLabel::Other(label) => label,
        }
    }
}

/// One token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// One recognized entity span
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

// ============================================================================
// Parsed Document
// ============================================================================

/// Parsed representation of one text
///
/// Produced by an [`Annotator`]; consumed read-only by extractors. An empty
/// input parses to an empty `Doc`, it is not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    /// Tokens in reading order
    pub tokens: Vec<Token>,
    /// Recognized entity spans
    pub entities: Vec<EntitySpan>,
    /// Dense document vector backing [`Doc::similarity`]
    pub vector: Vec<f32>,
}

impl Doc {
    pub fn new(tokens: Vec<Token>, entities: Vec<EntitySpan>, vector: Vec<f32>) -> Self {
        Self {
            tokens,
            entities,
            vector,
        }
    }

    /// A doc with no tokens, entities, or vector
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether any token carries the given tag
    pub fn has_pos(&self, tag: PosTag) -> bool {
        self.tokens.iter().any(|t| t.pos == tag)
    }

    /// The set of distinct entity labels in this doc
    pub fn entity_labels(&self) -> HashSet<&EntityLabel> {
        self.entities.iter().map(|e| &e.label).collect()
    }

    /// Cosine similarity between two document vectors
    ///
    /// Defined for docs produced by the same backend. Returns the 0.0
    /// sentinel when either side has no usable vector (empty or zero-norm
    /// doc, or a dimension mismatch), so callers never divide by zero.
    pub fn similarity(&self, other: &Doc) -> f64 {
        if self.vector.is_empty()
            || other.vector.is_empty()
            || self.vector.len() != other.vector.len()
        {
            return 0.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (a, b) in self.vector.iter().zip(other.vector.iter()) {
            dot += f64::from(*a) * f64::from(*b);
            norm_a += f64::from(*a) * f64::from(*a);
            norm_b += f64::from(*b) * f64::from(*b);
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

// ============================================================================
// Annotator Trait
// ============================================================================

/// NLP backend capability consumed by extractors
///
/// Implementations carry whatever resources they need (lexicons, vector
/// tables) fully loaded; [`Annotator::parse`] must not perform any loading.
/// A shared `Arc<dyn Annotator>` serves concurrent pipelines, so parsing
/// takes `&self` and must not mutate.
pub trait Annotator: Send + Sync {
    /// Backend identifier for logs
    fn id(&self) -> &'static str;

    /// Parse one text into a [`Doc`]
    ///
    /// Empty input yields an empty doc. Errors are reserved for texts the
    /// backend genuinely cannot process.
    fn parse(&self, text: &str) -> Result<Doc, NlpError>;
}
