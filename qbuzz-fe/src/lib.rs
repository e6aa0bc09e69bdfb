//! # QBuzz Feature Extraction
//!
//! Turns (question, run, guess, history) tuples into named feature vectors
//! for the buzz classifier: the decision of whether the current guess is
//! right enough to buzz on.
//!
//! The crate is organized around three seams:
//! - [`types::Feature`]: one extractor, evaluating an input tuple into
//!   named signals
//! - [`nlp::Annotator`]: the NLP backend capability (POS tags, entities,
//!   document similarity), loaded once and shared read-only
//! - [`pipeline::Pipeline`]: runs a configured extractor set in order and
//!   assembles the qualified signals into a [`qbuzz_common::FeatureVector`]

pub mod config;
pub mod extractors;
pub mod nlp;
pub mod pipeline;
pub mod types;

// Re-export the main entry points
pub use config::PipelineConfig;
pub use pipeline::{Pipeline, VectorSink};
pub use types::{Feature, FeatureError};
