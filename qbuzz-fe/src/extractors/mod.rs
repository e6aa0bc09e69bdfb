//! Feature extractors
//!
//! One file per extractor. `Length` and `GuessBlank` are pure text
//! extractors; `Correlation`, `Entity`, and `Verb` parse through the shared
//! NLP backend. Extractors are selected by name from configuration and built
//! through [`build`].

pub mod correlation;
pub mod entity;
pub mod guess_blank;
pub mod length;
pub mod verb;

pub use correlation::CorrelationFeature;
pub use entity::EntityFeature;
pub use guess_blank::GuessBlankFeature;
pub use length::LengthFeature;
pub use verb::VerbFeature;

use std::sync::Arc;

use crate::nlp::Annotator;
use crate::types::{Feature, FeatureError};

/// All extractor names this crate provides, in default evaluation order
pub const DEFAULT_FEATURES: [&str; 5] = ["Length", "GuessBlank", "Correlation", "Entity", "Verb"];

/// Whether the named extractor needs an NLP backend to construct
pub fn requires_backend(name: &str) -> bool {
    matches!(name, "Correlation" | "Entity" | "Verb")
}

fn checked_backend(
    name: &str,
    backend: Option<&Arc<dyn Annotator>>,
) -> Result<Arc<dyn Annotator>, FeatureError> {
    backend
        .cloned()
        .ok_or_else(|| FeatureError::BackendMissing(name.to_string()))
}

/// Build the extractor registered under `name`
///
/// Backend-dependent extractors take a clone of the shared backend handle.
/// Configuring one without a backend fails here, at construction, never as a
/// silent skip at evaluation time.
pub fn build(
    name: &str,
    backend: Option<&Arc<dyn Annotator>>,
) -> Result<Box<dyn Feature>, FeatureError> {
    match name {
        "Length" => Ok(Box::new(LengthFeature)),
        "GuessBlank" => Ok(Box::new(GuessBlankFeature)),
        "Correlation" => Ok(Box::new(CorrelationFeature::new(checked_backend(
            name, backend,
        )?))),
        "Entity" => Ok(Box::new(EntityFeature::new(checked_backend(
            name, backend,
        )?))),
        "Verb" => Ok(Box::new(VerbFeature::new(checked_backend(name, backend)?))),
        unknown => Err(FeatureError::UnknownFeature(unknown.to_string())),
    }
}
