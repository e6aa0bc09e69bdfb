//! Feature vector assembly
//!
//! A [`Pipeline`] owns a configured, ordered set of extractors and turns
//! each (question, run, guess, history) tuple into one
//! [`FeatureVector`]. Signal names are qualified as `<extractor>_<signal>`
//! in push order, so a given configuration always produces vectors with the
//! same name sequence.
//!
//! Any extractor error aborts the vector for that tuple. A partial vector
//! would silently shift the downstream column space, so none is ever
//! produced.

use std::sync::Arc;

use qbuzz_common::{EvalPoint, FeatureVector};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::extractors;
use crate::nlp::Annotator;
use crate::types::{Feature, FeatureError};

/// Ordered extractor set producing one vector per evaluation point
pub struct Pipeline {
    features: Vec<Box<dyn Feature>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "features",
                &self.features.iter().map(|x| x.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Pipeline {
    /// Pipeline over an explicit extractor list
    ///
    /// Rejects duplicate extractor names, which could not keep qualified
    /// signal names unique.
    pub fn new(features: Vec<Box<dyn Feature>>) -> Result<Self, FeatureError> {
        for (i, feature) in features.iter().enumerate() {
            if features[..i].iter().any(|f| f.name() == feature.name()) {
                return Err(FeatureError::DuplicateFeature(feature.name().to_string()));
            }
        }
        let names: Vec<&str> = features.iter().map(|f| f.name()).collect();
        info!(features = ?names, "pipeline ready");
        Ok(Self { features })
    }

    /// Pipeline from configuration, with an optional shared NLP backend
    ///
    /// The backend handle is cloned into each backend-dependent extractor.
    /// A configuration naming such an extractor fails fast here when no
    /// backend is supplied.
    pub fn from_config(
        config: &PipelineConfig,
        backend: Option<Arc<dyn Annotator>>,
    ) -> Result<Self, FeatureError> {
        if let Some(backend) = &backend {
            debug!(backend = backend.id(), "building pipeline with NLP backend");
        }
        let features = config
            .features
            .iter()
            .map(|name| extractors::build(name, backend.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(features)
    }

    /// Names of the configured extractors, in evaluation order
    pub fn feature_names(&self) -> Vec<&'static str> {
        self.features.iter().map(|f| f.name()).collect()
    }

    /// Evaluate every configured extractor for one tuple
    ///
    /// The input shape is validated first; extractors then run in
    /// configuration order, and their signals land in the vector under
    /// qualified names. The first error aborts the whole vector.
    pub fn assemble(&self, point: &EvalPoint<'_>) -> Result<FeatureVector, FeatureError> {
        point.validate()?;

        let mut vector = FeatureVector::new();
        for feature in &self.features {
            let signals = feature.evaluate(point)?;
            debug!(
                feature = feature.name(),
                signals = signals.len(),
                "feature evaluated"
            );
            for signal in signals {
                vector.push(feature.name(), signal)?;
            }
        }
        Ok(vector)
    }
}

/// Downstream consumer of assembled vectors
///
/// Implemented outside this crate by dataset writers and classifier
/// feeders. Vectors arrive in assembly order, tagged with their question id.
pub trait VectorSink {
    fn accept(&mut self, question_id: &str, vector: FeatureVector) -> qbuzz_common::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbuzz_common::{FeatureSignal, Question};

    /// Emits a fixed set of real signals under a fixed name
    struct StubFeature {
        name: &'static str,
        signals: Vec<(&'static str, f64)>,
    }

    impl Feature for StubFeature {
        fn name(&self) -> &'static str {
            self.name
        }

        fn evaluate(&self, _point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
            Ok(self
                .signals
                .iter()
                .map(|(name, value)| FeatureSignal::real(*name, *value))
                .collect())
        }
    }

    /// Always fails, for abort-path tests
    struct FailingFeature;

    impl Feature for FailingFeature {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn evaluate(&self, _point: &EvalPoint<'_>) -> Result<Vec<FeatureSignal>, FeatureError> {
            Err(FeatureError::UnknownFeature("scripted".to_string()))
        }
    }

    fn stub(name: &'static str, signals: Vec<(&'static str, f64)>) -> Box<dyn Feature> {
        Box::new(StubFeature { name, signals })
    }

    #[test]
    fn test_assemble_orders_and_qualifies_signals() {
        let pipeline = Pipeline::new(vec![
            stub("Alpha", vec![("one", 1.0), ("two", 2.0)]),
            stub("Beta", vec![("one", 3.0)]),
        ])
        .unwrap();

        let q = Question::new("q", "text");
        let point = EvalPoint::new(&q, "text", "", &[]);
        let vector = pipeline.assemble(&point).unwrap();

        assert_eq!(vector.names(), vec!["Alpha_one", "Alpha_two", "Beta_one"]);
    }

    #[test]
    fn test_duplicate_extractor_names_rejected() {
        let err = Pipeline::new(vec![
            stub("Alpha", vec![("one", 1.0)]),
            stub("Alpha", vec![("two", 2.0)]),
        ])
        .unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateFeature(name) if name == "Alpha"));
    }

    #[test]
    fn test_duplicate_signal_names_abort_assembly() {
        let pipeline =
            Pipeline::new(vec![stub("Alpha", vec![("one", 1.0), ("one", 2.0)])]).unwrap();
        let q = Question::new("q", "text");
        let point = EvalPoint::new(&q, "text", "", &[]);
        let err = pipeline.assemble(&point).unwrap_err();
        assert!(matches!(err, FeatureError::Signal(_)));
    }

    #[test]
    fn test_failing_extractor_aborts_whole_vector() {
        let pipeline = Pipeline::new(vec![
            stub("Alpha", vec![("one", 1.0)]),
            Box::new(FailingFeature),
        ])
        .unwrap();
        let q = Question::new("q", "text");
        let point = EvalPoint::new(&q, "text", "", &[]);
        assert!(pipeline.assemble(&point).is_err());
    }

    #[test]
    fn test_malformed_input_rejected_before_extraction() {
        let pipeline = Pipeline::new(vec![stub("Alpha", vec![("one", 1.0)])]).unwrap();
        let q = Question::new("q", "short");
        let point = EvalPoint::new(&q, "much longer than the question", "", &[]);
        let err = pipeline.assemble(&point).unwrap_err();
        assert!(matches!(err, FeatureError::MalformedInput(_)));
    }

    #[test]
    fn test_empty_pipeline_yields_empty_vector() {
        let pipeline = Pipeline::new(Vec::new()).unwrap();
        let q = Question::new("q", "text");
        let point = EvalPoint::new(&q, "", "", &[]);
        let vector = pipeline.assemble(&point).unwrap();
        assert!(vector.is_empty());
        assert!(pipeline.feature_names().is_empty());
    }
}
