//! End-to-end pipeline tests over the embedded lexicon backend

use std::sync::Arc;

use qbuzz_common::{EvalPoint, FeatureValue, FeatureVector, GuessRecord, Question};
use qbuzz_fe::nlp::{Annotator, LexiconAnnotator, MockAnnotator};
use qbuzz_fe::{FeatureError, Pipeline, PipelineConfig, VectorSink};

// ============================================================================
// Helpers
// ============================================================================

fn lexicon_pipeline() -> Pipeline {
    let backend: Arc<dyn Annotator> = Arc::new(LexiconAnnotator::new());
    Pipeline::from_config(&PipelineConfig::default(), Some(backend)).expect("default pipeline")
}

fn real_of(vector: &FeatureVector, name: &str) -> f64 {
    match vector.get(name) {
        Some(FeatureValue::Real(v)) => v,
        other => panic!("expected real signal {name}, got {other:?}"),
    }
}

fn flag_of(vector: &FeatureVector, name: &str) -> bool {
    match vector.get(name) {
        Some(FeatureValue::Flag(b)) => b,
        other => panic!("expected flag signal {name}, got {other:?}"),
    }
}

/// Collects accepted vectors for assertions
#[derive(Default)]
struct RecordingSink {
    rows: Vec<(String, FeatureVector)>,
}

impl VectorSink for RecordingSink {
    fn accept(&mut self, question_id: &str, vector: FeatureVector) -> qbuzz_common::Result<()> {
        self.rows.push((question_id.to_string(), vector));
        Ok(())
    }
}

// ============================================================================
// Full Vector Shape
// ============================================================================

#[test]
fn test_default_vector_names_in_order() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "Name this emperor who lost at Waterloo.");
    let point = EvalPoint::new(&q, "Name this emperor", "Napoleon", &[]);

    let vector = pipeline.assemble(&point).expect("vector");
    assert_eq!(
        vector.names(),
        vec![
            "Length_char",
            "Length_word",
            "Length_guess",
            "GuessBlank_true",
            "Correlation_similarity",
            "Entity_true",
            "Verb_true",
        ]
    );
}

#[test]
fn test_empty_run_and_empty_guess() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "Some question text.");
    let point = EvalPoint::new(&q, "", "", &[]);

    let vector = pipeline.assemble(&point).expect("vector");
    assert_eq!(real_of(&vector, "Length_char"), -1.0);
    assert_eq!(real_of(&vector, "Length_word"), -1.0);
    assert_eq!(real_of(&vector, "Length_guess"), -1.0);
    assert!(flag_of(&vector, "GuessBlank_true"));
    // Empty docs on both sides: similarity falls back to the sentinel
    assert_eq!(real_of(&vector, "Correlation_similarity"), 0.0);
    assert!(!flag_of(&vector, "Entity_true"));
    assert!(!flag_of(&vector, "Verb_true"));
}

#[test]
fn test_midpoint_run_with_napoleon_guess() {
    let pipeline = lexicon_pipeline();
    let text = "x".repeat(450);
    let q = Question::new("q", text.clone());
    let point = EvalPoint::new(&q, &text, "Napoleon", &[]);

    let vector = pipeline.assemble(&point).expect("vector");
    assert_eq!(real_of(&vector, "Length_char"), 0.0);
    let expected = (1.0 + 8.0_f64).ln();
    assert!((real_of(&vector, "Length_guess") - expected).abs() < 1e-12);
    assert!(!flag_of(&vector, "GuessBlank_true"));
}

#[test]
fn test_location_guess_against_location_run() {
    let pipeline = lexicon_pipeline();
    let q = Question::new(
        "q",
        "The capital of France is home to a famous tower on the Seine.",
    );
    let point = EvalPoint::new(&q, "The capital of France is", "Paris", &[]);

    let vector = pipeline.assemble(&point).expect("vector");
    assert!(flag_of(&vector, "Entity_true"));
}

#[test]
fn test_sentence_fragment_guess_has_verb() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "This animal runs very fast across the savanna.");
    let point = EvalPoint::new(&q, "This animal", "runs quickly", &[]);

    let vector = pipeline.assemble(&point).expect("vector");
    assert!(flag_of(&vector, "Verb_true"));

    let entity_point = EvalPoint::new(&q, "This animal", "Jane Austen", &[]);
    let vector = pipeline.assemble(&entity_point).expect("vector");
    assert!(!flag_of(&vector, "Verb_true"));
}

#[test]
fn test_related_guess_correlates_higher() {
    let pipeline = lexicon_pipeline();
    let q = Question::new(
        "q",
        "Napoleon lost his final battle at Waterloo in 1815 against Wellington.",
    );
    let run = "Napoleon lost his final battle at Waterloo";
    let on_topic = pipeline
        .assemble(&EvalPoint::new(&q, run, "Napoleon at Waterloo", &[]))
        .expect("vector");
    let off_topic = pipeline
        .assemble(&EvalPoint::new(&q, run, "chlorophyll pigment molecules", &[]))
        .expect("vector");

    assert!(
        real_of(&on_topic, "Correlation_similarity")
            > real_of(&off_topic, "Correlation_similarity")
    );
}

#[test]
fn test_assembled_vector_serializes_as_dataset_row() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "Some question text.");
    let vector = pipeline
        .assemble(&EvalPoint::new(&q, "", "", &[]))
        .expect("vector");

    let json = serde_json::to_value(&vector).expect("serializable vector");
    let rows = json.as_array().expect("array of {name, value} rows");
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["name"], "Length_char");
    assert_eq!(rows[0]["value"], -1.0);
    assert_eq!(rows[3]["name"], "GuessBlank_true");
    assert_eq!(rows[3]["value"], true);
}

// ============================================================================
// Contract Properties
// ============================================================================

#[test]
fn test_assembly_is_idempotent() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "This author of Pride and Prejudice also wrote Emma.");
    let history = vec![
        GuessRecord::new("This author", ""),
        GuessRecord::new("This author of Pride", "Charlotte Bronte"),
    ];
    let point = EvalPoint::new(&q, "This author of Pride and Prejudice", "Jane Austen", &history);

    let first = pipeline.assemble(&point).expect("vector");
    let second = pipeline.assemble(&point).expect("vector");
    assert_eq!(first, second);
}

#[test]
fn test_history_does_not_change_current_signals() {
    // None of the configured extractors read history; the tuple carries it
    // for extractors that will
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "Some question about France and its capital.");
    let history = vec![GuessRecord::new("Some question", "Lyon")];

    let with_history =
        pipeline.assemble(&EvalPoint::new(&q, "Some question about France", "Paris", &history));
    let without_history =
        pipeline.assemble(&EvalPoint::new(&q, "Some question about France", "Paris", &[]));
    assert_eq!(with_history.expect("vector"), without_history.expect("vector"));
}

#[test]
fn test_malformed_run_is_rejected() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q", "short text");
    let point = EvalPoint::new(&q, "a run far longer than the question text itself", "", &[]);

    let err = pipeline.assemble(&point).unwrap_err();
    assert!(matches!(err, FeatureError::MalformedInput(_)));
}

#[test]
fn test_backend_failure_yields_no_partial_vector() {
    let backend: Arc<dyn Annotator> = Arc::new(MockAnnotator::new().failing_on("Paris"));
    let config = PipelineConfig {
        features: vec!["Length".to_string(), "Correlation".to_string()],
        lexicon_dir: None,
    };
    let pipeline = Pipeline::from_config(&config, Some(backend)).expect("pipeline");

    let q = Question::new("q", "The capital of France is large.");
    let point = EvalPoint::new(&q, "The capital of France", "Paris", &[]);
    let err = pipeline.assemble(&point).unwrap_err();
    assert!(matches!(err, FeatureError::Backend(_)));
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_unknown_configured_feature_fails_construction() {
    let config = PipelineConfig {
        features: vec!["Length".to_string(), "Sentiment".to_string()],
        lexicon_dir: None,
    };
    let err = Pipeline::from_config(&config, None).unwrap_err();
    assert!(matches!(err, FeatureError::UnknownFeature(name) if name == "Sentiment"));
}

#[test]
fn test_backend_dependent_config_without_backend_fails() {
    let err = Pipeline::from_config(&PipelineConfig::default(), None).unwrap_err();
    assert!(matches!(err, FeatureError::BackendMissing(_)));
}

#[test]
fn test_pure_subset_runs_without_backend() {
    let config = PipelineConfig {
        features: vec!["Length".to_string(), "GuessBlank".to_string()],
        lexicon_dir: None,
    };
    let pipeline = Pipeline::from_config(&config, None).expect("pure pipeline");

    let q = Question::new("q", "Some question text.");
    let vector = pipeline
        .assemble(&EvalPoint::new(&q, "Some", "guess", &[]))
        .expect("vector");
    assert_eq!(vector.names(), vec!["Length_char", "Length_word", "Length_guess", "GuessBlank_true"]);
}

// ============================================================================
// Sink Handoff
// ============================================================================

#[test]
fn test_sink_receives_vectors_in_assembly_order() {
    let pipeline = lexicon_pipeline();
    let q = Question::new("q-17", "Name this emperor who lost at Waterloo in 1815.");
    let runs = ["Name this emperor", "Name this emperor who lost", "Name this emperor who lost at Waterloo"];

    let mut sink = RecordingSink::default();
    for run in runs {
        let vector = pipeline
            .assemble(&EvalPoint::new(&q, run, "Napoleon", &[]))
            .expect("vector");
        sink.accept(&q.id, vector).expect("sink accept");
    }

    assert_eq!(sink.rows.len(), 3);
    assert!(sink.rows.iter().all(|(id, _)| id == "q-17"));
    // Later runs are longer, so the char signal strictly grows
    let chars: Vec<f64> = sink.rows.iter().map(|(_, v)| real_of(v, "Length_char")).collect();
    assert!(chars[0] < chars[1] && chars[1] < chars[2]);
}
