//! # QBuzz Common Library
//!
//! Shared code for the QBuzz components including:
//! - Question, run, and guess data model
//! - Feature vector types consumed by the buzz classifier
//! - Common error types

pub mod error;
pub mod question;
pub mod vector;

// Re-export commonly used types
pub use error::{Error, Result};
pub use question::{EvalPoint, GuessRecord, Question};
pub use vector::{FeatureSignal, FeatureValue, FeatureVector, VectorError};
