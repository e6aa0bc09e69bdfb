//! Pipeline configuration
//!
//! Selects which extractors run and in what order, plus optional extension
//! lexicons for the embedded backend:
//!
//! ```toml
//! features = ["Length", "GuessBlank", "Correlation"]
//! lexicon_dir = "/etc/qbuzz/lexicons"
//! ```
//!
//! Unknown extractor names are accepted here and rejected when the pipeline
//! is built, so a config file can be parsed and reported on without a
//! backend present.

use std::fs;
use std::path::{Path, PathBuf};

use qbuzz_common::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extractors;

/// Extraction pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extractor names to run, in evaluation order
    pub features: Vec<String>,
    /// Optional directory of extension lexicon files for the embedded backend
    pub lexicon_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            features: extractors::DEFAULT_FEATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lexicon_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML configuration string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid pipeline config: {e}")))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading pipeline config");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Whether any configured extractor needs the NLP backend
    ///
    /// Callers use this to decide whether to pay for backend initialization
    /// before building the pipeline.
    pub fn needs_backend(&self) -> bool {
        self.features
            .iter()
            .any(|name| extractors::requires_backend(name))
    }
}
