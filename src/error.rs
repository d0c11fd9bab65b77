//! Error types for the model generator.
//!
//! Library operations return [`GenerateError`]; the binary wraps it in
//! `anyhow` and reports the full cause chain once at the top of the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::validate::ModelIssue;

/// Result type for generator operations
pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Target or model file could not be read
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Target file could not be written back
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A region's markers are absent and the marker policy is strict
    #[error("region '{region}' not found in {path:?}")]
    MissingRegion { path: PathBuf, region: String },

    /// Model validation reported at least one error
    #[error("model has {} blocking issue(s): {}", issues.len(), summarize(issues))]
    InvalidModel { issues: Vec<ModelIssue> },

    /// Model file exists but could not be deserialized
    #[error("failed to parse model {path:?}: {message}")]
    ModelParse { path: PathBuf, message: String },

    #[error("unsupported model format {extension:?} for {path:?} (expected toml, yaml, yml or json)")]
    UnsupportedModelFormat { path: PathBuf, extension: String },
}

fn summarize(issues: &[ModelIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
