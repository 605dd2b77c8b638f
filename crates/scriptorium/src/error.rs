//! Error types for the Scriptorium library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Scriptorium operations.
#[derive(Debug, Error)]
pub enum ScriptoriumError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed upstream artifact (missing field, empty key, missing column).
    #[error("Structural error in {source_name} at line {line}: {message}")]
    Structural {
        source_name: String,
        line: usize,
        message: String,
    },

    /// A rewrite left a divine phrase in both its canonical and lowercase form.
    #[error("Invariant violated for '{reference}': both '{canonical}' and '{variant}' present")]
    Invariant {
        reference: String,
        canonical: String,
        variant: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error (usually a bad rule table entry).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error writing an output artifact.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ScriptoriumError {
    /// Build a structural error for a line of an input artifact.
    pub fn structural(
        source_name: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        ScriptoriumError::Structural {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether this error signals a defect in the rule pipeline itself.
    pub fn is_invariant(&self) -> bool {
        matches!(self, ScriptoriumError::Invariant { .. })
    }
}

/// Result type alias for Scriptorium operations.
pub type Result<T> = std::result::Result<T, ScriptoriumError>;
