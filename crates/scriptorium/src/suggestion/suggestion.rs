//! Advisory capitalization proposals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a suggestion capitalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A pronoun referring to the deity.
    Pronoun,
    /// A metaphor used as a divine title ("my Rock").
    Title,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Pronoun => "pronoun",
            SuggestionKind::Title => "title",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::Pronoun => "Divine pronoun",
            SuggestionKind::Title => "Divine title",
        }
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed rewrite of one verse. Never applied without human approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Verse reference.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Verse text the suggestion was computed on.
    pub original: String,

    /// Full proposed verse text.
    pub suggested: String,

    /// Human-readable rationale.
    pub reason: String,

    /// Confidence in this suggestion (0.0-1.0).
    pub confidence: f64,

    pub kind: SuggestionKind,

    /// When this suggestion was generated.
    pub suggested_at: DateTime<Utc>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(
        reference: impl Into<String>,
        original: impl Into<String>,
        suggested: impl Into<String>,
        kind: SuggestionKind,
    ) -> Self {
        Self {
            reference: reference.into(),
            original: original.into(),
            suggested: suggested.into(),
            reason: String::new(),
            confidence: 0.0,
            kind,
            suggested_at: Utc::now(),
        }
    }

    /// Set the rationale.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Set confidence, clamped to `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}
