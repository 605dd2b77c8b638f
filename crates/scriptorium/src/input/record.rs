//! Verse and reference records.

use serde::{Deserialize, Serialize};

/// A candidate verse: the text the engine normalizes.
///
/// Records are never edited in place; every stage that rewrites a verse
/// returns a successor via [`VerseRecord::with_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    /// Verse reference (book, chapter and verse, e.g. "GEN 1:1").
    #[serde(rename = "ref")]
    pub reference: String,

    /// Candidate translation text.
    #[serde(rename = "translation", alias = "text")]
    pub text: String,
}

impl VerseRecord {
    /// Create a new verse record.
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
        }
    }

    /// Produce a successor record with the same reference and new text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            reference: self.reference.clone(),
            text: text.into(),
        }
    }
}

/// A verse from the fixed historical reference corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Verse reference, keyed identically to [`VerseRecord`].
    #[serde(rename = "ref")]
    pub reference: String,

    /// Reference translation text.
    #[serde(alias = "kjv")]
    pub text: String,
}

impl ReferenceRecord {
    /// Create a new reference record.
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
        }
    }
}
