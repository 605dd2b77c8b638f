//! Review items and the append-only review queue.

use serde::{Deserialize, Serialize};

/// Why a verse needs human adjudication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    /// The reference verse uses both capitalized and lowercase pronouns.
    MixedReference,
    /// No reference text exists for the verse.
    MissingReference,
    /// The drift guard rejected a rewrite.
    GuardRejected,
    /// A heuristic capitalization scored below the confidence floor.
    LowConfidence,
}

impl ReviewReason {
    /// Snake-case name, as written to the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewReason::MixedReference => "mixed_reference",
            ReviewReason::MissingReference => "missing_reference",
            ReviewReason::GuardRejected => "guard_rejected",
            ReviewReason::LowConfidence => "low_confidence",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewReason::MixedReference => "Mixed reference usage",
            ReviewReason::MissingReference => "Missing reference",
            ReviewReason::GuardRejected => "Rejected by drift guard",
            ReviewReason::LowConfidence => "Low-confidence pronoun",
        }
    }
}

impl std::fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verse the engine could not safely resolve on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Verse reference.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Machine-readable reason.
    pub reason: ReviewReason,

    /// Extra context, e.g. the guard's reason code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ReviewItem {
    /// Create a new review item.
    pub fn new(reference: impl Into<String>, reason: ReviewReason) -> Self {
        Self {
            reference: reference.into(),
            reason,
            detail: None,
        }
    }

    /// Attach a detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Append-only collection of review items.
///
/// Items are never removed or reordered; per-worker queues are combined
/// with [`ReviewQueue::merge`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewQueue {
    items: Vec<ReviewItem>,
}

impl ReviewQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn push(&mut self, item: ReviewItem) {
        self.items.push(item);
    }

    /// Append several items.
    pub fn extend(&mut self, items: impl IntoIterator<Item = ReviewItem>) {
        self.items.extend(items);
    }

    /// Append another queue's items after this queue's.
    pub fn merge(&mut self, other: ReviewQueue) {
        self.items.extend(other.items);
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Reasons recorded for a reference, in insertion order.
    pub fn reasons_for(&self, reference: &str) -> Vec<ReviewReason> {
        self.items
            .iter()
            .filter(|item| item.reference == reference)
            .map(|item| item.reason)
            .collect()
    }

    /// Number of items with the given reason.
    pub fn count(&self, reason: ReviewReason) -> usize {
        self.items.iter().filter(|item| item.reason == reason).count()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the queue and return its items.
    pub fn into_items(self) -> Vec<ReviewItem> {
        self.items
    }
}
