//! Run statistics and provenance.

use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::UsageClass;
use crate::error::{Result, ScriptoriumError};
use crate::input::{create_output_file, CorpusMetadata};
use crate::ruleset::RULESET_VERSION;

/// Per-run counters. Combine per-worker counters with [`RunStats::merge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub total: usize,
    pub changed: usize,
    pub guard_rejected: usize,
    /// Verses whose candidate was replaced by the baseline draft.
    pub baseline_fallbacks: usize,
    /// Verses per usage class, in reporting order.
    pub usage: IndexMap<UsageClass, usize>,
    /// Pronouns capitalized by the resolver.
    pub heuristic_capitalized: usize,
    pub review_queue: usize,
    pub overrides_applied: usize,
    pub ruleset_version: String,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            total: 0,
            changed: 0,
            guard_rejected: 0,
            baseline_fallbacks: 0,
            usage: UsageClass::ALL.iter().map(|c| (*c, 0)).collect(),
            heuristic_capitalized: 0,
            review_queue: 0,
            overrides_applied: 0,
            ruleset_version: RULESET_VERSION.to_string(),
        }
    }
}

impl RunStats {
    pub fn new(ruleset_version: impl Into<String>) -> Self {
        Self {
            ruleset_version: ruleset_version.into(),
            ..Self::default()
        }
    }

    /// Count one verse in a usage class.
    pub fn record_usage(&mut self, class: UsageClass) {
        *self.usage.entry(class).or_insert(0) += 1;
    }

    pub fn usage_count(&self, class: UsageClass) -> usize {
        self.usage.get(&class).copied().unwrap_or(0)
    }

    /// Add another run's counters to this one.
    pub fn merge(&mut self, other: &RunStats) {
        self.total += other.total;
        self.changed += other.changed;
        self.guard_rejected += other.guard_rejected;
        self.baseline_fallbacks += other.baseline_fallbacks;
        for (class, count) in &other.usage {
            *self.usage.entry(*class).or_insert(0) += count;
        }
        self.heuristic_capitalized += other.heuristic_capitalized;
        self.review_queue += other.review_queue;
        self.overrides_applied += other.overrides_applied;
    }
}

/// Statistics plus the provenance of every input the run read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub candidate: CorpusMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<CorpusMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<CorpusMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approvals: Option<String>,
    pub stats: RunStats,
}

impl RunSummary {
    pub fn new(candidate: CorpusMetadata, stats: RunStats) -> Self {
        Self {
            generated_at: Utc::now(),
            candidate,
            reference: None,
            baseline: None,
            approvals: None,
            stats,
        }
    }

    pub fn with_reference(mut self, metadata: Option<CorpusMetadata>) -> Self {
        self.reference = metadata;
        self
    }

    pub fn with_baseline(mut self, metadata: Option<CorpusMetadata>) -> Self {
        self.baseline = metadata;
        self
    }

    pub fn with_approvals(mut self, path: Option<&Path>) -> Self {
        self.approvals = path.map(|p| p.display().to_string());
        self
    }

    /// Save the summary as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = create_output_file(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            ScriptoriumError::Persistence(format!("Failed to serialize run summary: {}", e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_every_class() {
        let stats = RunStats::default();
        let keys: Vec<_> = stats.usage.keys().copied().collect();
        assert_eq!(keys, UsageClass::ALL.to_vec());
    }

    #[test]
    fn test_merge_adds_counters() {
        let mut a = RunStats::default();
        a.total = 2;
        a.record_usage(UsageClass::Mixed);

        let mut b = RunStats::default();
        b.total = 3;
        b.changed = 1;
        b.record_usage(UsageClass::Mixed);
        b.record_usage(UsageClass::DivineOnly);

        a.merge(&b);
        assert_eq!(a.total, 5);
        assert_eq!(a.changed, 1);
        assert_eq!(a.usage_count(UsageClass::Mixed), 2);
        assert_eq!(a.usage_count(UsageClass::DivineOnly), 1);
    }

    #[test]
    fn test_usage_serializes_in_order() {
        let json = serde_json::to_string(&RunStats::default()).unwrap();
        let divine = json.find("divine_only").unwrap();
        let unavailable = json.find("unavailable").unwrap();
        assert!(divine < unavailable);
    }
}
