//! Structural drift checks on rewritten verses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::collapse_whitespace;
use crate::ruleset::RuleSet;

static LEADING_VERSE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s").unwrap());

/// Length-ratio bounds for the drift guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Smallest accepted candidate/original length ratio (inclusive).
    pub min_ratio: f64,
    /// Largest accepted candidate/original length ratio (inclusive).
    pub max_ratio: f64,
    /// Originals shorter than this many characters skip the ratio check.
    pub min_length: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_ratio: 0.60,
            max_ratio: 1.60,
            min_length: 20,
        }
    }
}

impl GuardConfig {
    pub fn with_ratio_bounds(mut self, min_ratio: f64, max_ratio: f64) -> Self {
        self.min_ratio = min_ratio;
        self.max_ratio = max_ratio;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }
}

/// Reason code attached to a guard verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardReason {
    Ok,
    EmptyOutput,
    CommentaryOrHeading,
    AddedVerseNumber,
    TooShort,
    TooLong,
}

impl GuardReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardReason::Ok => "ok",
            GuardReason::EmptyOutput => "empty_output",
            GuardReason::CommentaryOrHeading => "commentary_or_heading",
            GuardReason::AddedVerseNumber => "added_verse_number",
            GuardReason::TooShort => "too_short",
            GuardReason::TooLong => "too_long",
        }
    }
}

impl std::fmt::Display for GuardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardVerdict {
    pub accept: bool,
    pub reason: GuardReason,
    /// Candidate/original length ratio, when the ratio check ran.
    pub ratio: Option<f64>,
}

impl GuardVerdict {
    fn accepted(ratio: Option<f64>) -> Self {
        Self {
            accept: true,
            reason: GuardReason::Ok,
            ratio,
        }
    }

    fn rejected(reason: GuardReason, ratio: Option<f64>) -> Self {
        Self {
            accept: false,
            reason,
            ratio,
        }
    }
}

/// Compares an original verse with its rewrite and rejects structural drift.
#[derive(Debug, Clone)]
pub struct DriftGuard {
    config: GuardConfig,
    lead_ins: Vec<String>,
}

impl DriftGuard {
    pub fn new(rules: &RuleSet, config: GuardConfig) -> Self {
        let lead_ins = rules
            .commentary_lead_ins
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { config, lead_ins }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check `candidate` against `original`.
    ///
    /// Lengths are counted in characters after whitespace normalization.
    pub fn check(&self, original: &str, candidate: &str) -> GuardVerdict {
        let original = collapse_whitespace(original);
        let candidate = collapse_whitespace(candidate);

        if candidate.is_empty() {
            return GuardVerdict::rejected(GuardReason::EmptyOutput, None);
        }

        if self.is_commentary(&candidate) {
            return GuardVerdict::rejected(GuardReason::CommentaryOrHeading, None);
        }

        if LEADING_VERSE_NUMBER.is_match(&candidate) {
            return GuardVerdict::rejected(GuardReason::AddedVerseNumber, None);
        }

        let original_len = original.chars().count();
        if original_len < self.config.min_length {
            return GuardVerdict::accepted(None);
        }

        let ratio = candidate.chars().count() as f64 / original_len as f64;
        if ratio < self.config.min_ratio {
            GuardVerdict::rejected(GuardReason::TooShort, Some(ratio))
        } else if ratio > self.config.max_ratio {
            GuardVerdict::rejected(GuardReason::TooLong, Some(ratio))
        } else {
            GuardVerdict::accepted(Some(ratio))
        }
    }

    fn is_commentary(&self, text: &str) -> bool {
        if text.starts_with('#') {
            return true;
        }
        let lower = text.to_lowercase();
        self.lead_ins.iter().any(|lead| lower.starts_with(lead.as_str()))
    }
}

impl Default for DriftGuard {
    fn default() -> Self {
        Self::new(&RuleSet::default(), GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> DriftGuard {
        DriftGuard::default()
    }

    #[test]
    fn test_ratio_boundary_inclusive() {
        let original = "a".repeat(100);

        let verdict = guard().check(&original, &"b".repeat(60));
        assert!(verdict.accept);
        assert_eq!(verdict.reason, GuardReason::Ok);

        let verdict = guard().check(&original, &"b".repeat(59));
        assert!(!verdict.accept);
        assert_eq!(verdict.reason, GuardReason::TooShort);

        assert!(guard().check(&original, &"b".repeat(160)).accept);
        let verdict = guard().check(&original, &"b".repeat(161));
        assert_eq!(verdict.reason, GuardReason::TooLong);
    }

    #[test]
    fn test_short_original_skips_ratio() {
        let verdict = guard().check("Jesus wept.", "Jesus wept bitterly and long that day.");
        assert!(verdict.accept);
        assert!(verdict.ratio.is_none());
    }

    #[test]
    fn test_empty_output() {
        let verdict = guard().check("In the beginning", "  \n ");
        assert_eq!(verdict.reason, GuardReason::EmptyOutput);
    }

    #[test]
    fn test_commentary_and_heading() {
        let original = "And God said, Let there be light.";
        for candidate in [
            "# Genesis 1",
            "Note: the Hebrew reads differently",
            "Translator's note: light",
            "COMMENTARY: light",
        ] {
            let verdict = guard().check(original, candidate);
            assert_eq!(verdict.reason, GuardReason::CommentaryOrHeading, "{}", candidate);
        }
    }

    #[test]
    fn test_added_verse_number() {
        let verdict = guard().check(
            "And God said, Let there be light.",
            "3 And God said, Let there be light.",
        );
        assert_eq!(verdict.reason, GuardReason::AddedVerseNumber);

        let verdict = guard().check(
            "12 men went up to the city of David.",
            "12 men went up to the city of David.",
        );
        assert_eq!(verdict.reason, GuardReason::AddedVerseNumber);
    }

    #[test]
    fn test_structural_checks_ignore_original() {
        let verdict = guard().check("Note: these are the generations", "Note: these are the generations");
        assert_eq!(verdict.reason, GuardReason::CommentaryOrHeading);

        let verdict = guard().check("# Psalm 23", "# Psalm 23");
        assert_eq!(verdict.reason, GuardReason::CommentaryOrHeading);
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let original = format!("{}   {}", "a".repeat(50), "b".repeat(50));
        let verdict = guard().check(&original, &original.replace("   ", " "));
        assert!(verdict.accept);
    }

    #[test]
    fn test_custom_bounds() {
        let guard = DriftGuard::new(
            &RuleSet::default(),
            GuardConfig::default().with_ratio_bounds(0.9, 1.1),
        );
        let original = "a".repeat(100);
        assert_eq!(
            guard.check(&original, &"a".repeat(85)).reason,
            GuardReason::TooShort
        );
    }
}
