//! Property-based tests for Scriptorium.
//!
//! These tests use proptest to generate random verse-like inputs and verify
//! that the classifier, rule pipeline, resolver and guard keep their
//! invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p scriptorium --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p scriptorium --test property_tests
//! ```

use proptest::prelude::*;

use scriptorium::classify::apply_decisions;
use scriptorium::resolve::{AntecedentResolver, ResolverConfig};
use scriptorium::{DriftGuard, GuardReason, RulePipeline, RuleSet, UsageClass};

// =============================================================================
// Test Strategies
// =============================================================================

/// Words that exercise every rule and marker table.
fn verse_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "he", "him", "his", "himself", "He", "Him", "His", "Himself", "my", "me",
        "the", "Lord", "LORD", "God", "GOD", "O", "said", "to", "unto", "Moses",
        "divide", "separated", "between", "and", "light", "darkness", "sixty", "five",
        "hundred", "name", "glory", "angel", "of", ",", ";", ".", "\"", "\u{201C}",
        "\u{201D}", "\n", "  ",
    ])
}

/// Verse-like strings built from the word list.
fn verse_like() -> impl Strategy<Value = String> {
    prop::collection::vec(verse_word(), 0..40).prop_map(|words| words.join(" "))
}

/// Arbitrary strings (including non-ASCII).
fn any_text() -> impl Strategy<Value = String> {
    "\\PC{0,120}"
}

fn resolver() -> AntecedentResolver {
    AntecedentResolver::new(&RuleSet::default(), ResolverConfig::default()).unwrap()
}

// =============================================================================
// Usage classifier
// =============================================================================

proptest! {
    /// Classification is total and deterministic.
    #[test]
    fn classifier_total_and_deterministic(text in any_text()) {
        let first = UsageClass::classify(Some(&text));
        let second = UsageClass::classify(Some(&text));
        prop_assert_eq!(first, second);
        prop_assert!(UsageClass::ALL.contains(&first));
    }

    /// Whitespace-only reference text is indistinguishable from a missing one.
    #[test]
    fn classifier_blank_is_unavailable(spaces in "[ \\t\\n]{0,10}") {
        prop_assert_eq!(UsageClass::classify(Some(&spaces)), UsageClass::Unavailable);
    }
}

// =============================================================================
// Rule pipeline
// =============================================================================

proptest! {
    /// Applying the pipeline twice equals applying it once.
    #[test]
    fn pipeline_idempotent(text in verse_like()) {
        let pipeline = RulePipeline::new();
        let once = pipeline.apply(&text);
        prop_assert_eq!(pipeline.apply(&once), once);
    }

    /// The pipeline never panics on arbitrary input.
    #[test]
    fn pipeline_total(text in any_text()) {
        let _ = RulePipeline::new().apply(&text);
    }
}

// =============================================================================
// Antecedent resolver
// =============================================================================

proptest! {
    /// The resolver never lowercases and only changes pronoun case.
    #[test]
    fn resolver_monotone(text in verse_like()) {
        let decisions = resolver().resolve(&text);
        let out = apply_decisions(&text, &decisions);

        prop_assert_eq!(out.len(), text.len());
        for (before, after) in text.chars().zip(out.chars()) {
            if before != after {
                prop_assert!(before.is_lowercase());
                prop_assert_eq!(before.to_uppercase().next(), Some(after));
            }
        }
    }

    /// Re-running the resolver on its own output changes nothing further.
    #[test]
    fn resolver_stable(text in verse_like()) {
        let r = resolver();
        let once = apply_decisions(&text, &r.resolve(&text));
        let twice = apply_decisions(&once, &r.resolve(&once));
        prop_assert_eq!(twice, once);
    }
}

// =============================================================================
// Drift guard
// =============================================================================

proptest! {
    /// Ratio verdicts follow the inclusive [0.60, 1.60] bounds.
    #[test]
    fn guard_ratio_bounds(original_len in 20usize..300, candidate_len in 1usize..600) {
        let guard = DriftGuard::default();
        let original = "a".repeat(original_len);
        let candidate = "b".repeat(candidate_len);
        let verdict = guard.check(&original, &candidate);

        let ratio = candidate_len as f64 / original_len as f64;
        if ratio < 0.60 {
            prop_assert_eq!(verdict.reason, GuardReason::TooShort);
        } else if ratio > 1.60 {
            prop_assert_eq!(verdict.reason, GuardReason::TooLong);
        } else {
            prop_assert!(verdict.accept);
        }
    }

    /// An unchanged verse without a heading or verse number is always accepted.
    #[test]
    fn guard_accepts_identity(text in "And [A-Za-z ,.;]{0,200}") {
        prop_assert!(DriftGuard::default().check(&text, &text).accept);
    }
}
