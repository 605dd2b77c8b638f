//! Fixed divine-phrase consistency check.

use regex::Regex;

use crate::error::{Result, ScriptoriumError};
use crate::ruleset::RuleSet;

#[derive(Debug, Clone)]
struct CompiledPair {
    canonical: String,
    variant: String,
    canonical_re: Regex,
    // Group 1 captures a trailing "GOD" that turns the variant into a title.
    variant_re: Regex,
}

/// Rejects texts that carry both casings of a fixed divine phrase.
#[derive(Debug, Clone)]
pub struct InvariantChecker {
    pairs: Vec<CompiledPair>,
}

impl InvariantChecker {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let mut pairs = Vec::with_capacity(rules.invariant_phrases.len());
        for phrase in &rules.invariant_phrases {
            if phrase.canonical.trim().is_empty() || phrase.variant.trim().is_empty() {
                return Err(ScriptoriumError::Config(
                    "invariant phrase pairs must not be empty".to_string(),
                ));
            }
            pairs.push(CompiledPair {
                canonical: phrase.canonical.clone(),
                variant: phrase.variant.clone(),
                canonical_re: Regex::new(&format!(r"\b{}\b", words(&phrase.canonical)))?,
                variant_re: Regex::new(&format!(r"\b{}\b(\s+GOD\b)?", words(&phrase.variant)))?,
            });
        }
        Ok(Self { pairs })
    }

    /// Check a rewritten verse. Returns an `Invariant` error on violation.
    pub fn check(&self, reference: &str, text: &str) -> Result<()> {
        for pair in &self.pairs {
            if !pair.canonical_re.is_match(text) {
                continue;
            }
            let has_variant = pair
                .variant_re
                .captures_iter(text)
                .any(|caps| caps.get(1).is_none());
            if has_variant {
                return Err(ScriptoriumError::Invariant {
                    reference: reference.to_string(),
                    canonical: pair.canonical.clone(),
                    variant: pair.variant.clone(),
                });
            }
        }
        Ok(())
    }
}

fn words(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
