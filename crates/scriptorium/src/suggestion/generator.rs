//! Rule-based suggestion generation.
//!
//! Pronoun proposals reuse the antecedent resolver with its confidence floor
//! removed, so a reviewer also sees the capitalizations the engine declined
//! to apply. Title proposals look for metaphors used as names of the deity
//! ("the LORD is my rock").

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::classify::{apply_decisions, capitalize_word, PronounDecision, Verdict};
use crate::error::Result;
use crate::input::VerseRecord;
use crate::resolve::{AntecedentResolver, ResolverConfig};
use crate::ruleset::RuleSet;

use super::{Suggestion, SuggestionKind};

static SALVATION_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:my|our|his|their)\s+(salvation)\b").unwrap());

const IDENTITY_CONFIDENCE: f64 = 0.92;
const POSSESSIVE_CONFIDENCE: f64 = 0.88;
const SALVATION_CONFIDENCE: f64 = 0.85;

/// Generates pronoun and title suggestions for verses.
pub struct SuggestionEngine {
    resolver: AntecedentResolver,
    identity_title: Option<Regex>,
    possessive_title: Option<Regex>,
}

impl SuggestionEngine {
    pub fn new(rules: &RuleSet, resolver: ResolverConfig) -> Result<Self> {
        let resolver = AntecedentResolver::new(
            rules,
            ResolverConfig {
                min_confidence: 0.0,
                ..resolver
            },
        )?;

        let titles: Vec<String> = rules
            .title_phrases
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect();

        let (identity_title, possessive_title) = if titles.is_empty() {
            (None, None)
        } else {
            let alternatives = titles.join("|");
            let identity = RegexBuilder::new(&format!(
                r"\bis\s+(?:my|our|his|their)\s+({alternatives})\b"
            ))
            .case_insensitive(true)
            .build()?;
            let possessive = RegexBuilder::new(&format!(
                r"\b(?:my|our|his|their)\s+({alternatives})\b"
            ))
            .case_insensitive(true)
            .build()?;
            (Some(identity), Some(possessive))
        };

        Ok(Self {
            resolver,
            identity_title,
            possessive_title,
        })
    }

    /// Suggestions for every record, in corpus order.
    pub fn generate(&self, records: &[VerseRecord]) -> Vec<Suggestion> {
        records.iter().flat_map(|r| self.suggest(r)).collect()
    }

    /// Suggestions for one verse, deduplicated by suggested text.
    pub fn suggest(&self, record: &VerseRecord) -> Vec<Suggestion> {
        let mut suggestions = self.suggest_pronouns(record);
        suggestions.extend(self.suggest_titles(record));

        let mut seen = HashSet::new();
        suggestions.retain(|s| seen.insert(s.suggested.clone()));
        suggestions
    }

    /// One suggestion per capitalizable pronoun, each building on the
    /// previous ones.
    fn suggest_pronouns(&self, record: &VerseRecord) -> Vec<Suggestion> {
        let original = &record.text;
        let proposals: Vec<PronounDecision> = self
            .resolver
            .resolve(original)
            .into_iter()
            .filter(|d| matches!(d.verdict, Verdict::Heuristic(true, _)))
            .collect();

        (0..proposals.len())
            .map(|i| {
                let decision = &proposals[i];
                let suggested = apply_decisions(original, &proposals[..=i]);
                Suggestion::new(
                    &record.reference,
                    original,
                    suggested,
                    SuggestionKind::Pronoun,
                )
                .with_reason(format!(
                    "Divine pronoun '{}' not capitalized ({}).",
                    decision.pronoun,
                    decision.basis.as_str()
                ))
                .with_confidence(decision.score().unwrap_or(0.0))
            })
            .collect()
    }

    fn suggest_titles(&self, record: &VerseRecord) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        let mut working = record.text.clone();

        let passes = [
            (
                self.identity_title.as_ref(),
                "Divine title used as identity ('is my/our/his/their ...').",
                IDENTITY_CONFIDENCE,
            ),
            (
                self.possessive_title.as_ref(),
                "Divine title used as possessive title ('my/our/his/their ...').",
                POSSESSIVE_CONFIDENCE,
            ),
            (
                Some(&*SALVATION_TITLE),
                "Salvation used as a title (my/our/his/their Salvation).",
                SALVATION_CONFIDENCE,
            ),
        ];

        for (regex, reason, confidence) in passes {
            let Some(regex) = regex else { continue };
            let spans: Vec<(usize, usize)> = regex
                .captures_iter(&working)
                .filter_map(|c| c.get(1))
                .map(|m| (m.start(), m.end()))
                .collect();

            for (start, end) in spans {
                let title = capitalize_phrase(&working[start..end]);
                if title == working[start..end] {
                    continue;
                }
                let suggested = format!("{}{}{}", &working[..start], title, &working[end..]);
                suggestions.push(
                    Suggestion::new(
                        &record.reference,
                        &record.text,
                        suggested.as_str(),
                        SuggestionKind::Title,
                    )
                    .with_reason(reason)
                    .with_confidence(confidence),
                );
                working = suggested;
            }
        }

        suggestions
    }
}

/// Capitalize each word, keeping the original spacing.
fn capitalize_phrase(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut word_start = true;
    for c in phrase.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.push_str(&capitalize_word(&c.to_string()));
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SuggestionEngine {
        SuggestionEngine::new(&RuleSet::default(), ResolverConfig::default()).unwrap()
    }

    fn verse(text: &str) -> VerseRecord {
        VerseRecord::new("PSA 18:2", text)
    }

    #[test]
    fn test_identity_title_outranks_possessive() {
        let sugs = engine().suggest(&verse("The LORD is my rock and my fortress"));
        let titles: Vec<_> = sugs
            .iter()
            .filter(|s| s.kind == SuggestionKind::Title)
            .collect();

        assert_eq!(titles[0].suggested, "The LORD is my Rock and my fortress");
        assert_eq!(titles[0].confidence, IDENTITY_CONFIDENCE);
        assert_eq!(
            titles.last().unwrap().suggested,
            "The LORD is my Rock and my Fortress"
        );
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn test_multiword_title() {
        let sugs = engine().suggest(&verse("he is our high tower"));
        assert_eq!(sugs[0].suggested, "he is our High Tower");
    }

    #[test]
    fn test_salvation_title_only_after_possessive() {
        let sugs = engine().suggest(&verse("God is my salvation; your salvation is near"));
        let titles: Vec<_> = sugs
            .iter()
            .filter(|s| s.kind == SuggestionKind::Title)
            .collect();
        assert_eq!(titles.len(), 1);
        assert_eq!(
            titles[0].suggested,
            "God is my Salvation; your salvation is near"
        );
        assert_eq!(titles[0].confidence, SALVATION_CONFIDENCE);
    }

    #[test]
    fn test_pronoun_suggestions_include_low_confidence() {
        let record = VerseRecord::new("PSA 23:3", "The LORD restores my soul; he leads me.");
        let pronouns: Vec<_> = engine()
            .suggest(&record)
            .into_iter()
            .filter(|s| s.kind == SuggestionKind::Pronoun)
            .collect();

        assert!(!pronouns.is_empty());
        assert!(pronouns[0].suggested.contains("He leads"));
        assert!(pronouns.iter().all(|s| s.original == record.text));
    }

    #[test]
    fn test_no_anchor_no_pronoun_suggestions() {
        let sugs = engine().suggest(&verse("he went home to his house"));
        assert!(sugs.is_empty());
    }

    #[test]
    fn test_capitalize_phrase_keeps_spacing() {
        assert_eq!(capitalize_phrase("high  tower"), "High  Tower");
    }
}
