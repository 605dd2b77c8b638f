//! Bounded-window antecedent resolution for verses without reference text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::classify::{DecisionBasis, PronounDecision, Verdict, LOWER_FIRST_PERSON, LOWER_PRONOUN};
use crate::error::Result;
use crate::review::ReviewReason;
use crate::ruleset::RuleSet;

use super::markers::{window_end, window_start, MarkerMatch, PhraseMatcher};

/// First word following a possessive.
static NEXT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+([A-Za-z]+)").unwrap());

/// Words that may precede a verse-opening divine marker ("And the LORD").
const LEADING_WORDS: &[&str] = &["and", "the", "then", "for", "but", "o", "now"];

/// Tuning knobs for the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Left-context window, in characters.
    pub window_chars: usize,
    /// Capitalizations scoring below this are routed to review instead.
    pub min_confidence: f64,
    /// Radius, in characters, searched for a vocative invocation.
    pub invocation_radius: usize,
    /// Whether first-person pronouns in divine speech are considered.
    pub first_person: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            window_chars: 80,
            min_confidence: 0.80,
            invocation_radius: 40,
            first_person: true,
        }
    }
}

/// Infers pronoun antecedents from the candidate text alone.
///
/// The resolver only ever proposes capitalization: every decision is either
/// `Heuristic(true, _)`, `Heuristic(false, _)` (leave as is) or
/// `Unresolved(low_confidence)`. Re-running it on its own output is a no-op.
#[derive(Debug, Clone)]
pub struct AntecedentResolver {
    config: ResolverConfig,
    divine: PhraseMatcher,
    human: PhraseMatcher,
    speech: PhraseMatcher,
    invocation: PhraseMatcher,
    address: Option<Regex>,
    possessions: HashSet<String>,
}

impl AntecedentResolver {
    /// Compile a resolver from rule tables.
    pub fn new(rules: &RuleSet, config: ResolverConfig) -> Result<Self> {
        Ok(Self {
            divine: PhraseMatcher::new(&rules.divine_markers, false)?,
            human: PhraseMatcher::new(&rules.human_markers, false)?,
            speech: PhraseMatcher::new(&rules.divine_speech_markers, false)?,
            invocation: PhraseMatcher::new(&rules.invocations, false)?,
            address: address_regex(&rules.address_verbs, &rules.address_prepositions)?,
            possessions: rules
                .divine_possessions
                .iter()
                .map(|n| n.trim().to_lowercase())
                .collect(),
            config,
        })
    }

    /// Resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Whether the text names the deity anywhere.
    pub fn has_divine_marker(&self, text: &str) -> bool {
        self.divine.is_match(text)
    }

    /// Decide every lowercase candidate pronoun in `text`.
    ///
    /// Returns no decisions when the verse carries no divine marker.
    pub fn resolve(&self, text: &str) -> Vec<PronounDecision> {
        if !self.has_divine_marker(text) {
            return Vec::new();
        }

        let verse_opens_divine = self.opens_with_divine_marker(text);
        let mut decisions: Vec<PronounDecision> = LOWER_PRONOUN
            .find_iter(text)
            .map(|m| self.decide_third_person(text, m.start(), m.end(), verse_opens_divine))
            .collect();

        if self.config.first_person {
            decisions.extend(self.decide_first_person(text));
        }

        decisions.sort_by_key(|d| d.start);
        decisions
    }

    fn decide_third_person(
        &self,
        text: &str,
        start: usize,
        end: usize,
        verse_opens_divine: bool,
    ) -> PronounDecision {
        let pronoun = &text[start..end];
        let keep = |basis| PronounDecision::new(start, end, pronoun, Verdict::Heuristic(false, 0.0), basis);

        let left = window_start(text, start, self.config.window_chars);
        let window = &text[left..start];

        let Some(divine) = self.divine.last_in(window) else {
            return keep(DecisionBasis::NoDivineMarker);
        };

        let human = self.human.last_in(window);
        if human.is_some_and(|h| h.start >= divine.end) {
            return keep(DecisionBasis::CloserHumanAntecedent);
        }

        if self.is_addressee(window) {
            return keep(DecisionBasis::Addressee);
        }

        if pronoun == "his" && !self.possesses_divine_noun(&text[end..]) {
            return keep(DecisionBasis::PossessionNotDivine);
        }

        let score = self.score(text, start, end, human, verse_opens_divine);
        tracing::debug!(pronoun, start, score, "divine antecedent in window");
        PronounDecision::new(
            start,
            end,
            pronoun,
            self.gate(score),
            DecisionBasis::DivineAntecedent,
        )
    }

    fn decide_first_person(&self, text: &str) -> Vec<PronounDecision> {
        if !self.speech.is_match(text) {
            return Vec::new();
        }

        let spans = quoted_spans(text);
        let score = if spans.is_empty() { 0.85 } else { 0.90 };

        LOWER_FIRST_PERSON
            .find_iter(text)
            .filter(|m| spans.is_empty() || spans.iter().any(|&(s, e)| m.start() >= s && m.end() <= e))
            .map(|m| {
                PronounDecision::new(
                    m.start(),
                    m.end(),
                    m.as_str(),
                    self.gate(score),
                    DecisionBasis::DivineSpeech,
                )
            })
            .collect()
    }

    fn gate(&self, score: f64) -> Verdict {
        if score + 1e-9 >= self.config.min_confidence {
            Verdict::Heuristic(true, score)
        } else {
            Verdict::Unresolved(ReviewReason::LowConfidence)
        }
    }

    fn score(
        &self,
        text: &str,
        start: usize,
        end: usize,
        human: Option<MarkerMatch>,
        verse_opens_divine: bool,
    ) -> f64 {
        // Base plus the divine marker already found in the window.
        let mut score: f64 = 0.55 + 0.20;

        if human.is_none() {
            score += 0.10;
        }

        let radius = self.config.invocation_radius;
        let around = &text[window_start(text, start, radius)..window_end(text, end, radius)];
        if self.invocation.is_match(around) {
            score += 0.10;
        }

        if verse_opens_divine {
            score += 0.05;
        }

        (score.min(0.95) * 100.0).round() / 100.0
    }

    fn is_addressee(&self, window: &str) -> bool {
        self.address.as_ref().is_some_and(|r| r.is_match(window))
    }

    fn possesses_divine_noun(&self, rest: &str) -> bool {
        NEXT_WORD
            .captures(rest)
            .and_then(|c| c.get(1))
            .is_some_and(|noun| self.possessions.contains(&noun.as_str().to_lowercase()))
    }

    fn opens_with_divine_marker(&self, text: &str) -> bool {
        self.divine.first_in(text).is_some_and(|m| {
            text[..m.start]
                .split_whitespace()
                .all(|w| LEADING_WORDS.contains(&w.to_lowercase().as_str()))
        })
    }
}

/// `(?i)\b(?:said|spoke|…)\s+(?:to|unto)\s+$`, matched against the text
/// immediately left of a pronoun.
fn address_regex(verbs: &[String], prepositions: &[String]) -> Result<Option<Regex>> {
    let verbs: Vec<String> = verbs
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(regex::escape)
        .collect();
    let preps: Vec<String> = prepositions
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(regex::escape)
        .collect();
    if verbs.is_empty() || preps.is_empty() {
        return Ok(None);
    }

    let pattern = format!(
        r"\b(?:{})\s+(?:{})\s+$",
        verbs.join("|"),
        preps.join("|")
    );
    Ok(Some(RegexBuilder::new(&pattern).case_insensitive(true).build()?))
}

/// Byte ranges enclosed by quotation marks.
///
/// Curly quotes pair “ with the next ”; straight double quotes pair in
/// order of appearance. An unclosed quote runs to the end of the text.
pub fn quoted_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut curly_open: Option<usize> = None;
    let mut straight_open: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match c {
            '\u{201C}' => {
                if curly_open.is_none() {
                    curly_open = Some(i + c.len_utf8());
                }
            }
            '\u{201D}' => {
                if let Some(open) = curly_open.take() {
                    spans.push((open, i));
                }
            }
            '"' => match straight_open.take() {
                Some(open) => spans.push((open, i)),
                None => straight_open = Some(i + 1),
            },
            _ => {}
        }
    }

    if let Some(open) = curly_open {
        spans.push((open, text.len()));
    }
    if let Some(open) = straight_open {
        spans.push((open, text.len()));
    }

    spans.sort_unstable();
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::apply_decisions;

    fn resolver() -> AntecedentResolver {
        AntecedentResolver::new(&RuleSet::default(), ResolverConfig::default()).unwrap()
    }

    fn run(text: &str) -> String {
        apply_decisions(text, &resolver().resolve(text))
    }

    #[test]
    fn test_no_divine_marker_no_decisions() {
        let r = resolver();
        assert!(r.resolve("he went out and his brother followed him").is_empty());
    }

    #[test]
    fn test_divine_antecedent_capitalized() {
        assert_eq!(
            run("The LORD is good; he delivers the needy."),
            "The LORD is good; He delivers the needy."
        );
    }

    #[test]
    fn test_closer_human_wins() {
        let text = "And God spoke to Moses and said to him, I am the LORD.";
        let decisions = resolver().resolve(text);
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].basis, DecisionBasis::CloserHumanAntecedent);
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_addressee_not_capitalized() {
        let text = "The LORD called to him out of the bush";
        let decisions = resolver().resolve(text);
        assert_eq!(decisions[0].basis, DecisionBasis::Addressee);
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_possessive_requires_divine_noun() {
        assert_eq!(
            run("God remembered his covenant"),
            "God remembered His covenant"
        );
        let text = "God saw his tent";
        let decisions = resolver().resolve(text);
        assert_eq!(decisions[0].basis, DecisionBasis::PossessionNotDivine);
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_window_is_bounded() {
        let filler = "and the waters covered the face of the deep ".repeat(3);
        let text = format!("God moved {}and he rested", filler);
        let decisions = resolver().resolve(&text);
        let he = decisions.iter().find(|d| d.pronoun == "he").unwrap();
        assert_eq!(he.basis, DecisionBasis::NoDivineMarker);
    }

    #[test]
    fn test_competing_human_is_low_confidence() {
        let text = "Moses went up to God, and he answered from the mountain";
        let decisions = resolver().resolve(text);
        let he = decisions.iter().find(|d| d.pronoun == "he").unwrap();
        assert_eq!(he.verdict, Verdict::Unresolved(ReviewReason::LowConfidence));
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_invocation_raises_confidence() {
        let text = "Moses cried, O LORD, he has heard";
        let decisions = resolver().resolve(text);
        let he = decisions.iter().find(|d| d.pronoun == "he").unwrap();
        assert!(he.capitalize());
        assert_eq!(he.score(), Some(0.85));
    }

    #[test]
    fn test_score_is_capped() {
        let text = "O LORD my God, he has heard the voice of my supplication";
        let decisions = resolver().resolve(text);
        let he = decisions.iter().find(|d| d.pronoun == "he").unwrap();
        let score = he.score().unwrap();
        assert!((0.75..=0.95).contains(&score), "score {score}");
    }

    #[test]
    fn test_first_person_in_divine_speech() {
        assert_eq!(
            run("Thus says the LORD, Let my people go, that they may serve me."),
            "Thus says the LORD, Let My people go, that they may serve Me."
        );
    }

    #[test]
    fn test_first_person_restricted_to_quotes() {
        let text = "I lifted my eyes, and the LORD said, \u{201C}Behold my servant.\u{201D}";
        assert_eq!(
            run(text),
            "I lifted my eyes, and the LORD said, \u{201C}Behold My servant.\u{201D}"
        );
    }

    #[test]
    fn test_first_person_needs_speech_marker() {
        let text = "God is my rock and my fortress";
        let decisions = resolver().resolve(text);
        assert!(decisions.iter().all(|d| d.basis != DecisionBasis::DivineSpeech));
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_never_lowercases_and_is_idempotent() {
        let text = "God said to Noah that He would remember his covenant; and he blessed him.";
        let once = run(text);
        assert_eq!(once.to_lowercase(), text.to_lowercase());
        assert_eq!(run(&once), once);
    }

    #[test]
    fn test_quoted_spans() {
        let spans = quoted_spans("a \"b\" c \u{201C}d\u{201D} \"e");
        assert_eq!(spans.len(), 3);
        let text = "a \"b\" c \u{201C}d\u{201D} \"e";
        let inner: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(inner, vec!["b", "d", "e"]);
    }
}
