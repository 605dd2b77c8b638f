//! Pronoun patterns and span-level casing rewrites.

use once_cell::sync::Lazy;
use regex::Regex;

use super::decision::{DecisionBasis, PronounDecision, Verdict};
use super::usage::UsageClass;

/// Capitalized third-person masculine pronouns, whole words.
pub(crate) static CAPITAL_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:He|Him|His|Himself)\b").unwrap());

/// Lowercase third-person masculine pronouns, whole words.
pub(crate) static LOWER_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:he|him|his|himself)\b").unwrap());

/// Lowercase first-person singular pronouns, whole words.
pub(crate) static LOWER_FIRST_PERSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:my|me|mine|myself)\b").unwrap());

/// Uppercase the first character of a word.
pub fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character of a word.
pub fn lowercase_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether the word starting at `start` opens a sentence or a quotation.
pub fn is_sentence_initial(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    match before.chars().last() {
        None => true,
        Some(c) => matches!(c, '.' | '!' | '?' | '"' | '\u{201C}' | '\u{2018}' | '('),
    }
}

/// Reference-gated decisions for every pronoun the usage class settles.
///
/// `divine_only` capitalizes each lowercase form and `human_only` lowers
/// each capitalized one, sparing sentence- and quote-initial capitals only
/// when `keep_sentence_initial` is set. Every other class yields no
/// decisions.
pub fn reference_decisions(
    text: &str,
    class: UsageClass,
    keep_sentence_initial: bool,
) -> Vec<PronounDecision> {
    match class {
        UsageClass::DivineOnly => LOWER_PRONOUN
            .find_iter(text)
            .map(|m| {
                PronounDecision::new(
                    m.start(),
                    m.end(),
                    m.as_str(),
                    Verdict::Certain(true),
                    DecisionBasis::ReferenceDivineOnly,
                )
            })
            .collect(),
        UsageClass::HumanOnly => CAPITAL_PRONOUN
            .find_iter(text)
            .filter(|m| !(keep_sentence_initial && is_sentence_initial(text, m.start())))
            .map(|m| {
                PronounDecision::new(
                    m.start(),
                    m.end(),
                    m.as_str(),
                    Verdict::Certain(false),
                    DecisionBasis::ReferenceHumanOnly,
                )
            })
            .collect(),
        UsageClass::Mixed | UsageClass::None | UsageClass::Unavailable => Vec::new(),
    }
}

/// Apply decisions to `text`, returning the rewritten successor text.
///
/// Decisions must refer to non-overlapping spans of `text`. Decisions that
/// leave their word unchanged are skipped.
pub fn apply_decisions(text: &str, decisions: &[PronounDecision]) -> String {
    let mut ordered: Vec<&PronounDecision> = decisions.iter().collect();
    ordered.sort_by_key(|d| d.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for decision in ordered {
        if decision.start < cursor || decision.end > text.len() {
            continue;
        }
        let Some(replacement) = decision.replacement() else {
            continue;
        };
        out.push_str(&text[cursor..decision.start]);
        out.push_str(&replacement);
        cursor = decision.end;
    }
    out.push_str(&text[cursor..]);
    out
}
