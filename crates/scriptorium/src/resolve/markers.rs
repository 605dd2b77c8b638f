//! Compiled phrase matchers for marker tables.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// A matched phrase span (byte offsets into the searched text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    pub start: usize,
    pub end: usize,
}

/// Whole-word matcher over a list of phrases.
///
/// Multi-word phrases tolerate any run of whitespace between words. Longer
/// phrases are tried first so "Lord God" wins over "God" at the same spot.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    regex: Option<Regex>,
}

impl PhraseMatcher {
    /// Compile a matcher. An empty phrase list never matches.
    pub fn new(phrases: &[String], case_insensitive: bool) -> Result<Self> {
        let mut cleaned: Vec<&str> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if cleaned.is_empty() {
            return Ok(Self { regex: None });
        }
        cleaned.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        cleaned.dedup();

        let alternatives: Vec<String> = cleaned.iter().map(|p| phrase_pattern(p)).collect();
        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(case_insensitive)
            .build()?;

        Ok(Self { regex: Some(regex) })
    }

    /// Whether any phrase occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }

    /// First occurrence in `text`.
    pub fn first_in(&self, text: &str) -> Option<MarkerMatch> {
        let m = self.regex.as_ref()?.find(text)?;
        Some(MarkerMatch {
            start: m.start(),
            end: m.end(),
        })
    }

    /// Last (rightmost) occurrence in `text`.
    pub fn last_in(&self, text: &str) -> Option<MarkerMatch> {
        self.regex.as_ref()?.find_iter(text).last().map(|m| MarkerMatch {
            start: m.start(),
            end: m.end(),
        })
    }

    /// All occurrences in `text`.
    pub fn find_all(&self, text: &str) -> Vec<MarkerMatch> {
        match &self.regex {
            Some(regex) => regex
                .find_iter(text)
                .map(|m| MarkerMatch {
                    start: m.start(),
                    end: m.end(),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Byte offset `chars` characters to the left of `pos` (clamped at 0).
pub fn window_start(text: &str, pos: usize, chars: usize) -> usize {
    if chars == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .take(chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(pos)
}

/// Byte offset `chars` characters to the right of `pos` (clamped at the end).
pub fn window_end(text: &str, pos: usize, chars: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(chars)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(phrases: &[&str]) -> PhraseMatcher {
        let owned: Vec<String> = phrases.iter().map(|s| s.to_string()).collect();
        PhraseMatcher::new(&owned, false).unwrap()
    }

    #[test]
    fn test_whole_word_and_case_sensitive() {
        let m = matcher(&["God", "LORD"]);
        assert!(m.is_match("And God said"));
        assert!(!m.is_match("the gods of Egypt"));
        assert!(!m.is_match("Godhead"));
        assert!(!m.is_match("the Lord of the house"));
    }

    #[test]
    fn test_longest_phrase_first() {
        let m = matcher(&["God", "Lord God"]);
        let found = m.first_in("the Lord God formed").unwrap();
        assert_eq!(&"the Lord God formed"[found.start..found.end], "Lord God");
    }

    #[test]
    fn test_multiword_tolerates_whitespace() {
        let m = matcher(&["Most High"]);
        assert!(m.is_match("the Most   High"));
    }

    #[test]
    fn test_empty_never_matches() {
        let m = PhraseMatcher::new(&[], false).unwrap();
        assert!(!m.is_match("anything"));
        assert!(m.last_in("anything").is_none());
    }

    #[test]
    fn test_last_in() {
        let m = matcher(&["Moses"]);
        let text = "Moses and Aaron and Moses";
        assert_eq!(m.last_in(text).unwrap().start, 20);
        assert_eq!(m.find_all(text).len(), 2);
    }

    #[test]
    fn test_windows_respect_char_boundaries() {
        let text = "\u{201C}abc\u{201D} de";
        let pos = text.find('d').unwrap();
        let start = window_start(text, pos, 3);
        assert!(text.is_char_boundary(start));
        assert_eq!(&text[start..pos], "c\u{201D} ");
        assert_eq!(window_start(text, pos, 0), pos);
        assert_eq!(window_start(text, pos, 100), 0);
        assert_eq!(window_end(text, 0, 2), "\u{201C}a".len());
        assert_eq!(window_end(text, 0, 100), text.len());
    }
}
