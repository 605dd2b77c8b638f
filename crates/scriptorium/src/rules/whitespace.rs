use once_cell::sync::Lazy;
use regex::Regex;

use super::Rule;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse line breaks and whitespace runs into single spaces, then trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Whitespace normalization rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl Rule for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }

    fn apply(&self, text: &str) -> String {
        collapse_whitespace(text)
    }
}
