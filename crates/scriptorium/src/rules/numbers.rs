use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Rule;

// Group 3 captures a trailing "hundred"/"thousand"; those phrases are kept.
static TENS_AND_UNITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)\s+and\s+(one|two|three|four|five|six|seven|eight|nine)\b(\s+(?:hundred|thousand)\b)?",
    )
    .unwrap()
});

/// Hyphenate "sixty and five" style compounds into "sixty-five".
pub fn hyphenate_compounds(text: &str) -> String {
    TENS_AND_UNITS
        .replace_all(text, |caps: &Captures| {
            if caps.get(3).is_some() {
                caps[0].to_string()
            } else {
                format!("{}-{}", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

/// Compound-number rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundNumbers;

impl Rule for CompoundNumbers {
    fn name(&self) -> &'static str {
        "compound_numbers"
    }

    fn apply(&self, text: &str) -> String {
        hyphenate_compounds(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenates() {
        assert_eq!(
            hyphenate_compounds("Enoch lived sixty and five years"),
            "Enoch lived sixty-five years"
        );
        assert_eq!(hyphenate_compounds("Thirty and two kings"), "Thirty-two kings");
    }

    #[test]
    fn test_skips_before_magnitude() {
        let text = "twenty and two thousand men";
        assert_eq!(hyphenate_compounds(text), text);
        let text = "seventy and seven hundred";
        assert_eq!(hyphenate_compounds(text), text);
    }

    #[test]
    fn test_requires_whole_words() {
        let text = "ninety and nineteen";
        assert_eq!(hyphenate_compounds(text), text);
    }

    #[test]
    fn test_idempotent() {
        let once = hyphenate_compounds("forty and nine days");
        assert_eq!(hyphenate_compounds(&once), once);
    }
}
