//! Reference-text pronoun usage classification.

use serde::{Deserialize, Serialize};

use super::pronouns::{CAPITAL_PRONOUN, LOWER_PRONOUN};

/// How the reference corpus uses third-person masculine pronouns in a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageClass {
    /// Only capitalized forms (He/Him/His/Himself).
    DivineOnly,
    /// Only lowercase forms (he/him/his/himself).
    HumanOnly,
    /// Both forms occur.
    Mixed,
    /// Neither form occurs.
    None,
    /// No reference text for this verse.
    Unavailable,
}

impl UsageClass {
    /// All classes, in reporting order.
    pub const ALL: [UsageClass; 5] = [
        UsageClass::DivineOnly,
        UsageClass::HumanOnly,
        UsageClass::Mixed,
        UsageClass::None,
        UsageClass::Unavailable,
    ];

    /// Classify a verse given its (optional) reference text.
    ///
    /// Total and deterministic: every input maps to exactly one class.
    pub fn classify(reference: Option<&str>) -> Self {
        match reference {
            Some(text) if !text.trim().is_empty() => Self::of_text(text),
            _ => UsageClass::Unavailable,
        }
    }

    /// Classify a reference text that is known to exist.
    pub fn of_text(text: &str) -> Self {
        let has_divine = CAPITAL_PRONOUN.is_match(text);
        let has_human = LOWER_PRONOUN.is_match(text);

        match (has_divine, has_human) {
            (true, true) => UsageClass::Mixed,
            (true, false) => UsageClass::DivineOnly,
            (false, true) => UsageClass::HumanOnly,
            (false, false) => UsageClass::None,
        }
    }

    /// Snake-case name, as written to manifests and stats.
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageClass::DivineOnly => "divine_only",
            UsageClass::HumanOnly => "human_only",
            UsageClass::Mixed => "mixed",
            UsageClass::None => "none",
            UsageClass::Unavailable => "unavailable",
        }
    }

    /// Whether the reference text settles every pronoun in the verse.
    pub fn is_certain(&self) -> bool {
        matches!(self, UsageClass::DivineOnly | UsageClass::HumanOnly)
    }
}

impl std::fmt::Display for UsageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divine_only() {
        let class = UsageClass::of_text("He spoke, and His word went forth to Him");
        assert_eq!(class, UsageClass::DivineOnly);
    }

    #[test]
    fn test_human_only() {
        let class = UsageClass::of_text("And Moses took his rod in his hand");
        assert_eq!(class, UsageClass::HumanOnly);
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            UsageClass::of_text("He said unto him, Go"),
            UsageClass::Mixed
        );
    }

    #[test]
    fn test_none_ignores_substrings() {
        // "the", "then", "them", "history" and "Hebrew" must not match.
        let class = UsageClass::of_text("Then the Hebrew history of them was written");
        assert_eq!(class, UsageClass::None);
    }

    #[test]
    fn test_unavailable() {
        assert_eq!(UsageClass::classify(None), UsageClass::Unavailable);
        assert_eq!(UsageClass::classify(Some("  ")), UsageClass::Unavailable);
        assert_eq!(
            UsageClass::classify(Some("In the beginning")),
            UsageClass::None
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&UsageClass::DivineOnly).unwrap();
        assert_eq!(json, "\"divine_only\"");
        assert_eq!(UsageClass::Mixed.to_string(), "mixed");
    }
}
