//! Data-driven word tables shared by every stage of the engine.
//!
//! All marker lists, whitelists and phrase pairs live here rather than as
//! literals inside the rules, so a corpus can be tuned (e.g. a book with a
//! different cast of human names) by loading a different `RuleSet`.

use serde::{Deserialize, Serialize};

/// Current version of the default rule tables.
pub const RULESET_VERSION: &str = "1.0.0";

/// A divine phrase whose canonical and lowercase forms must never co-occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantPhrase {
    /// Canonical divine-capitalized form (e.g. "angel of the LORD").
    pub canonical: String,
    /// Forbidden companion form (e.g. "angel of the Lord").
    pub variant: String,
}

impl InvariantPhrase {
    /// Create a new phrase pair.
    pub fn new(canonical: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            variant: variant.into(),
        }
    }
}

/// Versioned marker tables and whitelists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Version of the tables, recorded in run summaries.
    pub version: String,

    /// Names and titles of the deity (case-sensitive phrases).
    pub divine_markers: Vec<String>,

    /// Human names and roles that compete as pronoun antecedents.
    pub human_markers: Vec<String>,

    /// Verbs that introduce an addressee ("said to him").
    pub address_verbs: Vec<String>,

    /// Prepositions that follow an address verb.
    pub address_prepositions: Vec<String>,

    /// Nouns conventionally possessed by the deity ("His glory").
    pub divine_possessions: Vec<String>,

    /// Reporting formulas that mark divine first-person speech.
    pub divine_speech_markers: Vec<String>,

    /// Vocative invocations that raise heuristic confidence.
    pub invocations: Vec<String>,

    /// Divine phrases checked by the mixed-casing invariant.
    pub invariant_phrases: Vec<InvariantPhrase>,

    /// Metaphors proposed as divine titles ("my rock").
    pub title_phrases: Vec<String>,

    /// Lead-in words that mark injected commentary.
    pub commentary_lead_ins: Vec<String>,

    /// Keep a capitalized pronoun that opens a sentence or quotation when a
    /// `human_only` reference lowers the rest. Off by default: every
    /// capitalized form is lowered.
    pub keep_sentence_initial_capitals: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            version: RULESET_VERSION.to_string(),
            divine_markers: strings(&[
                "LORD",
                "GOD",
                "God",
                "the Lord",
                "Lord God",
                "Almighty",
                "Most High",
                "Holy One",
            ]),
            human_markers: strings(&[
                "Adam", "Noah", "Abram", "Abraham", "Isaac", "Jacob", "Israel", "Esau",
                "Joseph", "Judah", "Laban", "Lot", "Moses", "Aaron", "Pharaoh", "Jethro",
                "Joshua", "Caleb", "Balaam", "Balak", "Samuel", "Saul", "David", "Solomon",
                "Elijah", "Elisha", "man", "king", "servant", "prophet", "priest", "son",
            ]),
            address_verbs: strings(&[
                "said", "say", "says", "spoke", "speak", "spoken", "called", "call", "cried",
                "answered", "replied", "commanded", "declared", "shouted", "wrote", "sent",
            ]),
            address_prepositions: strings(&["to", "unto"]),
            divine_possessions: strings(&[
                "name", "glory", "covenant", "word", "words", "hand", "arm", "holiness",
                "mercy", "steadfast", "lovingkindness", "commandments", "commandment",
                "statutes", "law", "laws", "spirit", "throne", "anger", "wrath", "face",
                "voice", "power", "might", "ways", "righteousness", "salvation",
                "sanctuary", "presence", "promise", "counsel", "judgments",
            ]),
            divine_speech_markers: strings(&[
                "says the LORD",
                "declares the LORD",
                "said the LORD",
                "says the Lord GOD",
                "declares the Lord GOD",
                "the LORD said",
                "the LORD spoke",
                "the LORD answered",
                "God said",
                "God spoke",
                "the word of the LORD came",
                "I am the LORD",
            ]),
            invocations: strings(&["O LORD", "O God", "O Lord GOD"]),
            invariant_phrases: vec![InvariantPhrase::new(
                "angel of the LORD",
                "angel of the Lord",
            )],
            title_phrases: strings(&["rock", "fortress", "stronghold", "high tower", "shield"]),
            commentary_lead_ins: strings(&["note:", "commentary:", "explanation:", "translator"]),
            keep_sentence_initial_capitals: false,
        }
    }
}

impl RuleSet {
    /// Create the default rule tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the human marker list (per-book tuning).
    pub fn with_human_markers(mut self, markers: Vec<String>) -> Self {
        self.human_markers = markers;
        self
    }

    /// Add extra human markers to the defaults.
    pub fn extend_human_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.human_markers.extend(markers.into_iter().map(Into::into));
        self
    }

    /// Replace the divine marker list.
    pub fn with_divine_markers(mut self, markers: Vec<String>) -> Self {
        self.divine_markers = markers;
        self
    }

    /// Replace the divine possession whitelist.
    pub fn with_divine_possessions(mut self, nouns: Vec<String>) -> Self {
        self.divine_possessions = nouns;
        self
    }

    /// Keep sentence-initial capitals under a `human_only` reference.
    pub fn with_keep_sentence_initial_capitals(mut self, keep: bool) -> Self {
        self.keep_sentence_initial_capitals = keep;
        self
    }

    /// Set the version label.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_populated() {
        let rules = RuleSet::default();
        assert_eq!(rules.version, RULESET_VERSION);
        assert!(rules.divine_markers.iter().any(|m| m == "LORD"));
        assert!(rules.divine_possessions.iter().any(|n| n == "glory"));
        assert_eq!(rules.invariant_phrases.len(), 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"version": "exodus-1", "human_markers": ["Moses", "Aaron"]}"#;
        let rules: RuleSet = serde_json::from_str(json).unwrap();

        assert_eq!(rules.version, "exodus-1");
        assert_eq!(rules.human_markers, vec!["Moses", "Aaron"]);
        assert!(!rules.divine_markers.is_empty());
    }

    #[test]
    fn test_extend_human_markers() {
        let rules = RuleSet::new().extend_human_markers(["Boaz", "Naomi"]);
        assert!(rules.human_markers.iter().any(|m| m == "Boaz"));
        assert!(rules.human_markers.iter().any(|m| m == "Moses"));
    }
}
