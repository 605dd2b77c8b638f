//! Per-pronoun casing decisions.

use serde::{Deserialize, Serialize};

use crate::review::ReviewReason;

use super::pronouns::{capitalize_word, lowercase_word};

/// Where a decision's evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Settled by the reference corpus.
    Certain,
    /// Inferred from the candidate text's own context.
    Heuristic,
}

/// Three-valued casing verdict for one pronoun occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Reference-backed: `true` capitalizes, `false` lowercases.
    Certain(bool),
    /// Resolver-backed, with a score in `[0, 1]`. Never lowercases.
    Heuristic(bool, f64),
    /// Left unchanged and routed to review.
    Unresolved(ReviewReason),
}

/// The rule that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// Reference verse uses only capitalized forms.
    ReferenceDivineOnly,
    /// Reference verse uses only lowercase forms.
    ReferenceHumanOnly,
    /// No divine marker inside the left window.
    NoDivineMarker,
    /// A human marker sits closer to the pronoun than the divine marker.
    CloserHumanAntecedent,
    /// Object of an address construction ("said to him").
    Addressee,
    /// Possessive followed by a noun outside the divine-possession list.
    PossessionNotDivine,
    /// Nearest antecedent in the window is divine.
    DivineAntecedent,
    /// First person inside divine speech.
    DivineSpeech,
}

impl DecisionBasis {
    /// Snake-case name for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionBasis::ReferenceDivineOnly => "reference_divine_only",
            DecisionBasis::ReferenceHumanOnly => "reference_human_only",
            DecisionBasis::NoDivineMarker => "no_divine_marker",
            DecisionBasis::CloserHumanAntecedent => "closer_human_antecedent",
            DecisionBasis::Addressee => "addressee",
            DecisionBasis::PossessionNotDivine => "possession_not_divine",
            DecisionBasis::DivineAntecedent => "divine_antecedent",
            DecisionBasis::DivineSpeech => "divine_speech",
        }
    }
}

/// A casing decision for one pronoun occurrence in a verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronounDecision {
    /// Byte offset of the pronoun in the text it was decided on.
    pub start: usize,
    /// Byte offset one past the pronoun.
    pub end: usize,
    /// The pronoun as it appeared.
    pub pronoun: String,
    /// The verdict.
    pub verdict: Verdict,
    /// Rule that produced the verdict.
    pub basis: DecisionBasis,
}

impl PronounDecision {
    /// Create a new decision.
    pub fn new(
        start: usize,
        end: usize,
        pronoun: impl Into<String>,
        verdict: Verdict,
        basis: DecisionBasis,
    ) -> Self {
        Self {
            start,
            end,
            pronoun: pronoun.into(),
            verdict,
            basis,
        }
    }

    /// Whether the verdict capitalizes the pronoun.
    pub fn capitalize(&self) -> bool {
        matches!(
            self.verdict,
            Verdict::Certain(true) | Verdict::Heuristic(true, _)
        )
    }

    /// Evidence class, or `None` when unresolved.
    pub fn confidence(&self) -> Option<Confidence> {
        match self.verdict {
            Verdict::Certain(_) => Some(Confidence::Certain),
            Verdict::Heuristic(..) => Some(Confidence::Heuristic),
            Verdict::Unresolved(_) => None,
        }
    }

    /// Heuristic score, if any.
    pub fn score(&self) -> Option<f64> {
        match self.verdict {
            Verdict::Heuristic(_, score) => Some(score),
            _ => None,
        }
    }

    /// Whether the pronoun was routed to review.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.verdict, Verdict::Unresolved(_))
    }

    /// The rewritten word, or `None` when the decision changes nothing.
    pub fn replacement(&self) -> Option<String> {
        let word = match self.verdict {
            Verdict::Certain(true) | Verdict::Heuristic(true, _) => capitalize_word(&self.pronoun),
            Verdict::Certain(false) => lowercase_word(&self.pronoun),
            Verdict::Heuristic(false, _) | Verdict::Unresolved(_) => return None,
        };
        (word != self.pronoun).then_some(word)
    }
}
