//! Pronoun usage classification and casing decisions.
//!
//! The reference-gated path classifies a verse's reference text into a
//! [`UsageClass`] and derives [`PronounDecision`]s from it; the heuristic
//! path (see [`crate::resolve`]) produces the same decision type.

mod decision;
mod pronouns;
mod usage;

pub use decision::{Confidence, DecisionBasis, PronounDecision, Verdict};
pub use pronouns::{
    apply_decisions, capitalize_word, is_sentence_initial, lowercase_word, reference_decisions,
};
pub use usage::UsageClass;

pub(crate) use pronouns::{LOWER_FIRST_PERSON, LOWER_PRONOUN};
