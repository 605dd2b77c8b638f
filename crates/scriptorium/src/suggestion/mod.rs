//! Advisory capitalization suggestions.
//!
//! Suggestions are never applied by the engine. They are written to a
//! review worksheet; rows a human marks `APPROVE` come back in through
//! [`crate::review::ApprovalSet`].

mod generator;
mod suggestion;
mod worksheet;

pub use generator::SuggestionEngine;
pub use suggestion::{Suggestion, SuggestionKind};
pub use worksheet::{save_worksheet, sort_for_review, write_worksheet, WORKSHEET_COLUMNS};
