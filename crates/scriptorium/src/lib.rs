//! Scriptorium: deterministic normalization for machine-drafted scripture.
//!
//! Scriptorium takes candidate verse texts, settles the casing of pronouns
//! that refer to the deity, applies a fixed battery of style rules and
//! routes anything it cannot settle safely to a human review queue.
//!
//! # Core Principles
//!
//! - **Reference first**: a historical reference translation decides pronoun
//!   casing whenever it is unambiguous; heuristics only fill the gaps
//! - **Never lowercase on a guess**: the heuristic path only capitalizes
//! - **Non-blocking review**: ambiguity is recorded, never fatal
//! - **Reproducible**: the same inputs and rule tables give the same output
//!
//! # Example
//!
//! ```no_run
//! use scriptorium::{CorpusReader, Engine, EngineConfig, VerseIndex};
//!
//! let (verses, _) = CorpusReader::read_verses("draft.jsonl").unwrap();
//! let (references, _) = CorpusReader::read_references("kjv.jsonl").unwrap();
//!
//! let engine = Engine::new(EngineConfig::default())
//!     .unwrap()
//!     .with_reference(VerseIndex::from_references(references));
//! let result = engine.run(&verses).unwrap();
//!
//! println!("Changed: {}", result.stats.changed);
//! println!("Needs review: {}", result.review.len());
//! ```

pub mod classify;
pub mod error;
pub mod guard;
pub mod input;
pub mod resolve;
pub mod review;
pub mod rules;
pub mod ruleset;
pub mod suggestion;
pub mod summary;

mod engine;

pub use classify::{PronounDecision, UsageClass, Verdict};
pub use engine::{Engine, EngineConfig, RunResult, VerseOutcome};
pub use error::{Result, ScriptoriumError};
pub use guard::{DriftGuard, GuardConfig, GuardReason, GuardVerdict};
pub use input::{CorpusMetadata, CorpusReader, ReferenceRecord, VerseIndex, VerseRecord};
pub use review::{ApprovalSet, ReviewItem, ReviewQueue, ReviewReason};
pub use rules::{Rule, RulePipeline};
pub use ruleset::RuleSet;
pub use suggestion::{Suggestion, SuggestionEngine, SuggestionKind};
pub use summary::{RunStats, RunSummary};
