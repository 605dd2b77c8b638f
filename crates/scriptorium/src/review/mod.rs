//! Review queue, manifest persistence and approved overrides.
//!
//! The engine never blocks on an ambiguous verse: it records a
//! [`ReviewItem`] and moves on. A human later adjudicates the queue (or a
//! suggestion worksheet) and feeds `APPROVE` rows back through an
//! [`ApprovalSet`], which replaces verse texts outright.

mod approval;
mod item;
mod manifest;

pub use approval::{ApprovalSet, OverrideReport};
pub use item::{ReviewItem, ReviewQueue, ReviewReason};
