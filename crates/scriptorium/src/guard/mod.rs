//! Guards that decide whether a rewrite may be accepted.

mod drift;
mod invariant;

pub use drift::{DriftGuard, GuardConfig, GuardReason, GuardVerdict};
pub use invariant::InvariantChecker;
