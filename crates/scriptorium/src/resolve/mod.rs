//! Heuristic antecedent resolution for verses without reference coverage.

mod antecedent;
mod markers;

pub use antecedent::{quoted_spans, AntecedentResolver, ResolverConfig};
pub use markers::{window_end, window_start, MarkerMatch, PhraseMatcher};
