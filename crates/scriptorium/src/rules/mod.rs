//! Deterministic rewrite rules applied after pronoun decisions.

mod calque;
mod divine_name;
mod numbers;
mod pipeline;
mod whitespace;

pub use calque::{repair_calques, CalqueRepair};
pub use divine_name::{case_divine_names, DivineNameCasing};
pub use numbers::{hyphenate_compounds, CompoundNumbers};
pub use pipeline::{PipelineOutput, Rule, RulePipeline};
pub use whitespace::{collapse_whitespace, CollapseWhitespace};
