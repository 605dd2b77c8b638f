//! Ordered rule pipeline.

use super::calque::CalqueRepair;
use super::divine_name::DivineNameCasing;
use super::numbers::CompoundNumbers;
use super::whitespace::CollapseWhitespace;

/// A pure, idempotent text rewrite.
pub trait Rule: Send + Sync {
    /// Stable rule name, used in logs and audits.
    fn name(&self) -> &'static str;

    /// Rewrite `text`. Must satisfy `apply(apply(t)) == apply(t)`.
    fn apply(&self, text: &str) -> String;
}

/// Result of running the pipeline on one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Final text.
    pub text: String,
    /// Names of the rules that changed the text, in order.
    pub fired: Vec<&'static str>,
}

/// Explicit ordered list of named rules.
pub struct RulePipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl RulePipeline {
    /// The standard pipeline: whitespace, divine-name casing, calque repair,
    /// compound numbers.
    pub fn new() -> Self {
        Self::empty()
            .with_rule(CollapseWhitespace)
            .with_rule(DivineNameCasing)
            .with_rule(CalqueRepair)
            .with_rule(CompoundNumbers)
    }

    /// A pipeline with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Apply every rule in order.
    pub fn apply(&self, text: &str) -> String {
        self.run(text).text
    }

    /// Apply every rule in order, recording which ones changed the text.
    pub fn run(&self, text: &str) -> PipelineOutput {
        let mut current = text.to_string();
        let mut fired = Vec::new();

        for rule in &self.rules {
            let next = rule.apply(&current);
            if next != current {
                tracing::trace!(rule = rule.name(), "rule rewrote text");
                fired.push(rule.name());
                current = next;
            }
        }

        PipelineOutput {
            text: current,
            fired,
        }
    }
}

impl Default for RulePipeline {
    fn default() -> Self {
        Self::new()
    }
}
