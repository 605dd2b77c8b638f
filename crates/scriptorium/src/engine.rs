//! The normalization engine and its configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::{apply_decisions, reference_decisions, PronounDecision, UsageClass, Verdict};
use crate::error::{Result, ScriptoriumError};
use crate::guard::{DriftGuard, GuardConfig, GuardReason, InvariantChecker};
use crate::input::{VerseIndex, VerseRecord};
use crate::resolve::{AntecedentResolver, ResolverConfig};
use crate::review::{ApprovalSet, ReviewItem, ReviewQueue, ReviewReason};
use crate::rules::RulePipeline;
use crate::ruleset::RuleSet;
use crate::summary::RunStats;

/// Configuration for an [`Engine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Marker tables and whitelists.
    pub rules: RuleSet,
    /// Drift-guard bounds.
    pub guard: GuardConfig,
    /// Antecedent-resolver tuning.
    pub resolver: ResolverConfig,
    /// Emit a `missing_reference` review item for verses without reference text.
    pub review_missing_reference: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            guard: GuardConfig::default(),
            resolver: ResolverConfig::default(),
            review_missing_reference: true,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ScriptoriumError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&contents).map_err(|e| {
            ScriptoriumError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_guard(mut self, guard: GuardConfig) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_review_missing_reference(mut self, enabled: bool) -> Self {
        self.review_missing_reference = enabled;
        self
    }

    fn validate(&self) -> Result<()> {
        let guard = &self.guard;
        if !(guard.min_ratio > 0.0 && guard.min_ratio <= guard.max_ratio) {
            return Err(ScriptoriumError::Config(format!(
                "guard ratio bounds must satisfy 0 < min <= max (got {} and {})",
                guard.min_ratio, guard.max_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.resolver.min_confidence) {
            return Err(ScriptoriumError::Config(format!(
                "resolver.min_confidence must be within [0, 1] (got {})",
                self.resolver.min_confidence
            )));
        }
        Ok(())
    }
}

/// Everything the engine decided about one verse.
#[derive(Debug, Clone)]
pub struct VerseOutcome {
    /// The accepted successor record.
    pub record: VerseRecord,
    pub usage: UsageClass,
    /// Pronoun decisions, with spans into the pre-rewrite text.
    pub decisions: Vec<PronounDecision>,
    /// Pipeline rules that changed the text.
    pub fired_rules: Vec<&'static str>,
    pub review: Vec<ReviewItem>,
    /// Set when the drift guard rejected the rewrite.
    pub guard_rejection: Option<GuardReason>,
    /// Set when the candidate was replaced by its baseline draft.
    pub baseline_rejection: Option<GuardReason>,
    pub changed: bool,
}

impl VerseOutcome {
    /// Pronouns the resolver capitalized.
    pub fn heuristic_capitalized(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| matches!(d.verdict, Verdict::Heuristic(true, _)) && d.replacement().is_some())
            .count()
    }
}

/// Result of running the engine over a corpus.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Output records, in input order.
    pub records: Vec<VerseRecord>,
    pub review: ReviewQueue,
    pub stats: RunStats,
}

impl RunResult {
    /// Append another partial run (e.g. from another worker).
    pub fn merge(&mut self, other: RunResult) {
        self.records.extend(other.records);
        self.review.merge(other.review);
        self.stats.merge(&other.stats);
    }
}

/// Verse-at-a-time normalizer.
///
/// Each verse is processed independently: optional baseline drift check,
/// usage classification against the reference corpus, pronoun decisions
/// (reference-gated, else heuristic), the rule pipeline, the invariant
/// check and finally the drift guard.
pub struct Engine {
    config: EngineConfig,
    resolver: AntecedentResolver,
    pipeline: RulePipeline,
    guard: DriftGuard,
    invariant: InvariantChecker,
    reference: Option<VerseIndex>,
    baseline: Option<VerseIndex>,
    approvals: Option<ApprovalSet>,
}

impl Engine {
    /// Build an engine, compiling every marker table up front.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: AntecedentResolver::new(&config.rules, config.resolver.clone())?,
            pipeline: RulePipeline::new(),
            guard: DriftGuard::new(&config.rules, config.guard.clone()),
            invariant: InvariantChecker::new(&config.rules)?,
            reference: None,
            baseline: None,
            approvals: None,
            config,
        })
    }

    /// Use a reference corpus for reference-gated casing.
    pub fn with_reference(mut self, reference: VerseIndex) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Compare candidates against earlier drafts before normalizing.
    pub fn with_baseline(mut self, baseline: VerseIndex) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Replace approved verses outright.
    pub fn with_approvals(mut self, approvals: ApprovalSet) -> Self {
        self.approvals = Some(approvals);
        self
    }

    /// Replace the rule pipeline.
    pub fn with_pipeline(mut self, pipeline: RulePipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize one verse.
    ///
    /// Only an invariant violation is an error; ambiguity and guard
    /// rejections are reported in the outcome.
    pub fn process(&self, record: &VerseRecord) -> Result<VerseOutcome> {
        let reference = record.reference.as_str();
        let mut review = Vec::new();

        let (start, baseline_rejection) = self.baseline_check(record, &mut review);

        let reference_text = self.reference.as_ref().and_then(|idx| idx.get(reference));
        let usage = UsageClass::classify(reference_text);

        let decisions = match usage {
            UsageClass::DivineOnly | UsageClass::HumanOnly => reference_decisions(
                &start,
                usage,
                self.config.rules.keep_sentence_initial_capitals,
            ),
            UsageClass::Mixed => {
                review.push(ReviewItem::new(reference, ReviewReason::MixedReference));
                Vec::new()
            }
            UsageClass::None => Vec::new(),
            UsageClass::Unavailable => {
                if self.config.review_missing_reference {
                    review.push(ReviewItem::new(reference, ReviewReason::MissingReference));
                }
                self.resolver.resolve(&start)
            }
        };

        let low_confidence: Vec<&str> = decisions
            .iter()
            .filter(|d| d.is_unresolved())
            .map(|d| d.pronoun.as_str())
            .collect();
        if !low_confidence.is_empty() {
            review.push(
                ReviewItem::new(reference, ReviewReason::LowConfidence)
                    .with_detail(low_confidence.join(",")),
            );
        }

        for decision in &decisions {
            tracing::debug!(
                reference,
                pronoun = %decision.pronoun,
                basis = decision.basis.as_str(),
                verdict = ?decision.verdict,
                "pronoun decision"
            );
        }

        let cased = apply_decisions(&start, &decisions);
        let rewritten = self.pipeline.run(&cased);
        self.invariant.check(reference, &rewritten.text)?;

        // An unchanged verse has nothing to reject.
        let rejection = (rewritten.text != start)
            .then(|| self.guard.check(&start, &rewritten.text))
            .filter(|verdict| !verdict.accept);
        let (text, guard_rejection) = match rejection {
            None => (rewritten.text, None),
            Some(verdict) => {
                tracing::warn!(reference, reason = %verdict.reason, "rewrite rejected by drift guard");
                review.push(
                    ReviewItem::new(reference, ReviewReason::GuardRejected)
                        .with_detail(verdict.reason.as_str()),
                );
                (start, Some(verdict.reason))
            }
        };

        let changed = text != record.text;
        Ok(VerseOutcome {
            record: record.with_text(text),
            usage,
            decisions,
            fired_rules: if guard_rejection.is_some() {
                Vec::new()
            } else {
                rewritten.fired
            },
            review,
            guard_rejection,
            baseline_rejection,
            changed,
        })
    }

    /// Normalize a corpus, preserving record order.
    ///
    /// Approved overrides take precedence over the engine. Stops at the
    /// first invariant violation.
    pub fn run(&self, records: &[VerseRecord]) -> Result<RunResult> {
        let mut stats = RunStats::new(&self.config.rules.version);
        let mut review = ReviewQueue::new();
        let mut output = Vec::with_capacity(records.len());

        for record in records {
            stats.total += 1;

            if let Some(text) = self.approvals.as_ref().and_then(|a| a.get(&record.reference)) {
                stats.overrides_applied += 1;
                if text != record.text {
                    stats.changed += 1;
                }
                output.push(record.with_text(text));
                continue;
            }

            let outcome = self.process(record)?;
            stats.record_usage(outcome.usage);
            stats.heuristic_capitalized += outcome.heuristic_capitalized();
            if outcome.changed {
                stats.changed += 1;
            }
            if outcome.guard_rejection.is_some() {
                stats.guard_rejected += 1;
            }
            if outcome.baseline_rejection.is_some() {
                stats.baseline_fallbacks += 1;
            }
            review.extend(outcome.review);
            output.push(outcome.record);
        }

        stats.review_queue = review.len();
        tracing::info!(
            total = stats.total,
            changed = stats.changed,
            guard_rejected = stats.guard_rejected,
            review = stats.review_queue,
            "normalization run complete"
        );

        Ok(RunResult {
            records: output,
            review,
            stats,
        })
    }

    /// Drift-check the candidate against its baseline draft.
    ///
    /// Returns the text to normalize: the candidate, or the draft when the
    /// candidate drifted too far from it.
    fn baseline_check(
        &self,
        record: &VerseRecord,
        review: &mut Vec<ReviewItem>,
    ) -> (String, Option<GuardReason>) {
        let Some(draft) = self
            .baseline
            .as_ref()
            .and_then(|idx| idx.get(&record.reference))
        else {
            return (record.text.clone(), None);
        };

        let verdict = self.guard.check(draft, &record.text);
        if verdict.accept {
            return (record.text.clone(), None);
        }

        tracing::warn!(
            reference = %record.reference,
            reason = %verdict.reason,
            "candidate drifted from baseline; keeping baseline"
        );
        review.push(
            ReviewItem::new(&record.reference, ReviewReason::GuardRejected)
                .with_detail(format!("baseline:{}", verdict.reason)),
        );
        (draft.to_string(), Some(verdict.reason))
    }
}
