//! Normalize command - run the engine over a candidate corpus.

use std::path::PathBuf;

use colored::Colorize;
use scriptorium::input::write_jsonl;
use scriptorium::{
    ApprovalSet, CorpusReader, Engine, EngineConfig, ReviewReason, RunSummary, UsageClass,
    VerseIndex,
};

use super::{require_file, sibling_path};

pub struct NormalizeArgs {
    pub file: PathBuf,
    pub reference: Option<PathBuf>,
    pub baseline: Option<PathBuf>,
    pub approvals: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub review: Option<PathBuf>,
    pub stats: Option<PathBuf>,
}

pub fn run(args: NormalizeArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&args.file)?;

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        args.file.display().to_string().white()
    );

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let ruleset_version = config.rules.version.clone();

    let (verses, candidate_meta) = CorpusReader::read_verses(&args.file)?;
    let mut engine = Engine::new(config)?;

    let reference_meta = match &args.reference {
        Some(path) => {
            let (records, meta) = CorpusReader::read_references(path)?;
            engine = engine.with_reference(VerseIndex::from_references(records));
            Some(meta)
        }
        None => None,
    };

    let baseline_meta = match &args.baseline {
        Some(path) => {
            let (records, meta) = CorpusReader::read_verses(path)?;
            engine = engine.with_baseline(VerseIndex::from_verses(records));
            Some(meta)
        }
        None => None,
    };

    if let Some(path) = &args.approvals {
        let approvals = ApprovalSet::load(path)?;
        println!(
            "Loaded {} approvals from {} rows",
            approvals.len().to_string().white().bold(),
            approvals.rows_read()
        );
        engine = engine.with_approvals(approvals);
    }

    let result = engine.run(&verses)?;

    let output_path = args
        .output
        .unwrap_or_else(|| sibling_path(&args.file, "normalized.jsonl"));
    let review_path = args
        .review
        .unwrap_or_else(|| sibling_path(&args.file, "review.jsonl"));
    let stats_path = args
        .stats
        .unwrap_or_else(|| sibling_path(&args.file, "stats.json"));

    write_jsonl(&output_path, &result.records)?;
    result.review.save(&review_path)?;
    RunSummary::new(candidate_meta, result.stats.clone())
        .with_reference(reference_meta)
        .with_baseline(baseline_meta)
        .with_approvals(args.approvals.as_deref())
        .save(&stats_path)?;

    let stats = &result.stats;
    println!();
    println!(
        "Changed {} of {} verses (ruleset {})",
        stats.changed.to_string().white().bold(),
        stats.total,
        ruleset_version
    );
    println!(
        "Usage: {} divine, {} human, {} mixed, {} none, {} unavailable",
        stats.usage_count(UsageClass::DivineOnly).to_string().green(),
        stats.usage_count(UsageClass::HumanOnly).to_string().blue(),
        stats.usage_count(UsageClass::Mixed).to_string().yellow(),
        stats.usage_count(UsageClass::None),
        stats.usage_count(UsageClass::Unavailable).to_string().yellow()
    );
    println!(
        "Heuristic capitalizations: {}",
        stats.heuristic_capitalized.to_string().white().bold()
    );
    if stats.guard_rejected > 0 || stats.baseline_fallbacks > 0 {
        println!(
            "Drift guard: {} rewrites rejected, {} baseline fallbacks",
            stats.guard_rejected.to_string().red(),
            stats.baseline_fallbacks.to_string().red()
        );
    }
    if stats.overrides_applied > 0 {
        println!("Overrides applied: {}", stats.overrides_applied);
    }

    if verbose && !result.review.is_empty() {
        println!();
        println!("{}", "Review queue:".yellow().bold());
        for item in result.review.items() {
            match &item.detail {
                Some(detail) => println!("  {:12} {} ({})", item.reference, item.reason.label(), detail),
                None => println!("  {:12} {}", item.reference, item.reason.label()),
            }
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    if result.review.is_empty() {
        println!("{}", "Nothing needs review.".green());
    } else {
        println!(
            "{} verses need review ({} mixed, {} missing reference, {} guard, {} low confidence): {}",
            result.review.len().to_string().yellow().bold(),
            result.review.count(ReviewReason::MixedReference),
            result.review.count(ReviewReason::MissingReference),
            result.review.count(ReviewReason::GuardRejected),
            result.review.count(ReviewReason::LowConfidence),
            review_path.display()
        );
    }

    Ok(())
}
