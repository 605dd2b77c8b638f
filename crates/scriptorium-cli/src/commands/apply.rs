//! Apply command - replace approved verses from a worksheet.

use std::path::PathBuf;

use colored::Colorize;
use scriptorium::input::write_jsonl;
use scriptorium::{ApprovalSet, CorpusReader};

use super::{require_file, sibling_path};

pub fn run(
    file: PathBuf,
    approvals: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    require_file(&approvals)?;

    let (verses, _) = CorpusReader::read_verses(&file)?;
    let set = ApprovalSet::load(&approvals)?;

    let unknown: Vec<&str> = set
        .references()
        .filter(|r| !verses.iter().any(|v| v.reference == *r))
        .collect();
    for reference in &unknown {
        tracing::warn!(reference, "approved reference not found in corpus");
    }

    let report = set.apply(&verses);

    if verbose {
        for (before, after) in verses.iter().zip(&report.records) {
            if before.text != after.text {
                println!("{}", after.reference.bold());
                println!("  {} {}", "-".red(), before.text);
                println!("  {} {}", "+".green(), after.text);
            }
        }
    }

    let output_path = output.unwrap_or_else(|| sibling_path(&file, "approved.jsonl"));
    write_jsonl(&output_path, &report.records)?;

    println!(
        "Applied {} approvals ({} changed) to {} verses",
        report.approved.to_string().white().bold(),
        report.changed.to_string().green(),
        report.total
    );
    if !unknown.is_empty() {
        println!(
            "{} approved references were not in the corpus",
            unknown.len().to_string().yellow()
        );
    }
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
