//! Classify command - summarize pronoun usage in a reference corpus.

use std::path::PathBuf;

use colored::Colorize;
use scriptorium::{CorpusReader, UsageClass};
use serde::Serialize;

use super::require_file;

#[derive(Serialize)]
struct ClassCount {
    class: UsageClass,
    count: usize,
}

#[derive(Serialize)]
struct ClassifyReport {
    file: String,
    total: usize,
    classes: Vec<ClassCount>,
}

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let (records, meta) = CorpusReader::read_references(&file)?;

    let mut counts = [0usize; UsageClass::ALL.len()];
    for record in &records {
        let class = UsageClass::classify(Some(&record.text));
        if let Some(slot) = UsageClass::ALL.iter().position(|c| *c == class) {
            counts[slot] += 1;
        }
        if verbose && !json {
            println!("  {:12} {}", record.reference, class.as_str());
        }
    }

    let report = ClassifyReport {
        file: meta.file,
        total: records.len(),
        classes: UsageClass::ALL
            .iter()
            .zip(counts)
            .map(|(class, count)| ClassCount {
                class: *class,
                count,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format!("Usage classes: {}", report.file).bold());
    println!();
    for entry in &report.classes {
        let pct = if report.total > 0 {
            entry.count as f64 / report.total as f64 * 100.0
        } else {
            0.0
        };
        let label = match entry.class {
            UsageClass::DivineOnly => entry.class.as_str().green(),
            UsageClass::HumanOnly => entry.class.as_str().blue(),
            UsageClass::Mixed => entry.class.as_str().yellow(),
            _ => entry.class.as_str().normal(),
        };
        println!("  {:14} {:>6} ({:.1}%)", label, entry.count, pct);
    }
    println!();
    println!("Total: {}", report.total.to_string().white().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classify_reads_reference_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("kjv.jsonl");
        fs::write(
            &corpus,
            "{\"ref\":\"PSA 23:3\",\"kjv\":\"He restoreth my soul\"}\n\
             {\"ref\":\"GEN 37:3\",\"kjv\":\"and he loved him\"}\n",
        )
        .unwrap();

        assert!(run(corpus.clone(), true, false).is_ok());
        assert!(run(corpus, false, true).is_ok());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = run(dir.path().join("nope.jsonl"), true, false).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
