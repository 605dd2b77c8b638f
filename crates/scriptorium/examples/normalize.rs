//! Example: Normalize a JSONL draft against an optional reference corpus.
//!
//! Usage:
//!   cargo run --example normalize -- <draft.jsonl> [reference.jsonl]

use std::env;
use std::path::Path;

use scriptorium::{CorpusReader, Engine, EngineConfig, UsageClass, VerseIndex};

fn main() -> scriptorium::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example normalize -- <draft.jsonl> [reference.jsonl]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let (verses, source) = CorpusReader::read_verses(path)?;

    let mut engine = Engine::new(EngineConfig::default())?;
    if let Some(reference) = args.get(2) {
        let (records, _) = CorpusReader::read_references(reference)?;
        engine = engine.with_reference(VerseIndex::from_references(records));
    }

    let result = engine.run(&verses)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Scriptorium: {} ({} verses, {})", source.file, source.record_count, source.hash);
    println!("{}", separator);

    for (before, after) in verses.iter().zip(&result.records) {
        if before.text != after.text {
            println!("{}", after.reference);
            println!("  - {}", before.text);
            println!("  + {}", after.text);
        }
    }

    println!();
    println!("Changed: {}/{}", result.stats.changed, result.stats.total);
    for class in UsageClass::ALL {
        println!("  {:<12} {}", class.as_str(), result.stats.usage_count(class));
    }
    println!("Review queue:");
    for item in result.review.items() {
        println!("  {} {}", item.reference, item.reason.label());
    }

    Ok(())
}
