//! Suggest command - write a capitalization worksheet.

use std::path::PathBuf;

use colored::Colorize;
use scriptorium::suggestion::save_worksheet;
use scriptorium::{CorpusReader, EngineConfig, SuggestionEngine, SuggestionKind};

use super::{require_file, sibling_path};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    min_confidence: f64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    println!(
        "{} {}",
        "Scanning".cyan().bold(),
        file.display().to_string().white()
    );

    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let (verses, _) = CorpusReader::read_verses(&file)?;

    let engine = SuggestionEngine::new(&config.rules, config.resolver.clone())?;
    let mut suggestions = engine.generate(&verses);
    suggestions.retain(|s| s.confidence >= min_confidence);

    let pronouns = suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::Pronoun)
        .count();
    let titles = suggestions.len() - pronouns;

    if verbose {
        for s in &suggestions {
            println!(
                "  {:12} {:.2} {:8} {}",
                s.reference,
                s.confidence,
                s.kind.as_str(),
                s.suggested
            );
        }
    }

    let output_path = output.unwrap_or_else(|| sibling_path(&file, "suggestions.csv"));
    save_worksheet(&output_path, &suggestions)?;

    println!(
        "Generated {} suggestions ({} pronoun, {} title)",
        suggestions.len().to_string().white().bold(),
        pronouns.to_string().yellow(),
        titles.to_string().blue()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    println!(
        "Mark rows {} and run {}",
        "APPROVE".bold(),
        format!("scriptorium apply {} {}", file.display(), output_path.display())
            .cyan()
            .bold()
    );

    Ok(())
}
