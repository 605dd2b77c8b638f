//! Review worksheet CSV for suggestions.

use std::io::Write;
use std::path::Path;

use crate::error::{Result, ScriptoriumError};
use crate::input::create_output_file;

use super::Suggestion;

/// Worksheet column order. `decision` is left blank for the reviewer.
pub const WORKSHEET_COLUMNS: [&str; 7] = [
    "decision",
    "ref",
    "confidence",
    "kind",
    "reason",
    "original",
    "suggested",
];

/// Sort suggestions by reference, then by descending confidence.
pub fn sort_for_review(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        a.reference
            .cmp(&b.reference)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

/// Write a worksheet to any writer.
pub fn write_worksheet<W: Write>(writer: W, suggestions: &[Suggestion]) -> Result<()> {
    let mut sorted = suggestions.to_vec();
    sort_for_review(&mut sorted);

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(WORKSHEET_COLUMNS)?;
    for s in &sorted {
        let confidence = format!("{:.2}", s.confidence);
        csv_writer.write_record([
            "",
            s.reference.as_str(),
            confidence.as_str(),
            s.kind.as_str(),
            s.reason.as_str(),
            s.original.as_str(),
            s.suggested.as_str(),
        ])?;
    }
    csv_writer
        .flush()
        .map_err(|e| ScriptoriumError::Persistence(format!("Failed to flush worksheet: {}", e)))?;
    Ok(())
}

/// Write a worksheet file, creating parent directories as needed.
pub fn save_worksheet(path: impl AsRef<Path>, suggestions: &[Suggestion]) -> Result<()> {
    let file = create_output_file(path.as_ref())?;
    write_worksheet(file, suggestions)
}
