//! CLI command implementations.

use std::path::{Path, PathBuf};

pub mod apply;
pub mod classify;
pub mod normalize;
pub mod suggest;

/// `<dir>/<stem>.<suffix>` next to `file`.
pub(crate) fn sibling_path(file: &Path, suffix: &str) -> PathBuf {
    let mut p = file.to_path_buf();
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    p.set_file_name(format!("{}.{}", stem, suffix));
    p
}

pub(crate) fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("data/draft.jsonl"), "review.jsonl"),
            PathBuf::from("data/draft.review.jsonl")
        );
        assert_eq!(
            sibling_path(Path::new("draft"), "stats.json"),
            PathBuf::from("draft.stats.json")
        );
    }
}
