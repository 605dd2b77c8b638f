//! JSONL corpus reading and writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, ScriptoriumError};

use super::record::{ReferenceRecord, VerseRecord};

/// Provenance of a loaded corpus file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of records read (blank lines excluded).
    pub record_count: usize,
    /// When the corpus was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl CorpusMetadata {
    fn new(path: &Path, contents: &[u8], record_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(contents);

        Self {
            file,
            path: path.to_path_buf(),
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: contents.len() as u64,
            record_count,
            loaded_at: Utc::now(),
        }
    }
}

/// One JSONL line before field validation.
///
/// Every field is optional so that a missing key surfaces as a structural
/// error with a line number instead of a bare serde message.
#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(rename = "ref")]
    reference: Option<String>,
    translation: Option<String>,
    text: Option<String>,
    kjv: Option<String>,
}

/// Reads newline-delimited verse corpora.
pub struct CorpusReader;

impl CorpusReader {
    /// Read a candidate corpus (`{ref, translation}` per line).
    pub fn read_verses(path: impl AsRef<Path>) -> Result<(Vec<VerseRecord>, CorpusMetadata)> {
        let path = path.as_ref();
        let contents = read_bytes(path)?;
        let verses = Self::parse_verses(&contents, &display_name(path))?;
        let metadata = CorpusMetadata::new(path, &contents, verses.len());
        Ok((verses, metadata))
    }

    /// Read a reference corpus (`{ref, kjv}` or `{ref, text}` per line).
    pub fn read_references(
        path: impl AsRef<Path>,
    ) -> Result<(Vec<ReferenceRecord>, CorpusMetadata)> {
        let path = path.as_ref();
        let contents = read_bytes(path)?;
        let references = Self::parse_references(&contents, &display_name(path))?;
        let metadata = CorpusMetadata::new(path, &contents, references.len());
        Ok((references, metadata))
    }

    /// Parse candidate records from raw JSONL bytes.
    pub fn parse_verses(bytes: &[u8], source_name: &str) -> Result<Vec<VerseRecord>> {
        parse_lines(bytes, source_name, |raw, line| {
            let reference = require_ref(raw.reference, source_name, line)?;
            let text = raw.translation.or(raw.text).ok_or_else(|| {
                ScriptoriumError::structural(source_name, line, "missing 'translation'")
            })?;
            Ok(VerseRecord::new(reference, text))
        })
    }

    /// Parse reference records from raw JSONL bytes.
    pub fn parse_references(bytes: &[u8], source_name: &str) -> Result<Vec<ReferenceRecord>> {
        parse_lines(bytes, source_name, |raw, line| {
            let reference = require_ref(raw.reference, source_name, line)?;
            let text = raw.kjv.or(raw.text).ok_or_else(|| {
                ScriptoriumError::structural(source_name, line, "missing 'kjv'")
            })?;
            Ok(ReferenceRecord::new(reference, text))
        })
    }
}

fn parse_lines<T>(
    bytes: &[u8],
    source_name: &str,
    mut build: impl FnMut(RawLine, usize) -> Result<T>,
) -> Result<Vec<T>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ScriptoriumError::structural(source_name, 0, format!("invalid UTF-8: {}", e))
    })?;

    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let raw: RawLine = serde_json::from_str(trimmed).map_err(|e| {
            ScriptoriumError::structural(source_name, line_no, format!("invalid JSON: {}", e))
        })?;
        records.push(build(raw, line_no)?);
    }

    Ok(records)
}

fn require_ref(reference: Option<String>, source_name: &str, line: usize) -> Result<String> {
    match reference.map(|r| r.trim().to_string()) {
        Some(r) if !r.is_empty() => Ok(r),
        _ => Err(ScriptoriumError::structural(source_name, line, "missing 'ref'")),
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ScriptoriumError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create (or truncate) an output file, creating parent directories as needed.
pub(crate) fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ScriptoriumError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(path).map_err(|e| {
        ScriptoriumError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Write records as newline-delimited JSON, one record per line.
pub fn write_jsonl<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    let file = create_output_file(path)?;

    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n").map_err(|e| ScriptoriumError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| ScriptoriumError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verses_skips_blank_lines() {
        let data = b"{\"ref\":\"GEN 1:1\",\"translation\":\"In the beginning\"}\n\n  \n{\"ref\":\"GEN 1:2\",\"translation\":\"The earth\"}\n";
        let verses = CorpusReader::parse_verses(data, "gen.jsonl").unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[1].reference, "GEN 1:2");
    }

    #[test]
    fn test_missing_ref_is_structural() {
        let data = b"{\"ref\":\"GEN 1:1\",\"translation\":\"a\"}\n{\"translation\":\"b\"}\n";
        let err = CorpusReader::parse_verses(data, "gen.jsonl").unwrap_err();
        match err {
            ScriptoriumError::Structural { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("ref"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_ref_is_structural() {
        let data = b"{\"ref\":\"  \",\"translation\":\"a\"}\n";
        assert!(CorpusReader::parse_verses(data, "gen.jsonl").is_err());
    }

    #[test]
    fn test_missing_translation_is_structural() {
        let data = b"{\"ref\":\"GEN 1:1\"}\n";
        let err = CorpusReader::parse_verses(data, "gen.jsonl").unwrap_err();
        assert!(err.to_string().contains("translation"));
    }

    #[test]
    fn test_parse_references_kjv_or_text() {
        let data = b"{\"ref\":\"PSA 23:1\",\"kjv\":\"The LORD is my shepherd\"}\n{\"ref\":\"PSA 23:2\",\"text\":\"He maketh me\"}\n";
        let refs = CorpusReader::parse_references(data, "kjv.jsonl").unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].text, "He maketh me");
    }

    #[test]
    fn test_write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("gen.jsonl");
        let verses = vec![
            VerseRecord::new("GEN 1:2", "second"),
            VerseRecord::new("GEN 1:1", "first"),
        ];

        write_jsonl(&path, &verses).unwrap();
        let (read, meta) = CorpusReader::read_verses(&path).unwrap();

        assert_eq!(read, verses);
        assert_eq!(meta.record_count, 2);
        assert!(meta.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_create_output_file_makes_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("exodus").join("stats.json");

        let mut file = create_output_file(&path).unwrap();
        file.write_all(b"{}").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_create_output_file_rejects_directory_target() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_output_file(dir.path()).unwrap_err();
        assert!(matches!(err, ScriptoriumError::Persistence(_)));
    }
}
