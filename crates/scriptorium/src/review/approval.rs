//! Human-approved overrides loaded from a CSV worksheet.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Result, ScriptoriumError};
use crate::input::VerseRecord;

const REQUIRED_COLUMNS: [&str; 4] = ["decision", "ref", "original", "suggested"];

/// Approved replacement texts keyed by reference.
///
/// Only rows whose `decision` is `APPROVE` (trimmed, case-insensitive) are
/// kept. When a reference is approved twice the later row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalSet {
    approvals: IndexMap<String, String>,
    rows_read: usize,
}

/// Summary of applying an [`ApprovalSet`] to a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideReport {
    pub total: usize,
    pub approved: usize,
    pub changed: usize,
    pub records: Vec<VerseRecord>,
}

impl ApprovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load approvals from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScriptoriumError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Parse approvals from any CSV reader.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut columns = [0usize; 4];
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    ScriptoriumError::structural(
                        source_name,
                        1,
                        format!("missing required column '{}'", name),
                    )
                })?;
        }
        let [decision_col, ref_col, _, suggested_col] = columns;

        let mut set = Self::new();
        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            let line = index + 2;
            set.rows_read += 1;

            let decision = row.get(decision_col).unwrap_or("").trim();
            if !decision.eq_ignore_ascii_case("APPROVE") {
                continue;
            }

            let reference = row.get(ref_col).unwrap_or("").trim();
            if reference.is_empty() {
                return Err(ScriptoriumError::structural(
                    source_name,
                    line,
                    "APPROVE row has an empty ref",
                ));
            }

            let suggested = row.get(suggested_col).unwrap_or("").to_string();
            if set.approvals.contains_key(reference) {
                tracing::debug!(reference, line, "later approval replaces earlier one");
            }
            set.insert(reference, suggested);
        }

        Ok(set)
    }

    /// Record an approval. A later insert for the same reference wins.
    pub fn insert(&mut self, reference: impl Into<String>, text: impl Into<String>) {
        let reference = reference.into();
        // Remove first so the reference moves to its latest position.
        self.approvals.shift_remove(&reference);
        self.approvals.insert(reference, text.into());
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.approvals.get(reference).map(|s| s.as_str())
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.approvals.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.approvals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvals.is_empty()
    }

    /// Data rows read from the CSV, approved or not.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Approved references in approval order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.approvals.keys().map(|k| k.as_str())
    }

    /// Replace approved verses outright, preserving corpus order.
    pub fn apply(&self, records: &[VerseRecord]) -> OverrideReport {
        let mut approved = 0;
        let mut changed = 0;

        let records = records
            .iter()
            .map(|record| match self.get(&record.reference) {
                Some(text) => {
                    approved += 1;
                    if text != record.text {
                        changed += 1;
                    }
                    record.with_text(text)
                }
                None => record.clone(),
            })
            .collect::<Vec<_>>();

        OverrideReport {
            total: records.len(),
            approved,
            changed,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<ApprovalSet> {
        ApprovalSet::from_reader(csv.as_bytes(), "approvals.csv")
    }

    #[test]
    fn test_only_approve_rows_kept() {
        let set = parse(
            "decision,ref,original,suggested\n\
             APPROVE,GEN 1:1,a,A\n\
             reject,GEN 1:2,b,B\n\
             ,GEN 1:3,c,C\n\
             \x20approve ,GEN 1:4,d,D\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.rows_read(), 4);
        assert_eq!(set.get("GEN 1:1"), Some("A"));
        assert_eq!(set.get("GEN 1:4"), Some("D"));
        assert!(!set.contains("GEN 1:2"));
    }

    #[test]
    fn test_last_approval_wins() {
        let set = parse(
            "decision,ref,original,suggested\n\
             APPROVE,PSA 18:2,x,first\n\
             APPROVE,PSA 18:2,x,second\n",
        )
        .unwrap();
        assert_eq!(set.get("PSA 18:2"), Some("second"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_extra_columns_and_order() {
        let set = parse(
            "confidence,suggested,ref,decision,kind,original\n\
             0.9,New text,JHN 1:1,APPROVE,pronoun,Old text\n",
        )
        .unwrap();
        assert_eq!(set.get("JHN 1:1"), Some("New text"));
    }

    #[test]
    fn test_missing_column_is_structural() {
        let err = parse("decision,ref,suggested\nAPPROVE,GEN 1:1,x\n").unwrap_err();
        assert!(matches!(err, ScriptoriumError::Structural { .. }));
        assert!(err.to_string().contains("original"));
    }

    #[test]
    fn test_empty_ref_on_approve_is_structural() {
        let err = parse("decision,ref,original,suggested\nAPPROVE, ,a,b\n").unwrap_err();
        match err {
            ScriptoriumError::Structural { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_ref_on_other_rows_is_ignored() {
        let set = parse("decision,ref,original,suggested\n,,a,b\n").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_apply_preserves_order_and_counts() {
        let mut set = ApprovalSet::new();
        set.insert("GEN 1:2", "replaced");
        set.insert("GEN 1:3", "same");

        let records = vec![
            VerseRecord::new("GEN 1:1", "one"),
            VerseRecord::new("GEN 1:2", "two"),
            VerseRecord::new("GEN 1:3", "same"),
        ];
        let report = set.apply(&records);

        assert_eq!(report.total, 3);
        assert_eq!(report.approved, 2);
        assert_eq!(report.changed, 1);
        assert_eq!(report.records[1].text, "replaced");
        assert_eq!(report.records[0].reference, "GEN 1:1");
    }
}
