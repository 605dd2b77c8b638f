//! Lookup from verse reference to text.

use indexmap::IndexMap;

use super::record::{ReferenceRecord, VerseRecord};

/// Read-only map from verse reference to text.
///
/// Used for the reference corpus and for baseline drafts. Empty or
/// whitespace-only texts are not indexed, so a blank reference verse is
/// indistinguishable from a missing one. Entries keep first-seen order.
#[derive(Debug, Clone, Default)]
pub struct VerseIndex {
    entries: IndexMap<String, String>,
}

impl VerseIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from reference-corpus records. Later duplicates win.
    pub fn from_references(records: impl IntoIterator<Item = ReferenceRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record.reference, record.text);
        }
        index
    }

    /// Build an index from verse records (e.g. a baseline draft corpus).
    pub fn from_verses(records: impl IntoIterator<Item = VerseRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record.reference, record.text);
        }
        index
    }

    /// Insert or replace an entry. A blank text removes the reference.
    pub fn insert(&mut self, reference: impl Into<String>, text: impl Into<String>) {
        let reference = reference.into().trim().to_string();
        let text = text.into();
        if text.trim().is_empty() {
            self.entries.shift_remove(&reference);
            return;
        }
        self.entries.insert(reference, text);
    }

    /// Look up the text for a reference.
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference.trim()).map(String::as_str)
    }

    /// Whether a reference has indexed text.
    pub fn contains(&self, reference: &str) -> bool {
        self.get(reference).is_some()
    }

    /// Number of indexed references.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let index = VerseIndex::from_references(vec![
            ReferenceRecord::new("GEN 1:1", "In the beginning God created"),
            ReferenceRecord::new("GEN 1:2", "And the earth was without form"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("GEN 1:1"), Some("In the beginning God created"));
        assert_eq!(index.get(" GEN 1:1 "), Some("In the beginning God created"));
        assert_eq!(index.get("GEN 1:3"), None);
    }

    #[test]
    fn test_blank_text_is_absent() {
        let index = VerseIndex::from_references(vec![ReferenceRecord::new("GEN 1:1", "   ")]);
        assert!(!index.contains("GEN 1:1"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_last_wins() {
        let index = VerseIndex::from_verses(vec![
            VerseRecord::new("EXO 1:1", "first"),
            VerseRecord::new("EXO 1:1", "second"),
        ]);
        assert_eq!(index.get("EXO 1:1"), Some("second"));
    }

    #[test]
    fn test_blank_duplicate_clears_entry() {
        let index = VerseIndex::from_references(vec![
            ReferenceRecord::new("EXO 1:1", "Now these are the names"),
            ReferenceRecord::new("EXO 1:2", "Reuben, Simeon, Levi, and Judah"),
            ReferenceRecord::new("EXO 1:1", ""),
        ]);
        assert!(!index.contains("EXO 1:1"));
        assert_eq!(index.len(), 1);
    }
}
