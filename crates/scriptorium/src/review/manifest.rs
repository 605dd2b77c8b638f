//! Review manifest persistence (`{ref, reason, detail?}` per line).

use std::fs;
use std::path::Path;

use crate::error::{Result, ScriptoriumError};
use crate::input::write_jsonl;

use super::item::{ReviewItem, ReviewQueue};

impl ReviewQueue {
    /// Write the queue as a JSONL manifest.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_jsonl(path, self.items())
    }

    /// Load a JSONL manifest written by [`ReviewQueue::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ScriptoriumError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut queue = ReviewQueue::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let item: ReviewItem = serde_json::from_str(line).map_err(|e| {
                ScriptoriumError::structural(
                    path.display().to_string(),
                    idx + 1,
                    format!("invalid review item: {}", e),
                )
            })?;
            queue.push(item);
        }
        Ok(queue)
    }
}
