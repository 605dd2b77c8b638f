//! Verse records, corpus I/O and reference lookup.

mod corpus;
mod index;
mod record;

pub(crate) use corpus::create_output_file;
pub use corpus::{write_jsonl, CorpusMetadata, CorpusReader};
pub use index::VerseIndex;
pub use record::{ReferenceRecord, VerseRecord};
