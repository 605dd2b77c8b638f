//! Fuzz target for the JSONL corpus reader.
//!
//! Malformed input must surface as a structural error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scriptorium::CorpusReader;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = CorpusReader::parse_verses(data, "fuzz.jsonl");
    let _ = CorpusReader::parse_references(data, "fuzz.jsonl");
});
