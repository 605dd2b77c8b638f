//! Fuzz target for the approval CSV reader.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scriptorium::ApprovalSet;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = ApprovalSet::from_reader(data, "fuzz.csv");
});
