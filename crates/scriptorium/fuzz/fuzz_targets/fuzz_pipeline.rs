//! Fuzz target for the engine on a single verse.
//!
//! Checks that the rule pipeline is idempotent on arbitrary text and that
//! processing a verse never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scriptorium::{Engine, EngineConfig, RulePipeline, VerseRecord};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let pipeline = RulePipeline::new();
    let once = pipeline.apply(text);
    assert_eq!(pipeline.apply(&once), once);

    if let Ok(engine) = Engine::new(EngineConfig::default()) {
        let _ = engine.process(&VerseRecord::new("FUZ 1:1", text));
    }
});
