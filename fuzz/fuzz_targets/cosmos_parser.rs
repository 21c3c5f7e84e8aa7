//! Fuzz target for the Cosmos amino JSON parser.
//!
//! Arbitrary bytes go straight to the parser; bytes that happen to be a
//! JSON object are also checked for a stable sign document.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run cosmos_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txforge_chain::cosmos::parse_message;
use txforge_chain::{Chain, CosmosParser};

fuzz_target!(|data: &[u8]| {
    let parser = CosmosParser::new();

    for is_signed in [false, true] {
        let Ok(parsed) = parser.parse(data, is_signed) else {
            continue;
        };
        let Some(tx) = parsed.as_cosmos() else {
            continue;
        };

        let doc = tx.serialize_for_signature("fuzz");
        if let Ok(again) = parser.parse(doc.as_bytes(), false) {
            let again = again.as_cosmos().map(|t| t.serialize_for_signature("fuzz"));
            assert_eq!(again.as_deref(), Some(doc.as_str()));
        }
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = parse_message(&value);
    }
});
