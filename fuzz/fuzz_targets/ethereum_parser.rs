//! Fuzz target for the Ethereum transaction parser.
//!
//! Feeds arbitrary bytes to both parsing modes. The parser must reject
//! malformed input with an error, never a panic.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run ethereum_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txforge_chain::{Chain, EthereumParser};

fuzz_target!(|data: &[u8]| {
    let parser = EthereumParser::new();

    for is_signed in [false, true] {
        let Ok(parsed) = parser.parse(data, is_signed) else {
            continue;
        };
        let Some(tx) = parsed.as_ethereum() else {
            continue;
        };

        // anything accepted must re-encode and parse back to itself
        if let Ok(encoded) = tx.serialize() {
            let again = parser.parse(&encoded, tx.is_signed());
            assert_eq!(again.ok().as_ref(), Some(&parsed));
        }
        let _ = tx.hash();
        let _ = tx.max_fee();
    }
});
