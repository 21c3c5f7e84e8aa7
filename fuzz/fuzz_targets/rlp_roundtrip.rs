//! Fuzz target for the RLP codec.
//!
//! Every item the decoder accepts must encode back to the exact input.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run rlp_roundtrip
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txforge_chain::rlp;

fuzz_target!(|data: &[u8]| {
    if let Ok(item) = rlp::decode(data) {
        assert_eq!(rlp::encode(&item), data);
    }
});
