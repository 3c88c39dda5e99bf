#![no_main]

use gapfano::{decode, decoded_len};
use libfuzzer_sys::fuzz_target;

// Cap the destination so a hostile header cannot demand gigabytes.
const MAX_DST: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic or read out of bounds; any outcome
    // other than a clean value or a typed error is a bug.
    let declared = match decoded_len(data) {
        Ok(declared) => declared,
        Err(_) => return,
    };

    let mut dst = vec![0u32; declared.min(MAX_DST)];
    if let Ok(count) = decode(data, &mut dst) {
        assert_eq!(count, declared);
        // Decoded output is always strictly increasing and zero-free.
        for pair in dst[..count].windows(2) {
            assert!(pair[0] < pair[1], "non-monotone decode output");
        }
        if count > 0 {
            assert!(dst[0] >= 1, "decoded a zero id");
        }
    }
});
