#![no_main]

use gapfano::{decode, encode, max_encoded_len};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Bytes are interpreted as u16 gap deltas building a strictly
    // increasing id sequence; saturation at u32::MAX ends the list.
    let mut ids: Vec<u32> = Vec::with_capacity(data.len() / 2);
    let mut last = 0u32;
    for chunk in data.chunks(2) {
        if chunk.len() < 2 {
            break;
        }
        let delta = u32::from(u16::from_le_bytes([chunk[0], chunk[1]]));
        match last.checked_add(delta + 1) {
            Some(next) => {
                ids.push(next);
                last = next;
            }
            None => break,
        }
    }
    if ids.is_empty() {
        return;
    }

    let mut bytes = vec![0u8; max_encoded_len(ids.len())];
    let used = encode(&ids, &mut bytes).expect("valid input must encode");
    assert!(used <= bytes.len(), "capacity heuristic violated");

    let mut dst = vec![0u32; ids.len()];
    let count = decode(&bytes[..used], &mut dst).expect("own encoding must decode");
    assert_eq!(count, ids.len(), "count mismatch");
    assert_eq!(&dst[..count], &ids[..], "round-trip mismatch");
});
