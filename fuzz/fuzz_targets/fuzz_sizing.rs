#![no_main]

use gapfano::{encode, encoded_len, EncodeError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Interpret the input as raw u32 ids without any cleanup: validation
    // must reject bad sequences and sizing must agree with encoding.
    let ids: Vec<u32> = data
        .chunks(4)
        .filter(|c| c.len() == 4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    match encoded_len(&ids) {
        Ok(needed) => {
            let mut out = vec![0u8; needed];
            assert_eq!(encode(&ids, &mut out), Ok(needed));

            // One byte short must be rejected, not overrun.
            if needed > 0 {
                let mut short = vec![0u8; needed - 1];
                assert_eq!(
                    encode(&ids, &mut short),
                    Err(EncodeError::BufferTooSmall {
                        needed,
                        capacity: needed - 1
                    })
                );
            }
        }
        Err(e) => {
            let mut out = vec![0u8; gapfano::max_encoded_len(ids.len())];
            assert_eq!(encode(&ids, &mut out), Err(e));
        }
    }
});
