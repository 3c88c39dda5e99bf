use crate::layout::Layout;
use crate::{decode, decode_to_vec, decoded_len, encode_to_vec, encoded_len, max_encoded_len};
use proptest::prelude::*;

prop_compose! {
    /// Sparse sequences: ids drawn from the full u32 range
    fn arb_sparse_ids()(
        raw in prop::collection::vec(1u32..=u32::MAX, 1..500),
    ) -> Vec<u32> {
        let mut ids = raw;
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

prop_compose! {
    /// Dense sequences: many ids in a narrow universe, forcing low_bits = 0
    fn arb_dense_ids()(
        raw in prop::collection::vec(1u32..2_000, 1..500),
    ) -> Vec<u32> {
        let mut ids = raw;
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

fn check_roundtrip(ids: &[u32]) -> Result<(), TestCaseError> {
    let bytes = encode_to_vec(ids).unwrap();
    let back = decode_to_vec(&bytes).unwrap();
    prop_assert_eq!(back, ids);
    Ok(())
}

proptest! {
    /// Property: decode(encode(S)) == S for sparse sequences
    #[test]
    fn prop_roundtrip_sparse(ids in arb_sparse_ids()) {
        check_roundtrip(&ids)?;
    }

    /// Property: decode(encode(S)) == S for dense sequences
    #[test]
    fn prop_roundtrip_dense(ids in arb_dense_ids()) {
        check_roundtrip(&ids)?;
    }

    /// Property: encoded_len is exact and never exceeds the capacity heuristic
    #[test]
    fn prop_size_accuracy(ids in arb_sparse_ids()) {
        let needed = encoded_len(&ids).unwrap();
        let bytes = encode_to_vec(&ids).unwrap();
        prop_assert_eq!(bytes.len(), needed);
        prop_assert!(needed <= max_encoded_len(ids.len()));
    }

    /// Property: total size stays within the structural bound of
    /// low_bits + 3 bits per element plus fixed slack
    #[test]
    fn prop_size_bound(ids in arb_sparse_ids()) {
        let bytes = encode_to_vec(&ids).unwrap();
        let low_bits = Layout::new(ids.len() as u32, ids[ids.len() - 1]).low_bits;
        let bound_bits = ids.len() as u64 * u64::from(low_bits + 3) + 64;
        prop_assert!(
            bytes.len() as u64 * 8 <= bound_bits,
            "{} bytes for {} ids at low_bits={}",
            bytes.len(), ids.len(), low_bits
        );
    }

    /// Property: the header round-trips count and low width
    #[test]
    fn prop_header_roundtrip(ids in arb_sparse_ids()) {
        let bytes = encode_to_vec(&ids).unwrap();
        prop_assert_eq!(decoded_len(&bytes).unwrap(), ids.len());
        let expected = Layout::new(ids.len() as u32, ids[ids.len() - 1]).low_bits;
        prop_assert_eq!(u32::from(bytes[4]), expected);
    }

    /// Property: equal inputs produce byte-equal encodings
    #[test]
    fn prop_deterministic(ids in arb_dense_ids()) {
        prop_assert_eq!(encode_to_vec(&ids).unwrap(), encode_to_vec(&ids).unwrap());
    }

    /// Property: every strict prefix of an encoding fails to decode
    /// (the final high byte always carries the last terminator)
    #[test]
    fn prop_prefix_never_decodes(ids in arb_dense_ids(), cut in 0usize..64) {
        let bytes = encode_to_vec(&ids).unwrap();
        let keep = cut.min(bytes.len() - 1);
        let mut dst = vec![0u32; ids.len()];
        prop_assert!(decode(&bytes[..keep], &mut dst).is_err());
    }
}
