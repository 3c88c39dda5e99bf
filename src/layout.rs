//! Wire layout derivation for an encoding of `count` ids bounded by `max`.

use crate::constants::{HEADER_SIZE, MAX_LOW_BITS};

/// Derived codec parameters that fix the position of both bit streams.
///
/// The low-bits width balances the two streams: with
/// `low_bits = floor(log2(max / count))` the expected unary code is about two
/// bits per element, putting the total near `low_bits + 2` bits per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width of the fixed-size slice stored per gap, in `0..=31`
    pub low_bits: u32,
    /// First byte of the high stream: `floor(count * low_bits / 8) + 6`
    ///
    /// The byte at `high_start - 1` is reserved; it absorbs the final padded
    /// byte of the low stream so the two streams never collide.
    pub high_start: usize,
}

impl Layout {
    /// Derive the layout for `count` ids whose largest value is `max`.
    ///
    /// `count` must be at least 1. The dense case `max < count` clamps the
    /// low width to 0 (the entire code becomes unary).
    #[must_use]
    pub fn new(count: u32, max: u32) -> Self {
        debug_assert!(count >= 1, "layout requires a non-empty sequence");
        let avg = max / count;
        let low_bits = if avg == 0 { 0 } else { avg.ilog2().min(MAX_LOW_BITS) };
        Self {
            low_bits,
            high_start: low_stream_len(count, low_bits) + HEADER_SIZE + 1,
        }
    }

    /// Mask selecting the low `low_bits` of a gap
    #[inline]
    #[must_use]
    pub fn low_mask(&self) -> u32 {
        if self.low_bits == 0 {
            0
        } else {
            (1u32 << self.low_bits) - 1
        }
    }
}

/// Whole bytes occupied by the low stream, excluding the reserved padding byte
#[inline]
pub fn low_stream_len(count: u32, low_bits: u32) -> usize {
    (count as usize * low_bits as usize) / 8
}
