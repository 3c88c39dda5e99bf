//! Encoding of sorted id sequences into the two-stream wire format.
//!
//! Each gap `d = id - prev - 1` is split at the layout's low width: the low
//! `low_bits` go to the low stream as a fixed-size group, the quotient
//! `d >> low_bits` goes to the high stream as a unary code. Both streams are
//! packed MSB-first and written through independent bit accumulators into
//! disjoint regions of the caller's buffer.

use crate::constants::{
    write_u32_le, BYTES_PER_ELEMENT_BOUND, FIXED_OVERHEAD_BOUND, LOW_STREAM_START, OFF_COUNT,
    OFF_LOW_BITS,
};
use crate::error::EncodeError;
use crate::layout::Layout;

/// MSB-first bit accumulator writing into a fixed slice region
struct BitWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    acc: u64,
    pending: u32,
}

impl<'a> BitWriter<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            acc: 0,
            pending: 0,
        }
    }

    /// Append `nbits` bits (at most 57, so the shift below cannot spill)
    #[inline]
    fn push(&mut self, value: u64, nbits: u32) {
        debug_assert!(nbits <= 57);
        debug_assert!(nbits == 64 || value >> nbits == 0);
        self.acc = (self.acc << nbits) | value;
        self.pending += nbits;
        while self.pending >= 8 {
            self.pending -= 8;
            self.buf[self.pos] = (self.acc >> self.pending) as u8;
            self.pos += 1;
        }
    }

    /// Append the unary code of `q`: `q` zero bits, then a single one bit.
    ///
    /// Long runs are emitted in 32-bit chunks so the accumulator shift stays
    /// in range for any quotient.
    #[inline]
    fn push_unary(&mut self, mut q: u32) {
        while q >= 32 {
            self.push(0, 32);
            q -= 32;
        }
        self.push(1, q + 1);
    }

    /// Flush the residue left-aligned and return the bytes written
    fn finish(mut self) -> usize {
        if self.pending > 0 {
            self.buf[self.pos] = (self.acc << (8 - self.pending)) as u8;
            self.pos += 1;
        }
        self.pos
    }
}

/// Validate `ids` and measure the encoding: `(count, layout, used_bytes)`
fn scan(ids: &[u32]) -> Result<(u32, Layout, usize), EncodeError> {
    if ids.is_empty() {
        return Err(EncodeError::Empty);
    }
    if ids[0] == 0 {
        return Err(EncodeError::ZeroValue);
    }
    let count =
        u32::try_from(ids.len()).map_err(|_| EncodeError::CountOverflow { len: ids.len() })?;
    let layout = Layout::new(count, ids[ids.len() - 1]);

    let mut high_bits = u64::from(count);
    let mut prev = 0u32;
    for (index, &id) in ids.iter().enumerate() {
        if index > 0 && id <= prev {
            return Err(EncodeError::NotStrictlyIncreasing {
                index,
                prev,
                next: id,
            });
        }
        let gap = id - prev - 1;
        high_bits += u64::from(gap >> layout.low_bits);
        prev = id;
    }

    let used = layout.high_start + (high_bits.div_ceil(8) as usize);
    Ok((count, layout, used))
}

/// Exact size in bytes of the encoding of `ids`, after full validation.
///
/// # Errors
/// Same validation errors as [`encode`], minus `BufferTooSmall`.
pub fn encoded_len(ids: &[u32]) -> Result<usize, EncodeError> {
    scan(ids).map(|(_, _, used)| used)
}

/// Buffer capacity that is sufficient for any valid sequence of `n` ids.
///
/// A generous overestimate: the low stream never exceeds 4 bytes per element
/// (31-bit width cap) and the high stream stays under 3 bits per element, so
/// 5 bytes per element plus fixed header/padding slack always suffices. Use
/// [`encoded_len`] for the exact size.
#[inline]
#[must_use]
pub fn max_encoded_len(n: usize) -> usize {
    n * BYTES_PER_ELEMENT_BOUND + FIXED_OVERHEAD_BOUND
}

/// Encode a strictly increasing id sequence into `out`.
///
/// Returns the number of bytes used; `out[..used]` is the encoded form and
/// the rest of `out` is untouched. Equal inputs produce byte-equal encodings.
///
/// # Arguments
/// * `ids` - Strictly increasing ids in `[1, u32::MAX]`
/// * `out` - Caller buffer of at least [`encoded_len`] bytes
///   ([`max_encoded_len`] is always enough)
///
/// # Errors
/// * `Empty`, `ZeroValue`, `NotStrictlyIncreasing`, `CountOverflow` when the
///   input violates the sequence contract
/// * `BufferTooSmall` when `out` cannot hold the encoding
pub fn encode(ids: &[u32], out: &mut [u8]) -> Result<usize, EncodeError> {
    let (count, layout, used) = scan(ids)?;
    if out.len() < used {
        return Err(EncodeError::BufferTooSmall {
            needed: used,
            capacity: out.len(),
        });
    }

    write_u32_le(out, OFF_COUNT, count);
    out[OFF_LOW_BITS] = layout.low_bits as u8;

    let (low_region, high_region) = out[..used].split_at_mut(layout.high_start);
    let mut low = BitWriter::new(&mut low_region[LOW_STREAM_START..]);
    let mut high = BitWriter::new(high_region);

    let low_mask = layout.low_mask();
    let mut prev = 0u32;
    for &id in ids {
        let gap = id - prev - 1;
        if layout.low_bits > 0 {
            low.push(u64::from(gap & low_mask), layout.low_bits);
        }
        high.push_unary(gap >> layout.low_bits);
        prev = id;
    }

    let low_written = low.finish();
    // The reserved byte absorbs the low-stream pad; zero it when the low
    // stream ended on a byte boundary so the output stays deterministic.
    for byte in &mut low_region[LOW_STREAM_START + low_written..] {
        *byte = 0;
    }
    let high_written = high.finish();
    debug_assert_eq!(layout.high_start + high_written, used);

    Ok(used)
}

/// Encode into a freshly allocated, exactly sized buffer.
///
/// # Errors
/// Same validation errors as [`encode`].
pub fn encode_to_vec(ids: &[u32]) -> Result<Vec<u8>, EncodeError> {
    let used = encoded_len(ids)?;
    let mut out = vec![0u8; used];
    let written = encode(ids, &mut out)?;
    debug_assert_eq!(written, used);
    Ok(out)
}
