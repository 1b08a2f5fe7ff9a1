//! Payload packing into the fixed-length bitstream placed by the encoder
//!
//! Layout: 4-bit byte-mode indicator, 8-bit length, payload bytes MSB-first,
//! up to 4 zero terminator bits, zero padding to a byte boundary, then
//! alternating pad bytes until the target capacity is reached. There is no
//! error-correction coding behind this boundary; a real implementation could
//! be substituted here without touching the renderer or the scan pipeline.

/// Exact bit capacity of every packed stream
pub const TARGET_BITS: usize = 208;

/// Payloads longer than this are silently truncated
pub const MAX_PAYLOAD_UNITS: usize = 255;

/// Byte-mode indicator (0100)
const MODE_BYTE: u8 = 0b0100;

/// Alternating pad bytes appended after the terminator
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Packs a payload string into a fixed 208-bit sequence
pub struct BitstreamPacker;

impl BitstreamPacker {
    /// Pack a payload into exactly [`TARGET_BITS`] bits.
    ///
    /// The payload is truncated to at most [`MAX_PAYLOAD_UNITS`] characters;
    /// each character contributes the low 8 bits of its scalar value
    /// (multi-byte characters are not specially handled). Emission is capped
    /// at the target capacity, so the result length is always exact.
    pub fn pack(payload: &str) -> Vec<bool> {
        let units: Vec<u8> = payload
            .chars()
            .take(MAX_PAYLOAD_UNITS)
            .map(|c| c as u32 as u8)
            .collect();

        let mut bits = Vec::with_capacity(TARGET_BITS);

        // Mode indicator (4 bits) and character count (8 bits)
        push_bits(&mut bits, MODE_BYTE, 4);
        push_bits(&mut bits, units.len() as u8, 8);

        // Data bytes, most-significant bit first
        for &unit in &units {
            push_bits(&mut bits, unit, 8);
        }

        // Terminator: up to 4 zero bits, bounded by remaining capacity
        let remaining = TARGET_BITS - bits.len();
        for _ in 0..remaining.min(4) {
            bits.push(false);
        }

        // Pad to a byte boundary
        while bits.len() % 8 != 0 && bits.len() < TARGET_BITS {
            bits.push(false);
        }

        // Alternating pad bytes up to the target capacity
        let mut pad_index = 0;
        while bits.len() < TARGET_BITS {
            push_bits(&mut bits, PAD_BYTES[pad_index % 2], 8);
            pad_index += 1;
        }

        debug_assert_eq!(bits.len(), TARGET_BITS);
        bits
    }
}

/// Push the low `count` bits of `value`, MSB first, stopping at capacity
fn push_bits(bits: &mut Vec<bool>, value: u8, count: u32) {
    for shift in (0..count).rev() {
        if bits.len() == TARGET_BITS {
            return;
        }
        bits.push((value >> shift) & 1 == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_at(bits: &[bool], bit_offset: usize) -> u8 {
        bits[bit_offset..bit_offset + 8]
            .iter()
            .fold(0u8, |acc, &b| (acc << 1) | b as u8)
    }

    #[test]
    fn test_exact_length_for_every_payload_size() {
        for len in 0..=300 {
            let payload: String = "a".repeat(len);
            assert_eq!(BitstreamPacker::pack(&payload).len(), TARGET_BITS);
        }
    }

    #[test]
    fn test_header_bits() {
        let bits = BitstreamPacker::pack("HI");
        // Mode indicator 0100
        assert_eq!(&bits[..4], &[false, true, false, false]);
        // Length 2
        assert_eq!(byte_at(&bits, 4), 2);
        // 'H' = 0x48, 'I' = 0x49
        assert_eq!(byte_at(&bits, 12), 0x48);
        assert_eq!(byte_at(&bits, 20), 0x49);
    }

    #[test]
    fn test_length_field_saturates_at_255() {
        let payload = "x".repeat(400);
        let bits = BitstreamPacker::pack(&payload);
        assert_eq!(byte_at(&bits, 4), 255);
        assert_eq!(bits.len(), TARGET_BITS);
    }

    #[test]
    fn test_empty_payload_pad_tail() {
        let bits = BitstreamPacker::pack("");
        // Header (12 bits) + 4 terminator bits reach the byte boundary
        assert_eq!(byte_at(&bits, 4), 0);
        assert!(!bits[12] && !bits[13] && !bits[14] && !bits[15]);
        // Remaining 24 bytes alternate 0xEC / 0x11
        for (i, offset) in (16..TARGET_BITS).step_by(8).enumerate() {
            assert_eq!(byte_at(&bits, offset), PAD_BYTES[i % 2]);
        }
    }

    #[test]
    fn test_terminator_bounded_by_capacity() {
        // 24 data bytes fill 204 bits; only 4 remain for the terminator
        let payload = "a".repeat(24);
        let bits = BitstreamPacker::pack(&payload);
        assert_eq!(bits.len(), TARGET_BITS);
        assert!(!bits[204] && !bits[205] && !bits[206] && !bits[207]);
    }
}
