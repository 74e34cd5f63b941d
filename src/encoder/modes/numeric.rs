/// Numeric mode (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bitstream::BitBuffer;

/// Packer for numeric segments
pub struct NumericEncoder;

impl NumericEncoder {
    /// Whether every byte is an ASCII digit
    pub fn can_encode(data: &[u8]) -> bool {
        data.iter().all(u8::is_ascii_digit)
    }

    /// Pack ASCII digits; `None` if any byte is not a digit
    pub fn encode(data: &[u8]) -> Option<BitBuffer> {
        if !Self::can_encode(data) {
            return None;
        }
        let mut bb = BitBuffer::with_capacity(data.len() * 10 / 3 + 4);
        for group in data.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            bb.append_bits(value, group.len() * 3 + 1);
        }
        Some(bb)
    }
}

/// Decode numeric mode data
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode numeric data from bit stream
    /// Returns (decoded_digits, bits_consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = group_size * 3 + 1;

            if bit_idx + bits_needed > bits.len() {
                return None;
            }

            let mut value: u16 = 0;
            for i in 0..bits_needed {
                value = (value << 1) | (bits[bit_idx + i] as u16);
            }

            let digits = match group_size {
                3 if value < 1000 => format!("{:03}", value),
                2 if value < 100 => format!("{:02}", value),
                1 if value < 10 => format!("{}", value),
                _ => return None,
            };

            result.extend_from_slice(digits.as_bytes());
            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Some((result, bit_idx))
    }
}
