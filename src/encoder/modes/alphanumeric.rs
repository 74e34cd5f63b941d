/// Alphanumeric mode (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bitstream::BitBuffer;

pub(crate) const ALPHANUMERIC_TABLE: [u8; 45] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn char_value(c: u8) -> Option<u32> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&t| t == c)
        .map(|p| p as u32)
}

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Whether every byte is in the 45-character set
    pub fn can_encode(data: &[u8]) -> bool {
        data.iter().all(|&c| char_value(c).is_some())
    }

    /// Pack pairs into 11 bits and a trailing character into 6; `None` outside the set
    pub fn encode(data: &[u8]) -> Option<BitBuffer> {
        let mut bb = BitBuffer::with_capacity(data.len() * 11 / 2 + 6);
        for pair in data.chunks(2) {
            match *pair {
                [a, b] => bb.append_bits(char_value(a)? * 45 + char_value(b)?, 11),
                [a] => bb.append_bits(char_value(a)?, 6),
                _ => unreachable!("chunks(2) yields one or two items"),
            }
        }
        Some(bb)
    }
}

/// Unpacker for alphanumeric segments
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Decode `character_count` characters, returning them with the bits consumed
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                // Decode pair (11 bits)
                if bit_idx + 11 > bits.len() {
                    return None;
                }

                let mut value: u16 = 0;
                for i in 0..11 {
                    value = (value << 1) | (bits[bit_idx + i] as u16);
                }

                let first_char = (value / 45) as usize;
                let second_char = (value % 45) as usize;
                if first_char >= 45 {
                    return None;
                }
                result.push(ALPHANUMERIC_TABLE[first_char]);
                result.push(ALPHANUMERIC_TABLE[second_char]);

                bit_idx += 11;
                chars_remaining -= 2;
            } else {
                // Decode single character (6 bits)
                if bit_idx + 6 > bits.len() {
                    return None;
                }

                let mut value: u8 = 0;
                for i in 0..6 {
                    value = (value << 1) | (bits[bit_idx + i] as u8);
                }
                if value as usize >= 45 {
                    return None;
                }
                result.push(ALPHANUMERIC_TABLE[value as usize]);

                bit_idx += 6;
                chars_remaining -= 1;
            }
        }

        Some((result, bit_idx))
    }
}
