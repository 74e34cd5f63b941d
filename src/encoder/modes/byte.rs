/// Byte mode (Mode 0100) for 8-bit data
/// Bytes pass through unchanged; no character set conversion is applied
use crate::encoder::bitstream::BitBuffer;

/// Packer for byte segments
pub struct ByteEncoder;

impl ByteEncoder {
    /// Eight bits per byte
    pub fn encode(data: &[u8]) -> BitBuffer {
        let mut bb = BitBuffer::with_capacity(data.len() * 8);
        for &byte in data {
            bb.append_bits(u32::from(byte), 8);
        }
        bb
    }
}

/// Unpacker for byte segments
pub struct ByteDecoder;

impl ByteDecoder {
    /// Read `character_count` bytes, returning them with the bits consumed
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut bytes = Vec::with_capacity(character_count);
        let mut bit_idx = 0;

        for _ in 0..character_count {
            if bit_idx + 8 > bits.len() {
                return None;
            }

            let mut byte: u8 = 0;
            for i in 0..8 {
                byte = (byte << 1) | (bits[bit_idx + i] as u8);
            }

            bytes.push(byte);
            bit_idx += 8;
        }

        Some((bytes, bit_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_decode() {
        // "HI" in ASCII = 72, 73
        // H = 0x48 = 01001000
        // I = 0x49 = 01001001
        let bits = vec![
            false, true, false, false, true, false, false, false, // H
            false, true, false, false, true, false, false, true, // I
        ];
        let (decoded, used) = ByteDecoder::decode(&bits, 2).unwrap();
        assert_eq!(decoded, b"HI");
        assert_eq!(used, 16);
    }

    #[test]
    fn test_latin1_bytes_pass_through() {
        let payload = [0xE9, 0x00, 0xFF];
        let bb = ByteEncoder::encode(&payload);
        assert_eq!(bb.to_bytes(), payload);
        assert!(ByteDecoder::decode(bb.bits(), 4).is_none());
    }
}
