/// Segment parsing of corrected data codewords
use crate::encoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, numeric::NumericDecoder,
};
use crate::encoder::segment::Mode;
use crate::models::Version;

/// Parse numeric, alphanumeric and byte segments up to the terminator.
///
/// Returns `None` on an unknown mode indicator or a truncated segment.
pub fn decode_payload(data_codewords: &[u8], version: Version) -> Option<Vec<u8>> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();

    let mut reader = BitReader::new(&bits);
    let mut data = Vec::new();
    while reader.remaining() >= 4 {
        let mode = match reader.read_bits(4)? {
            0 => break,
            1 => Mode::Numeric,
            2 => Mode::Alphanumeric,
            4 => Mode::Byte,
            _ => return None,
        };
        let count = reader.read_bits(mode.char_count_bits(version))? as usize;
        let rest = reader.rest();
        let (decoded, used) = match mode {
            Mode::Numeric => NumericDecoder::decode(rest, count)?,
            Mode::Alphanumeric => AlphanumericDecoder::decode(rest, count)?,
            Mode::Byte => ByteDecoder::decode(rest, count)?,
        };
        reader.advance(used);
        data.extend_from_slice(&decoded);
    }
    Some(data)
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    fn rest(&self) -> &'a [bool] {
        &self.bits[self.idx..]
    }

    fn advance(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.bits.len());
    }

    fn read_bits(&mut self, n: usize) -> Option<u32> {
        if self.idx + n > self.bits.len() {
            return None;
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Some(val)
    }
}
