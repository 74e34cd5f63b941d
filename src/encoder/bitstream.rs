//! Codeword builder: packs segments into the padded data codeword stream.

use tracing::debug;

use crate::encoder::segment::Segment;
use crate::error::{QrError, Result};
use crate::models::SymbolSpec;

/// Pad codewords appended alternately after the terminator
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Growable MSB-first bit sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer(Vec<bool>);

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self(Vec::with_capacity(bits))
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 31 && value >> count == 0);
        for i in (0..count).rev() {
            self.0.push((value >> i) & 1 != 0);
        }
    }

    /// Append every bit of `other`
    pub fn extend(&mut self, other: &BitBuffer) {
        self.0.extend_from_slice(&other.0);
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no bits have been written
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bits in write order, most significant first
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Pack into bytes; a trailing partial byte is zero-filled
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.0.len().div_ceil(8)];
        for (i, &bit) in self.0.iter().enumerate() {
            bytes[i >> 3] |= u8::from(bit) << (7 - (i & 7));
        }
        bytes
    }
}

/// Data codewords for one symbol, padded to its exact capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordStream {
    spec: SymbolSpec,
    codewords: Vec<u8>,
    payload_bits: usize,
}

impl CodewordStream {
    /// Version and level the stream was sized for
    pub fn spec(&self) -> SymbolSpec {
        self.spec
    }

    /// Data codewords, padded to capacity
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Bits used by segment headers and content, before terminator and padding
    pub fn payload_bits(&self) -> usize {
        self.payload_bits
    }
}

/// Header + content bits of `segments` at `spec`'s version, ignoring count-field limits
pub(crate) fn raw_bit_length(segments: &[Segment], spec: SymbolSpec) -> usize {
    segments
        .iter()
        .map(|seg| 4 + seg.mode().char_count_bits(spec.version) + seg.data().len())
        .sum()
}

/// Total header + content bits of `segments` at `spec`'s version.
///
/// Returns `None` when a segment's character count overflows its length field.
pub fn encoded_bit_length(segments: &[Segment], spec: SymbolSpec) -> Option<usize> {
    let overflow = segments
        .iter()
        .any(|seg| seg.char_count() >= 1 << seg.mode().char_count_bits(spec.version));
    if overflow {
        None
    } else {
        Some(raw_bit_length(segments, spec))
    }
}

/// Build the data codeword stream for `segments` at `spec`
pub fn build(segments: &[Segment], spec: SymbolSpec) -> Result<CodewordStream> {
    let capacity = spec.data_capacity_bits();
    let used = match encoded_bit_length(segments, spec) {
        Some(used) if used <= capacity => used,
        // A count too large for its field always implies more bits than the symbol holds
        _ => {
            return Err(QrError::CapacityExceeded {
                needed_bits: raw_bit_length(segments, spec),
                available_bits: capacity,
            });
        }
    };

    let mut bb = BitBuffer::with_capacity(capacity);
    for seg in segments {
        bb.append_bits(seg.mode().indicator(), 4);
        bb.append_bits(
            seg.char_count() as u32,
            seg.mode().char_count_bits(spec.version),
        );
        bb.extend(seg.data());
    }
    debug_assert_eq!(bb.len(), used);

    // Terminator (up to four zero bits), then zero-fill to a byte boundary
    let terminator = (capacity - bb.len()).min(4);
    bb.append_bits(0, terminator);
    let fill = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, fill);

    let mut codewords = bb.to_bytes();
    for &pad in PAD_BYTES.iter().cycle() {
        if codewords.len() >= spec.data_codewords() {
            break;
        }
        codewords.push(pad);
    }
    debug_assert_eq!(codewords.len() * 8, capacity);

    debug!(
        version = spec.version.number(),
        ec_level = %spec.ec_level,
        used_bits = used,
        capacity_bits = capacity,
        "built codeword stream"
    );

    Ok(CodewordStream {
        spec,
        codewords,
        payload_bits: used,
    })
}
