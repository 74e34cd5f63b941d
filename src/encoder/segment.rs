//! Data segmenter: turns a payload into encoding-mode segments.

use crate::encoder::bitstream::BitBuffer;
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, numeric::NumericEncoder,
};
use crate::error::{QrError, Result};
use crate::models::Version;

/// Segment encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9
    Numeric,
    /// 0-9, A-Z, space and `$%*+-./:`
    Alphanumeric,
    /// Arbitrary bytes
    Byte,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for a version (1-9, 10-26, 27-40)
    pub fn char_count_bits(&self, version: Version) -> usize {
        let tier = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
        }
    }

    /// Most compact single mode able to carry `payload`
    pub fn best_for(payload: &[u8]) -> Mode {
        if NumericEncoder::can_encode(payload) {
            Mode::Numeric
        } else if AlphanumericEncoder::can_encode(payload) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }
}

/// One run of payload in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_count: usize,
    data: BitBuffer,
}

impl Segment {
    /// Data mode of the segment
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters (digits, symbols or bytes) in the segment
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Packed content bits, excluding mode and count headers
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Numeric segment; fails with [`QrError::InvalidEncoding`] on non-digits
    pub fn numeric(payload: &[u8]) -> Result<Self> {
        let data = NumericEncoder::encode(payload).ok_or_else(|| {
            QrError::InvalidEncoding("numeric mode requires ASCII digits only".into())
        })?;
        Ok(Self {
            mode: Mode::Numeric,
            char_count: payload.len(),
            data,
        })
    }

    /// Alphanumeric segment; fails with [`QrError::InvalidEncoding`] outside the 45-character set
    pub fn alphanumeric(payload: &[u8]) -> Result<Self> {
        let data = AlphanumericEncoder::encode(payload).ok_or_else(|| {
            QrError::InvalidEncoding(
                "alphanumeric mode requires 0-9, A-Z, space or $%*+-./:".into(),
            )
        })?;
        Ok(Self {
            mode: Mode::Alphanumeric,
            char_count: payload.len(),
            data,
        })
    }

    /// Byte segment holding `payload` unchanged
    pub fn bytes(payload: &[u8]) -> Self {
        Self {
            mode: Mode::Byte,
            char_count: payload.len(),
            data: ByteEncoder::encode(payload),
        }
    }
}

/// Split `payload` into segments.
///
/// Without a preferred mode the whole payload becomes one byte segment.
pub fn segment(payload: &[u8], preferred_mode: Option<Mode>) -> Result<Vec<Segment>> {
    let seg = match preferred_mode.unwrap_or(Mode::Byte) {
        Mode::Numeric => Segment::numeric(payload)?,
        Mode::Alphanumeric => Segment::alphanumeric(payload)?,
        Mode::Byte => Segment::bytes(payload),
    };
    Ok(vec![seg])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_byte() {
        let segs = segment(b"12345", None).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Byte);
        assert_eq!(segs[0].char_count(), 5);
        assert_eq!(segs[0].data().len(), 40);
    }

    #[test]
    fn test_incompatible_mode() {
        assert!(matches!(
            segment(b"12a45", Some(Mode::Numeric)),
            Err(QrError::InvalidEncoding(_))
        ));
        assert!(matches!(
            segment(b"hello", Some(Mode::Alphanumeric)),
            Err(QrError::InvalidEncoding(_))
        ));
        assert!(segment(b"HELLO WORLD", Some(Mode::Alphanumeric)).is_ok());
    }

    #[test]
    fn test_best_mode() {
        assert_eq!(Mode::best_for(b"0123"), Mode::Numeric);
        assert_eq!(Mode::best_for(b"HTTP://X.Y"), Mode::Alphanumeric);
        assert_eq!(Mode::best_for(b"http://x.y"), Mode::Byte);
    }

    #[test]
    fn test_char_count_bits() {
        let v = |n| Version::new(n).unwrap();
        assert_eq!(Mode::Byte.char_count_bits(v(9)), 8);
        assert_eq!(Mode::Byte.char_count_bits(v(10)), 16);
        assert_eq!(Mode::Numeric.char_count_bits(v(26)), 12);
        assert_eq!(Mode::Numeric.char_count_bits(v(27)), 14);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(40)), 13);
    }
}
