/// Format and version information codewords.
///
/// Format: 5 data bits (EC level + mask) extended with a BCH(15,5) remainder
/// and XORed with 0x5412. Version: 6 data bits extended with a BCH(18,6)
/// remainder, unmasked.
use crate::models::{ECLevel, MaskPattern, Module, ModuleMatrix, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// 15-bit format word for an EC level and mask
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = (u32::from(ec_level.format_bits()) << 3) | u32::from(mask.bits());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | (rem & 0x3FF)) ^ FORMAT_MASK
}

/// 18-bit version word; only meaningful for versions 7 and up
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (data << 12) | (rem & 0xFFF)
}

/// Coordinates of format bit `i` (0 = least significant) in both copies.
pub fn format_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let first = match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    };
    let second = if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    };
    [first, second]
}

/// Coordinates of version bit `i` in both 6x3 blocks.
pub fn version_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let a = size - 11 + i % 3;
    let b = i / 3;
    [(a, b), (b, a)]
}

/// Write both format copies and the always-dark module.
pub fn draw_format(matrix: &mut ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let size = matrix.size();
    let bits = format_bits(ec_level, mask);
    for i in 0..15 {
        let module = Module::from_dark((bits >> i) & 1 != 0);
        for (x, y) in format_positions(size, i) {
            matrix.set(x, y, module);
        }
    }
    matrix.set(8, size - 8, Module::Dark);
}

/// Write both version blocks (no-op below version 7).
pub fn draw_version(matrix: &mut ModuleMatrix, version: Version) {
    if !version.has_version_info() {
        return;
    }
    let size = matrix.size();
    let bits = version_bits(version);
    for i in 0..18 {
        let module = Module::from_dark((bits >> i) & 1 != 0);
        for (x, y) in version_positions(size, i) {
            matrix.set(x, y, module);
        }
    }
}

/// Nearest valid format word to `raw`, if within three bit errors.
pub fn decode_format(raw: u32) -> Option<(ECLevel, MaskPattern)> {
    let mut best: Option<(u32, u8)> = None;
    for data in 0u8..32 {
        let ec = ECLevel::from_format_bits(data >> 3);
        let mask = MaskPattern::from_bits(data & 0x07);
        let distance = (format_bits(ec, mask) ^ raw).count_ones();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, data));
        }
    }
    best.filter(|&(d, _)| d <= 3).map(|(_, data)| {
        (
            ECLevel::from_format_bits(data >> 3),
            MaskPattern::from_bits(data & 0x07),
        )
    })
}

/// Nearest valid version word to `raw`, if within three bit errors.
pub fn decode_version(raw: u32) -> Option<Version> {
    Version::all()
        .filter(|v| v.has_version_info())
        .map(|v| ((version_bits(v) ^ raw).count_ones(), v))
        .min_by_key(|&(d, _)| d)
        .filter(|&(d, _)| d <= 3)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits_known_values() {
        // Entries from the standard format information table
        assert_eq!(format_bits(ECLevel::M, MaskPattern::Pattern0), 0x5412);
        assert_eq!(format_bits(ECLevel::L, MaskPattern::Pattern0), 0b111011111000100);
        assert_eq!(format_bits(ECLevel::L, MaskPattern::Pattern4), 0b110011000101111);
        assert_eq!(format_bits(ECLevel::H, MaskPattern::Pattern5), 0b000001001010101);
    }

    #[test]
    fn test_version_bits_known_values() {
        assert_eq!(version_bits(Version::new(7).unwrap()), 0x07C94);
        assert_eq!(version_bits(Version::new(40).unwrap()), 0x28C69);
    }

    #[test]
    fn test_decode_format_corrects_errors() {
        for ec in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let bits = format_bits(ec, mask);
                assert_eq!(decode_format(bits), Some((ec, mask)));
                assert_eq!(decode_format(bits ^ 0b100_0000_0100_0001), Some((ec, mask)));
            }
        }
    }

    #[test]
    fn test_decode_version() {
        let v = Version::new(21).unwrap();
        assert_eq!(decode_version(version_bits(v) ^ 0b11), Some(v));
    }

    #[test]
    fn test_format_positions_are_distinct() {
        let size = 21;
        let mut seen = std::collections::HashSet::new();
        for i in 0..15 {
            for p in format_positions(size, i) {
                assert!(seen.insert(p), "duplicate {p:?}");
                assert_ne!(p, (8, size - 8));
            }
        }
    }
}
