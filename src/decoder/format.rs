/// Format and version information read back from a module matrix
use crate::encoder::format::{decode_format, decode_version, format_positions, version_positions};
use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};

/// Error correction level and mask recovered from the format area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask applied to the data modules
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Try the first copy, then the second
    pub fn extract(matrix: &ModuleMatrix) -> Option<Self> {
        (0..2).find_map(|copy| {
            let raw = read_format_copy(matrix, copy);
            decode_format(raw).map(|(ec_level, mask_pattern)| Self {
                ec_level,
                mask_pattern,
            })
        })
    }
}

fn read_format_copy(matrix: &ModuleMatrix, copy: usize) -> u32 {
    let size = matrix.size();
    (0..15).fold(0u32, |acc, i| {
        let (x, y) = format_positions(size, i)[copy];
        acc | (u32::from(matrix.is_dark(x, y)) << i)
    })
}

/// Version from the dimension, cross-checked against the version blocks for v7+
pub fn extract_version(matrix: &ModuleMatrix) -> Option<Version> {
    let size = matrix.size();
    if size < 21 || (size - 17) % 4 != 0 {
        return None;
    }
    let version = Version::new(((size - 17) / 4) as u32).ok()?;
    if !version.has_version_info() {
        return Some(version);
    }
    (0..2)
        .find_map(|copy| {
            let raw = (0..18).fold(0u32, |acc, i| {
                let (x, y) = version_positions(size, i)[copy];
                acc | (u32::from(matrix.is_dark(x, y)) << i)
            });
            decode_version(raw)
        })
        .filter(|&v| v == version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::format::{draw_format, draw_version};
    use crate::models::Module;

    #[test]
    fn test_format_extraction() {
        let mut m = ModuleMatrix::new(21);
        draw_format(&mut m, ECLevel::Q, MaskPattern::Pattern6);
        let info = FormatInfo::extract(&m).unwrap();
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern6);
    }

    #[test]
    fn test_format_falls_back_to_second_copy() {
        let mut m = ModuleMatrix::new(25);
        draw_format(&mut m, ECLevel::H, MaskPattern::Pattern2);
        // Wipe the first copy entirely
        for i in 0..15 {
            let (x, y) = format_positions(25, i)[0];
            m.set(x, y, Module::Dark);
        }
        let info = FormatInfo::extract(&m).unwrap();
        assert_eq!(info.ec_level, ECLevel::H);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern2);
    }

    #[test]
    fn test_version_extraction() {
        let v = Version::new(12).unwrap();
        let mut m = ModuleMatrix::new(v.size());
        draw_version(&mut m, v);
        assert_eq!(extract_version(&m), Some(v));
        assert_eq!(extract_version(&ModuleMatrix::new(25)).map(|v| v.number()), Some(2));
        assert_eq!(extract_version(&ModuleMatrix::new(22)), None);
    }
}
