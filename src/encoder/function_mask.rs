use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
///
/// Shared by matrix assembly and readback so both agree on which
/// modules carry codewords.
pub struct FunctionMask {
    mask: BitMatrix,
    version: Version,
}

impl FunctionMask {
    /// Mark every function module of a `version` symbol
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::new(size, size);

        // Finder patterns + separators (up to 9x9 areas, clipped to bounds)
        Self::mark_finder_area(&mut mask, 0, 0);
        Self::mark_finder_area(&mut mask, size - 7, 0);
        Self::mark_finder_area(&mut mask, 0, size - 7);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        for (cx, cy) in alignment_centers(version) {
            for y in cy - 2..=cy + 2 {
                for x in cx - 2..=cx + 2 {
                    mask.set(x, y, true);
                }
            }
        }

        // Format info areas
        for i in 0..9 {
            mask.set(8, i, true);
            mask.set(i, 8, true);
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        // Version info (v7+)
        if version.has_version_info() {
            for dy in 0..6 {
                for dx in 0..3 {
                    mask.set(size - 11 + dx, dy, true);
                    mask.set(dy, size - 11 + dx, true);
                }
            }
        }

        Self { mask, version }
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Version the mask was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// True for finder, separator, timing, alignment, format and version modules
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Modules left for codeword bits, remainder bits included
    pub fn data_modules_count(&self) -> usize {
        self.size() * self.size() - self.mask.count_ones()
    }

    fn mark_finder_area(mask: &mut BitMatrix, x: usize, y: usize) {
        let size = mask.width();
        let start_x = x.saturating_sub(1);
        let start_y = y.saturating_sub(1);
        let end_x = (x + 7 + 1).min(size);
        let end_y = (y + 7 + 1).min(size);
        for yy in start_y..end_y {
            for xx in start_x..end_x {
                mask.set(xx, yy, true);
            }
        }
    }
}

/// Alignment pattern centers, skipping the three that collide with finders
pub fn alignment_centers(version: Version) -> impl Iterator<Item = (usize, usize)> {
    let positions = alignment_pattern_positions(version);
    let last = positions.len().saturating_sub(1);
    positions.iter().enumerate().flat_map(move |(i, &cx)| {
        positions.iter().enumerate().filter_map(move |(j, &cy)| {
            let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            (!corner).then_some((usize::from(cx), usize::from(cy)))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::total_codewords;

    #[test]
    fn test_data_modules_match_codeword_capacity() {
        // Data modules hold every codeword plus 0-7 remainder bits
        for version in Version::all() {
            let mask = FunctionMask::new(version);
            let data_modules = mask.data_modules_count();
            let codeword_bits = total_codewords(version) * 8;
            assert!(data_modules >= codeword_bits, "v{version}");
            assert!(data_modules - codeword_bits < 8, "v{version}");
        }
    }

    #[test]
    fn test_alignment_centers_skip_finders() {
        let v = |n| Version::new(n).unwrap();
        assert_eq!(alignment_centers(v(1)).count(), 0);
        assert_eq!(alignment_centers(v(2)).collect::<Vec<_>>(), vec![(18, 18)]);
        assert_eq!(alignment_centers(v(7)).count(), 6);
        assert_eq!(alignment_centers(v(40)).count(), 46);
    }

    #[test]
    fn test_version_info_reserved() {
        let mask = FunctionMask::new(Version::new(7).unwrap());
        let size = mask.size();
        assert!(mask.is_function(size - 11, 0));
        assert!(mask.is_function(0, size - 11));
        assert!(mask.is_function(5, size - 9));
        assert!(!mask.is_function(size - 12, 0));
    }
}
