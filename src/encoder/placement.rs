/// Codeword placement along the zig-zag column-pair path
use crate::encoder::function_mask::FunctionMask;
use crate::models::{Module, ModuleMatrix};

/// Data module coordinates `(x, y)` in placement order.
///
/// Columns are walked in pairs from the right edge, alternating upward and
/// downward, right column before left, skipping the vertical timing column.
/// Function modules are skipped.
pub struct ZigZag<'a> {
    func: &'a FunctionMask,
    size: usize,
    right: usize,
    upward: bool,
    step: usize,
}

impl<'a> ZigZag<'a> {
    /// Start at the bottom-right module, moving up
    pub fn new(func: &'a FunctionMask) -> Self {
        let size = func.size();
        Self {
            func,
            size,
            right: size - 1,
            upward: true,
            step: 0,
        }
    }
}

impl Iterator for ZigZag<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.step == self.size * 2 {
                if self.right < 3 {
                    return None;
                }
                self.right -= 2;
                if self.right == 6 {
                    self.right = 5;
                }
                self.upward = !self.upward;
                self.step = 0;
            }
            let row = self.step / 2;
            let x = self.right - self.step % 2;
            let y = if self.upward { self.size - 1 - row } else { row };
            self.step += 1;
            if !self.func.is_function(x, y) {
                return Some((x, y));
            }
        }
    }
}

/// Write codeword bits MSB-first along the path; remainder modules stay light.
pub fn place_codewords(matrix: &mut ModuleMatrix, func: &FunctionMask, codewords: &[u8]) {
    let total_bits = codewords.len() * 8;
    for (i, (x, y)) in ZigZag::new(func).enumerate() {
        let dark = i < total_bits && (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
        matrix.set(x, y, Module::from_dark(dark));
    }
}
