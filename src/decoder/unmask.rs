/// Unmask a read-back symbol by applying the mask pattern again
use crate::encoder::function_mask::FunctionMask;
use crate::models::{MaskPattern, ModuleMatrix};

/// Unmask data modules by XORing with the mask pattern (self-inverse)
pub fn unmask(matrix: &mut ModuleMatrix, mask_pattern: MaskPattern, func: &FunctionMask) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask_pattern.is_masked(y, x) {
                matrix.invert(x, y);
            }
        }
    }
}
