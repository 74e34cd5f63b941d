/// Matrix assembly: function patterns, codeword placement and mask selection
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config;
use crate::encoder::format::{draw_format, draw_version, format_positions, version_positions};
use crate::encoder::function_mask::{FunctionMask, alignment_centers};
use crate::encoder::penalty::penalty_score;
use crate::encoder::placement::place_codewords;
use crate::encoder::tables::total_codewords;
use crate::error::{QrError, Result};
use crate::models::{MaskPattern, Module, ModuleMatrix, SymbolSpec};

/// Build the final matrix for `codewords` and return it with the chosen mask.
///
/// `codewords` is the interleaved data + parity sequence; its length must
/// equal the version's total codeword count.
pub fn assemble(codewords: &[u8], spec: SymbolSpec) -> Result<(ModuleMatrix, MaskPattern)> {
    let version = spec.version;
    let expected = total_codewords(version);
    if codewords.len() != expected {
        return Err(QrError::InvalidEncoding(format!(
            "version {version} takes {expected} codewords, got {}",
            codewords.len()
        )));
    }

    let func = FunctionMask::new(version);
    let mut base = ModuleMatrix::new(spec.dimension());
    draw_function_patterns(&mut base, &func);
    place_codewords(&mut base, &func, codewords);

    let score = |mask: MaskPattern| {
        let trial = apply_mask(&base, &func, spec, mask);
        let penalty = penalty_score(&trial);
        trace!(mask = mask.bits(), penalty, "mask candidate");
        penalty
    };

    let parallel = config::parallel_mask_search()
        && version.number() >= config::parallel_min_version();
    // Collected in mask order either way so ties resolve to the lowest index
    let penalties: Vec<u32> = if parallel {
        MaskPattern::ALL.par_iter().map(|&m| score(m)).collect()
    } else {
        MaskPattern::ALL.iter().map(|&m| score(m)).collect()
    };

    let (best, penalty) = MaskPattern::ALL
        .iter()
        .zip(&penalties)
        .min_by_key(|&(_, &p)| p)
        .map(|(&m, &p)| (m, p))
        .ok_or_else(|| QrError::InvalidEncoding("no mask candidates".into()))?;
    debug!(version = version.number(), mask = best.bits(), penalty, parallel, "mask selected");

    Ok((apply_mask(&base, &func, spec, best), best))
}

/// XOR the mask into data modules and write format and version information.
fn apply_mask(
    base: &ModuleMatrix,
    func: &FunctionMask,
    spec: SymbolSpec,
    mask: MaskPattern,
) -> ModuleMatrix {
    let mut matrix = base.clone();
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(y, x) {
                matrix.invert(x, y);
            }
        }
    }
    draw_format(&mut matrix, spec.ec_level, mask);
    draw_version(&mut matrix, spec.version);
    matrix
}

/// Timing, finder and alignment patterns plus reserved information areas.
fn draw_function_patterns(matrix: &mut ModuleMatrix, func: &FunctionMask) {
    let size = matrix.size();

    for i in 0..size {
        matrix.set(6, i, Module::from_dark(i % 2 == 0));
        matrix.set(i, 6, Module::from_dark(i % 2 == 0));
    }

    // Finders overwrite the ends of the timing lines; separators fall out of
    // the clipped 9x9 area
    for (cx, cy) in [(3, 3), (size - 4, 3), (3, size - 4)] {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let (x, y) = (cx as i32 + dx, cy as i32 + dy);
                if x < 0 || y < 0 || x >= size as i32 || y >= size as i32 {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                matrix.set(x as usize, y as usize, Module::from_dark(dist != 2 && dist != 4));
            }
        }
    }

    for (cx, cy) in alignment_centers(func.version()) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                matrix.set(x, y, Module::from_dark(dx.abs().max(dy.abs()) != 1));
            }
        }
    }

    for i in 0..15 {
        for (x, y) in format_positions(size, i) {
            matrix.set(x, y, Module::Reserved);
        }
    }
    matrix.set(8, size - 8, Module::Reserved);
    if func.version().has_version_info() {
        for i in 0..18 {
            for (x, y) in version_positions(size, i) {
                matrix.set(x, y, Module::Reserved);
            }
        }
    }
}
