/// Codeword extraction and block de-interleaving
use crate::encoder::function_mask::FunctionMask;
use crate::encoder::placement::ZigZag;
use crate::encoder::tables::{EcBlockInfo, total_codewords};
use crate::models::ModuleMatrix;

/// Read codewords MSB-first along the placement path of an unmasked matrix.
///
/// Remainder bits after the last full codeword are dropped.
pub fn extract_codewords(matrix: &ModuleMatrix, func: &FunctionMask) -> Vec<u8> {
    let total = total_codewords(func.version());
    let mut codewords = vec![0u8; total];
    for (i, (x, y)) in ZigZag::new(func).take(total * 8).enumerate() {
        if matrix.is_dark(x, y) {
            codewords[i >> 3] |= 0x80 >> (i & 7);
        }
    }
    codewords
}

/// Undo interleaving: one `data ++ parity` vector per block, short blocks first.
pub fn deinterleave(codewords: &[u8], info: EcBlockInfo) -> Vec<Vec<u8>> {
    let total = codewords.len();
    let num_short = info.num_short_blocks(total);
    let short_len = info.short_block_data_len(total);
    let data_len = |b: usize| short_len + usize::from(b >= num_short);

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(data_len(b) + info.ecc_per_block))
        .collect();
    let mut iter = codewords.iter().copied();
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < data_len(b) {
                block.extend(iter.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(iter.next());
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::{EcBlock, interleave};

    #[test]
    fn test_deinterleave_inverts_interleave() {
        // 4 blocks over 26 codewords: 2 short (4 data), 2 long (5 data), 2 parity
        let info = EcBlockInfo {
            num_blocks: 4,
            ecc_per_block: 2,
        };
        let mut next = 0u8;
        let mut take = |n: usize| {
            let v: Vec<u8> = (next..next + n as u8).collect();
            next += n as u8;
            v
        };
        let blocks: Vec<EcBlock> = [4, 4, 5, 5]
            .iter()
            .map(|&n| EcBlock {
                data: take(n),
                ecc: take(2),
            })
            .collect();
        let flat = interleave(&blocks);
        assert_eq!(flat.len(), 26);

        let restored = deinterleave(&flat, info);
        for (got, want) in restored.iter().zip(&blocks) {
            let expected: Vec<u8> = want.data.iter().chain(&want.ecc).copied().collect();
            assert_eq!(got, &expected);
        }
    }
}
