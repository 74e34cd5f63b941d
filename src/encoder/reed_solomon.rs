/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use std::sync::OnceLock;

use crate::encoder::bitstream::CodewordStream;
use crate::encoder::tables::{ec_block_info, total_codewords};

/// GF(256) field operations using log/exp tables
pub struct Gf256;

static LOG_TABLE: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

static EXP_TABLE: [u8; 256] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1,
];

impl Gf256 {
    /// `a * b`
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// `a / b`; callers guarantee `b != 0`
    pub fn div(a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "division by zero in GF(256)");
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    /// alpha^n for the generator alpha = 2
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// `a^n`
    pub fn pow_usize(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }
}

/// Largest ECC length used by any QR block
const MAX_DEGREE: usize = 30;

static GENERATORS: OnceLock<Vec<Vec<u8>>> = OnceLock::new();

/// Generator polynomial with roots alpha^0 .. alpha^(degree-1).
///
/// Coefficients run from x^(degree-1) down to x^0; the monic leading term is
/// implicit.
pub fn generator_polynomial(degree: usize) -> &'static [u8] {
    let generators = GENERATORS.get_or_init(|| (0..=MAX_DEGREE).map(compute_divisor).collect());
    &generators[degree]
}

fn compute_divisor(degree: usize) -> Vec<u8> {
    if degree == 0 {
        return Vec::new();
    }
    // Start from the monomial 1, multiply by (x - alpha^i) for each root
    let mut result = vec![0u8; degree - 1];
    result.push(1);
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = Gf256::mul(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = Gf256::mul(root, 0x02);
    }
    result
}

/// Reed-Solomon encoder producing parity codewords for one block
pub struct ReedSolomonEncoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonEncoder {
    /// Encoder producing `num_ecc_codewords` parity codewords per block
    pub fn new(num_ecc_codewords: usize) -> Self {
        debug_assert!((1..=MAX_DEGREE).contains(&num_ecc_codewords));
        Self { num_ecc_codewords }
    }

    /// Remainder of data * x^n divided by the generator polynomial
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let divisor = generator_polynomial(self.num_ecc_codewords);
        let mut remainder = vec![0u8; self.num_ecc_codewords];
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[self.num_ecc_codewords - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(divisor) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// One block of data codewords and its parity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcBlock {
    /// Data codewords
    pub data: Vec<u8>,
    /// Parity codewords
    pub ecc: Vec<u8>,
}

/// Split a stream into blocks and compute each block's parity.
///
/// Short blocks come first, matching the capacity table order.
pub fn encode_blocks(stream: &CodewordStream) -> Vec<EcBlock> {
    let spec = stream.spec();
    let info = ec_block_info(spec.version, spec.ec_level);
    let total = total_codewords(spec.version);
    let num_short = info.num_short_blocks(total);
    let short_len = info.short_block_data_len(total);
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let data = stream.codewords();
    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_len + usize::from(i >= num_short);
        let block = &data[offset..offset + len];
        offset += len;
        blocks.push(EcBlock {
            data: block.to_vec(),
            ecc: rs.encode(block),
        });
    }
    debug_assert_eq!(offset, data.len());
    blocks
}

/// Interleave data codewords column by column, then parity codewords likewise
pub fn interleave(blocks: &[EcBlock]) -> Vec<u8> {
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let max_ecc = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut result = Vec::with_capacity(total);
    for i in 0..max_data {
        result.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    for i in 0..max_ecc {
        result.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    result
}

/// Final codeword sequence (data + parity, interleaved) for matrix placement
pub fn encode(stream: &CodewordStream) -> Vec<u8> {
    interleave(&encode_blocks(stream))
}
