//! Read-back decoding of finished symbols
//!
//! Verifies encoder output without an external scanner:
//! - Format and version information extraction (BCH nearest codeword)
//! - Unmasking and zig-zag codeword extraction
//! - Block de-interleaving and Reed-Solomon correction
//! - Numeric, alphanumeric and byte segment parsing

/// Codeword extraction and de-interleaving
pub mod bitstream;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Segment parsing
pub mod payload;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Sampling rendered pixel buffers
pub mod sample;
/// QR code unmasking (removes mask patterns)
pub mod unmask;

use tracing::debug;

use crate::encoder::function_mask::FunctionMask;
use crate::encoder::tables::ec_block_info;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, ModuleMatrix, Version};

use bitstream::{deinterleave, extract_codewords};
use format::{FormatInfo, extract_version};
use reed_solomon::ReedSolomonDecoder;

pub use sample::sample_rendered;

/// Result of reading a symbol back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readback {
    /// Version implied by the matrix size
    pub version: Version,
    /// Level from the format information
    pub ec_level: ECLevel,
    /// Mask from the format information
    pub mask: MaskPattern,
    /// Decoded payload bytes
    pub payload: Vec<u8>,
    /// Codewords repaired by Reed-Solomon correction
    pub corrected: usize,
}

/// Decode a light/dark module matrix back to its payload.
pub fn read_symbol(matrix: &ModuleMatrix) -> Result<Readback> {
    let version =
        extract_version(matrix).ok_or(QrError::Unreadable("invalid size or version information"))?;
    let format = FormatInfo::extract(matrix).ok_or(QrError::Unreadable("format information"))?;

    let func = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    unmask::unmask(&mut unmasked, format.mask_pattern, &func);
    let codewords = extract_codewords(&unmasked, &func);

    let info = ec_block_info(version, format.ec_level);
    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(codewords.len());
    let mut corrected = 0;
    for mut block in deinterleave(&codewords, info) {
        corrected += rs
            .decode(&mut block)
            .map_err(|_| QrError::Unreadable("too many codeword errors"))?;
        block.truncate(block.len() - info.ecc_per_block);
        data.extend_from_slice(&block);
    }

    let payload =
        payload::decode_payload(&data, version).ok_or(QrError::Unreadable("malformed segment data"))?;
    debug!(
        version = version.number(),
        ec = format.ec_level.as_str(),
        mask = format.mask_pattern.bits(),
        corrected,
        "symbol read back"
    );

    Ok(Readback {
        version,
        ec_level: format.ec_level,
        mask: format.mask_pattern,
        payload,
        corrected,
    })
}
