//! rust_qrcode - QR code generation and raster rendering
//!
//! A self-contained Model 2 QR encoder: payload segmentation, codeword
//! construction, Reed-Solomon error correction, matrix assembly with mask
//! selection, and nearest-neighbour rendering to RGBA8 buffers with an
//! optional centered overlay.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod config;
/// Read-back decoding used to verify rendered symbols
pub mod decoder;
/// Encoding pipeline (segments, codewords, error correction, matrix)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, ModuleMatrix, Version, etc.)
pub mod models;
/// Raster rendering and overlays
pub mod render;
/// File helpers shared by the command line tool and benchmarks
pub mod tools;

use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

pub use decoder::{Readback, read_symbol, sample_rendered};
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, ECLevel, MaskPattern, Module, ModuleMatrix, QRCode, Rgba, SymbolSpec, Version,
};
pub use render::{Overlay, RenderConfig};

use encoder::bitstream::{build, encoded_bit_length, raw_bit_length};
use encoder::segment::{Segment, segment};
use encoder::{assembler, reed_solomon};

/// How [`encode`] picks the symbol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionChoice {
    /// Smallest version whose capacity fits the payload
    #[default]
    Auto,
    /// A fixed version number (1-40)
    Exact(u32),
}

/// An encoded QR symbol: the frozen module matrix plus its parameters.
///
/// The matrix is shared behind an [`Arc`] and never mutated, so one symbol
/// can be rendered any number of times, from any thread.
#[derive(Debug, Clone)]
pub struct Symbol {
    spec: SymbolSpec,
    mask: MaskPattern,
    encoded_bits: usize,
    matrix: Arc<ModuleMatrix>,
}

impl Symbol {
    /// Symbol version
    pub fn version(&self) -> Version {
        self.spec.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.spec.ec_level
    }

    /// Version and level together
    pub fn spec(&self) -> SymbolSpec {
        self.spec
    }

    /// Mask selected by the penalty search
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Modules per side
    pub fn dimension(&self) -> usize {
        self.matrix.size()
    }

    /// Header and content bits used by the payload
    pub fn encoded_bits(&self) -> usize {
        self.encoded_bits
    }

    /// Data bits the symbol can hold
    pub fn data_capacity_bits(&self) -> usize {
        self.spec.data_capacity_bits()
    }

    /// The finished module matrix
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// Render to an RGBA8 buffer of `config.width` x `config.height`
    pub fn render(&self, config: &RenderConfig) -> Result<RgbaImage> {
        render::render(&self.matrix, self.spec.ec_level, config)
    }

    /// Text rendering with half-block characters, two module rows per line
    pub fn to_ascii(&self, quiet_zone: usize) -> String {
        let size = self.matrix.size();
        let total = size + 2 * quiet_zone;
        // Indices inside the quiet zone wrap and read as light
        let dark = |x: usize, y: usize| {
            self.matrix
                .is_dark(x.wrapping_sub(quiet_zone), y.wrapping_sub(quiet_zone))
        };
        let mut lines = Vec::with_capacity(total.div_ceil(2));
        for row in (0..total).step_by(2) {
            let line: String = (0..total)
                .map(|col| match (dark(col, row), dark(col, row + 1)) {
                    (false, false) => ' ',
                    (true, false) => '\u{2580}',
                    (false, true) => '\u{2584}',
                    (true, true) => '\u{2588}',
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }
}

/// Encode `payload` as a byte-mode QR symbol.
///
/// With [`VersionChoice::Auto`] the smallest version that fits is used;
/// a payload too large for version 40 fails with
/// [`QrError::CapacityExceeded`].
pub fn encode(payload: &[u8], ec_level: ECLevel, version: VersionChoice) -> Result<Symbol> {
    encode_segments(&segment(payload, None)?, ec_level, version)
}

/// Encode pre-built segments; see [`encode`]
pub fn encode_segments(
    segments: &[Segment],
    ec_level: ECLevel,
    version: VersionChoice,
) -> Result<Symbol> {
    let spec = match version {
        VersionChoice::Exact(n) => SymbolSpec::new(Version::new(n)?, ec_level),
        VersionChoice::Auto => select_version(segments, ec_level)?,
    };

    let stream = build(segments, spec)?;
    let codewords = reed_solomon::encode(&stream);
    let (matrix, mask) = assembler::assemble(&codewords, spec)?;

    Ok(Symbol {
        spec,
        mask,
        encoded_bits: stream.payload_bits(),
        matrix: Arc::new(matrix),
    })
}

/// Smallest spec at `ec_level` whose capacity holds `segments`
fn select_version(segments: &[Segment], ec_level: ECLevel) -> Result<SymbolSpec> {
    for version in Version::all() {
        let spec = SymbolSpec::new(version, ec_level);
        if let Some(bits) = encoded_bit_length(segments, spec) {
            if bits <= spec.data_capacity_bits() {
                debug!(version = version.number(), ec = ec_level.as_str(), bits, "version selected");
                return Ok(spec);
            }
        }
    }
    let largest = SymbolSpec::new(Version::MAX, ec_level);
    Err(QrError::CapacityExceeded {
        needed_bits: raw_bit_length(segments, largest),
        available_bits: largest.data_capacity_bits(),
    })
}
