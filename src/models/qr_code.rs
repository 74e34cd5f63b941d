use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::encoder::tables;
use crate::error::{QrError, Result};
use crate::models::Rgba;
use crate::render::RenderConfig;
use crate::{Symbol, VersionChoice};

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version (21x21 modules)
    pub const MIN: Version = Version(1);
    /// Largest version (177x177 modules)
    pub const MAX: Version = Version(40);

    /// Create a version, failing outside 1-40
    pub fn new(number: u32) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Version(number as u8))
        } else {
            Err(QrError::UnsupportedVersion(number))
        }
    }

    /// Get the version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * (self.0 as usize) + 17
    }

    /// Versions 7 and up carry an 18-bit version information block
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Iterate every version from 1 to 40
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40u8).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    #[default]
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in ascending strength
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit value stored in the format information (01=L, 00=M, 11=Q, 10=H)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Row index into the block tables
    pub(crate) fn table_index(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }

    /// Nominal fraction of damaged modules the level recovers from
    pub fn percent_correction(&self) -> f64 {
        match self {
            ECLevel::L => 0.07,
            ECLevel::M => 0.15,
            ECLevel::Q => 0.25,
            ECLevel::H => 0.30,
        }
    }

    /// Single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ECLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ECLevel::L),
            "m" | "medium" => Ok(ECLevel::M),
            "q" | "quartile" => Ok(ECLevel::Q),
            "h" | "high" => Ok(ECLevel::H),
            _ => Err(QrError::UnknownEcLevel(s.to_string())),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All patterns in tie-break order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Three-bit value stored in the format information
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// The (version, error correction) pair that fixes a symbol's geometry and capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolSpec {
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub ec_level: ECLevel,
}

impl SymbolSpec {
    /// Create a new spec
    pub fn new(version: Version, ec_level: ECLevel) -> Self {
        Self { version, ec_level }
    }

    /// Module grid dimension (17 + 4 * version)
    pub fn dimension(&self) -> usize {
        self.version.size()
    }

    /// Number of data codewords (excluding error correction)
    pub fn data_codewords(&self) -> usize {
        tables::num_data_codewords(self.version, self.ec_level)
    }

    /// Data capacity in bits
    pub fn data_capacity_bits(&self) -> usize {
        self.data_codewords() * 8
    }
}

/// QR code generator value with the rendering defaults of a typical UI wrapper.
///
/// Foreground defaults to black, background to white, size to 200x200 and
/// error correction to [`ECLevel::L`].
#[derive(Debug, Clone, PartialEq)]
pub struct QRCode {
    /// Payload bytes
    pub data: Vec<u8>,
    /// Foreground color
    pub color: Rgba,
    /// Background color
    pub background_color: Rgba,
    /// Output size in pixels (width, height)
    pub size: (u32, u32),
    /// Error correction level
    pub error_correction: ECLevel,
}

impl QRCode {
    /// Create a generator for raw bytes
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            color: Rgba::BLACK,
            background_color: Rgba::WHITE,
            size: (200, 200),
            error_correction: ECLevel::L,
        }
    }

    /// Create a generator for a string, encoded as ISO-8859-1
    pub fn from_latin1(text: &str) -> Result<Self> {
        Ok(Self::new(latin1_bytes(text)?))
    }

    /// Encode the payload at the smallest fitting version
    pub fn symbol(&self) -> Result<Symbol> {
        crate::encode(&self.data, self.error_correction, VersionChoice::Auto)
    }

    /// Render the symbol with the configured colors and size
    pub fn image(&self) -> Result<RgbaImage> {
        let config = RenderConfig::new(self.size.0, self.size.1)
            .with_colors(self.color, self.background_color);
        self.symbol()?.render(&config)
    }
}

/// Convert text to ISO-8859-1 bytes, failing on characters above U+00FF
pub fn latin1_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                QrError::InvalidEncoding(format!("character {c:?} is not representable in Latin-1"))
            })
        })
        .collect()
}
