use std::str::FromStr;

use crate::error::{QrError, Result};

/// RGBA color with each channel normalized to 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from normalized channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a compact hex string.
    ///
    /// 3, 4, 6 or 8 hex digits are read as RGB, RGBA, RRGGBB and RRGGBBAA.
    /// A single leading `#` is accepted.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(QrError::InvalidColorFormat(format!(
                "non-hex content in '{hex}'"
            )));
        }
        // All ASCII at this point, so byte length equals digit count
        let value = match digits.len() {
            3 | 4 | 6 | 8 => u32::from_str_radix(digits, 16)
                .map_err(|e| QrError::InvalidColorFormat(format!("'{hex}': {e}")))?,
            n => {
                return Err(QrError::InvalidColorFormat(format!(
                    "expected 3, 4, 6 or 8 hex digits in '{hex}', found {n}"
                )));
            }
        };

        let nibble = |shift: u32| ((value >> shift) & 0xF) as f32 / 15.0;
        let byte = |shift: u32| ((value >> shift) & 0xFF) as f32 / 255.0;

        Ok(match digits.len() {
            3 => Rgba::new(nibble(8), nibble(4), nibble(0), 1.0),
            4 => Rgba::new(nibble(12), nibble(8), nibble(4), nibble(0)),
            6 => Rgba::new(byte(16), byte(8), byte(0), 1.0),
            _ => Rgba::new(byte(24), byte(16), byte(8), byte(0)),
        })
    }

    /// Quantize to 8-bit channels
    pub fn to_rgba8(&self) -> image::Rgba<u8> {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        image::Rgba([q(self.r), q(self.g), q(self.b), q(self.a)])
    }
}

impl FromStr for Rgba {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        Rgba::from_hex(s)
    }
}
