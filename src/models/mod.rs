/// Colors parsed from hex strings
pub mod color;
/// Bit and module matrices
pub mod matrix;
/// Versions, levels, masks and the `QRCode` value
pub mod qr_code;

pub use color::Rgba;
pub use matrix::{BitMatrix, Module, ModuleMatrix};
pub use qr_code::{ECLevel, MaskPattern, QRCode, SymbolSpec, Version, latin1_bytes};
