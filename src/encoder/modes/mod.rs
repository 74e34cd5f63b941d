//! QR code data modes
//!
//! Each mode has a packer used by the segmenter and an unpacker used by
//! the readback decoder:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Upper-case letters, digits and nine symbols
//! - Byte: 8-bit data, passed through unmodified

/// Alphanumeric mode packer and unpacker
pub mod alphanumeric;
/// Byte mode packer and unpacker
pub mod byte;
/// Numeric mode packer and unpacker
pub mod numeric;
