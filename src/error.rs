//! Error types shared by every encoding and rendering stage.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QrError>;

/// Errors returned by segmentation, encoding, rendering and readback.
///
/// Every failure is surfaced to the caller; nothing is replaced by a
/// default output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    /// Payload content is incompatible with the requested segment mode.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    /// Payload does not fit the requested (or largest) symbol.
    #[error("capacity exceeded: need {needed_bits} bits, symbol holds {available_bits}")]
    CapacityExceeded {
        /// Bits required by the segments including headers.
        needed_bits: usize,
        /// Data bits available in the symbol.
        available_bits: usize,
    },
    /// Error correction level name other than L, M, Q or H.
    #[error("unknown error correction level '{0}', expected L, M, Q or H")]
    UnknownEcLevel(String),
    /// Version outside 1-40.
    #[error("unsupported version {0}, expected 1-40")]
    UnsupportedVersion(u32),
    /// Degenerate output size or overlay parameters.
    #[error("render target error: {0}")]
    RenderTargetError(String),
    /// Malformed hex color string.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),
    /// A symbol could not be read back.
    #[error("unreadable symbol: {0}")]
    Unreadable(&'static str),
}
