/// Matrix assembly and mask selection
pub mod assembler;
/// Codeword builder and bit buffers
pub mod bitstream;
/// Format and version information BCH codes
pub mod format;
/// Function module layout shared with readback
pub mod function_mask;
/// Data mode packers and unpackers
pub mod modes;
/// Mask penalty rules
pub mod penalty;
/// Zig-zag codeword placement
pub mod placement;
/// GF(256) Reed-Solomon coding, blocking and interleaving
pub mod reed_solomon;
/// Payload segmentation
pub mod segment;
/// Capacity, block structure and alignment tables
pub mod tables;

pub use assembler::assemble;
pub use bitstream::{BitBuffer, CodewordStream, build};
pub use reed_solomon::{EcBlock, encode_blocks, interleave};
pub use segment::{Mode, Segment, segment};
