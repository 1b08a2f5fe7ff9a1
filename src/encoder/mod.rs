//! Badge encoding modules
//!
//! This module contains the pure, synchronous encode path:
//! - Payload packing into a fixed-length bitstream
//! - Module placement (finder fixtures, separators, timing, data zigzag)
//! - Rasterization to a centered bitmap with a quiet zone

/// Payload packing into the fixed 208-bit stream
pub mod bitstream;
/// Module placement into the 25x25 grid
pub mod matrix;
/// Rasterization of the grid to a luma bitmap
pub mod render;

pub use bitstream::{BitstreamPacker, MAX_PAYLOAD_UNITS, TARGET_BITS};
pub use matrix::MatrixEncoder;
pub use render::Renderer;
