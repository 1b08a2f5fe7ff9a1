//! AttendQR - QR-style badge codec for event attendance
//!
//! Two independent pipelines that share no state:
//!
//! - **Encode** (pure, synchronous): pack a payload string into a fixed
//!   208-bit stream, lay it into a 25x25 module matrix behind three finder
//!   fixtures, and rasterize the grid to a centered bitmap with a quiet
//!   zone.
//! - **Decode** (driven by a periodic frame source): convert a frame to
//!   grayscale, scan for candidate locator squares, check that three of
//!   them form a plausible triangle, then run a heuristic presence decoder
//!   that rotates through a caller-supplied identifier list.
//!
//! The decode path is deliberately a heuristic presence detector, not a
//! bit-level decoder; there is no error-correction coding behind the
//! packer. Registration storage, HTTP, and UI live outside this crate: the
//! encode path takes a payload string, the decode path takes frames plus an
//! identifier list and hands back an optional detected string.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Capture-session plumbing (frame sources, error taxonomy, scan driver)
pub mod capture;
/// Heuristic decode pipeline (finder scan, structure check, decoder)
pub mod detector;
/// Pure encode pipeline (bitstream, module placement, rasterization)
pub mod encoder;
/// Registration identifiers and the attendance URL format
pub mod ident;
/// Core data structures (ModuleMatrix, Bitmap, FinderCandidate, Detection)
pub mod models;
/// Per-frame orchestration and session state
pub mod scanner;
/// Image I/O helpers for the CLI and tests
pub mod tools;
/// Frame processing utilities (grayscale conversion)
pub mod utils;

pub use capture::{CaptureError, Frame, FrameSource, PixelFormat, ScanDriver};
pub use encoder::{BitstreamPacker, MatrixEncoder, Renderer, TARGET_BITS};
pub use models::{Bitmap, Detection, FinderCandidate, MATRIX_SIZE, ModuleMatrix};
pub use scanner::ScanSession;

/// Encode a payload into a fully populated module matrix
pub fn encode(payload: &str) -> ModuleMatrix {
    MatrixEncoder::encode(payload)
}

/// Encode a payload and rasterize it onto a square canvas in one step
pub fn encode_to_bitmap(payload: &str, canvas_size: usize) -> Bitmap {
    Renderer::render(&MatrixEncoder::encode(payload), canvas_size)
}

/// One-shot scan of a single RGB frame against a known identifier list.
///
/// For continuous scanning across many frames, hold a [`ScanSession`] so
/// the reported-detection latch applies across ticks.
pub fn scan_rgb(
    rgb: &[u8],
    width: usize,
    height: usize,
    known_ids: &[String],
    base_url: &str,
) -> Option<Detection> {
    ScanSession::new(known_ids.to_vec(), base_url).process_rgb(rgb, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_empty_frame() {
        let image = vec![255u8; 10 * 10 * 3];
        let ids = vec!["reg_1".to_string()];
        assert!(scan_rgb(&image, 10, 10, &ids, "http://host").is_none());
    }

    #[test]
    fn test_encode_to_bitmap_dimensions() {
        let bitmap = encode_to_bitmap("hello", 300);
        assert_eq!(bitmap.width(), 300);
        assert_eq!(bitmap.height(), 300);
    }
}
