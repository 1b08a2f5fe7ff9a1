//! Per-frame orchestration and the scanning session state
//!
//! A [`ScanSession`] runs the decode pipeline over one frame at a time:
//! grayscale, candidate scan, structure validation, heuristic decode. The
//! only state shared across ticks is the "already reported" latch and the
//! "attempt in flight" flag; both are atomics so a periodic trigger on
//! another thread is gated correctly.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::capture::{Frame, PixelFormat};
use crate::detector::{FinderScanner, HeuristicDecoder, StructureValidator};
use crate::models::Detection;
use crate::utils::grayscale::{
    rgb_to_grayscale, rgb_to_grayscale_parallel, rgba_to_grayscale, rgba_to_grayscale_parallel,
};

/// Frames with either side at or above this switch to parallel grayscale
/// conversion
const PARALLEL_DIM_THRESHOLD: usize = 800;

/// One scanning session: identifier list, per-session latch, and in-flight
/// gating
#[derive(Debug)]
pub struct ScanSession {
    known_ids: Vec<String>,
    base_url: String,
    reported: AtomicBool,
    in_flight: AtomicBool,
}

impl ScanSession {
    /// Create a session over the identifier list supplied by the
    /// registration store
    pub fn new(known_ids: Vec<String>, base_url: impl Into<String>) -> Self {
        Self {
            known_ids,
            base_url: base_url.into(),
            reported: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Process one delivered frame.
    ///
    /// Returns the detection on success. Returns `None` when nothing was
    /// detected, when a previous attempt is still in flight (the tick is
    /// ignored), or when a detection has already been reported and the
    /// session has not been reset.
    pub fn process_frame(&self, frame: &Frame) -> Option<Detection> {
        let (width, height) = (frame.width, frame.height);
        let parallel = width >= PARALLEL_DIM_THRESHOLD || height >= PARALLEL_DIM_THRESHOLD;
        let gray = match (frame.format, parallel) {
            (PixelFormat::Rgb8, false) => rgb_to_grayscale(&frame.data, width, height),
            (PixelFormat::Rgb8, true) => rgb_to_grayscale_parallel(&frame.data, width, height),
            (PixelFormat::Rgba8, false) => rgba_to_grayscale(&frame.data, width, height),
            (PixelFormat::Rgba8, true) => rgba_to_grayscale_parallel(&frame.data, width, height),
        };
        self.attempt(&gray, width, height, None)
    }

    /// Process one RGB frame (3 bytes per pixel)
    pub fn process_rgb(&self, rgb: &[u8], width: usize, height: usize) -> Option<Detection> {
        let gray = if width >= PARALLEL_DIM_THRESHOLD || height >= PARALLEL_DIM_THRESHOLD {
            rgb_to_grayscale_parallel(rgb, width, height)
        } else {
            rgb_to_grayscale(rgb, width, height)
        };
        self.attempt(&gray, width, height, None)
    }

    /// Process an already-grayscale frame
    pub fn process_grayscale(&self, gray: &[u8], width: usize, height: usize) -> Option<Detection> {
        self.attempt(gray, width, height, None)
    }

    /// Process a grayscale frame with an explicit clock, for deterministic
    /// callers and tests
    pub fn process_grayscale_at(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        now_ms: u64,
    ) -> Option<Detection> {
        self.attempt(gray, width, height, Some(now_ms))
    }

    /// True once a detection has been reported and not yet reset
    pub fn detection_reported(&self) -> bool {
        self.reported.load(Ordering::Acquire)
    }

    /// Clear the reported latch so the session can scan again
    pub fn reset(&self) {
        self.reported.store(false, Ordering::Release);
    }

    fn attempt(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        now_ms: Option<u64>,
    ) -> Option<Detection> {
        if self.reported.load(Ordering::Acquire) {
            trace!("detection already reported, frame ignored");
            return None;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!("previous attempt still in flight, tick ignored");
            return None;
        }

        let result = self.run_pipeline(gray, width, height, now_ms);

        if result.is_some() {
            self.reported.store(true, Ordering::Release);
        }
        self.in_flight.store(false, Ordering::Release);
        result
    }

    fn run_pipeline(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
        now_ms: Option<u64>,
    ) -> Option<Detection> {
        let candidates = FinderScanner::scan(gray, width, height);
        debug!(count = candidates.len(), "finder candidates");

        if candidates.len() != 3 {
            return None;
        }
        if !StructureValidator::validate(&candidates, width, height) {
            debug!("candidate triangle rejected");
            return None;
        }

        let outcome = match now_ms {
            Some(ms) => HeuristicDecoder::evaluate_at(
                gray,
                width,
                height,
                &candidates,
                &self.known_ids,
                &self.base_url,
                ms,
            ),
            None => HeuristicDecoder::evaluate(
                gray,
                width,
                height,
                &candidates,
                &self.known_ids,
                &self.base_url,
            ),
        };

        let content = outcome.content?;
        debug!(%content, "detection reported");

        Some(Detection {
            content,
            candidates: [candidates[0], candidates[1], candidates[2]],
            complexity: outcome.complexity,
            high_contrast: outcome.high_contrast,
        })
    }
}
