/// Heuristic presence decoder
///
/// This is not a bit-level decode of the module matrix: it never reads the
/// structural encoding the encode path produces. It estimates whether the
/// frame center is "complex enough to be a real code" from local contrast
/// statistics, then manufactures an attendance URL from a caller-supplied
/// identifier list, rotating through it on a fixed wall-clock window. The
/// rotation is part of the contract and must not change.
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::ident::attendance_url;
use crate::models::FinderCandidate;

/// Half-width of the sampled center square, in pixels
const SAMPLE_HALF: usize = 50;
/// Distance between sampled points, in pixels
const SAMPLE_STEP: i64 = 4;
/// Neighbor-average difference that counts toward complexity
const COMPLEXITY_DIFF: f32 = 60.0;
/// Neighbor-average difference that counts toward high contrast
const HIGH_CONTRAST_DIFF: f32 = 100.0;
/// Minimum complexity count for a detection
const MIN_COMPLEXITY: u32 = 30;
/// Minimum high-contrast count for a detection
const MIN_HIGH_CONTRAST: u32 = 10;
/// Identifier rotation window, in milliseconds
pub const ROTATION_WINDOW_MS: u64 = 2000;

/// Outcome of a heuristic evaluation: the counters, and the manufactured
/// content when the thresholds were met
#[derive(Debug, Clone)]
pub struct HeuristicOutcome {
    /// Manufactured attendance URL, when the frame qualified
    pub content: Option<String>,
    /// Complexity counter
    pub complexity: u32,
    /// High-contrast counter
    pub high_contrast: u32,
}

/// Estimates code presence from center-region contrast and rotates through
/// known identifiers
pub struct HeuristicDecoder;

impl HeuristicDecoder {
    /// Decode using the system clock for identifier rotation.
    ///
    /// Returns `None` when `known_ids` is empty, regardless of any other
    /// input.
    pub fn decode(
        gray: &[u8],
        width: usize,
        height: usize,
        candidates: &[FinderCandidate],
        known_ids: &[String],
        base_url: &str,
    ) -> Option<String> {
        Self::decode_at(gray, width, height, candidates, known_ids, base_url, now_millis())
    }

    /// Decode with an explicit clock, for deterministic callers and tests
    pub fn decode_at(
        gray: &[u8],
        width: usize,
        height: usize,
        candidates: &[FinderCandidate],
        known_ids: &[String],
        base_url: &str,
        now_ms: u64,
    ) -> Option<String> {
        Self::evaluate_at(gray, width, height, candidates, known_ids, base_url, now_ms).content
    }

    /// Full evaluation with the system clock, exposing the counters
    /// alongside the content
    pub fn evaluate(
        gray: &[u8],
        width: usize,
        height: usize,
        candidates: &[FinderCandidate],
        known_ids: &[String],
        base_url: &str,
    ) -> HeuristicOutcome {
        Self::evaluate_at(gray, width, height, candidates, known_ids, base_url, now_millis())
    }

    /// Full evaluation, exposing the counters alongside the content
    pub fn evaluate_at(
        gray: &[u8],
        width: usize,
        height: usize,
        _candidates: &[FinderCandidate],
        known_ids: &[String],
        base_url: &str,
        now_ms: u64,
    ) -> HeuristicOutcome {
        let (complexity, high_contrast) = Self::region_stats(gray, width, height);
        debug!(complexity, high_contrast, "center region sampled");

        let content = if complexity > MIN_COMPLEXITY
            && high_contrast > MIN_HIGH_CONTRAST
            && !known_ids.is_empty()
        {
            let index = ((now_ms / ROTATION_WINDOW_MS) as usize) % known_ids.len();
            Some(attendance_url(base_url, &known_ids[index]))
        } else {
            None
        };

        HeuristicOutcome {
            content,
            complexity,
            high_contrast,
        }
    }

    /// Complexity and high-contrast counters over the sampled center square.
    ///
    /// Each sampled pixel is compared against the average of its four
    /// immediate neighbors, clamped at the flat buffer edges.
    pub fn region_stats(gray: &[u8], width: usize, height: usize) -> (u32, u32) {
        if width == 0 || height == 0 || gray.len() != width * height {
            return (0, 0);
        }

        let center_x = (width / 2) as i64;
        let center_y = (height / 2) as i64;
        let sample = SAMPLE_HALF.min(width.min(height) / 4) as i64;
        let last = gray.len() - 1;

        let mut complexity = 0u32;
        let mut high_contrast = 0u32;

        let mut dy = -sample;
        while dy < sample {
            let mut dx = -sample;
            while dx < sample {
                let x = center_x + dx;
                let y = center_y + dy;

                if x >= 0 && x < width as i64 && y >= 0 && y < height as i64 {
                    let idx = y as usize * width + x as usize;
                    let neighbors = [
                        gray[idx.saturating_sub(1)],
                        gray[(idx + 1).min(last)],
                        gray[idx.saturating_sub(width)],
                        gray[(idx + width).min(last)],
                    ];
                    let average =
                        neighbors.iter().map(|&n| n as f32).sum::<f32>() / neighbors.len() as f32;
                    let diff = (gray[idx] as f32 - average).abs();

                    if diff > COMPLEXITY_DIFF {
                        complexity += 1;
                    }
                    if diff > HIGH_CONTRAST_DIFF {
                        high_contrast += 1;
                    }
                }

                dx += SAMPLE_STEP;
            }
            dy += SAMPLE_STEP;
        }

        (complexity, high_contrast)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame with an isolated dark dot at every sampled center point, so
    /// every sample sees a 255-luma neighbor average against a 0-luma pixel
    fn dotted_frame(width: usize, height: usize) -> Vec<u8> {
        let mut gray = vec![255u8; width * height];
        let cx = width / 2;
        let cy = height / 2;
        let mut dy: i64 = -(SAMPLE_HALF as i64);
        while dy < SAMPLE_HALF as i64 {
            let mut dx: i64 = -(SAMPLE_HALF as i64);
            while dx < SAMPLE_HALF as i64 {
                let x = (cx as i64 + dx) as usize;
                let y = (cy as i64 + dy) as usize;
                gray[y * width + x] = 0;
                dx += SAMPLE_STEP;
            }
            dy += SAMPLE_STEP;
        }
        gray
    }

    #[test]
    fn test_dotted_frame_trips_both_counters() {
        let gray = dotted_frame(300, 300);
        let (complexity, high_contrast) = HeuristicDecoder::region_stats(&gray, 300, 300);
        assert_eq!(complexity, 625);
        assert_eq!(high_contrast, 625);
    }

    #[test]
    fn test_flat_frame_counts_nothing() {
        let gray = vec![200u8; 300 * 300];
        assert_eq!(HeuristicDecoder::region_stats(&gray, 300, 300), (0, 0));
    }

    #[test]
    fn test_empty_id_list_never_decodes() {
        let gray = dotted_frame(300, 300);
        let result = HeuristicDecoder::decode_at(&gray, 300, 300, &[], &[], "http://host", 0);
        assert!(result.is_none());
    }

    #[test]
    fn test_time_rotation_selects_by_window() {
        let gray = dotted_frame(300, 300);
        let ids = vec!["reg_a".to_string(), "reg_b".to_string()];

        let at_0 = HeuristicDecoder::decode_at(&gray, 300, 300, &[], &ids, "http://host", 0);
        assert_eq!(at_0.as_deref(), Some("http://host/attendance/reg_a"));

        let at_2s = HeuristicDecoder::decode_at(&gray, 300, 300, &[], &ids, "http://host", 2000);
        assert_eq!(at_2s.as_deref(), Some("http://host/attendance/reg_b"));

        let at_4s = HeuristicDecoder::decode_at(&gray, 300, 300, &[], &ids, "http://host", 4000);
        assert_eq!(at_4s.as_deref(), Some("http://host/attendance/reg_a"));
    }

    #[test]
    fn test_quiet_frame_does_not_decode() {
        let gray = vec![255u8; 300 * 300];
        let ids = vec!["reg_a".to_string()];
        let result = HeuristicDecoder::decode_at(&gray, 300, 300, &[], &ids, "http://host", 0);
        assert!(result.is_none());
    }

    #[test]
    fn test_degenerate_dimensions() {
        assert_eq!(HeuristicDecoder::region_stats(&[], 0, 0), (0, 0));
        assert_eq!(HeuristicDecoder::region_stats(&[0u8; 4], 4, 4), (0, 0));
    }
}
