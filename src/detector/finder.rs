/// Finder candidate detection by grid-sampled window statistics
use crate::models::FinderCandidate;

/// Distance between sample points, in pixels
pub const SAMPLE_STEP: usize = 5;
/// Border skipped on every frame edge, in pixels
pub const BORDER: usize = 10;
/// Candidates closer than this to an accepted one, independently on each
/// axis, are discarded
pub const SUPPRESSION_RADIUS: usize = 20;

const WINDOW: usize = 7;
const HALF_WINDOW: usize = WINDOW / 2;
const DARK_THRESHOLD: u8 = 128;
const MIN_DARK_FRACTION: f32 = 0.35;
const MAX_DARK_FRACTION: f32 = 0.65;
const MIN_TRANSITIONS: u32 = 8;

/// Scans a grayscale frame for candidate locator squares
pub struct FinderScanner;

impl FinderScanner {
    /// Scan a grayscale frame and return accepted candidates in scan order.
    ///
    /// Samples every [`SAMPLE_STEP`] pixels inside a [`BORDER`]-pixel margin.
    /// A sample is accepted when its 7x7 window has a dark-pixel fraction
    /// strictly inside (0.35, 0.65) and more than 8 horizontal transitions;
    /// at most one candidate survives per local cluster.
    pub fn scan(gray: &[u8], width: usize, height: usize) -> Vec<FinderCandidate> {
        let mut candidates: Vec<FinderCandidate> = Vec::new();
        if gray.len() != width * height {
            return candidates;
        }

        let y_end = height.saturating_sub(BORDER);
        let x_end = width.saturating_sub(BORDER);

        for y in (BORDER..y_end).step_by(SAMPLE_STEP) {
            for x in (BORDER..x_end).step_by(SAMPLE_STEP) {
                let Some((dark_fraction, transitions)) =
                    Self::window_stats(gray, width, height, x, y)
                else {
                    continue;
                };

                if dark_fraction <= MIN_DARK_FRACTION
                    || dark_fraction >= MAX_DARK_FRACTION
                    || transitions <= MIN_TRANSITIONS
                {
                    continue;
                }

                let too_close = candidates.iter().any(|c| {
                    c.x.abs_diff(x) < SUPPRESSION_RADIUS && c.y.abs_diff(y) < SUPPRESSION_RADIUS
                });
                if !too_close {
                    candidates.push(FinderCandidate::new(x, y, dark_fraction, transitions));
                }
            }
        }

        candidates
    }

    /// Dark fraction and horizontal transition count of the 7x7 window
    /// centered at (cx, cy); `None` when the window does not fit
    fn window_stats(
        gray: &[u8],
        width: usize,
        height: usize,
        cx: usize,
        cy: usize,
    ) -> Option<(f32, u32)> {
        if cx < HALF_WINDOW
            || cy < HALF_WINDOW
            || cx >= width - HALF_WINDOW
            || cy >= height - HALF_WINDOW
        {
            return None;
        }

        let mut dark = 0u32;
        let mut transitions = 0u32;

        for y in cy - HALF_WINDOW..=cy + HALF_WINDOW {
            let row = y * width;
            for x in cx - HALF_WINDOW..=cx + HALF_WINDOW {
                let is_dark = gray[row + x] < DARK_THRESHOLD;
                if is_dark {
                    dark += 1;
                }
                if x > cx - HALF_WINDOW {
                    let prev_dark = gray[row + x - 1] < DARK_THRESHOLD;
                    if is_dark != prev_dark {
                        transitions += 1;
                    }
                }
            }
        }

        let total = (WINDOW * WINDOW) as f32;
        Some((dark as f32 / total, transitions))
    }
}
