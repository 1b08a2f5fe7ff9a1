/// Structural plausibility check on a set of finder candidates
use crate::models::FinderCandidate;

/// The triangle spanned by the candidates must cover at least this fraction
/// of the frame's pixel area
const MIN_AREA_FRACTION: f64 = 0.01;

/// Validates that three candidates form a plausible, non-degenerate corner
/// triangle
pub struct StructureValidator;

impl StructureValidator {
    /// True only for exactly three candidates whose triangle, after sorting
    /// by (y, x), exceeds 1% of the frame area. Rules out near-collinear
    /// points and tiny clusters.
    pub fn validate(candidates: &[FinderCandidate], width: usize, height: usize) -> bool {
        if candidates.len() != 3 {
            return false;
        }

        let mut points = [(0i64, 0i64); 3];
        for (point, c) in points.iter_mut().zip(candidates) {
            *point = (c.x as i64, c.y as i64);
        }
        points.sort_by_key(|&(x, y)| (y, x));
        let [(x1, y1), (x2, y2), (x3, y3)] = points;

        let doubled = x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2);
        let area = (doubled as f64 / 2.0).abs();
        let min_area = (width * height) as f64 * MIN_AREA_FRACTION;

        area > min_area
    }
}
