/// Candidate finder location with its local window statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderCandidate {
    /// Sample x coordinate in pixels
    pub x: usize,
    /// Sample y coordinate in pixels
    pub y: usize,
    /// Fraction of dark pixels in the 7x7 window around the sample
    pub dark_fraction: f32,
    /// Horizontal light/dark transitions counted inside the window
    pub transitions: u32,
}

impl FinderCandidate {
    /// Create a candidate from a sample point and its window statistics
    pub fn new(x: usize, y: usize, dark_fraction: f32, transitions: u32) -> Self {
        Self {
            x,
            y,
            dark_fraction,
            transitions,
        }
    }
}

/// A successful heuristic detection
#[derive(Debug, Clone)]
pub struct Detection {
    /// The recovered payload string (an attendance URL)
    pub content: String,
    /// The three accepted finder candidates, in scan order
    pub candidates: [FinderCandidate; 3],
    /// Complexity counter from the center-region sampling
    pub complexity: u32,
    /// High-contrast counter from the center-region sampling
    pub high_contrast: u32,
}
