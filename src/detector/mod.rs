//! Badge detection modules
//!
//! This module contains the heuristic decode path, run once per frame:
//! - Finder candidate detection (grid-sampled window statistics)
//! - Structure validation (three candidates forming a plausible triangle)
//! - Heuristic decoding (center-region contrast, identifier rotation)

/// Finder candidate detection by window statistics
pub mod finder;
/// Heuristic presence decoding and identifier rotation
pub mod heuristic;
/// Triangle plausibility check on candidate sets
pub mod structure;

pub use finder::FinderScanner;
pub use heuristic::{HeuristicDecoder, HeuristicOutcome};
pub use structure::StructureValidator;
