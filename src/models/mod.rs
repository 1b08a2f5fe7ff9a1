pub mod bitmap;
pub mod candidate;
pub mod matrix;

pub use bitmap::Bitmap;
pub use candidate::{Detection, FinderCandidate};
pub use matrix::{MATRIX_SIZE, ModuleMatrix};
