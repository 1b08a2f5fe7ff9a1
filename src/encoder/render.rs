/// Rasterization of a module matrix to a luma bitmap
use crate::models::{Bitmap, MATRIX_SIZE, ModuleMatrix};

/// Quiet-zone allowance, in modules, added to the edge-length divisor
pub const QUIET_ZONE_MODULES: usize = 8;

/// Paints a module matrix onto a centered white canvas
pub struct Renderer;

impl Renderer {
    /// Render the matrix onto a square canvas of `canvas_size` pixels.
    ///
    /// The module edge is `canvas_size / (MATRIX_SIZE + 8)` so a quiet zone
    /// always remains; the module grid is centered. Deterministic: identical
    /// inputs produce byte-identical bitmaps. A canvas too small to hold one
    /// pixel per module comes back all white.
    pub fn render(matrix: &ModuleMatrix, canvas_size: usize) -> Bitmap {
        let mut bitmap = Bitmap::filled(canvas_size, canvas_size, 255);

        let module = canvas_size / (MATRIX_SIZE + QUIET_ZONE_MODULES);
        if module == 0 {
            return bitmap;
        }
        let offset = (canvas_size - MATRIX_SIZE * module) / 2;

        for row in 0..MATRIX_SIZE {
            for col in 0..MATRIX_SIZE {
                if !matrix.get(row, col) {
                    continue;
                }
                let x0 = offset + col * module;
                let y0 = offset + row * module;
                for dy in 0..module {
                    for dx in 0..module {
                        bitmap.put(x0 + dx, y0 + dy, 0);
                    }
                }
            }
        }

        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::MatrixEncoder;

    #[test]
    fn test_render_deterministic() {
        let matrix = MatrixEncoder::encode("determinism");
        let a = Renderer::render(&matrix, 300);
        let b = Renderer::render(&matrix, 300);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_quiet_zone_stays_white() {
        let matrix = MatrixEncoder::encode("quiet zone");
        let bitmap = Renderer::render(&matrix, 300);
        // module = 300 / 33 = 9, offset = (300 - 225) / 2 = 37
        for i in 0..300 {
            assert_eq!(bitmap.get(i, 0), 255);
            assert_eq!(bitmap.get(0, i), 255);
            assert_eq!(bitmap.get(i, 36), 255);
            assert_eq!(bitmap.get(36, i), 255);
        }
    }

    #[test]
    fn test_module_geometry() {
        let matrix = MatrixEncoder::encode("geometry");
        let bitmap = Renderer::render(&matrix, 300);
        // Top-left finder border module (0, 0) spans a 9x9 block at (37, 37)
        assert_eq!(bitmap.get(37, 37), 0);
        assert_eq!(bitmap.get(45, 45), 0);
        // Finder inner ring module (1, 1) is light
        assert_eq!(bitmap.get(37 + 9 + 4, 37 + 9 + 4), 255);
    }

    #[test]
    fn test_tiny_canvas_is_blank() {
        let matrix = MatrixEncoder::encode("tiny");
        let bitmap = Renderer::render(&matrix, 20);
        assert!(bitmap.as_bytes().iter().all(|&p| p == 255));
    }
}
