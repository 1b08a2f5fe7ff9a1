/// Module placement: finder fixtures, separators, timing lines, data zigzag
use super::bitstream::BitstreamPacker;
use crate::models::{MATRIX_SIZE, ModuleMatrix};

/// Edge length of a finder pattern in modules
pub const FINDER_SIZE: usize = 7;

/// Position of the single fixed dark module (row, col)
pub const DARK_MODULE: (usize, usize) = (17, 8);

/// The concentric-square finder fixture: dark border ring, light inner
/// ring, dark 3x3 core
const FINDER_PATTERN: [[bool; FINDER_SIZE]; FINDER_SIZE] = [
    [true, true, true, true, true, true, true],
    [true, false, false, false, false, false, true],
    [true, false, true, true, true, false, true],
    [true, false, true, true, true, false, true],
    [true, false, true, true, true, false, true],
    [true, false, false, false, false, false, true],
    [true, true, true, true, true, true, true],
];

/// Finder origins (row, col): top-left, bottom-left, top-right
const FINDER_ORIGINS: [(usize, usize); 3] = [
    (0, 0),
    (MATRIX_SIZE - FINDER_SIZE, 0),
    (0, MATRIX_SIZE - FINDER_SIZE),
];

/// Lays structural markers and packed payload bits into the module grid
pub struct MatrixEncoder;

impl MatrixEncoder {
    /// Encode a payload into a fully populated module matrix.
    ///
    /// Cannot fail: oversized payloads are truncated by the packer, and any
    /// data positions left after the bits run out are filled with a
    /// checkerboard mask.
    pub fn encode(payload: &str) -> ModuleMatrix {
        let mut matrix = ModuleMatrix::new();

        for &(row, col) in &FINDER_ORIGINS {
            Self::place_finder(&mut matrix, row, col);
        }
        Self::place_separators(&mut matrix);
        Self::place_timing(&mut matrix);
        matrix.set(DARK_MODULE.0, DARK_MODULE.1, true);

        let bits = BitstreamPacker::pack(payload);
        Self::place_data(&mut matrix, &bits);

        matrix
    }

    /// True if (row, col) is reserved for structural markers and must never
    /// carry data: the finder corners with their separators and format
    /// areas, plus both timing lines.
    pub fn is_reserved(row: usize, col: usize) -> bool {
        if (row < 9 && col < 9)
            || (row < 9 && col >= MATRIX_SIZE - 8)
            || (row >= MATRIX_SIZE - 8 && col < 9)
        {
            return true;
        }
        row == 6 || col == 6
    }

    fn place_finder(matrix: &mut ModuleMatrix, start_row: usize, start_col: usize) {
        for (i, pattern_row) in FINDER_PATTERN.iter().enumerate() {
            for (j, &dark) in pattern_row.iter().enumerate() {
                matrix.set(start_row + i, start_col + j, dark);
            }
        }
    }

    /// Force the one-module ring around each finder light
    fn place_separators(matrix: &mut ModuleMatrix) {
        for &(row, col) in &FINDER_ORIGINS {
            for i in -1..=FINDER_SIZE as i32 {
                for j in -1..=FINDER_SIZE as i32 {
                    let on_ring =
                        i == -1 || i == FINDER_SIZE as i32 || j == -1 || j == FINDER_SIZE as i32;
                    if !on_ring {
                        continue;
                    }
                    let r = row as i32 + i;
                    let c = col as i32 + j;
                    if r >= 0 && r < MATRIX_SIZE as i32 && c >= 0 && c < MATRIX_SIZE as i32 {
                        matrix.set(r as usize, c as usize, false);
                    }
                }
            }
        }
    }

    /// Alternating timing lines along row 6 and column 6, dark on even
    /// coordinates
    fn place_timing(matrix: &mut ModuleMatrix) {
        for i in 8..MATRIX_SIZE - 8 {
            matrix.set(6, i, i % 2 == 0);
            matrix.set(i, 6, i % 2 == 0);
        }
    }

    /// Place bits by scanning column pairs right to left in a zigzag,
    /// skipping the timing column and reserved positions. Leftover data
    /// positions get the checkerboard mask.
    fn place_data(matrix: &mut ModuleMatrix, bits: &[bool]) {
        let size = MATRIX_SIZE as i32;
        let mut bit_index = 0usize;
        let mut upward = true;

        let mut col = size - 1;
        while col > 0 {
            if col == 6 {
                // Skip the timing column
                col -= 1;
            }

            for count in 0..size {
                for c in 0..2 {
                    let current_col = (col - c) as usize;
                    let current_row = (if upward { size - 1 - count } else { count }) as usize;

                    if Self::is_reserved(current_row, current_col) {
                        continue;
                    }

                    if bit_index < bits.len() {
                        matrix.set(current_row, current_col, bits[bit_index]);
                        bit_index += 1;
                    } else {
                        matrix.set(current_row, current_col, (current_row + current_col) % 2 == 0);
                    }
                }
            }

            upward = !upward;
            col -= 2;
        }
    }
}
