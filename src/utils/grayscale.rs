/// Convert RGB/RGBA frames to grayscale
/// Y = round(0.299*R + 0.587*G + 0.114*B)
/// Computed in integer arithmetic: Y = (299*R + 587*G + 114*B + 500) / 1000,
/// which matches the rounded floating-point form exactly.
use rayon::prelude::*;

/// Coefficients for grayscale conversion, scaled by 1000
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + 500) / 1000) as u8
}

/// Convert an RGB image (3 bytes per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = Vec::new();
    rgb_to_grayscale_with_buffer(rgb, width, height, &mut gray);
    gray
}

/// Convert an RGB image into a reusable output buffer
pub fn rgb_to_grayscale_with_buffer(rgb: &[u8], width: usize, height: usize, gray: &mut Vec<u8>) {
    let pixel_count = width * height;
    gray.clear();
    gray.reserve(pixel_count);
    for i in 0..pixel_count {
        let idx = i * 3;
        gray.push(luma(rgb[idx], rgb[idx + 1], rgb[idx + 2]));
    }
}

/// Convert an RGBA image (4 bytes per pixel) to grayscale, ignoring alpha
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = Vec::with_capacity(pixel_count);
    for i in 0..pixel_count {
        let idx = i * 4;
        gray.push(luma(rgba[idx], rgba[idx + 1], rgba[idx + 2]));
    }
    gray
}

/// Convert RGB to grayscale using parallel row processing
///
/// Worth it on camera-sized frames; the scan pipeline switches to this path
/// above a frame-size threshold.
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 3;
            *out = luma(rgb[idx], rgb[idx + 1], rgb[idx + 2]);
        }
    });

    gray
}

/// Convert RGBA to grayscale using parallel row processing
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 4;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 4;
            *out = luma(rgba[idx], rgba[idx + 1], rgba[idx + 2]);
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let white = vec![255, 255, 255];
        let gray = rgb_to_grayscale(&white, 1, 1);
        assert_eq!(gray[0], 255);

        // Pure black
        let black = vec![0, 0, 0];
        let gray = rgb_to_grayscale(&black, 1, 1);
        assert_eq!(gray[0], 0);

        // Pure red: round(0.299 * 255) = 76
        let red = vec![255, 0, 0];
        let gray = rgb_to_grayscale(&red, 1, 1);
        assert_eq!(gray[0], 76);

        // Pure green: round(0.587 * 255) = 150
        let green = vec![0, 255, 0];
        let gray = rgb_to_grayscale(&green, 1, 1);
        assert_eq!(gray[0], 150);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let px = vec![10, 20, 30, 0];
        let gray = rgba_to_grayscale(&px, 1, 1);
        assert_eq!(gray[0], luma(10, 20, 30));
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let width = 33;
        let height = 9;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        assert_eq!(
            rgb_to_grayscale(&rgb, width, height),
            rgb_to_grayscale_parallel(&rgb, width, height)
        );
    }

    #[test]
    fn test_with_buffer_reuse() {
        let rgb = vec![255u8; 2 * 2 * 3];
        let mut buf = vec![1, 2, 3];
        rgb_to_grayscale_with_buffer(&rgb, 2, 2, &mut buf);
        assert_eq!(buf, vec![255; 4]);
    }
}
