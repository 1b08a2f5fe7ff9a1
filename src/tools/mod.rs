//! Image I/O helpers shared by the CLI and tests

use std::path::Path;

use crate::capture::Frame;
use crate::models::Bitmap;

/// Load an image file as RGB bytes along with its dimensions.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// Save a luma bitmap as a PNG file.
pub fn save_bitmap_png<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<(), image::ImageError> {
    let img = image::GrayImage::from_raw(
        bitmap.width() as u32,
        bitmap.height() as u32,
        bitmap.as_bytes().to_vec(),
    )
    .expect("bitmap buffer matches its dimensions");
    img.save(path)
}

/// Expand a luma bitmap into an RGB capture frame, for feeding rendered
/// output back through the scan pipeline.
pub fn frame_from_bitmap(bitmap: &Bitmap) -> Frame {
    let mut rgb = Vec::with_capacity(bitmap.as_bytes().len() * 3);
    for &luma in bitmap.as_bytes() {
        rgb.extend_from_slice(&[luma, luma, luma]);
    }
    Frame::rgb(rgb, bitmap.width(), bitmap.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bitmap;

    #[test]
    fn test_frame_from_bitmap() {
        let mut bmp = Bitmap::filled(2, 1, 255);
        bmp.put(0, 0, 7);
        let frame = frame_from_bitmap(&bmp);
        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 1);
        assert_eq!(frame.data, vec![7, 7, 7, 255, 255, 255]);
    }
}
