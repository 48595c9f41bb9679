//! Remote image fetching and decoding.

use image::DynamicImage;

use crate::source::{self, SourceError};

/// Fetch an image over HTTP and decode it into its in-memory representation.
///
/// Uses the same timeouts as document fetching. Bytes that do not decode as
/// a supported image format are a [`SourceError::ImageDecode`] error.
pub fn fetch_image(url: &str) -> Result<DynamicImage, SourceError> {
    let bytes = source::fetch_bytes(url)?;
    decode_image(&bytes)
}

fn decode_image(bytes: &[u8]) -> Result<DynamicImage, SourceError> {
    image::load_from_memory(bytes).map_err(|_| SourceError::ImageDecode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn test_decode_valid_png_bytes() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let mut encoded = std::io::Cursor::new(Vec::new());
        img.write_to(&mut encoded, ImageFormat::Png).unwrap();

        let decoded = decode_image(encoded.get_ref()).expect("valid png");
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 2);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(SourceError::ImageDecode)
        ));
    }

    #[test]
    fn test_decode_empty_is_error() {
        assert!(matches!(decode_image(&[]), Err(SourceError::ImageDecode)));
    }
}
