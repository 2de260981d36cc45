//! Decoding pasted image bytes.

use std::io::Cursor;

use image::ImageReader;

use crate::error::StageError;
use crate::placement::ImageHandle;

/// Decode encoded image bytes (PNG or JPEG) into an RGBA bitmap.
///
/// The format is sniffed from the data, so clipboard payloads without a
/// reliable MIME type still decode.
///
/// # Errors
///
/// Returns `StageError::Decode` if the format is unknown or the data is
/// corrupt, and `StageError::EmptyImage` if the image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<ImageHandle, StageError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| StageError::Decode(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| StageError::Decode(e.to_string()))?;

    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(StageError::EmptyImage);
    }
    Ok(ImageHandle::new(rgba))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::encode_png;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_decode_png() {
        let src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]));
        let decoded = decode_image(&encode_png(&src)).expect("decodes");

        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(*decoded.pixels().get_pixel(2, 1), Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(StageError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(decode_image(&[]), Err(StageError::Decode(_))));
    }
}
