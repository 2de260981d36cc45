//! Error types for the staging engine.

use thiserror::Error;

/// Errors returned while acquiring a placement.
///
/// Every other engine operation degrades to a no-op instead of failing.
#[derive(Debug, Error)]
pub enum StageError {
    /// The pasted bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The decoded image has zero width or height.
    #[error("Image has no pixels")]
    EmptyImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StageError::Decode("bad header".to_string());
        assert_eq!(err.to_string(), "Failed to decode image: bad header");
        assert_eq!(StageError::EmptyImage.to_string(), "Image has no pixels");
    }
}
