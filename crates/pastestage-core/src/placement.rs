//! The staged image and its current transform.

use std::sync::Arc;

use image::RgbaImage;

use crate::geometry::{Point, Rect};

/// Shared, read-only handle to a decoded bitmap.
///
/// Cloning the handle is cheap; the pixels are never copied or mutated by
/// the engine.
#[derive(Debug, Clone)]
pub struct ImageHandle(Arc<RgbaImage>);

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.0
    }

    /// True if both handles refer to the same bitmap.
    pub fn ptr_eq(&self, other: &ImageHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<RgbaImage> for ImageHandle {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

/// The single transformable image being staged.
///
/// Position and size are in document space. `rotation` is in radians about
/// the placement's center and is never normalized.
#[derive(Debug, Clone)]
pub struct StagedPlacement {
    pub image: ImageHandle,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl StagedPlacement {
    /// Place an image at its natural size, centered on a document-space point.
    pub fn centered_at(image: ImageHandle, center: Point, opacity: f64) -> Self {
        let bounds = Rect::centered_at(center, image.width() as f64, image.height() as f64);
        Self {
            image,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            opacity,
        }
    }

    /// Axis-aligned bounding box, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Overwrite position and size from a rectangle.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.x = bounds.x;
        self.y = bounds.y;
        self.width = bounds.width;
        self.height = bounds.height;
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> ImageHandle {
        ImageHandle::new(RgbaImage::new(width, height))
    }

    #[test]
    fn test_centered_at_uses_natural_size() {
        let placement =
            StagedPlacement::centered_at(image(200, 100), Point::new(300.0, 200.0), 0.8);

        assert_eq!(placement.x, 200.0);
        assert_eq!(placement.y, 150.0);
        assert_eq!(placement.width, 200.0);
        assert_eq!(placement.height, 100.0);
        assert_eq!(placement.rotation, 0.0);
        assert_eq!(placement.opacity, 0.8);
        assert_eq!(placement.center(), Point::new(300.0, 200.0));
    }

    #[test]
    fn test_set_bounds() {
        let mut placement = StagedPlacement::centered_at(image(10, 10), Point::ZERO, 1.0);
        placement.set_bounds(Rect::new(1.0, 2.0, 30.0, 40.0));
        assert_eq!(placement.bounds(), Rect::new(1.0, 2.0, 30.0, 40.0));
    }

    #[test]
    fn test_image_handle_identity() {
        let a = image(4, 4);
        let b = a.clone();
        let c = image(4, 4);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
