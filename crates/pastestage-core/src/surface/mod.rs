//! Drawing surfaces.
//!
//! The engine never touches pixels directly. It issues a small set of
//! drawing commands against the [`Surface`] trait, which the host implements
//! for its document layers and overlay. [`RasterSurface`] is a complete
//! software implementation on top of `image::RgbaImage`.
//!
//! All coordinates passed to a surface are in document space.

mod raster;

pub use raster::RasterSurface;

use crate::config::Color;
use crate::geometry::{Point, Rect};
use crate::placement::{ImageHandle, StagedPlacement};

/// Where and how to draw an image.
///
/// The image is stretched to `bounds`, rotated by `rotation` radians about
/// the center of `bounds`, and blended at `opacity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDraw {
    pub bounds: Rect,
    pub rotation: f64,
    pub opacity: f64,
}

impl ImageDraw {
    /// Draw command for a placement at the given opacity.
    pub fn for_placement(placement: &StagedPlacement, opacity: f64) -> Self {
        Self {
            bounds: placement.bounds(),
            rotation: placement.rotation,
            opacity,
        }
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// Map a point in the destination onto the unrotated image rectangle.
    ///
    /// This is the inverse of the draw transform: the point is rotated by
    /// `-rotation` about the center of `bounds`.
    pub fn unrotate(&self, p: Point) -> Point {
        if !self.is_rotated() {
            return p;
        }
        let center = self.bounds.center();
        let (sin, cos) = self.rotation.sin_cos();
        let dx = p.x - center.x;
        let dy = p.y - center.y;
        Point::new(center.x + dx * cos + dy * sin, center.y - dx * sin + dy * cos)
    }

    /// Axis-aligned box covering the drawn (possibly rotated) image.
    pub fn footprint(&self) -> Rect {
        if !self.is_rotated() {
            return self.bounds;
        }
        let center = self.bounds.center();
        let (sin, cos) = self.rotation.sin_cos();
        let half_w = (self.bounds.width * cos).abs() / 2.0 + (self.bounds.height * sin).abs() / 2.0;
        let half_h = (self.bounds.width * sin).abs() / 2.0 + (self.bounds.height * cos).abs() / 2.0;
        Rect::new(center.x - half_w, center.y - half_h, half_w * 2.0, half_h * 2.0)
    }
}

/// Stroke parameters for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash and gap length; `None` draws a solid line.
    pub dash: Option<f64>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, dash: f64) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Pixel dimensions as (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Change the pixel dimensions. Resizing clears the surface.
    fn resize(&mut self, width: u32, height: u32);

    /// Make every pixel fully transparent.
    fn clear(&mut self);

    /// Composite an image.
    fn draw_image(&mut self, image: &ImageHandle, draw: &ImageDraw);

    /// Outline a rectangle; the stroke is centered on its border.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}
