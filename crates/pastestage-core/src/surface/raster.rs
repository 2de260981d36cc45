//! Software rasterizer backing a [`Surface`] with an RGBA pixel buffer.
//!
//! # Algorithm
//!
//! Images are drawn by inverse mapping: for every destination pixel inside
//! the drawn image's footprint, the pixel center is rotated back into the
//! unrotated placement rectangle, scaled into source pixel coordinates and
//! sampled bilinearly. The sample is then blended source-over onto the
//! destination with straight alpha.
//!
//! Rectangles (fills and strokes) cover a pixel when its center lies inside
//! the shape. Strokes narrower than one pixel are widened to one pixel so
//! outlines stay visible at high zoom.

use image::{Rgba, RgbaImage};

use super::{ImageDraw, StrokeStyle, Surface};
use crate::config::Color;
use crate::geometry::{Point, Rect};
use crate::placement::ImageHandle;

/// An in-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Range of pixel indices whose centers fall in `[start, end)`,
    /// clipped to `0..limit`.
    fn covered(start: f64, end: f64, limit: u32) -> std::ops::Range<u32> {
        let first = (start - 0.5).ceil().max(0.0);
        let last = (end - 0.5).ceil().min(limit as f64);
        if first >= last {
            return 0..0;
        }
        first as u32..last as u32
    }

    fn blend_at(&mut self, x: u32, y: u32, src: Rgba<u8>) {
        let dst = self.pixels.get_pixel_mut(x, y);
        *dst = blend_over(*dst, src);
    }

    /// Fill a rectangle, optionally keeping only pixels selected by `keep`.
    fn fill_with<F>(&mut self, rect: Rect, color: Rgba<u8>, keep: F)
    where
        F: Fn(u32, u32) -> bool,
    {
        let (width, height) = self.pixels.dimensions();
        for py in Self::covered(rect.top(), rect.bottom(), height) {
            for px in Self::covered(rect.left(), rect.right(), width) {
                if keep(px, py) {
                    self.blend_at(px, py, color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.pixels.dimensions() != (width, height) {
            self.pixels = RgbaImage::new(width, height);
        }
    }

    fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, draw: &ImageDraw) {
        let src = image.pixels();
        let bounds = draw.bounds;
        if src.width() == 0 || src.height() == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }

        let opacity = draw.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }

        let scale_x = src.width() as f64 / bounds.width;
        let scale_y = src.height() as f64 / bounds.height;
        let footprint = draw.footprint();
        let (width, height) = self.pixels.dimensions();

        for py in Self::covered(footprint.top(), footprint.bottom(), height) {
            for px in Self::covered(footprint.left(), footprint.right(), width) {
                let local = draw.unrotate(Point::new(px as f64 + 0.5, py as f64 + 0.5));
                let u = local.x - bounds.x;
                let v = local.y - bounds.y;
                if u < 0.0 || v < 0.0 || u >= bounds.width || v >= bounds.height {
                    continue;
                }

                let mut sample = sample_bilinear(src, u * scale_x - 0.5, v * scale_y - 0.5);
                if sample[3] == 0 {
                    continue;
                }
                sample[3] = (sample[3] as f64 * opacity).round() as u8;
                self.blend_at(px, py, sample);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        let half = (style.width / 2.0).max(0.5);
        let color = style.color.to_rgba();
        let dash = style.dash.filter(|d| *d > 0.0);

        // A pixel along an edge is drawn when its distance from the edge
        // start falls in an even dash interval.
        let on_dash = |offset: f64| match dash {
            Some(len) => ((offset / len).floor() as i64).rem_euclid(2) == 0,
            None => true,
        };

        let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());

        // Horizontal edges span the full outer width; vertical edges only
        // fill the gap between them so corners are not blended twice.
        for edge_y in [top, bottom] {
            let band = Rect::new(left - half, edge_y - half, rect.width + 2.0 * half, 2.0 * half);
            self.fill_with(band, color, |px, _| on_dash(px as f64 + 0.5 - left));
        }
        for edge_x in [left, right] {
            let band = Rect::new(edge_x - half, top + half, 2.0 * half, rect.height - 2.0 * half);
            self.fill_with(band, color, |_, py| on_dash(py as f64 + 0.5 - top));
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_with(rect, color.to_rgba(), |_, _| true);
    }
}

/// Sample a pixel using bilinear interpolation with edge clamping.
///
/// `x` and `y` are in source pixel coordinates where integer values address
/// pixel centers. Channels are interpolated with premultiplied alpha so
/// transparent neighbors do not bleed their color.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let max_x = (image.width() - 1) as f64;
    let max_y = (image.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let weights = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x1, y0, fx * (1.0 - fy)),
        (x0, y1, (1.0 - fx) * fy),
        (x1, y1, fx * fy),
    ];

    let mut rgb = [0.0f64; 3];
    let mut alpha = 0.0;
    for (px, py, w) in weights {
        let p = image.get_pixel(px, py);
        let a = p[3] as f64 / 255.0 * w;
        for c in 0..3 {
            rgb[c] += p[c] as f64 * a;
        }
        alpha += a;
    }

    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    Rgba([
        (rgb[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (rgb[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (rgb[2] / alpha).clamp(0.0, 255.0).round() as u8,
        (alpha * 255.0).clamp(0.0, 255.0).round() as u8,
    ])
}

/// Source-over blend of two straight-alpha pixels.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f64 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }

    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (src[c] as f64 * sa + dst[c] as f64 * da * (1.0 - sa)) / out_a;
        out[c] = v.clamp(0.0, 255.0).round() as u8;
    }
    out[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
    Rgba(out)
}
