//! In-memory host backing the JavaScript session.
//!
//! Both document layers and the overlay are software rasters. JavaScript
//! reads their pixels back and blits them onto its canvases.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use image::RgbaImage;
use pastestage_core::{
    Color, Host, ImageDraw, ImageHandle, Layer, Point, RasterSurface, Rect, StrokeStyle, Surface,
};

/// Overlay raster shared between the engine, which owns it, and the host,
/// which only observes it.
struct SharedRaster(Rc<RefCell<RasterSurface>>);

impl Surface for SharedRaster {
    fn dimensions(&self) -> (u32, u32) {
        self.0.borrow().dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.0.borrow_mut().resize(width, height);
    }

    fn clear(&mut self) {
        self.0.borrow_mut().clear();
    }

    fn draw_image(&mut self, image: &ImageHandle, draw: &ImageDraw) {
        self.0.borrow_mut().draw_image(image, draw);
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.0.borrow_mut().stroke_rect(rect, style);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.0.borrow_mut().fill_rect(rect, color);
    }
}

pub(crate) struct RasterHost {
    pub origin: Option<Point>,
    pub zoom: f64,
    pub container: Option<Rect>,
    pub active: Layer,
    pub checkpoints: u32,
    pub staging: bool,
    mask: RasterSurface,
    rgb: RasterSurface,
    overlay: Weak<RefCell<RasterSurface>>,
}

impl RasterHost {
    /// A blank document of the given size at zoom 1, with the container
    /// matching the document.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            origin: Some(Point::ZERO),
            zoom: 1.0,
            container: Some(Rect::new(0.0, 0.0, width as f64, height as f64)),
            active: Layer::Mask,
            checkpoints: 0,
            staging: false,
            mask: RasterSurface::new(width, height),
            rgb: RasterSurface::new(width, height),
            overlay: Weak::new(),
        }
    }

    pub fn layer(&self, layer: Layer) -> &RasterSurface {
        match layer {
            Layer::Mask => &self.mask,
            Layer::Rgb => &self.rgb,
        }
    }

    /// Replace a layer's contents. The image must match the document size.
    pub fn load_layer(&mut self, layer: Layer, pixels: RgbaImage) -> Result<(), String> {
        let expected = self.mask.dimensions();
        if pixels.dimensions() != expected {
            return Err(format!(
                "Layer must be {}x{}, got {}x{}",
                expected.0,
                expected.1,
                pixels.width(),
                pixels.height()
            ));
        }
        let surface = RasterSurface::from_image(pixels);
        match layer {
            Layer::Mask => self.mask = surface,
            Layer::Rgb => self.rgb = surface,
        }
        Ok(())
    }

    /// Copy of the overlay pixels while the overlay exists.
    pub fn overlay_pixels(&self) -> Option<Vec<u8>> {
        self.overlay
            .upgrade()
            .map(|overlay| overlay.borrow().pixels().as_raw().clone())
    }
}

impl Host for RasterHost {
    fn display_origin(&self) -> Option<Point> {
        self.origin
    }

    fn zoom_ratio(&self) -> f64 {
        self.zoom
    }

    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn document_size(&self) -> Option<(u32, u32)> {
        Some(self.mask.dimensions())
    }

    fn active_layer(&self) -> Layer {
        self.active
    }

    fn layer_surface(&mut self, layer: Layer) -> Option<&mut dyn Surface> {
        match layer {
            Layer::Mask => Some(&mut self.mask),
            Layer::Rgb => Some(&mut self.rgb),
        }
    }

    fn create_overlay(&mut self, width: u32, height: u32) -> Option<Box<dyn Surface>> {
        let overlay = Rc::new(RefCell::new(RasterSurface::new(width, height)));
        self.overlay = Rc::downgrade(&overlay);
        Some(Box::new(SharedRaster(overlay)))
    }

    fn save_checkpoint(&mut self) {
        self.checkpoints += 1;
    }

    fn set_staging_mode(&mut self, staging: bool) {
        self.staging = staging;
    }
}
