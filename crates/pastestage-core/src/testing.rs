//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::{Rc, Weak};

use image::{ImageFormat, RgbaImage};

use crate::config::Color;
use crate::geometry::{Point, Rect};
use crate::host::{Host, Layer};
use crate::placement::ImageHandle;
use crate::surface::{ImageDraw, StrokeStyle, Surface};

/// A drawing command captured by [`RecordingSurface`].
#[derive(Debug, Clone)]
pub enum DrawOp {
    Clear,
    Resize(u32, u32),
    Image { image: ImageHandle, draw: ImageDraw },
    Stroke { rect: Rect, style: StrokeStyle },
    Fill { rect: Rect, color: Color },
}

pub type OpLog = Rc<RefCell<Vec<DrawOp>>>;

/// Surface that records commands instead of drawing.
///
/// The log is shared so it stays readable after the surface has been boxed
/// and handed to the engine.
pub struct RecordingSurface {
    size: (u32, u32),
    ops: OpLog,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> (Self, OpLog) {
        let ops = OpLog::default();
        let surface = Self {
            size: (width, height),
            ops: Rc::clone(&ops),
        };
        (surface, ops)
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.ops.borrow_mut().push(DrawOp::Resize(width, height));
    }

    fn clear(&mut self) {
        self.ops.borrow_mut().push(DrawOp::Clear);
    }

    fn draw_image(&mut self, image: &ImageHandle, draw: &ImageDraw) {
        self.ops.borrow_mut().push(DrawOp::Image {
            image: image.clone(),
            draw: *draw,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.ops.borrow_mut().push(DrawOp::Stroke { rect, style: *style });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Fill { rect, color });
    }
}

/// Scriptable host backed by recording surfaces.
pub struct FakeHost {
    pub origin: Option<Point>,
    pub zoom: f64,
    pub container: Option<Rect>,
    pub document: Option<(u32, u32)>,
    pub layer: Layer,
    pub layers_available: bool,
    pub overlay_available: bool,
    pub mask: RecordingSurface,
    pub mask_ops: OpLog,
    pub rgb: RecordingSurface,
    pub rgb_ops: OpLog,
    pub checkpoints: usize,
    pub overlays_created: usize,
    pub staging: bool,
    overlay_ops: Weak<RefCell<Vec<DrawOp>>>,
}

impl FakeHost {
    /// Document 400x300 shown at zoom 1 with the origin at display (0, 0),
    /// inside a 400x300 container.
    pub fn new() -> Self {
        let (mask, mask_ops) = RecordingSurface::new(400, 300);
        let (rgb, rgb_ops) = RecordingSurface::new(400, 300);
        Self {
            origin: Some(Point::ZERO),
            zoom: 1.0,
            container: Some(Rect::new(0.0, 0.0, 400.0, 300.0)),
            document: Some((400, 300)),
            layer: Layer::Mask,
            layers_available: true,
            overlay_available: true,
            mask,
            mask_ops,
            rgb,
            rgb_ops,
            checkpoints: 0,
            overlays_created: 0,
            staging: false,
            overlay_ops: Weak::new(),
        }
    }

    /// Commands drawn on the overlay, or `None` once it has been dropped.
    pub fn overlay_ops(&self) -> Option<Vec<DrawOp>> {
        self.overlay_ops.upgrade().map(|ops| ops.borrow().clone())
    }

    pub fn overlay_alive(&self) -> bool {
        self.overlay_ops.strong_count() > 0
    }
}

impl Host for FakeHost {
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
        self.document
    }

    fn active_layer(&self) -> Layer {
        self.layer
    }

    fn layer_surface(&mut self, layer: Layer) -> Option<&mut dyn Surface> {
        if !self.layers_available {
            return None;
        }
        match layer {
            Layer::Mask => Some(&mut self.mask),
            Layer::Rgb => Some(&mut self.rgb),
        }
    }

    fn create_overlay(&mut self, width: u32, height: u32) -> Option<Box<dyn Surface>> {
        if !self.overlay_available {
            return None;
        }
        let (surface, ops) = RecordingSurface::new(width, height);
        self.overlay_ops = Rc::downgrade(&ops);
        self.overlays_created += 1;
        Some(Box::new(surface))
    }

    fn save_checkpoint(&mut self) {
        self.checkpoints += 1;
    }

    fn set_staging_mode(&mut self, staging: bool) {
        self.staging = staging;
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding");
    bytes
}
