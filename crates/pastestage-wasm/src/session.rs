//! Staging session bindings.
//!
//! `JsStagingSession` wraps the core engine over an in-memory document with
//! two raster layers (`"mask"` and `"rgb"`). The page forwards its view
//! state (zoom, origin, container) and pointer events, then blits the layer
//! and overlay pixels it reads back.

use image::RgbaImage;
use pastestage_core::{
    Gesture, ImageHandle, Layer, Point, Rect, StageConfig, StagedPlacement, StagingEngine,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::host::RasterHost;

/// Placement snapshot handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub opacity: f64,
}

impl From<&StagedPlacement> for JsPlacement {
    fn from(p: &StagedPlacement) -> Self {
        JsPlacement {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            rotation: p.rotation,
            opacity: p.opacity,
        }
    }
}

fn parse_layer(layer: &str) -> Result<Layer, JsValue> {
    layer.parse::<Layer>().map_err(|e| JsValue::from_str(&e))
}

fn mode_name(mode: Option<Gesture>) -> &'static str {
    match mode {
        None => "idle",
        Some(Gesture::Dragging) => "dragging",
        Some(Gesture::Resizing(_)) => "resizing",
        Some(Gesture::Rotating(_)) => "rotating",
    }
}

/// Interactive paste staging over an in-memory document.
///
/// # Example (TypeScript)
/// ```typescript
/// const session = new JsStagingSession(1024, 768);
/// session.set_zoom(view.zoom);
/// session.set_origin(rect.left, rect.top);
///
/// session.paste(new Uint8Array(await blob.arrayBuffer()));
/// canvas.onpointerdown = (e) => session.pointer_down(e.clientX, e.clientY);
/// canvas.onpointermove = (e) => {
///   session.pointer_move(e.clientX, e.clientY);
///   canvas.style.cursor = session.cursor_for(e.clientX, e.clientY);
/// };
/// ```
#[wasm_bindgen]
pub struct JsStagingSession {
    engine: StagingEngine<RasterHost>,
}

#[wasm_bindgen]
impl JsStagingSession {
    /// Create a session for a blank document with the default styling.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> JsStagingSession {
        Self {
            engine: StagingEngine::new(RasterHost::new(width, height)),
        }
    }

    /// Create a session with custom settings.
    ///
    /// `config` is a plain object; missing fields keep their defaults, e.g.
    /// `{ handle_size: 12, default_opacity: 0.6 }`.
    pub fn with_config(
        width: u32,
        height: u32,
        config: JsValue,
    ) -> Result<JsStagingSession, JsValue> {
        let config: StageConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(Self {
            engine: StagingEngine::with_config(RasterHost::new(width, height), config),
        })
    }

    /// Current settings as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.engine.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.engine.host().layer(Layer::Mask).pixels().width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.engine.host().layer(Layer::Mask).pixels().height()
    }

    /// Set the zoom ratio (display pixels per document pixel).
    pub fn set_zoom(&mut self, zoom: f64) {
        self.engine.host_mut().zoom = zoom;
    }

    /// Set the display position of the document's top-left corner.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.engine.host_mut().origin = Some(Point::new(x, y));
    }

    /// Mark the document canvas as not laid out.
    pub fn clear_origin(&mut self) {
        self.engine.host_mut().origin = None;
    }

    /// Set the display rectangle of the element containing the canvas.
    pub fn set_container(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.engine.host_mut().container = Some(Rect::new(x, y, width, height));
    }

    /// Select the layer accepted placements are drawn into.
    pub fn set_active_layer(&mut self, layer: &str) -> Result<(), JsValue> {
        self.engine.host_mut().active = parse_layer(layer)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn active_layer(&self) -> String {
        self.engine.host().active.as_str().to_string()
    }

    /// Stage pasted PNG or JPEG bytes at the center of the container.
    ///
    /// Returns `false` if a placement is already active.
    pub fn paste(&mut self, bytes: &[u8]) -> Result<bool, JsValue> {
        self.engine
            .acquire_encoded(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stage raw RGBA pixels, e.g. from `ImageData.data`.
    pub fn paste_rgba(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<bool, JsValue> {
        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| JsValue::from_str("Pixel buffer does not match dimensions"))?;
        Ok(self.engine.acquire(ImageHandle::new(image)))
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.engine.start_interaction(Point::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.update_interaction(Point::new(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.engine.end_interaction();
    }

    /// Commit the placement into the active layer.
    pub fn accept(&mut self) -> bool {
        self.engine.accept()
    }

    pub fn cancel(&mut self) {
        self.engine.cancel();
    }

    /// Set the staging opacity, clamped to 0..=1.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.engine.set_opacity(opacity.clamp(0.0, 1.0));
    }

    /// CSS cursor for a hovering pointer.
    pub fn cursor_for(&self, x: f64, y: f64) -> String {
        self.engine.cursor_for(Point::new(x, y)).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_staging(&self) -> bool {
        self.engine.is_staging()
    }

    /// One of "idle", "dragging", "resizing" or "rotating".
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        mode_name(self.engine.mode()).to_string()
    }

    /// Number of undo checkpoints recorded by accepted placements.
    #[wasm_bindgen(getter)]
    pub fn checkpoint_count(&self) -> u32 {
        self.engine.host().checkpoints
    }

    /// Current placement, or `null` when nothing is staged.
    pub fn placement(&self) -> Result<JsValue, JsValue> {
        match self.engine.placement() {
            Some(p) => serde_wasm_bindgen::to_value(&JsPlacement::from(p))
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Copy of a layer's RGBA pixels.
    pub fn layer_pixels(&self, layer: &str) -> Result<Vec<u8>, JsValue> {
        let layer = parse_layer(layer)?;
        Ok(self.engine.host().layer(layer).pixels().as_raw().clone())
    }

    /// Replace a layer's RGBA pixels. The buffer must match the document size.
    pub fn load_layer(&mut self, layer: &str, pixels: Vec<u8>) -> Result<(), JsValue> {
        let layer = parse_layer(layer)?;
        let (width, height) = (self.width(), self.height());
        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| JsValue::from_str("Pixel buffer does not match document size"))?;
        self.engine
            .host_mut()
            .load_layer(layer, image)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Copy of the overlay's RGBA pixels, or `undefined` when not staging.
    pub fn overlay_pixels(&self) -> Option<Vec<u8>> {
        self.engine.host().overlay_pixels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(width, height, color)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn alpha_at(pixels: &[u8], width: u32, x: u32, y: u32) -> u8 {
        pixels[((y * width + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_paste_drag_accept() {
        let mut session = JsStagingSession::new(200, 100);
        assert!(session.paste(&png(60, 60, Rgba([255, 0, 0, 255]))).unwrap());
        assert!(session.is_staging());
        assert_eq!(session.mode(), "idle");

        // Placement spans (70, 20)-(130, 80); drag the body 30 px left
        assert_eq!(session.cursor_for(100.0, 50.0), "move");
        assert!(session.pointer_down(100.0, 50.0));
        assert_eq!(session.mode(), "dragging");
        assert!(session.pointer_move(70.0, 50.0));
        session.pointer_up();
        assert_eq!(session.mode(), "idle");

        let overlay = session.overlay_pixels().expect("overlay while staging");
        assert_eq!(overlay.len(), 200 * 100 * 4);
        assert!(alpha_at(&overlay, 200, 70, 50) > 0);

        assert!(session.accept());
        assert!(!session.is_staging());
        assert_eq!(session.checkpoint_count(), 1);
        assert!(session.overlay_pixels().is_none());

        let mask = session.layer_pixels("mask").unwrap();
        assert_eq!(alpha_at(&mask, 200, 70, 50), 255);
        assert_eq!(alpha_at(&mask, 200, 100, 50), 0);
        let rgb = session.layer_pixels("rgb").unwrap();
        assert!(rgb.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_paste_while_staging_is_ignored() {
        let mut session = JsStagingSession::new(100, 100);
        assert!(session.paste(&png(10, 10, Rgba([0, 0, 0, 255]))).unwrap());
        assert!(!session.paste(&png(30, 30, Rgba([0, 0, 0, 255]))).unwrap());
        assert!(!session.paste_rgba(2, 2, vec![0; 16]).unwrap());
    }

    #[test]
    fn test_accept_into_rgb_layer() {
        let mut session = JsStagingSession::new(100, 100);
        session.set_active_layer("rgb").unwrap();
        assert_eq!(session.active_layer(), "rgb");

        assert!(session.paste_rgba(2, 2, vec![0, 255, 0, 255].repeat(4)).unwrap());
        assert!(session.accept());

        let rgb = session.layer_pixels("rgb").unwrap();
        assert_eq!(alpha_at(&rgb, 100, 50, 50), 255);
        let mask = session.layer_pixels("mask").unwrap();
        assert!(mask.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_cancel_discards() {
        let mut session = JsStagingSession::new(100, 100);
        assert!(session.paste_rgba(10, 10, vec![255; 400]).unwrap());
        assert!(session.pointer_down(50.0, 50.0));

        session.cancel();
        assert!(!session.is_staging());
        assert_eq!(session.mode(), "idle");
        assert!(session.overlay_pixels().is_none());
        assert_eq!(session.checkpoint_count(), 0);
        assert!(session.layer_pixels("mask").unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_paste_empty_image_is_ignored() {
        let mut session = JsStagingSession::new(100, 100);
        assert!(!session.paste_rgba(0, 0, Vec::new()).unwrap());
        assert!(!session.is_staging());
        assert!(session.overlay_pixels().is_none());
    }

    #[test]
    fn test_view_state_maps_pointer() {
        let mut session = JsStagingSession::new(100, 100);
        session.set_origin(10.0, 20.0);
        session.set_zoom(2.0);
        session.set_container(10.0, 20.0, 200.0, 200.0);

        // Container center (110, 120) is document (50, 50)
        assert!(session.paste_rgba(40, 40, vec![255; 6400]).unwrap());
        assert_eq!(session.cursor_for(110.0, 120.0), "move");
        // se corner: document (70, 70) is display (150, 160)
        assert_eq!(session.cursor_for(150.0, 160.0), "nwse-resize");

        session.clear_origin();
        assert_eq!(session.cursor_for(110.0, 120.0), "default");
    }

    #[test]
    fn test_load_layer() {
        let mut session = JsStagingSession::new(4, 4);
        session.load_layer("mask", vec![0, 0, 255, 255].repeat(16)).unwrap();
        let mask = session.layer_pixels("mask").unwrap();
        assert_eq!(&mask[..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_set_opacity_updates_overlay() {
        let mut session = JsStagingSession::new(60, 60);
        assert!(session.paste_rgba(20, 20, vec![255; 1600]).unwrap());
        let before = alpha_at(&session.overlay_pixels().unwrap(), 60, 30, 30);
        assert_eq!(before, 204);

        session.set_opacity(0.5);
        let after = alpha_at(&session.overlay_pixels().unwrap(), 60, 30, 30);
        assert!((127..=128).contains(&after));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(mode_name(None), "idle");
        assert_eq!(mode_name(Some(Gesture::Dragging)), "dragging");
    }

    #[test]
    fn test_placement_snapshot() {
        let mut session = JsStagingSession::new(100, 100);
        assert!(session.paste_rgba(10, 20, vec![255; 800]).unwrap());
        let placement = JsPlacement::from(session.engine.placement().unwrap());
        assert_eq!(
            placement,
            JsPlacement {
                x: 45.0,
                y: 40.0,
                width: 10.0,
                height: 20.0,
                rotation: 0.0,
                opacity: 0.8,
            }
        );
    }
}
