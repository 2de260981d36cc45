//! The host collaborator: everything the engine needs from the editor.

use crate::geometry::{Point, Rect};
use crate::surface::Surface;

/// The two document layers an accepted placement can be composited into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Mask,
    Rgb,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Mask => "mask",
            Layer::Rgb => "rgb",
        }
    }
}

impl std::str::FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mask" => Ok(Layer::Mask),
            "rgb" => Ok(Layer::Rgb),
            other => Err(format!("Unknown layer: {}", other)),
        }
    }
}

/// Services provided by the editing application.
///
/// Every accessor may report that its resource is unavailable by returning
/// `None`. The engine then skips the dependent work instead of failing.
pub trait Host {
    /// Display-space position of the document surface's top-left corner.
    fn display_origin(&self) -> Option<Point>;

    /// Current zoom ratio (display pixels per document pixel).
    fn zoom_ratio(&self) -> f64;

    /// Display-space geometry of the element that contains the canvas.
    fn container_rect(&self) -> Option<Rect>;

    /// Pixel dimensions of the document surface.
    fn document_size(&self) -> Option<(u32, u32)>;

    /// Layer that receives accepted placements.
    fn active_layer(&self) -> Layer;

    /// Drawing surface of a document layer.
    fn layer_surface(&mut self, layer: Layer) -> Option<&mut dyn Surface>;

    /// Create the overlay surface shown above the document while staging.
    ///
    /// The engine owns the returned surface and drops it when staging ends.
    fn create_overlay(&mut self, width: u32, height: u32) -> Option<Box<dyn Surface>>;

    /// Record an undo checkpoint after a placement has been composited.
    fn save_checkpoint(&mut self);

    /// Staging mode flag used by the host to gate other input handling.
    fn set_staging_mode(&mut self, staging: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_parse() {
        assert_eq!("mask".parse::<Layer>(), Ok(Layer::Mask));
        assert_eq!("rgb".parse::<Layer>(), Ok(Layer::Rgb));
        assert!("alpha".parse::<Layer>().is_err());
        assert_eq!(Layer::Rgb.as_str(), "rgb");
    }
}
