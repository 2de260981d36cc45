//! Tunable constants for handle geometry, gesture rules and overlay styling.

use serde::{Deserialize, Serialize};

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to the image crate's pixel type.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Configuration for a staging engine.
///
/// Distances in the handle section are display-space units; the overlay
/// renderer divides the styling widths by the zoom ratio so they keep a
/// constant on-screen size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Side length of a handle square and its base hit radius.
    pub handle_size: f64,
    /// Distance of the rotate handle above the top edge midpoint.
    pub rotate_handle_offset: f64,
    /// Extra tolerance added to `handle_size` when hit-testing handles.
    pub hit_slack: f64,
    /// Minimum width and height of a placement after a resize (document space).
    pub min_size: f64,
    /// Maximum deviation of `width / height` from the initial aspect ratio
    /// before a corner resize is corrected.
    pub aspect_tolerance: f64,
    /// Opacity of a freshly acquired placement.
    pub default_opacity: f64,
    /// Stroke width of the dashed bounding outline.
    pub outline_width: f64,
    /// Dash and gap length of the bounding outline.
    pub dash_length: f64,
    /// Border width drawn around each handle.
    pub handle_border_width: f64,
    /// Outline and resize handle fill color.
    pub accent_color: Color,
    /// Rotate handle fill color.
    pub rotate_color: Color,
    /// Handle border color.
    pub border_color: Color,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            handle_size: 10.0,
            rotate_handle_offset: 30.0,
            hit_slack: 5.0,
            min_size: 10.0,
            aspect_tolerance: 0.1,
            default_opacity: 0.8,
            outline_width: 2.0,
            dash_length: 5.0,
            handle_border_width: 1.0,
            accent_color: Color::rgb(0x00, 0x7a, 0xcc),
            rotate_color: Color::rgb(0xff, 0x6b, 0x6b),
            border_color: Color::WHITE,
        }
    }
}

impl StageConfig {
    /// Create a configuration with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Radius within which a pointer hits a handle.
    pub fn hit_radius(&self) -> f64 {
        self.handle_size + self.hit_slack
    }
}
