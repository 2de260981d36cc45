//! Overlay rendering and final compositing.
//!
//! The overlay shows the staged image at its configured opacity together
//! with a dashed bounding outline and the handles. Styling widths and handle
//! squares are divided by the zoom ratio so they keep a constant on-screen
//! size regardless of zoom.

use crate::config::StageConfig;
use crate::geometry::{CoordinateMapper, Rect};
use crate::handles::{compute_handles, HandleKind};
use crate::placement::StagedPlacement;
use crate::surface::{ImageDraw, StrokeStyle, Surface};

/// Repaint the overlay surface for a placement.
///
/// Handles are computed in display space and mapped back to document space
/// for drawing. When the display surface is unavailable the handle pass is
/// skipped, since every handle would collapse onto the origin.
pub fn render_overlay(
    surface: &mut dyn Surface,
    placement: &StagedPlacement,
    mapper: &CoordinateMapper,
    config: &StageConfig,
) {
    surface.clear();

    surface.draw_image(&placement.image, &ImageDraw::for_placement(placement, placement.opacity));

    let zoom = mapper.scale();
    let outline = StrokeStyle::dashed(
        config.accent_color,
        config.outline_width / zoom,
        config.dash_length / zoom,
    );
    surface.stroke_rect(placement.bounds(), &outline);

    if !mapper.is_available() {
        return;
    }

    let border = StrokeStyle::solid(config.border_color, config.handle_border_width / zoom);
    for handle in compute_handles(placement.bounds(), mapper, config) {
        let center = mapper.to_document(handle.point());
        let side = handle.size / zoom;
        let square = Rect::centered_at(center, side, side);

        let fill = match handle.kind {
            HandleKind::Rotate => config.rotate_color,
            _ => config.accent_color,
        };
        surface.fill_rect(square, fill);
        surface.stroke_rect(square, &border);
    }
}

/// Draw a placement into a document layer.
///
/// Uses the same rotation rule as the overlay but ignores the staging
/// opacity, so the committed image is fully opaque.
pub fn composite(surface: &mut dyn Surface, placement: &StagedPlacement) {
    surface.draw_image(&placement.image, &ImageDraw::for_placement(placement, 1.0));
}
