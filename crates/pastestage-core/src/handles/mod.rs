//! Interactive control points of a staged placement.
//!
//! Nine handles are derived from the placement's bounding box: four corners,
//! four edge midpoints and a rotate handle floating above the top edge. All
//! handle positions are in display space.
//!
//! # Rotation
//!
//! Handles are computed from the axis-aligned box and ignore the placement's
//! rotation. Once an image has been rotated, the drawn image no longer lines
//! up with its handles or with the body hit area.

mod hit;

pub use hit::{hit_test, Cursor, Hit};

use crate::config::StageConfig;
use crate::geometry::{CoordinateMapper, Point, Rect};

/// What a handle does when dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// Resizes along two axes, preserving aspect ratio.
    Corner,
    /// Resizes along a single axis.
    Edge,
    /// Rotates about the placement center.
    Rotate,
    /// Moves the whole placement (body hit, not a drawn handle).
    Move,
}

/// Where a handle sits on the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePosition {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    E,
    W,
    Rotate,
    Center,
}

impl HandlePosition {
    /// Handle drags the top edge.
    pub fn has_north(self) -> bool {
        matches!(self, HandlePosition::Nw | HandlePosition::Ne | HandlePosition::N)
    }

    /// Handle drags the bottom edge.
    pub fn has_south(self) -> bool {
        matches!(self, HandlePosition::Sw | HandlePosition::Se | HandlePosition::S)
    }

    /// Handle drags the left edge.
    pub fn has_west(self) -> bool {
        matches!(self, HandlePosition::Nw | HandlePosition::Sw | HandlePosition::W)
    }

    /// Handle drags the right edge.
    pub fn has_east(self) -> bool {
        matches!(self, HandlePosition::Ne | HandlePosition::Se | HandlePosition::E)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HandlePosition::Nw => "nw",
            HandlePosition::Ne => "ne",
            HandlePosition::Sw => "sw",
            HandlePosition::Se => "se",
            HandlePosition::N => "n",
            HandlePosition::S => "s",
            HandlePosition::E => "e",
            HandlePosition::W => "w",
            HandlePosition::Rotate => "rotate",
            HandlePosition::Center => "center",
        }
    }
}

/// A control point in display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub position: HandlePosition,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Handle {
    pub fn new(kind: HandleKind, position: HandlePosition, at: Point, size: f64) -> Self {
        Self {
            kind,
            position,
            x: at.x,
            y: at.y,
            size,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Compute the nine handles for a document-space bounding box.
///
/// Order is corners (nw, ne, sw, se), edges (n, s, e, w), then rotate; hit
/// testing relies on it.
pub fn compute_handles(
    bounds: Rect,
    mapper: &CoordinateMapper,
    config: &StageConfig,
) -> Vec<Handle> {
    let [top_left, top_right, bottom_left, bottom_right] =
        bounds.corners().map(|c| mapper.to_display(c));

    let top_mid = top_left.midpoint(top_right);
    let bottom_mid = bottom_left.midpoint(bottom_right);
    let left_mid = top_left.midpoint(bottom_left);
    let right_mid = top_right.midpoint(bottom_right);
    let rotate = Point::new(top_mid.x, top_mid.y - config.rotate_handle_offset);

    let size = config.handle_size;
    let corner = |position, at| Handle::new(HandleKind::Corner, position, at, size);
    let edge = |position, at| Handle::new(HandleKind::Edge, position, at, size);

    vec![
        corner(HandlePosition::Nw, top_left),
        corner(HandlePosition::Ne, top_right),
        corner(HandlePosition::Sw, bottom_left),
        corner(HandlePosition::Se, bottom_right),
        edge(HandlePosition::N, top_mid),
        edge(HandlePosition::S, bottom_mid),
        edge(HandlePosition::E, right_mid),
        edge(HandlePosition::W, left_mid),
        Handle::new(HandleKind::Rotate, HandlePosition::Rotate, rotate, size),
    ]
}
