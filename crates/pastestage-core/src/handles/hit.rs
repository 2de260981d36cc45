//! Pointer hit-testing against handles and the placement body.

use std::fmt;

use super::{compute_handles, Handle, HandleKind, HandlePosition};
use crate::config::StageConfig;
use crate::geometry::{CoordinateMapper, Point, Rect};

/// Result of a successful hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// The pointer is over a resize or rotate handle.
    Handle(Handle),
    /// The pointer is inside the bounding box but over no handle.
    Move,
}

impl Hit {
    pub fn kind(&self) -> HandleKind {
        match self {
            Hit::Handle(handle) => handle.kind,
            Hit::Move => HandleKind::Move,
        }
    }

    pub fn position(&self) -> HandlePosition {
        match self {
            Hit::Handle(handle) => handle.position,
            Hit::Move => HandlePosition::Center,
        }
    }
}

/// Resolve a display-space pointer against a document-space bounding box.
///
/// Handles are tested first, in [`compute_handles`] order, and take priority
/// over the body even when the pointer is also inside the box. The body test
/// uses the axis-aligned box and ignores rotation.
pub fn hit_test(
    pointer: Point,
    bounds: Rect,
    mapper: &CoordinateMapper,
    config: &StageConfig,
) -> Option<Hit> {
    let handles = compute_handles(bounds, mapper, config);
    if let Some(handle) = handles
        .into_iter()
        .find(|h| pointer.distance_to(h.point()) <= h.size + config.hit_slack)
    {
        return Some(Hit::Handle(handle));
    }

    if bounds.contains(mapper.to_document(pointer)) {
        return Some(Hit::Move);
    }

    None
}

/// Pointer cursor to show for a hover position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Grab,
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
}

impl Cursor {
    /// Map a hit test result to its cursor.
    pub fn for_hit(hit: Option<&Hit>) -> Cursor {
        match hit.map(Hit::position) {
            None => Cursor::Default,
            Some(HandlePosition::Center) => Cursor::Move,
            Some(HandlePosition::Rotate) => Cursor::Grab,
            Some(HandlePosition::Nw | HandlePosition::Se) => Cursor::NwseResize,
            Some(HandlePosition::Ne | HandlePosition::Sw) => Cursor::NeswResize,
            Some(HandlePosition::N | HandlePosition::S) => Cursor::NsResize,
            Some(HandlePosition::E | HandlePosition::W) => Cursor::EwResize,
        }
    }

    /// CSS cursor keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::Grab => "grab",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
