//! Drag, resize and rotate gestures.
//!
//! A gesture begins with [`TransformStateMachine::start`] when the pointer
//! goes down on the placement, is driven by [`TransformStateMachine::update`]
//! on every pointer move, and finishes with [`TransformStateMachine::end`].
//!
//! Every update is computed from a snapshot of the placement taken at
//! gesture start and the current pointer position, never from the previous
//! update. Replaying the same pointer position always yields the same
//! placement.

use crate::config::StageConfig;
use crate::geometry::{CoordinateMapper, Point, Rect};
use crate::handles::{hit_test, Handle, HandleKind, Hit};
use crate::placement::StagedPlacement;

/// The active gesture. Idle is represented by the absence of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Moving the whole placement.
    Dragging,
    /// Resizing via a corner or edge handle.
    Resizing(Handle),
    /// Rotating via the rotate handle.
    Rotating(Handle),
}

impl Gesture {
    /// The handle driving this gesture, if any.
    pub fn handle(&self) -> Option<&Handle> {
        match self {
            Gesture::Dragging => None,
            Gesture::Resizing(handle) | Gesture::Rotating(handle) => Some(handle),
        }
    }
}

/// Transient record of an in-progress gesture.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    /// Pointer position at gesture start (display space).
    pub start_pointer: Point,
    /// Placement as it was at gesture start.
    pub initial: StagedPlacement,
    pub gesture: Gesture,
}

/// Owns the current gesture and computes placements from pointer motion.
#[derive(Debug, Clone, Default)]
pub struct TransformStateMachine {
    session: Option<InteractionSession>,
}

impl TransformStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.session.as_ref().map(|s| s.gesture)
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture(), Some(Gesture::Dragging))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture(), Some(Gesture::Resizing(_)))
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.gesture(), Some(Gesture::Rotating(_)))
    }

    /// Begin a gesture at a display-space pointer position.
    ///
    /// Returns `false` and leaves the state untouched when the pointer misses
    /// both the handles and the body. A gesture already in progress is
    /// replaced.
    pub fn start(
        &mut self,
        placement: &StagedPlacement,
        pointer: Point,
        mapper: &CoordinateMapper,
        config: &StageConfig,
    ) -> bool {
        let gesture = match hit_test(pointer, placement.bounds(), mapper, config) {
            None => return false,
            Some(Hit::Move) => Gesture::Dragging,
            Some(Hit::Handle(handle)) if handle.kind == HandleKind::Rotate => {
                Gesture::Rotating(handle)
            }
            Some(Hit::Handle(handle)) => Gesture::Resizing(handle),
        };

        log::debug!("Starting {:?} at ({}, {})", gesture, pointer.x, pointer.y);
        self.session = Some(InteractionSession {
            start_pointer: pointer,
            initial: placement.clone(),
            gesture,
        });
        true
    }

    /// Apply pointer motion to the placement.
    ///
    /// Returns `true` if the placement was updated, `false` when idle.
    pub fn update(
        &self,
        placement: &mut StagedPlacement,
        pointer: Point,
        mapper: &CoordinateMapper,
        config: &StageConfig,
    ) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let initial = &session.initial;

        match session.gesture {
            Gesture::Dragging => {
                let moved = drag(initial.bounds(), session.start_pointer, pointer, mapper);
                placement.x = moved.x;
                placement.y = moved.y;
            }
            Gesture::Resizing(handle) => {
                placement.set_bounds(resize(initial.bounds(), &handle, pointer, mapper, config));
            }
            Gesture::Rotating(_) => {
                placement.rotation = rotate(initial.bounds(), pointer, mapper);
            }
        }
        true
    }

    /// Finish the current gesture. Safe to call when idle.
    pub fn end(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Gesture ended");
        }
    }
}

/// Translate a box by the document-space pointer delta since gesture start.
pub fn drag(initial: Rect, start: Point, pointer: Point, mapper: &CoordinateMapper) -> Rect {
    let delta = mapper.to_document(pointer) - mapper.to_document(start);
    Rect {
        x: initial.x + delta.x,
        y: initial.y + delta.y,
        ..initial
    }
}

/// Resize a box by dragging one of its corner or edge handles.
///
/// The handle's sides follow the document-space pointer while the opposite
/// sides stay put. Width and height never drop below `config.min_size`.
/// Corner handles additionally keep the initial aspect ratio: when the
/// ratio drifts by more than `config.aspect_tolerance`, the axis that changed
/// less is recomputed from the one that changed more, re-anchored so the
/// opposite corner stays fixed. If that pushes the derived side under the
/// minimum, it is pinned there and the other side follows the ratio.
pub fn resize(
    initial: Rect,
    handle: &Handle,
    pointer: Point,
    mapper: &CoordinateMapper,
    config: &StageConfig,
) -> Rect {
    let cur = mapper.to_document(pointer);
    let position = handle.position;
    let mut next = initial;

    if position.has_north() {
        next.y = cur.y;
        next.height = initial.bottom() - cur.y;
    }
    if position.has_south() {
        next.height = cur.y - initial.y;
    }
    if position.has_west() {
        next.x = cur.x;
        next.width = initial.right() - cur.x;
    }
    if position.has_east() {
        next.width = cur.x - initial.x;
    }

    // Clamp only the extent; a clamped north or west side keeps the pointer
    // position as its origin.
    next.width = next.width.max(config.min_size);
    next.height = next.height.max(config.min_size);

    if handle.kind == HandleKind::Corner {
        let aspect = initial.width / initial.height;
        if (next.width / next.height - aspect).abs() > config.aspect_tolerance {
            if (next.width - initial.width).abs() > (next.height - initial.height).abs() {
                next.height = next.width / aspect;
                if position.has_north() {
                    next.y = initial.bottom() - next.height;
                }
            } else {
                next.width = next.height * aspect;
                if position.has_west() {
                    next.x = initial.right() - next.width;
                }
            }

            // The derived side can land under the minimum for elongated
            // images; pin it to the minimum and scale the other side along.
            let undersized = if next.height < config.min_size {
                next.height = config.min_size;
                next.width = config.min_size * aspect;
                true
            } else if next.width < config.min_size {
                next.width = config.min_size;
                next.height = config.min_size / aspect;
                true
            } else {
                false
            };
            if undersized {
                if position.has_north() {
                    next.y = initial.bottom() - next.height;
                }
                if position.has_west() {
                    next.x = initial.right() - next.width;
                }
            }
        }
    }

    next
}

/// Absolute rotation angle from the box center to the pointer, in radians.
///
/// The center is taken from the box at gesture start and mapped to display
/// space; the result replaces the placement's rotation rather than adding
/// to it.
pub fn rotate(initial: Rect, pointer: Point, mapper: &CoordinateMapper) -> f64 {
    let center = mapper.to_display(initial.center());
    (pointer.y - center.y).atan2(pointer.x - center.x)
}
