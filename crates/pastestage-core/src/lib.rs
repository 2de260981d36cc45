//! Pastestage Core - Transform engine for pasted images
//!
//! This crate stages a pasted bitmap above an editing surface and lets the
//! user move, resize and rotate it with pointer gestures before committing
//! it into a document layer. It covers:
//!
//! - mapping between display (screen) and document coordinates,
//! - handle geometry and pointer hit-testing,
//! - the drag / resize / rotate gesture state machine,
//! - overlay rendering and final compositing,
//! - the acquire / accept / cancel lifecycle.
//!
//! The editor supplies its surfaces, zoom and undo history through the
//! [`Host`] trait.

pub mod config;
pub mod decode;
pub mod geometry;
pub mod handles;
pub mod host;
pub mod interaction;
pub mod placement;
pub mod render;
pub mod stage;
pub mod surface;

mod error;

#[cfg(test)]
mod testing;

pub use config::{Color, StageConfig};
pub use decode::decode_image;
pub use error::StageError;
pub use geometry::{CoordinateMapper, Point, Rect};
pub use handles::{compute_handles, hit_test, Cursor, Handle, HandleKind, HandlePosition, Hit};
pub use host::{Host, Layer};
pub use interaction::{Gesture, TransformStateMachine};
pub use placement::{ImageHandle, StagedPlacement};
pub use render::{composite, render_overlay};
pub use stage::StagingEngine;
pub use surface::{ImageDraw, RasterSurface, StrokeStyle, Surface};
