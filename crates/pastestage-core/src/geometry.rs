//! Points, rectangles and the document/display coordinate mapping.
//!
//! # Coordinate Spaces
//!
//! - **Document space**: logical pixels of the edited surface, independent of
//!   zoom and pan. Placements live here.
//! - **Display space**: on-screen pixels. Handles and pointer events live here.
//!
//! The two are related by an origin offset (the display position of the
//! document's top-left corner) and a uniform scale factor (the zoom ratio):
//!
//! ```text
//! document = (display - origin) / scale
//! display  = document * scale + origin
//! ```

use serde::{Deserialize, Serialize};

/// A 2D point. The coordinate space is implied by context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Arithmetic mean of two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle of the given size centered on a point.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Inclusive containment test: points on the border count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// Bidirectional mapping between document space and display space.
///
/// A mapper built with [`CoordinateMapper::unavailable`] stands in for a
/// display surface that does not exist (yet). Both conversions then return
/// the origin `(0, 0)` instead of failing, and callers treat that as a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    origin: Option<Point>,
    scale: f64,
}

impl CoordinateMapper {
    /// Create a mapper for a display surface whose top-left corner sits at
    /// `origin` (display space) and which is zoomed by `scale`.
    ///
    /// A non-positive or non-finite scale cannot be inverted and yields an
    /// unavailable mapper.
    pub fn new(origin: Point, scale: f64) -> Self {
        if !scale.is_finite() || scale <= 0.0 {
            return Self::unavailable();
        }
        Self {
            origin: Some(origin),
            scale,
        }
    }

    /// A mapper for a missing display surface.
    pub fn unavailable() -> Self {
        Self {
            origin: None,
            scale: 1.0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.origin.is_some()
    }

    /// Zoom ratio of the display surface (1.0 when unavailable).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a display-space point to document space.
    pub fn to_document(&self, p: Point) -> Point {
        match self.origin {
            Some(origin) => Point::new(
                (p.x - origin.x) / self.scale,
                (p.y - origin.y) / self.scale,
            ),
            None => Point::ZERO,
        }
    }

    /// Convert a document-space point to display space.
    pub fn to_display(&self, p: Point) -> Point {
        match self.origin {
            Some(origin) => Point::new(p.x * self.scale + origin.x, p.y * self.scale + origin.y),
            None => Point::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_identity_mapping() {
        let mapper = CoordinateMapper::new(Point::ZERO, 1.0);
        let p = Point::new(12.5, -3.0);
        assert_eq!(mapper.to_document(p), p);
        assert_eq!(mapper.to_display(p), p);
    }

    #[test]
    fn test_origin_and_scale() {
        let mapper = CoordinateMapper::new(Point::new(100.0, 50.0), 2.0);

        // (120 - 100) / 2 = 10, (70 - 50) / 2 = 10
        assert_eq!(mapper.to_document(Point::new(120.0, 70.0)), Point::new(10.0, 10.0));
        // 10 * 2 + 100 = 120, 10 * 2 + 50 = 70
        assert_eq!(mapper.to_display(Point::new(10.0, 10.0)), Point::new(120.0, 70.0));
    }

    #[test]
    fn test_unavailable_returns_origin() {
        let mapper = CoordinateMapper::unavailable();
        assert!(!mapper.is_available());
        assert_eq!(mapper.to_document(Point::new(5.0, 5.0)), Point::ZERO);
        assert_eq!(mapper.to_display(Point::new(5.0, 5.0)), Point::ZERO);
    }

    #[test]
    fn test_invalid_scale_is_unavailable() {
        assert!(!CoordinateMapper::new(Point::ZERO, 0.0).is_available());
        assert!(!CoordinateMapper::new(Point::ZERO, -1.0).is_available());
        assert!(!CoordinateMapper::new(Point::ZERO, f64::NAN).is_available());
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 30.0)));
        assert!(rect.contains(Point::new(20.0, 20.0)));
        assert!(!rect.contains(Point::new(30.1, 20.0)));
        assert!(!rect.contains(Point::new(20.0, 9.9)));
    }

    #[test]
    fn test_rect_centered_at() {
        let rect = Rect::centered_at(Point::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(rect, Rect::new(40.0, 45.0, 20.0, 10.0));
        assert_eq!(rect.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(6.0, 8.0);
        assert_eq!(a.midpoint(b), Point::new(3.0, 4.0));
        assert!((a.distance_to(b) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let mapper = CoordinateMapper::new(Point::new(-33.0, 17.5), 0.75);
        let p = Point::new(123.4, 56.7);
        assert!(approx_eq(mapper.to_document(mapper.to_display(p)), p));
    }
}
