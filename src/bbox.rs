use euclid::default::{Box2D, Point2D};
use std::fmt;

use crate::point::Point;

/// Minimal axis-aligned box around a shape, stored as min/max corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox(Box2D<f64>);

impl BoundingBox {
    /// Box with top-left corner `(x, y)` and size `w` x `h`.
    ///
    /// Negative extents are folded back so that `w` and `h` are never negative.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + w, y + h))
    }

    /// Smallest box containing both corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        BoundingBox(Box2D::new(
            Point2D::new(a.x().min(b.x()), a.y().min(b.y())),
            Point2D::new(a.x().max(b.x()), a.y().max(b.y())),
        ))
    }

    pub fn x(&self) -> f64 {
        self.0.min.x
    }

    pub fn y(&self) -> f64 {
        self.0.min.y
    }

    pub fn w(&self) -> f64 {
        self.0.width()
    }

    pub fn h(&self) -> f64 {
        self.0.height()
    }

    pub fn min(&self) -> Point {
        Point::new(self.0.min.x, self.0.min.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.0.max.x, self.0.max.y)
    }

    /// Corners in clockwise order starting at the minimum corner.
    pub fn corners(&self) -> [Point; 4] {
        let (min, max) = (self.min(), self.max());
        [
            min,
            Point::new(max.x(), min.y()),
            max,
            Point::new(min.x(), max.y()),
        ]
    }

    /// Smallest box spanning both, zero-area boxes included.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox(Box2D::new(self.0.min.min(other.0.min), self.0.max.max(other.0.max)))
    }

    pub fn is_finite(&self) -> bool {
        [self.x(), self.y(), self.w(), self.h()].iter().all(|v| v.is_finite())
    }

    /// Strict overlap: boxes sharing only an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.0.intersects(&other.0)
    }

    /// Inclusive containment, boundary points count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x() >= self.0.min.x && p.x() <= self.0.max.x
            && p.y() >= self.0.min.y && p.y() <= self.0.max.y
    }

    pub fn translated(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox(self.0.translate(euclid::default::Vector2D::new(dx, dy)))
    }

    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.x() - other.x()).abs() <= tolerance
            && (self.y() - other.y()).abs() <= tolerance
            && (self.w() - other.w()).abs() <= tolerance
            && (self.h() - other.h()).abs() <= tolerance
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {:.2} {:.2} {:.2}", self.x(), self.y(), self.w(), self.h())
    }
}
