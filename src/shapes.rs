//! Primitive shape values.
//!
//! Each primitive validates its parameters on construction and is a plain
//! value afterwards; names and z-order belong to the scene node that owns it.

use crate::{
    bbox::BoundingBox,
    common_traits::*,
    error::{Result, SceneError},
    geom,
    point::Point,
};

fn finite(kind: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::InvalidGeometry { kind, reason: "parameters must be finite" })
    }
}

/// Axis-aligned rectangle with its top-left corner at `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub origin: Point,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        finite("rectangle", &[x, y, w, h, x + w, y + h])?;
        if w <= 0.0 || h <= 0.0 {
            return Err(SceneError::InvalidGeometry {
                kind: "rectangle",
                reason: "width and height must be positive",
            });
        }
        Ok(Self { origin: Point::new(x, y), w, h })
    }

    pub fn area(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x(), self.origin.y(), self.w, self.h)
    }
}

impl Select for Rectangle {
    fn compute_aabb(&self) -> BoundingBox {
        self.area()
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        geom::distance_to_rect(&self.area(), p)
    }
}

impl Translate for Rectangle {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin = self.origin.translated(dx, dy);
    }
}

impl Describe for Rectangle {
    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn params(&self) -> Vec<f64> {
        vec![self.origin.x(), self.origin.y(), self.w, self.h]
    }
}

/// Line segment between two distinct endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        finite("line", &[x1, y1, x2, y2, x2 - x1, y2 - y1])?;
        if x1 == x2 && y1 == y2 {
            return Err(SceneError::InvalidGeometry {
                kind: "line",
                reason: "endpoints must be distinct",
            });
        }
        Ok(Self { a: Point::new(x1, y1), b: Point::new(x2, y2) })
    }

    pub fn segment(&self) -> geom::Segment {
        [self.a, self.b]
    }
}

impl Select for Line {
    fn compute_aabb(&self) -> BoundingBox {
        BoundingBox::from_corners(self.a, self.b)
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        geom::distance_to_segment(self.segment(), p)
    }
}

impl Translate for Line {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.a = self.a.translated(dx, dy);
        self.b = self.b.translated(dx, dy);
    }
}

impl Describe for Line {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn params(&self) -> Vec<f64> {
        vec![self.a.x(), self.a.y(), self.b.x(), self.b.y()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Result<Self> {
        finite("circle", &[
            cx, cy, radius,
            cx - radius, cy - radius, cx + radius, cy + radius, 2.0 * radius,
        ])?;
        if radius <= 0.0 {
            return Err(SceneError::InvalidGeometry {
                kind: "circle",
                reason: "radius must be positive",
            });
        }
        Ok(Self { center: Point::new(cx, cy), radius })
    }
}

impl Select for Circle {
    fn compute_aabb(&self) -> BoundingBox {
        BoundingBox::new(
            self.center.x() - self.radius,
            self.center.y() - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        geom::distance_to_circle(self.center, self.radius, p)
    }
}

impl Translate for Circle {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.translated(dx, dy);
    }
}

impl Describe for Circle {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn params(&self) -> Vec<f64> {
        vec![self.center.x(), self.center.y(), self.radius]
    }
}

/// Axis-aligned square; behaves as a rectangle with equal sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub origin: Point,
    pub side: f64,
}

impl Square {
    pub fn new(x: f64, y: f64, side: f64) -> Result<Self> {
        finite("square", &[x, y, side, x + side, y + side])?;
        if side <= 0.0 {
            return Err(SceneError::InvalidGeometry {
                kind: "square",
                reason: "side length must be positive",
            });
        }
        Ok(Self { origin: Point::new(x, y), side })
    }

    pub fn area(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x(), self.origin.y(), self.side, self.side)
    }
}

impl Select for Square {
    fn compute_aabb(&self) -> BoundingBox {
        self.area()
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        geom::distance_to_rect(&self.area(), p)
    }
}

impl Translate for Square {
    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin = self.origin.translated(dx, dy);
    }
}

impl Describe for Square {
    fn kind(&self) -> &'static str {
        "square"
    }

    fn params(&self) -> Vec<f64> {
        vec![self.origin.x(), self.origin.y(), self.side]
    }
}

/// The closed set of leaf shapes a scene can hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Rectangle(Rectangle),
    Line(Line),
    Circle(Circle),
    Square(Square),
}

impl Primitive {
    /// Exact geometric intersection, see [`geom::primitives_intersect`].
    pub fn intersects(&self, other: &Primitive) -> bool {
        geom::primitives_intersect(self, other)
    }

    /// Every parameter and every extent of the box is a finite number.
    pub fn is_finite(&self) -> bool {
        self.params().iter().all(|v| v.is_finite()) && self.compute_aabb().is_finite()
    }
}

impl Select for Primitive {
    fn compute_aabb(&self) -> BoundingBox {
        match self {
            Primitive::Rectangle(r) => r.compute_aabb(),
            Primitive::Line(l) => l.compute_aabb(),
            Primitive::Circle(c) => c.compute_aabb(),
            Primitive::Square(s) => s.compute_aabb(),
        }
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        geom::distance_to_outline(self, p)
    }
}

impl Translate for Primitive {
    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Primitive::Rectangle(r) => r.translate(dx, dy),
            Primitive::Line(l) => l.translate(dx, dy),
            Primitive::Circle(c) => c.translate(dx, dy),
            Primitive::Square(s) => s.translate(dx, dy),
        }
    }
}

impl Describe for Primitive {
    fn kind(&self) -> &'static str {
        match self {
            Primitive::Rectangle(r) => r.kind(),
            Primitive::Line(l) => l.kind(),
            Primitive::Circle(c) => c.kind(),
            Primitive::Square(s) => s.kind(),
        }
    }

    fn params(&self) -> Vec<f64> {
        match self {
            Primitive::Rectangle(r) => r.params(),
            Primitive::Line(l) => l.params(),
            Primitive::Circle(c) => c.params(),
            Primitive::Square(s) => s.params(),
        }
    }
}

impl From<Rectangle> for Primitive {
    fn from(r: Rectangle) -> Self {
        Primitive::Rectangle(r)
    }
}

impl From<Line> for Primitive {
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}

impl From<Square> for Primitive {
    fn from(s: Square) -> Self {
        Primitive::Square(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(Rectangle::new(0.0, 0.0, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, 0.0, 1.0, -1.0).is_err());
        assert!(Square::new(0.0, 0.0, 0.0).is_err());
        assert!(Square::new(0.0, 0.0, -4.0).is_err());
        assert!(Circle::new(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn rejects_degenerate_line() {
        assert_eq!(
            Line::new(1.0, 1.0, 1.0, 1.0),
            Err(SceneError::InvalidGeometry { kind: "line", reason: "endpoints must be distinct" })
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(Circle::new(f64::NAN, 0.0, 1.0).is_err());
        assert!(Line::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn rejects_overflowing_extents() {
        assert!(Rectangle::new(1e308, 0.0, 1e308, 1.0).is_err());
        assert!(Square::new(0.0, 1e308, 1e308).is_err());
        assert!(Line::new(-1e308, 0.0, 1e308, 1.0).is_err());
        assert!(Circle::new(-1e308, 0.0, 1e308).is_err());
        assert!(Rectangle::new(1e308, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn overflowed_translation_is_not_finite() {
        let mut p = Primitive::from(Square::new(1e308, 0.0, 1.0).unwrap());
        assert!(p.is_finite());
        p.translate(1e308, 0.0);
        assert!(!p.is_finite());
    }

    #[test]
    fn analytic_boxes() {
        let c = Circle::new(5.0, 5.0, 3.0).unwrap();
        assert_eq!(c.compute_aabb(), BoundingBox::new(2.0, 2.0, 6.0, 6.0));
        let l = Line::new(8.0, 3.0, 2.0, 9.0).unwrap();
        assert_eq!(l.compute_aabb(), BoundingBox::new(2.0, 3.0, 6.0, 6.0));
        let s = Square::new(3.0, 4.0, 5.0).unwrap();
        assert_eq!(s.compute_aabb(), BoundingBox::new(3.0, 4.0, 5.0, 5.0));
    }

    #[test]
    fn describe_formats_two_decimals() {
        let r = Rectangle::new(1.5, 2.5, 3.7, 4.2).unwrap();
        assert_eq!(r.describe("rect2"), "rect2 rectangle 1.50 2.50 3.70 4.20");
        let l = Line::new(5.0, 0.0, 5.0, 10.0).unwrap();
        assert_eq!(l.describe("vLine"), "vLine line 5.00 0.00 5.00 10.00");
        let c = Circle::new(100.0, 100.0, 500.0).unwrap();
        assert_eq!(c.describe("big"), "big circle 100.00 100.00 500.00");
        let s = Square::new(1.0, 1.0, 4.0).unwrap();
        assert_eq!(Primitive::from(s).describe("s1"), "s1 square 1.00 1.00 4.00");
    }

    #[test]
    fn translate_moves_every_point() {
        let mut p = Primitive::from(Line::new(0.0, 0.0, 5.0, 5.0).unwrap());
        p.translate(10.0, -2.0);
        assert_eq!(p.params(), vec![10.0, -2.0, 15.0, 3.0]);
    }
}
