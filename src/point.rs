use euclid::default::Vector2D;
use ordered_float::OrderedFloat;
use std::{fmt, ops::{Add, Mul, Sub}};

/// Scene coordinate, hashable and totally ordered per component.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point(Vector2D<OrderedFloat<f64>>);

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point(Vector2D::new(OrderedFloat(x), OrderedFloat(y)))
    }

    pub fn x(&self) -> f64 {
        self.0.x.into_inner()
    }

    pub fn y(&self) -> f64 {
        self.0.y.into_inner()
    }

    /// The same point shifted by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x() + dx, self.y() + dy)
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, rhs: Point) -> f64 {
        (self - rhs).length_squared().sqrt()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x(), self.y())
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point(self.0 * OrderedFloat(k))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

/// Points double as vectors from the origin for the products below.
impl Point {
    pub fn cross(self, rhs: Point) -> f64 {
        self.0.cross(rhs.0).into_inner()
    }

    pub fn dot(self, rhs: Point) -> f64 {
        self.0.dot(rhs.0).into_inner()
    }
}
