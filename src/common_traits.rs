use crate::{bbox::BoundingBox, point::Point};

pub trait Select {
    fn compute_aabb(&self) -> BoundingBox;

    /// Shortest distance from `p` to the outline. Filled rectangles report 0 inside.
    fn distance_to_outline(&self, p: Point) -> f64;

    fn covers(&self, p: Point, tolerance: f64) -> bool {
        self.distance_to_outline(p) < tolerance
    }
}

pub trait Translate {
    fn translate(&mut self, dx: f64, dy: f64);
}

pub trait Describe {
    /// Lower-case kind tag used in listings, e.g. `"rectangle"`.
    fn kind(&self) -> &'static str;

    /// Numeric parameters in listing order.
    fn params(&self) -> Vec<f64>;

    fn describe(&self, name: &str) -> String {
        let mut out = format!("{name} {}", self.kind());
        for p in self.params() {
            out.push_str(&format!(" {p:.2}"));
        }
        out
    }
}
