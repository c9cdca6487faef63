//! Stateless geometry kernel: outline distances and intersection predicates.
//!
//! Hit testing is tolerant (see [`EPS`]); intersection tests are exact.

use crate::{
    bbox::BoundingBox,
    common_traits::Select,
    point::Point,
    shapes::Primitive,
};

/// Hit-testing tolerance on outline distance.
pub const EPS: f64 = 0.05;

/// Below this determinant two segments are treated as parallel.
const PARALLEL_EPS: f64 = 1e-10;

pub type Segment = [Point; 2];

pub fn segment_intersection(seg1: Segment, seg2: Segment) -> Option<Point> {
    let a = seg1[0];
    let c = seg2[0];
    let r = seg1[1] - a;
    let s = seg2[1] - c;

    let denom = r.cross(s);
    // parallel or coincident segments never report a crossing
    if denom.abs() < PARALLEL_EPS { return None; }

    let numer_a = (c - a).cross(s);
    let numer_c = (c - a).cross(r);

    let t = numer_a / denom;
    let u = numer_c / denom;

    if t < 0.0 || t > 1.0 || u < 0.0 || u > 1.0 { return None; }

    Some(a + r * t)
}

pub fn segments_intersect(seg1: Segment, seg2: Segment) -> bool {
    segment_intersection(seg1, seg2).is_some()
}

pub fn closest_point_on_segment(seg: Segment, p: Point) -> Point {
    let a = seg[0];
    let d = seg[1] - a;
    let len2 = d.length_squared();
    if len2 == 0.0 { return a; }
    let t = ((p - a).dot(d) / len2).clamp(0.0, 1.0);
    a + d * t
}

pub fn distance_to_segment(seg: Segment, p: Point) -> f64 {
    p.distance(closest_point_on_segment(seg, p))
}

pub fn point_in_rect(p: Point, rect: &BoundingBox) -> bool {
    rect.contains(p)
}

/// 0 inside or on the rectangle, else the distance to the nearest edge or corner.
pub fn distance_to_rect(rect: &BoundingBox, p: Point) -> f64 {
    if point_in_rect(p, rect) { return 0.0; }
    let (min, max) = (rect.min(), rect.max());
    let dx = (min.x() - p.x()).max(0.0).max(p.x() - max.x());
    let dy = (min.y() - p.y()).max(0.0).max(p.y() - max.y());
    (dx * dx + dy * dy).sqrt()
}

pub fn distance_to_circle(center: Point, radius: f64, p: Point) -> f64 {
    (p.distance(center) - radius).abs()
}

pub fn rect_edges(rect: &BoundingBox) -> [Segment; 4] {
    let [a, b, c, d] = rect.corners();
    [[a, b], [b, c], [c, d], [d, a]]
}

pub fn segment_intersects_circle(seg: Segment, center: Point, radius: f64) -> bool {
    distance_to_segment(seg, center) <= radius
}

pub fn segment_intersects_rect(seg: Segment, rect: &BoundingBox) -> bool {
    if point_in_rect(seg[0], rect) || point_in_rect(seg[1], rect) { return true; }
    rect_edges(rect).into_iter().any(|edge| segments_intersect(seg, edge))
}

/// The clamped closest point also covers a center inside the rectangle and
/// a circle swallowing all four corners.
pub fn circle_intersects_rect(center: Point, radius: f64, rect: &BoundingBox) -> bool {
    let (min, max) = (rect.min(), rect.max());
    let closest = Point::new(
        center.x().clamp(min.x(), max.x()),
        center.y().clamp(min.y(), max.y()),
    );
    (center - closest).length_squared() <= radius * radius
}

/// Outlines meet or cross. A circle strictly inside another does not count.
pub fn circles_intersect(c1: Point, r1: f64, c2: Point, r2: f64) -> bool {
    let d = c1.distance(c2);
    d < r1 + r2 && d >= (r1 - r2).abs()
}

/// Positive-area overlap of two boxes; touching boxes do not intersect.
pub fn boxes_intersect(b1: &BoundingBox, b2: &BoundingBox) -> bool {
    b1.overlaps(b2)
}

pub fn distance_to_outline(shape: &Primitive, p: Point) -> f64 {
    match shape {
        Primitive::Rectangle(r) => distance_to_rect(&r.area(), p),
        Primitive::Square(s) => distance_to_rect(&s.area(), p),
        Primitive::Line(l) => distance_to_segment(l.segment(), p),
        Primitive::Circle(c) => distance_to_circle(c.center, c.radius, p),
    }
}

pub fn primitives_intersect(a: &Primitive, b: &Primitive) -> bool {
    use Primitive::*;
    match (a, b) {
        (Line(l1), Line(l2)) => segments_intersect(l1.segment(), l2.segment()),
        (Circle(c1), Circle(c2)) => circles_intersect(c1.center, c1.radius, c2.center, c2.radius),
        (Line(l), Circle(c)) | (Circle(c), Line(l)) => {
            segment_intersects_circle(l.segment(), c.center, c.radius)
        }
        // the box of a rectangle or square is its filled area
        (Line(l), Rectangle(_) | Square(_)) => segment_intersects_rect(l.segment(), &b.compute_aabb()),
        (Rectangle(_) | Square(_), Line(l)) => segment_intersects_rect(l.segment(), &a.compute_aabb()),
        (Circle(c), Rectangle(_) | Square(_)) => {
            circle_intersects_rect(c.center, c.radius, &b.compute_aabb())
        }
        (Rectangle(_) | Square(_), Circle(c)) => {
            circle_intersects_rect(c.center, c.radius, &a.compute_aabb())
        }
        (Rectangle(_) | Square(_), Rectangle(_) | Square(_)) => {
            boxes_intersect(&a.compute_aabb(), &b.compute_aabb())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Line, Rectangle, Square};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Primitive {
        Rectangle::new(x, y, w, h).unwrap().into()
    }

    fn circle(x: f64, y: f64, r: f64) -> Primitive {
        Circle::new(x, y, r).unwrap().into()
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive {
        Line::new(x1, y1, x2, y2).unwrap().into()
    }

    fn square(x: f64, y: f64, s: f64) -> Primitive {
        Square::new(x, y, s).unwrap().into()
    }

    #[test]
    fn simple_segments_intersect() {
        let line1 = [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        let line2 = [Point::new(0.0, -1.0), Point::new(0.0, 1.0)];
        assert_eq!(segment_intersection(line1, line2), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn tee_segments_intersect() {
        let line1 = [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        let line2 = [Point::new(0.0, 0.0), Point::new(0.0, 1.0)];
        assert_eq!(segment_intersection(line1, line2), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn simple_segments_nonintersect() {
        let line1 = [Point::new(-1.0, 10.0), Point::new(1.0, 10.0)];
        let line2 = [Point::new(0.0, -1.0), Point::new(0.0, 1.0)];
        assert_eq!(segment_intersection(line1, line2), None);
    }

    #[test]
    fn collinear_overlapping_segments_are_parallel() {
        let line1 = [Point::new(0.0, 0.0), Point::new(4.0, 0.0)];
        let line2 = [Point::new(2.0, 0.0), Point::new(6.0, 0.0)];
        assert!(!segments_intersect(line1, line2));
    }

    #[test]
    fn rect_distance_is_zero_inside_and_on_edge() {
        let r = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(distance_to_rect(&r, Point::new(5.0, 5.0)), 0.0);
        assert_eq!(distance_to_rect(&r, Point::new(0.0, 5.0)), 0.0);
        assert_eq!(distance_to_rect(&r, Point::new(13.0, 14.0)), 5.0);
        assert_eq!(distance_to_rect(&r, Point::new(-2.0, 5.0)), 2.0);
    }

    #[test]
    fn line_distance_clamps_to_endpoints() {
        let seg = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(distance_to_segment(seg, Point::new(5.0, 3.0)), 3.0);
        assert_eq!(distance_to_segment(seg, Point::new(13.0, 4.0)), 5.0);
    }

    #[test]
    fn circle_distance_is_to_the_ring() {
        let center = Point::new(0.0, 0.0);
        assert_eq!(distance_to_circle(center, 5.0, Point::new(5.0, 0.0)), 0.0);
        assert_eq!(distance_to_circle(center, 5.0, Point::new(0.0, 0.0)), 5.0);
        assert_eq!(distance_to_circle(center, 5.0, Point::new(0.0, 7.0)), 2.0);
    }

    #[test]
    fn rectangles_use_strict_overlap() {
        assert!(primitives_intersect(&rect(0.0, 0.0, 4.0, 4.0), &rect(2.0, 2.0, 4.0, 4.0)));
        assert!(!primitives_intersect(&rect(0.0, 0.0, 2.0, 2.0), &rect(4.0, 4.0, 2.0, 2.0)));
        assert!(!primitives_intersect(&rect(0.0, 0.0, 2.0, 2.0), &rect(2.0, 0.0, 2.0, 2.0)));
        assert!(primitives_intersect(&square(0.0, 0.0, 4.0), &square(2.0, 2.0, 4.0)));
        assert!(primitives_intersect(&square(0.0, 0.0, 10.0), &rect(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn circles_must_meet_outlines() {
        assert!(primitives_intersect(&circle(0.0, 0.0, 3.0), &circle(4.0, 0.0, 3.0)));
        assert!(!primitives_intersect(&circle(0.0, 0.0, 2.0), &circle(10.0, 0.0, 2.0)));
        // externally tangent
        assert!(!primitives_intersect(&circle(0.0, 0.0, 2.0), &circle(4.0, 0.0, 2.0)));
        // internally tangent
        assert!(primitives_intersect(&circle(0.0, 0.0, 5.0), &circle(2.0, 0.0, 3.0)));
        // strictly nested
        assert!(!primitives_intersect(&circle(0.0, 0.0, 5.0), &circle(0.0, 0.0, 1.0)));
    }

    #[test]
    fn cross_kind_pairs() {
        assert!(primitives_intersect(&circle(5.0, 5.0, 3.0), &rect(6.0, 6.0, 2.0, 2.0)));
        assert!(primitives_intersect(&rect(0.0, 0.0, 10.0, 10.0), &circle(5.0, 5.0, 2.0)));
        assert!(!primitives_intersect(&rect(0.0, 0.0, 1.0, 1.0), &circle(5.0, 5.0, 2.0)));
        assert!(primitives_intersect(&line(0.0, 0.0, 10.0, 10.0), &rect(3.0, 3.0, 2.0, 2.0)));
        assert!(!primitives_intersect(&line(0.0, 5.0, 10.0, 5.0), &square(0.0, 0.0, 2.0)));
        assert!(primitives_intersect(&line(0.0, 0.0, 10.0, 0.0), &circle(5.0, 0.0, 2.0)));
        assert!(!primitives_intersect(&line(0.0, 10.0, 10.0, 10.0), &circle(5.0, 0.0, 2.0)));
    }

    #[test]
    fn line_crossing_rect_without_endpoints_inside() {
        assert!(primitives_intersect(&line(-5.0, 1.0, 15.0, 1.0), &rect(0.0, 0.0, 10.0, 2.0)));
    }

    #[test]
    fn predicate_is_symmetric() {
        let shapes = [
            rect(0.0, 0.0, 4.0, 4.0),
            square(3.0, 3.0, 2.0),
            circle(6.0, 2.0, 2.5),
            line(-1.0, 2.0, 9.0, 2.0),
            line(10.0, 10.0, 12.0, 12.0),
            circle(0.0, 0.0, 0.5),
        ];
        for a in &shapes {
            for b in &shapes {
                assert_eq!(primitives_intersect(a, b), primitives_intersect(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(!boxes_intersect(&a, &BoundingBox::new(1.0, 1.0, 1.0, 1.0)));
        assert!(boxes_intersect(&a, &BoundingBox::new(0.5, 0.5, 1.0, 1.0)));
    }
}
