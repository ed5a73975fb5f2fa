//! Distance and containment helpers used by hit-testing.

use kurbo::{Point, Rect};

/// Perpendicular distance from `point` to the infinite line through `a` and `b`.
///
/// Uses the signed-area form `|dy*px - dx*py + bx*ay - by*ax| / hypot(dy, dx)`, so points
/// far beyond either endpoint still measure close when they are collinear. A degenerate
/// line (`a == b`) falls back to the distance to `a`.
pub fn point_to_line_dist(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dy.hypot(dx);
    if len < f64::EPSILON {
        return point.distance(a);
    }
    (dy * point.x - dx * point.y + b.x * a.y - b.y * a.x).abs() / len
}

/// Normalized rectangle from an origin and a signed extent.
pub fn rect_from_extent(origin: Point, width: f64, height: f64) -> Rect {
    Rect::new(origin.x, origin.y, origin.x + width, origin.y + height).abs()
}

/// Strict containment: points on the edge do not count.
pub fn open_contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x > rect.x0 && point.x < rect.x1 && point.y > rect.y0 && point.y < rect.y1
}

/// Inclusive containment: points on the edge count.
pub fn closed_contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Sign of `value` as -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
