//! Line shape.

use super::{ShapeId, ShapeTrait};
use crate::color::SerializableColor;
use crate::geometry::point_to_line_dist;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight line between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: ShapeId,
    pub color: SerializableColor,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Line {
    pub fn new(id: ShapeId, start: Point, end: Point, color: SerializableColor) -> Self {
        Self {
            id,
            color,
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    /// Measured against the infinite line through both endpoints, so the hit zone is a band
    /// that extends past either end.
    fn hit_test(&self, point: Point, margin: f64) -> bool {
        point_to_line_dist(point, self.start(), self.end()) < margin
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        path.line_to(self.end());
        path
    }

    fn color(&self) -> SerializableColor {
        self.color
    }
}
