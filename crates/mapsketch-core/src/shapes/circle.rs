//! Circle shape.

use super::{ShapeId, ShapeTrait};
use crate::color::SerializableColor;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle centered on the drag start point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub id: ShapeId,
    pub color: SerializableColor,
    pub start_x: f64,
    pub start_y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(id: ShapeId, center: Point, radius: f64, color: SerializableColor) -> Self {
        Self {
            id,
            color,
            start_x: center.x,
            start_y: center.y,
            radius,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center(), self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_kurbo().bounding_box()
    }

    fn hit_test(&self, point: Point, margin: f64) -> bool {
        point.distance(self.center()) < self.radius + margin
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn color(&self) -> SerializableColor {
        self.color
    }
}
