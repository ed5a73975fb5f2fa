//! Rectangle shape, also used for squares.

use super::{ShapeId, ShapeTrait};
use crate::color::SerializableColor;
use crate::geometry::{open_contains, rect_from_extent};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
///
/// `width` and `height` are signed: a drag up or to the left stores negative extents and
/// the drawn box lies on that side of the start point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub id: ShapeId,
    pub color: SerializableColor,
    pub start_x: f64,
    pub start_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(id: ShapeId, start: Point, width: f64, height: f64, color: SerializableColor) -> Self {
        Self {
            id,
            color,
            start_x: start.x,
            start_y: start.y,
            width,
            height,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    /// Normalized box.
    pub fn as_rect(&self) -> Rect {
        rect_from_extent(self.start(), self.width, self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, margin: f64) -> bool {
        open_contains(self.as_rect().inflate(margin, margin), point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn color(&self) -> SerializableColor {
        self.color
    }
}
