//! Vector shapes drawn by dragging.

mod circle;
mod line;
mod rectangle;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;

use crate::color::SerializableColor;
use crate::geometry::sign;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Unique identifier for shapes.
pub type ShapeId = u64;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point is within `margin` of this shape.
    fn hit_test(&self, point: Point, margin: f64) -> bool;

    /// Get the outline path for rendering.
    fn to_path(&self) -> BezPath;

    fn color(&self) -> SerializableColor;
}

/// Which shape a drag produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Square,
    Circle,
}

/// Enum wrapper for all shape types (for serialization).
///
/// Squares are rectangles whose sides were forced equal at creation; they keep their own
/// tag so a saved scene remembers how they were drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Square(Rectangle),
    Circle(Circle),
}

impl Shape {
    /// Build the shape a drag from `start` to `end` describes.
    ///
    /// A square takes the larger of the two extents for both sides and keeps the drag
    /// direction on each axis. A circle is centered on `start` and passes through `end`.
    pub fn from_drag(
        kind: ShapeKind,
        id: ShapeId,
        color: SerializableColor,
        start: Point,
        end: Point,
    ) -> Self {
        let delta = end - start;
        match kind {
            ShapeKind::Line => Shape::Line(Line::new(id, start, end, color)),
            ShapeKind::Rectangle => {
                Shape::Rectangle(Rectangle::new(id, start, delta.x, delta.y, color))
            }
            ShapeKind::Square => {
                let side = delta.x.abs().max(delta.y.abs());
                Shape::Square(Rectangle::new(
                    id,
                    start,
                    side * sign(delta.x),
                    side * sign(delta.y),
                    color,
                ))
            }
            ShapeKind::Circle => Shape::Circle(Circle::new(id, start, delta.hypot(), color)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Square(_) => ShapeKind::Square,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Rectangle(s) | Shape::Square(s) => s,
            Shape::Circle(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, margin: f64) -> bool {
        self.as_trait().hit_test(point, margin)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn color(&self) -> SerializableColor {
        self.as_trait().color()
    }
}
