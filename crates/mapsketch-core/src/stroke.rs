//! Freehand pen and eraser strokes.

use crate::color::SerializableColor;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A freehand stroke.
///
/// A stroke is open while its drag is in progress and only an open stroke accepts new
/// points. Eraser strokes have no color of their own; they paint the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(rename = "size", default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub is_eraser: bool,
    #[serde(default)]
    pub is_finished: bool,
}

fn default_width() -> f64 {
    4.0
}

impl Stroke {
    /// Open a pen stroke at `first`.
    pub fn pen(color: SerializableColor, width: f64, first: Point) -> Self {
        Self {
            points: vec![first],
            color: Some(color),
            width,
            is_eraser: false,
            is_finished: false,
        }
    }

    /// Open an eraser stroke at `first`.
    pub fn eraser(width: f64, first: Point) -> Self {
        Self {
            points: vec![first],
            color: None,
            width,
            is_eraser: true,
            is_finished: false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_finished
    }

    /// Append a point. Finished strokes ignore it and return `false`.
    pub fn add_point(&mut self, point: Point) -> bool {
        if self.is_finished {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn finish(&mut self) {
        self.is_finished = true;
    }

    /// Polyline through the points, starting with a zero-length segment so single-point
    /// strokes still render as a dot with round caps.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };
        path.move_to(*first);
        for point in &self.points {
            path.line_to(*point);
        }
        path
    }
}
