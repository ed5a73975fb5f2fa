//! Text labels and the font metric used to measure them.

use crate::color::SerializableColor;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Stable identifier for text labels.
pub type TextId = u64;

/// A text label anchored at its baseline start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: TextId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub color: SerializableColor,
}

impl TextLabel {
    pub fn new(id: TextId, content: impl Into<String>, position: Point, color: SerializableColor) -> Self {
        Self {
            id,
            content: content.into(),
            x: position.x,
            y: position.y,
            color,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Box spanning the measured width to the right of the anchor and one line above it.
    pub fn bounds(&self, metrics: &dyn TextMetrics, line_height: f64) -> Rect {
        let width = metrics.text_width(&self.content);
        Rect::new(self.x, self.y - line_height, self.x + width, self.y)
    }
}

/// Measures rendered text width. Supplied by whoever knows the font.
pub trait TextMetrics {
    fn text_width(&self, content: &str) -> f64;
}

/// Fixed-advance metric approximating a 16px monospace font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
}

impl MonospaceMetrics {
    pub const fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(9.6)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, content: &str) -> f64 {
        content.chars().count() as f64 * self.advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_sit_above_baseline() {
        let label = TextLabel::new(1, "abcd", Point::new(100.0, 50.0), SerializableColor::white());
        let bounds = label.bounds(&MonospaceMetrics::new(10.0), 16.0);
        assert_eq!(bounds, Rect::new(100.0, 34.0, 140.0, 50.0));
    }

    #[test]
    fn test_monospace_counts_chars() {
        let metrics = MonospaceMetrics::new(8.0);
        assert!((metrics.text_width("héllo") - 40.0).abs() < f64::EPSILON);
        assert!(metrics.text_width("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut label = TextLabel::new(1, "a", Point::new(1.0, 2.0), SerializableColor::white());
        label.translate(Vec2::new(10.0, -2.0));
        assert_eq!(label.position(), Point::new(11.0, 0.0));
    }
}
