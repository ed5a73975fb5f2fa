//! Grid cells painted with a fill color and an optional overlay glyph.

use crate::color::SerializableColor;
use kurbo::{Point, Rect};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cell key string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell key: {0:?}")]
pub struct CellKeyParseError(pub String);

/// Identifies one paintable grid square by its top-left corner in canvas units.
///
/// Both coordinates are multiples of the grid size. The wire form is `"<x>-<y>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i64,
    pub y: i64,
}

impl CellKey {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Key of the cell containing `point`.
    pub fn containing(point: Point, grid_size: u32) -> Self {
        let size = f64::from(grid_size);
        let snap = |v: f64| (v / size).floor() as i64 * i64::from(grid_size);
        Self::new(snap(point.x), snap(point.y))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Area covered by the cell.
    pub fn rect(&self, grid_size: u32) -> Rect {
        let size = f64::from(grid_size);
        Rect::from_origin_size(self.origin(), (size, size))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for CellKey {
    type Err = CellKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Either coordinate may be negative, so try every separator after the first char.
        s.char_indices()
            .filter(|&(i, c)| c == '-' && i > 0)
            .find_map(|(i, _)| {
                let x = s[..i].parse::<i64>().ok()?;
                let y = s[i + 1..].parse::<i64>().ok()?;
                Some(Self::new(x, y))
            })
            .ok_or_else(|| CellKeyParseError(s.to_string()))
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Glyph drawn on top of a cell's fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellOverlay {
    #[serde(rename = "paint_triangle")]
    Triangle,
    #[serde(rename = "paint_circle")]
    Circle,
    #[serde(rename = "paint_x")]
    Cross,
}

/// A painted grid cell.
///
/// A cell without an overlay never carries an overlay color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintedCell {
    /// Fill color; transparent means "show the background".
    #[serde(rename = "color")]
    pub fill: SerializableColor,
    #[serde(rename = "shape", default)]
    pub overlay: Option<CellOverlay>,
    #[serde(rename = "shapeColor", default)]
    pub overlay_color: Option<SerializableColor>,
}

impl PaintedCell {
    /// A plain fill with no overlay.
    pub fn solid(fill: SerializableColor) -> Self {
        Self {
            fill,
            overlay: None,
            overlay_color: None,
        }
    }

    /// An overlay glyph on top of `fill`.
    pub fn with_overlay(fill: SerializableColor, overlay: CellOverlay, color: SerializableColor) -> Self {
        Self {
            fill,
            overlay: Some(overlay),
            overlay_color: Some(color),
        }
    }

    /// Overlay painted over an existing cell, keeping its fill (or transparent if none).
    pub fn overlay_on(existing: Option<&PaintedCell>, overlay: CellOverlay, color: SerializableColor) -> Self {
        let fill = existing
            .map(|cell| cell.fill)
            .unwrap_or_else(SerializableColor::transparent);
        Self::with_overlay(fill, overlay, color)
    }

    pub fn shows_background(&self) -> bool {
        self.fill.is_transparent()
    }

    pub fn is_consistent(&self) -> bool {
        self.overlay.is_some() || self.overlay_color.is_none()
    }
}
