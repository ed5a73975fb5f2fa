//! Scene save format.
//!
//! A saved scene is a JSON object:
//!
//! ```json
//! {
//!   "cells": { "32-64": { "color": "#3a3a3a", "shape": null, "shapeColor": null } },
//!   "strokes": [ { "points": [{ "x": 1.0, "y": 2.0 }], "color": "#ffffff", "size": 4.0,
//!                  "isEraser": false, "isFinished": true } ],
//!   "texts": [ { "id": 1, "content": "Cave", "x": 10.0, "y": 20.0, "color": "#ffffff" } ],
//!   "shapes": [ { "type": "circle", "id": 2, "color": "#ffffff", "startX": 5.0,
//!                 "startY": 5.0, "radius": 10.0 } ],
//!   "bgColor": "#000000"
//! }
//! ```
//!
//! Every top-level field is optional on load. Cells mapped to `null` are skipped.

use crate::cell::{CellKey, PaintedCell};
use crate::color::SerializableColor;
use crate::scene::Scene;
use crate::shapes::Shape;
use crate::stroke::Stroke;
use crate::text::{TextId, TextLabel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Why a scene document was rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed scene data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cell {key} has an overlay color but no overlay shape")]
    OverlayColorWithoutShape { key: CellKey },
    #[error("text {id} has no content")]
    EmptyText { id: TextId },
    #[error("text id {0} is used more than once")]
    DuplicateTextId(TextId),
}

#[derive(Serialize)]
struct SceneFileRef<'a> {
    cells: BTreeMap<CellKey, &'a PaintedCell>,
    strokes: &'a [Stroke],
    texts: &'a [TextLabel],
    shapes: &'a [Shape],
    #[serde(rename = "bgColor")]
    bg_color: SerializableColor,
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default)]
    cells: Option<BTreeMap<CellKey, Option<PaintedCell>>>,
    #[serde(default)]
    strokes: Option<Vec<Stroke>>,
    #[serde(default)]
    texts: Option<Vec<TextLabel>>,
    #[serde(default)]
    shapes: Option<Vec<Shape>>,
    #[serde(rename = "bgColor", default)]
    bg_color: Option<SerializableColor>,
}

impl SceneFile {
    fn into_scene(self, default_background: SerializableColor) -> Result<Scene, LoadError> {
        let mut scene = Scene::new(self.bg_color.unwrap_or(default_background));

        for (key, cell) in self.cells.unwrap_or_default() {
            let Some(cell) = cell else { continue };
            if !cell.is_consistent() {
                return Err(LoadError::OverlayColorWithoutShape { key });
            }
            scene.cells.insert(key, cell);
        }

        let texts = self.texts.unwrap_or_default();
        let mut seen = HashSet::with_capacity(texts.len());
        for text in &texts {
            if text.content.is_empty() {
                return Err(LoadError::EmptyText { id: text.id });
            }
            if !seen.insert(text.id) {
                return Err(LoadError::DuplicateTextId(text.id));
            }
        }

        scene.texts = texts;
        scene.strokes = self.strokes.unwrap_or_default();
        scene.shapes = self.shapes.unwrap_or_default();
        Ok(scene)
    }
}

impl Scene {
    /// Serialize to pretty-printed JSON. Cell keys come out sorted.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let file = SceneFileRef {
            cells: self.cells.iter().map(|(k, c)| (*k, c)).collect(),
            strokes: &self.strokes,
            texts: &self.texts,
            shapes: &self.shapes,
            bg_color: self.background,
        };
        serde_json::to_string_pretty(&file)
    }

    /// Parse and validate a saved scene. A missing background becomes black.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::from_json_with_default(json, SerializableColor::black())
    }

    /// Parse and validate a saved scene, using `default_background` when none is stored.
    pub fn from_json_with_default(
        json: &str,
        default_background: SerializableColor,
    ) -> Result<Self, LoadError> {
        let file: SceneFile = serde_json::from_str(json)?;
        file.into_scene(default_background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellOverlay;
    use crate::shapes::ShapeKind;
    use kurbo::Point;

    fn sample_scene() -> Scene {
        let white = SerializableColor::white();
        let mut scene = Scene::new(SerializableColor::rgb(0x22, 0x33, 0x44));
        scene.paint_cell(CellKey::new(-32, 64), PaintedCell::solid(white));
        scene.paint_cell(
            CellKey::new(0, 0),
            PaintedCell::with_overlay(SerializableColor::transparent(), CellOverlay::Cross, white),
        );
        let mut stroke = Stroke::pen(white, 4.0, Point::new(1.5, 2.25));
        stroke.add_point(Point::new(3.0, 4.0));
        stroke.finish();
        scene.append_stroke(stroke);
        scene.append_stroke(Stroke::eraser(16.0, Point::new(9.0, 9.0)));
        scene.add_text(TextLabel::new(3, "Cave", Point::new(10.0, 20.0), white));
        scene.add_shape(Shape::from_drag(ShapeKind::Square, 4, white, Point::ZERO, Point::new(-30.0, 10.0)));
        scene.add_shape(Shape::from_drag(ShapeKind::Circle, 5, white, Point::ZERO, Point::new(3.0, 4.0)));
        scene
    }

    #[test]
    fn test_round_trip() {
        let scene = sample_scene();
        let json = scene.to_json().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_round_trip_keeps_full_float_precision() {
        let white = SerializableColor::white();
        let mut scene = Scene::default();
        let mut stroke = Stroke::pen(white, 4.0, Point::new(0.1, 0.2));
        for i in 1..2000u64 {
            let t = i as f64;
            let end = Point::new(t.sqrt() * 97.31 + (t * 0.7).sin() * 13.0, t.ln() * 41.17 + (t * 1.3).cos());
            stroke.add_point(end);
            scene.add_shape(Shape::from_drag(ShapeKind::Circle, i, white, Point::new(t / 3.0, t / 7.0), end));
        }
        scene.append_stroke(stroke);
        scene.add_shape(Shape::Circle(crate::shapes::Circle::new(
            9000,
            Point::new(1.0 / 3.0, 2.0 / 3.0),
            233.24441768120602,
            white,
        )));

        let json = scene.to_json().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_empty_scene_round_trip() {
        let scene = Scene::default();
        let json = scene.to_json().unwrap();
        assert_eq!(Scene::from_json(&json).unwrap(), scene);
    }

    #[test]
    fn test_missing_fields_default() {
        let scene = Scene::from_json("{}").unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.background(), SerializableColor::black());

        let scene = Scene::from_json_with_default(r#"{"texts":null}"#, SerializableColor::white()).unwrap();
        assert_eq!(scene.background(), SerializableColor::white());
    }

    #[test]
    fn test_null_cells_are_skipped() {
        let json = r##"{"cells":{"0-0":null,"32-0":{"color":"#3a3a3a","shape":null,"shapeColor":null}}}"##;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.cells().len(), 1);
        assert!(scene.cell(CellKey::new(32, 0)).is_some());
    }

    #[test]
    fn test_cell_keys_sorted_on_save() {
        let mut scene = Scene::default();
        scene.paint_cell(CellKey::new(64, 0), PaintedCell::solid(SerializableColor::white()));
        scene.paint_cell(CellKey::new(0, 0), PaintedCell::solid(SerializableColor::white()));
        let json = scene.to_json().unwrap();
        let first = json.find("\"0-0\"").unwrap();
        let second = json.find("\"64-0\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Scene::from_json("{not json"), Err(LoadError::Parse(_))));
        assert!(matches!(
            Scene::from_json(r##"{"cells":{"nope":{"color":"#000000"}}}"##),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            Scene::from_json(r#"{"bgColor":"blue"}"#),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_overlay_color_without_shape() {
        let json = r##"{"cells":{"0-0":{"color":"#000000","shape":null,"shapeColor":"#ffffff"}}}"##;
        assert!(matches!(
            Scene::from_json(json),
            Err(LoadError::OverlayColorWithoutShape { key }) if key == CellKey::new(0, 0)
        ));
    }

    #[test]
    fn test_rejects_bad_texts() {
        let empty = r##"{"texts":[{"id":1,"content":"","x":0,"y":0,"color":"#ffffff"}]}"##;
        assert!(matches!(Scene::from_json(empty), Err(LoadError::EmptyText { id: 1 })));

        let dup = r##"{"texts":[
            {"id":1,"content":"a","x":0,"y":0,"color":"#ffffff"},
            {"id":1,"content":"b","x":0,"y":0,"color":"#ffffff"}]}"##;
        assert!(matches!(Scene::from_json(dup), Err(LoadError::DuplicateTextId(1))));
    }
}
