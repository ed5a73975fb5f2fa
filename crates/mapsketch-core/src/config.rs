//! Editor configuration.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Tunable constants of the editor. Every field has a default, so a config document only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Side of one grid cell in canvas units.
    pub grid_size: u32,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Drawing color selected at startup.
    pub drawing_color: SerializableColor,
    pub background: SerializableColor,
    pub pen_width: f64,
    pub eraser_size: f64,
    /// Sizes offered by the eraser size picker.
    pub eraser_presets: Vec<f64>,
    /// How far from a shape a point still hits it.
    pub hit_margin: f64,
    /// Height of a text label's hit box above its baseline.
    pub line_height: f64,
    /// Vertical offset of a copied text label.
    pub copy_offset: f64,
    /// Maximum undo steps kept; `None` keeps everything.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            drawing_color: SerializableColor::rgb(0x3a, 0x3a, 0x3a),
            background: SerializableColor::black(),
            pen_width: 4.0,
            eraser_size: 8.0,
            eraser_presets: vec![8.0, 16.0, 32.0],
            hit_margin: 5.0,
            line_height: 16.0,
            copy_offset: 20.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.grid_size, 32);
        assert_eq!(config.drawing_color.to_string(), "#3a3a3a");
        assert_eq!(config.eraser_presets, vec![8.0, 16.0, 32.0]);
        assert!(config.history_limit.is_none());
    }

    #[test]
    fn test_partial_document() {
        let config = EditorConfig::from_json(r##"{"gridSize":16,"background":"#ffffff","historyLimit":100}"##).unwrap();
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.background, SerializableColor::white());
        assert_eq!(config.history_limit, Some(100));
        assert!((config.pen_width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_color() {
        assert!(EditorConfig::from_json(r#"{"background":"nope"}"#).is_err());
    }
}
