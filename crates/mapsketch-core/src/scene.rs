//! The scene: every painted cell, stroke, shape and text label plus the background color.
//!
//! The scene is a plain state container. Each mutator hands back whatever it replaced or
//! removed so callers can build the inverse edit; recording that edit is left to
//! [`crate::history`].

use crate::cell::{CellKey, PaintedCell};
use crate::color::SerializableColor;
use crate::shapes::{Shape, ShapeId};
use crate::stroke::Stroke;
use crate::text::{TextId, TextLabel};
use kurbo::Point;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub(crate) cells: HashMap<CellKey, PaintedCell>,
    pub(crate) strokes: Vec<Stroke>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) texts: Vec<TextLabel>,
    pub(crate) background: SerializableColor,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SerializableColor::black())
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(background: SerializableColor) -> Self {
        Self {
            cells: HashMap::new(),
            strokes: Vec::new(),
            shapes: Vec::new(),
            texts: Vec::new(),
            background,
        }
    }

    pub fn cells(&self) -> &HashMap<CellKey, PaintedCell> {
        &self.cells
    }

    pub fn cell(&self, key: CellKey) -> Option<&PaintedCell> {
        self.cells.get(&key)
    }

    /// Cells in key order, for deterministic iteration.
    pub fn cells_sorted(&self) -> Vec<(CellKey, &PaintedCell)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(k, c)| (*k, c)).collect();
        cells.sort_by_key(|(k, _)| *k);
        cells
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn texts(&self) -> &[TextLabel] {
        &self.texts
    }

    pub fn background(&self) -> SerializableColor {
        self.background
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.strokes.is_empty() && self.shapes.is_empty() && self.texts.is_empty()
    }

    // --- cells ---

    /// Paint `cell` at `key`, returning the cell it replaced.
    pub fn paint_cell(&mut self, key: CellKey, cell: PaintedCell) -> Option<PaintedCell> {
        self.cells.insert(key, cell)
    }

    /// Remove the cell at `key`, returning it.
    pub fn erase_cell(&mut self, key: CellKey) -> Option<PaintedCell> {
        self.cells.remove(&key)
    }

    /// Put `cell` back at `key`, or clear the key when `None`.
    pub fn restore_cell(&mut self, key: CellKey, cell: Option<PaintedCell>) -> Option<PaintedCell> {
        match cell {
            Some(cell) => self.paint_cell(key, cell),
            None => self.erase_cell(key),
        }
    }

    // --- strokes ---

    /// Append a stroke and return its index. Any stroke still open is finished first so at
    /// most one stroke is ever open.
    pub fn append_stroke(&mut self, stroke: Stroke) -> usize {
        self.close_open_stroke();
        self.strokes.push(stroke);
        self.strokes.len() - 1
    }

    /// The last stroke, if it is still accepting points.
    pub fn open_stroke(&self) -> Option<&Stroke> {
        self.strokes.last().filter(|s| s.is_open())
    }

    /// Add a point to the open stroke. Returns `false` when no stroke is open.
    pub fn append_point_to_open_stroke(&mut self, point: Point) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => stroke.add_point(point),
            None => false,
        }
    }

    /// Finish the open stroke. Returns `false` when no stroke was open.
    pub fn close_open_stroke(&mut self) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) if stroke.is_open() => {
                stroke.finish();
                true
            }
            _ => false,
        }
    }

    /// Remove and return the most recent stroke.
    pub fn pop_stroke(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    // --- shapes ---

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn remove_shape_at(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert_shape_at(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    // --- texts ---

    pub fn add_text(&mut self, text: TextLabel) {
        self.texts.push(text);
    }

    pub fn text(&self, id: TextId) -> Option<&TextLabel> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_index(&self, id: TextId) -> Option<usize> {
        self.texts.iter().position(|t| t.id == id)
    }

    fn text_mut(&mut self, id: TextId) -> Option<&mut TextLabel> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_text_at(&mut self, index: usize) -> Option<TextLabel> {
        (index < self.texts.len()).then(|| self.texts.remove(index))
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert_text_at(&mut self, index: usize, text: TextLabel) {
        let index = index.min(self.texts.len());
        self.texts.insert(index, text);
    }

    /// Replace a label's content and color, returning the previous pair.
    pub fn edit_text(
        &mut self,
        id: TextId,
        content: String,
        color: SerializableColor,
    ) -> Option<(String, SerializableColor)> {
        let text = self.text_mut(id)?;
        let old_content = std::mem::replace(&mut text.content, content);
        let old_color = std::mem::replace(&mut text.color, color);
        Some((old_content, old_color))
    }

    /// Move a label's anchor to `position`, returning the previous anchor.
    pub fn set_text_position(&mut self, id: TextId, position: Point) -> Option<Point> {
        let text = self.text_mut(id)?;
        let old = text.position();
        text.set_position(position);
        Some(old)
    }

    // --- scene-wide ---

    /// Set the background color, returning the previous one.
    pub fn set_background(&mut self, color: SerializableColor) -> SerializableColor {
        std::mem::replace(&mut self.background, color)
    }

    /// Remove every entity and reset the background.
    pub fn clear(&mut self, background: SerializableColor) {
        *self = Self::new(background);
    }

    /// Largest text or shape id in the scene.
    pub fn max_entity_id(&self) -> Option<u64> {
        let texts = self.texts.iter().map(|t| t.id);
        let shapes = self.shapes.iter().map(|s| s.id());
        texts.chain(shapes).max()
    }
}
