//! Reversible edit commands and the linear undo/redo history.
//!
//! Each [`Command`] carries the state needed to apply and revert one edit.

use crate::cell::{CellKey, PaintedCell};
use crate::color::SerializableColor;
use crate::scene::Scene;
use crate::shapes::Shape;
use crate::stroke::Stroke;
use crate::text::{TextId, TextLabel};
use kurbo::Point;

/// One recorded, invertible edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A cell was painted over (`new = Some`) or erased (`new = None`).
    PaintCell {
        key: CellKey,
        old: Option<PaintedCell>,
        new: Option<PaintedCell>,
    },
    /// A stroke was started. Points added later during the same drag belong to it; the
    /// stored copy is refreshed from the scene whenever the stroke is undone.
    AddStroke { stroke: Stroke },
    AddText { text: TextLabel },
    RemoveText { index: usize, text: TextLabel },
    EditText {
        id: TextId,
        old_content: String,
        old_color: SerializableColor,
        new_content: String,
        new_color: SerializableColor,
    },
    MoveText { id: TextId, from: Point, to: Point },
    AddShape { shape: Shape },
    RemoveShape { index: usize, shape: Shape },
    BackgroundChange {
        old: SerializableColor,
        new: SerializableColor,
    },
}

impl Command {
    /// Returns the name of the command for display.
    pub fn name(&self) -> &'static str {
        match self {
            Command::PaintCell { new: Some(_), .. } => "Paint Cell",
            Command::PaintCell { new: None, .. } => "Erase Cell",
            Command::AddStroke { stroke } if stroke.is_eraser => "Erase",
            Command::AddStroke { .. } => "Draw Stroke",
            Command::AddText { .. } => "Add Text",
            Command::RemoveText { .. } => "Delete Text",
            Command::EditText { .. } => "Edit Text",
            Command::MoveText { .. } => "Move Text",
            Command::AddShape { .. } => "Add Shape",
            Command::RemoveShape { .. } => "Delete Shape",
            Command::BackgroundChange { .. } => "Change Background",
        }
    }

    /// Apply the forward effect to `scene`.
    pub fn apply(&mut self, scene: &mut Scene) {
        match self {
            Command::PaintCell { key, new, .. } => {
                scene.restore_cell(*key, new.clone());
            }
            Command::AddStroke { stroke } => {
                scene.append_stroke(stroke.clone());
            }
            Command::AddText { text } => scene.add_text(text.clone()),
            Command::RemoveText { index, text } => {
                match locate(*index, text.id, scene.texts().iter().map(|t| t.id)) {
                    Some(found) => {
                        scene.remove_text_at(found);
                    }
                    None => log::warn!("text {} to delete is not in the scene", text.id),
                }
            }
            Command::EditText {
                id,
                new_content,
                new_color,
                ..
            } => {
                if scene.edit_text(*id, new_content.clone(), *new_color).is_none() {
                    log::warn!("text {id} to edit is not in the scene");
                }
            }
            Command::MoveText { id, to, .. } => {
                if scene.set_text_position(*id, *to).is_none() {
                    log::warn!("text {id} to move is not in the scene");
                }
            }
            Command::AddShape { shape } => scene.add_shape(shape.clone()),
            Command::RemoveShape { index, shape } => {
                match locate(*index, shape.id(), scene.shapes().iter().map(Shape::id)) {
                    Some(found) => {
                        scene.remove_shape_at(found);
                    }
                    None => log::warn!("shape {} to delete is not in the scene", shape.id()),
                }
            }
            Command::BackgroundChange { new, .. } => {
                scene.set_background(*new);
            }
        }
    }

    /// Revert the forward effect on `scene`.
    pub fn undo(&mut self, scene: &mut Scene) {
        match self {
            Command::PaintCell { key, old, .. } => {
                scene.restore_cell(*key, old.clone());
            }
            Command::AddStroke { stroke } => match scene.pop_stroke() {
                Some(popped) => *stroke = popped,
                None => log::warn!("no stroke left to undo"),
            },
            Command::AddText { text } => match scene.text_index(text.id) {
                Some(index) => {
                    if let Some(removed) = scene.remove_text_at(index) {
                        *text = removed;
                    }
                }
                None => log::warn!("added text {} is not in the scene", text.id),
            },
            Command::RemoveText { index, text } => scene.insert_text_at(*index, text.clone()),
            Command::EditText {
                id,
                old_content,
                old_color,
                ..
            } => {
                if scene.edit_text(*id, old_content.clone(), *old_color).is_none() {
                    log::warn!("edited text {id} is not in the scene");
                }
            }
            Command::MoveText { id, from, .. } => {
                if scene.set_text_position(*id, *from).is_none() {
                    log::warn!("moved text {id} is not in the scene");
                }
            }
            Command::AddShape { shape } => match scene.shape_index(shape.id()) {
                Some(index) => {
                    if let Some(removed) = scene.remove_shape_at(index) {
                        *shape = removed;
                    }
                }
                None => log::warn!("added shape {} is not in the scene", shape.id()),
            },
            Command::RemoveShape { index, shape } => scene.insert_shape_at(*index, shape.clone()),
            Command::BackgroundChange { old, .. } => {
                scene.set_background(*old);
            }
        }
    }
}

/// Position of `id`, preferring the recorded `index` when it still holds that id.
fn locate(index: usize, id: u64, mut ids: impl Iterator<Item = u64> + Clone) -> Option<usize> {
    if ids.clone().nth(index) == Some(id) {
        return Some(index);
    }
    ids.position(|candidate| candidate == id)
}

/// Linear undo/redo history.
///
/// Recording a new command drops everything that could have been redone.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` undo steps, dropping the oldest.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record a command whose effect has already been applied to the scene.
    pub fn record(&mut self, command: Command) {
        log::debug!("record: {}", command.name());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }

    /// Apply a command to the scene and record it.
    pub fn execute(&mut self, mut command: Command, scene: &mut Scene) {
        command.apply(scene);
        self.record(command);
    }

    /// Undo the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("undo: {}", command.name());
        command.undo(scene);
        self.redo_stack.push(command);
        true
    }

    /// Redo the most recently undone command. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("redo: {}", command.name());
        command.apply(scene);
        self.undo_stack.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable commands.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn last(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
