//! The editor session: one scene, its history and the interaction state driving them.
//!
//! Hosts feed pointer, palette and keyboard input into an [`EditorSession`]; it turns that
//! input into scene edits and records each edit as a [`Command`]. Dialogs the session
//! needs (text prompts, the clear confirmation) are supplied per call through [`Dialogs`].

use crate::cell::{CellKey, PaintedCell};
use crate::color::SerializableColor;
use crate::config::EditorConfig;
use crate::format::LoadError;
use crate::hit_test::{HitTarget, HitTester, TextHitRule};
use crate::history::{Command, History};
use crate::input::{InputState, Modifiers, MouseButton, PointerEvent, Shortcut};
use crate::scene::Scene;
use crate::shapes::Shape;
use crate::stroke::Stroke;
use crate::text::{MonospaceMetrics, TextId, TextLabel, TextMetrics};
use crate::tools::{CursorHint, EditMode, ToolManager, ToolState};
use kurbo::{Point, Vec2};
use std::collections::VecDeque;

const PROMPT_NEW_TEXT: &str = "Enter text:";
const PROMPT_EDIT_TEXT: &str = "Edit text:";
const CONFIRM_CLEAR: &str = "Clear the whole map? This cannot be undone.";

/// User dialogs the session may open.
pub trait Dialogs {
    /// Ask for a line of text. `None` means the user cancelled.
    fn prompt_text(&mut self, message: &str, initial: Option<&str>) -> Option<String>;

    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Dialogs that answer from a prepared script. Useful for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    pub answers: VecDeque<Option<String>>,
    pub confirm_answer: bool,
    /// Every message shown, in order.
    pub shown: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next prompt.
    pub fn answer(mut self, text: Option<&str>) -> Self {
        self.answers.push_back(text.map(str::to_string));
        self
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }
}

impl Dialogs for ScriptedDialogs {
    fn prompt_text(&mut self, message: &str, _initial: Option<&str>) -> Option<String> {
        self.shown.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.shown.push(message.to_string());
        self.confirm_answer
    }
}

/// A text label being dragged to a new position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextDrag {
    id: TextId,
    origin: Point,
    /// Pointer offset from the label anchor, captured on the first move.
    grab_offset: Option<Vec2>,
}

/// The eraser's outline at the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserCursor {
    pub center: Point,
    pub radius: f64,
}

/// Transient interaction state for live-preview drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preview {
    /// Start and current point of a shape drag.
    pub drag: Option<(Point, Point)>,
    /// The shape that drag would create.
    pub shape: Option<Shape>,
    /// Index of the stroke still receiving points.
    pub open_stroke: Option<usize>,
    /// Label being moved.
    pub dragging_text: Option<TextId>,
    pub eraser_cursor: Option<EraserCursor>,
}

pub struct EditorSession {
    config: EditorConfig,
    scene: Scene,
    history: History,
    tools: ToolManager,
    input: InputState,
    selected_color: SerializableColor,
    eraser_size: f64,
    /// Text label whose context actions are available.
    selection: Option<TextId>,
    drag: Option<TextDrag>,
    /// A paint, pen or eraser drag is in progress.
    drawing: bool,
    next_id: u64,
    metrics: Box<dyn TextMetrics>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(config.background),
            history: History::with_limit(config.history_limit),
            tools: ToolManager::new(),
            input: InputState::new(),
            selected_color: config.drawing_color,
            eraser_size: config.eraser_size,
            selection: None,
            drag: None,
            drawing: false,
            next_id: 1,
            metrics: Box::new(MonospaceMetrics::default()),
            config,
        }
    }

    /// Use `metrics` to measure text labels for hit-testing.
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> EditMode {
        self.tools.mode
    }

    pub fn selected_color(&self) -> SerializableColor {
        self.selected_color
    }

    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    /// Text label whose context actions are available.
    pub fn selection(&self) -> Option<TextId> {
        self.selection
    }

    pub fn is_dragging_text(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_position(&self) -> Point {
        self.input.pointer_position
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn hit_tester(&self) -> HitTester<'_> {
        HitTester::new(self.metrics.as_ref(), self.config.hit_margin, self.config.line_height)
    }

    // --- pointer input ---

    /// Dispatch a pointer event. Text prompts go through `dialogs`.
    pub fn handle_event(&mut self, event: PointerEvent, dialogs: &mut dyn Dialogs) {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button, dialogs),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, position: Point, button: MouseButton, dialogs: &mut dyn Dialogs) {
        self.input.handle_pointer_event(PointerEvent::Down { position, button });
        if self.drag.is_some() {
            return;
        }
        self.selection = None;

        let mode = self.tools.mode;
        if mode == EditMode::Text {
            self.click_text_mode(position, dialogs);
        } else if mode.shape_kind().is_some() {
            self.tools.begin(position);
        } else if mode.paints_cells() || mode.is_freehand() {
            self.drawing = true;
            self.paint_at(position);
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.input.handle_pointer_event(PointerEvent::Move { position });
        if let Some(drag) = &mut self.drag {
            let Some(text) = self.scene.text(drag.id) else {
                return;
            };
            let offset = *drag.grab_offset.get_or_insert(position - text.position());
            self.scene.set_text_position(drag.id, position - offset);
        } else if self.tools.is_active() {
            self.tools.update(position);
        } else if self.drawing {
            self.paint_at(position);
        }
    }

    pub fn pointer_up(&mut self, position: Point, button: MouseButton) {
        self.input.handle_pointer_event(PointerEvent::Up { position, button });
        if let (Some(kind), Some((start, end))) = (self.tools.mode.shape_kind(), self.tools.end(position)) {
            let id = self.next_id();
            let shape = Shape::from_drag(kind, id, self.selected_color, start, end);
            self.scene.add_shape(shape.clone());
            self.history.record(Command::AddShape { shape });
        }
        self.finish_drag();
        self.drawing = false;
        self.scene.close_open_stroke();
    }

    /// The pointer left the canvas: the open stroke is finished, a text drag is committed
    /// and a shape drag is dropped without creating a shape.
    pub fn pointer_leave(&mut self) {
        self.input.handle_pointer_event(PointerEvent::Leave);
        self.finish_interactions();
    }

    fn finish_interactions(&mut self) {
        self.tools.cancel();
        self.finish_drag();
        self.drawing = false;
        self.scene.close_open_stroke();
    }

    fn click_text_mode(&mut self, position: Point, dialogs: &mut dyn Dialogs) {
        let hit = self.hit_tester().text_at(&self.scene, position, TextHitRule::Inclusive);
        if let Some(HitTarget::Text { id, .. }) = hit {
            self.selection = Some(id);
            return;
        }
        let Some(content) = non_blank(dialogs.prompt_text(PROMPT_NEW_TEXT, None)) else {
            return;
        };
        let text = TextLabel::new(self.next_id(), content, position, self.selected_color);
        self.scene.add_text(text.clone());
        self.history.record(Command::AddText { text });
    }

    /// Apply the current paint, pen or eraser mode at `position`.
    fn paint_at(&mut self, position: Point) {
        let mode = self.tools.mode;
        if mode.paints_cells() {
            let key = CellKey::containing(position, self.config.grid_size);
            match self.input.sole_button() {
                Some(MouseButton::Left) => self.paint_cell(key, mode),
                Some(MouseButton::Right) => self.erase_cell(key),
                _ => {}
            }
        } else if mode == EditMode::Pen {
            self.extend_or_start_stroke(position, false);
        } else if mode == EditMode::Eraser {
            self.erase_at(position);
        }
    }

    fn paint_cell(&mut self, key: CellKey, mode: EditMode) {
        let old = self.scene.cell(key).cloned();
        let new = match mode.overlay() {
            Some(overlay) => PaintedCell::overlay_on(old.as_ref(), overlay, self.selected_color),
            None => PaintedCell::solid(self.selected_color),
        };
        self.scene.paint_cell(key, new.clone());
        self.history.record(Command::PaintCell {
            key,
            old,
            new: Some(new),
        });
    }

    fn erase_cell(&mut self, key: CellKey) {
        if let Some(old) = self.scene.erase_cell(key) {
            self.history.record(Command::PaintCell {
                key,
                old: Some(old),
                new: None,
            });
        }
    }

    /// Removes at most one text or shape under the pointer; otherwise draws eraser stroke.
    fn erase_at(&mut self, position: Point) {
        let hit = self.hit_tester().erasable_at(&self.scene, position);
        match hit {
            Some(HitTarget::Text { index, .. }) => {
                if let Some(text) = self.scene.remove_text_at(index) {
                    self.history.record(Command::RemoveText { index, text });
                }
            }
            Some(HitTarget::Shape { index, .. }) => {
                if let Some(shape) = self.scene.remove_shape_at(index) {
                    self.history.record(Command::RemoveShape { index, shape });
                }
            }
            None => self.extend_or_start_stroke(position, true),
        }
    }

    fn extend_or_start_stroke(&mut self, position: Point, eraser: bool) {
        let extends = self
            .scene
            .open_stroke()
            .is_some_and(|stroke| stroke.is_eraser == eraser);
        if extends {
            self.scene.append_point_to_open_stroke(position);
            return;
        }
        let stroke = if eraser {
            Stroke::eraser(self.eraser_size, position)
        } else {
            Stroke::pen(self.selected_color, self.config.pen_width, position)
        };
        self.scene.append_stroke(stroke.clone());
        self.history.record(Command::AddStroke { stroke });
    }

    /// End a text drag, recording one move for the whole drag.
    fn finish_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.selection = None;
        let Some(text) = self.scene.text(drag.id) else {
            log::warn!("dragged text {} disappeared", drag.id);
            return;
        };
        let to = text.position();
        if to != drag.origin {
            self.history.record(Command::MoveText {
                id: drag.id,
                from: drag.origin,
                to,
            });
        }
    }

    // --- tool selection ---

    /// Switch modes, ending any in-progress stroke or shape drag. Returns the cursor to show.
    pub fn set_mode(&mut self, mode: EditMode) -> CursorHint {
        log::debug!("mode: {} -> {}", self.tools.mode, mode);
        self.tools.set_mode(mode);
        self.drawing = false;
        self.scene.close_open_stroke();
        if self.drag.is_none() {
            self.selection = None;
        }
        mode.cursor()
    }

    /// A palette pick. In background mode it recolors the background; otherwise it sets
    /// the drawing color, leaving eraser mode for the pen.
    pub fn select_color(&mut self, color: SerializableColor) {
        if self.tools.mode == EditMode::Background {
            let old = self.scene.background();
            self.history
                .execute(Command::BackgroundChange { old, new: color }, &mut self.scene);
            return;
        }
        self.selected_color = color;
        if self.tools.mode == EditMode::Eraser {
            self.set_mode(EditMode::Pen);
        }
    }

    /// Set the eraser width and switch to eraser mode.
    pub fn select_eraser_size(&mut self, size: f64) -> CursorHint {
        self.eraser_size = size;
        self.set_mode(EditMode::Eraser)
    }

    /// Eraser sizes offered by the size picker.
    pub fn eraser_presets(&self) -> &[f64] {
        &self.config.eraser_presets
    }

    /// Pick the eraser preset at `index`. Returns `None` for an unknown preset.
    pub fn select_eraser_preset(&mut self, index: usize) -> Option<CursorHint> {
        let size = *self.config.eraser_presets.get(index)?;
        Some(self.select_eraser_size(size))
    }

    // --- text context actions ---

    /// Replace the selected label's text, recoloring it with the drawing color.
    pub fn edit_selected_text(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let Some(current) = self.scene.text(id).map(|t| t.content.clone()) else {
            return false;
        };
        let Some(content) = non_blank(dialogs.prompt_text(PROMPT_EDIT_TEXT, Some(&current))) else {
            return false;
        };
        let color = self.selected_color;
        let Some((old_content, old_color)) = self.scene.edit_text(id, content.clone(), color) else {
            return false;
        };
        self.history.record(Command::EditText {
            id,
            old_content,
            old_color,
            new_content: content,
            new_color: color,
        });
        self.selection = None;
        true
    }

    /// Duplicate the selected label a little below it. Returns the id of the copy.
    pub fn copy_selected_text(&mut self) -> Option<TextId> {
        let mut text = self.scene.text(self.selection?)?.clone();
        text.id = self.next_id();
        text.translate(Vec2::new(0.0, self.config.copy_offset));
        let id = text.id;
        self.scene.add_text(text.clone());
        self.history.record(Command::AddText { text });
        self.selection = None;
        Some(id)
    }

    /// Start dragging the selected label. The next pointer moves carry it.
    pub fn move_selected_text(&mut self) -> bool {
        let Some(text) = self.selection.and_then(|id| self.scene.text(id)) else {
            return false;
        };
        self.drag = Some(TextDrag {
            id: text.id,
            origin: text.position(),
            grab_offset: None,
        });
        true
    }

    pub fn delete_selected_text(&mut self) -> bool {
        let Some(index) = self.selection.and_then(|id| self.scene.text_index(id)) else {
            return false;
        };
        let Some(text) = self.scene.remove_text_at(index) else {
            return false;
        };
        self.history.record(Command::RemoveText { index, text });
        self.selection = None;
        true
    }

    // --- history ---

    pub fn undo(&mut self) -> bool {
        self.finish_interactions();
        self.selection = None;
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.finish_interactions();
        self.selection = None;
        self.history.redo(&mut self.scene)
    }

    /// Handle a key press. Returns `true` if it was a shortcut.
    pub fn handle_shortcut(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match Shortcut::from_key(key, modifiers) {
            Some(Shortcut::Undo) => {
                self.undo();
                true
            }
            Some(Shortcut::Redo) => {
                self.redo();
                true
            }
            None => false,
        }
    }

    // --- whole-scene operations ---

    /// Empty the scene and its history after the user confirms.
    pub fn clear(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !dialogs.confirm(CONFIRM_CLEAR) {
            return false;
        }
        self.finish_interactions();
        self.selection = None;
        self.scene.clear(self.config.background);
        self.history.clear();
        log::info!("scene cleared");
        true
    }

    pub fn save_json(&self) -> Result<String, serde_json::Error> {
        let json = self.scene.to_json()?;
        log::info!("saved scene ({} bytes)", json.len());
        Ok(json)
    }

    /// Replace the scene with a saved one. On error the current scene is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), LoadError> {
        let mut scene = match Scene::from_json_with_default(json, self.config.background) {
            Ok(scene) => scene,
            Err(err) => {
                log::warn!("rejected scene data: {err}");
                return Err(err);
            }
        };
        scene.close_open_stroke();

        self.finish_interactions();
        self.selection = None;
        self.scene = scene;
        self.history.clear();
        if let Some(max) = self.scene.max_entity_id() {
            self.next_id = self.next_id.max(max.saturating_add(1));
        }
        log::info!(
            "loaded scene: {} cells, {} strokes, {} shapes, {} texts",
            self.scene.cells().len(),
            self.scene.strokes().len(),
            self.scene.shapes().len(),
            self.scene.texts().len()
        );
        Ok(())
    }

    /// Interaction state a renderer draws on top of the scene.
    pub fn preview(&self) -> Preview {
        let drag = match self.tools.state {
            ToolState::Active { start, current } if self.tools.mode.shape_kind().is_some() => {
                Some((start, current))
            }
            _ => None,
        };
        let open_stroke = self
            .scene
            .open_stroke()
            .map(|_| self.scene.strokes().len() - 1);
        // Shown only while the pointer is over the canvas.
        let show_eraser = self.tools.mode == EditMode::Eraser && self.input.inside;
        let eraser_cursor = show_eraser.then(|| EraserCursor {
            center: self.input.pointer_position,
            radius: self.eraser_size / 2.0,
        });
        Preview {
            drag,
            shape: self.tools.preview_shape(self.next_id, self.selected_color),
            open_stroke,
            dragging_text: self.drag.map(|d| d.id),
            eraser_cursor,
        }
    }
}

/// Treat empty or whitespace-only input as a cancel.
fn non_blank(input: Option<String>) -> Option<String> {
    input.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellOverlay;

    const LEFT: MouseButton = MouseButton::Left;

    fn click(session: &mut EditorSession, at: Point, dialogs: &mut ScriptedDialogs) {
        session.pointer_down(at, LEFT, dialogs);
        session.pointer_up(at, LEFT);
    }

    fn drag(session: &mut EditorSession, points: &[Point]) {
        let mut dialogs = ScriptedDialogs::new();
        let (first, rest) = points.split_first().unwrap();
        session.pointer_down(*first, LEFT, &mut dialogs);
        for point in rest {
            session.pointer_move(*point);
        }
        session.pointer_up(*points.last().unwrap(), LEFT);
    }

    fn add_text(session: &mut EditorSession, content: &str, at: Point) -> TextId {
        session.set_mode(EditMode::Text);
        let mut dialogs = ScriptedDialogs::new().answer(Some(content));
        click(session, at, &mut dialogs);
        session.scene().texts().last().unwrap().id
    }

    #[test]
    fn test_paint_drag_records_every_event() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0), Point::new(10.0, 10.0), Point::new(40.0, 5.0)]);
        assert_eq!(session.scene().cells().len(), 2);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_overlay_keeps_fill() {
        let mut session = EditorSession::new();
        let red = SerializableColor::rgb(255, 0, 0);
        session.select_color(red);
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        session.set_mode(EditMode::PaintCircle);
        session.select_color(SerializableColor::white());
        drag(&mut session, &[Point::new(5.0, 5.0)]);

        let cell = session.scene().cell(CellKey::new(0, 0)).unwrap();
        assert_eq!(cell.fill, red);
        assert_eq!(cell.overlay, Some(CellOverlay::Circle));
        assert_eq!(cell.overlay_color, Some(SerializableColor::white()));
    }

    #[test]
    fn test_right_drag_erases_cells() {
        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        session.pointer_down(Point::new(6.0, 6.0), MouseButton::Right, &mut dialogs);
        session.pointer_move(Point::new(40.0, 6.0));
        session.pointer_up(Point::new(40.0, 6.0), MouseButton::Right);
        assert!(session.scene().cells().is_empty());
        // Erasing an empty cell records nothing.
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_pen_stroke_lifecycle() {
        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new();
        session.set_mode(EditMode::Pen);
        session.pointer_down(Point::new(0.0, 0.0), LEFT, &mut dialogs);
        session.pointer_move(Point::new(1.0, 1.0));
        session.pointer_move(Point::new(2.0, 2.0));
        assert_eq!(session.preview().open_stroke, Some(0));
        let stroke = &session.scene().strokes()[0];
        assert_eq!(stroke.points.len(), 3);
        assert!(!stroke.is_finished);

        session.pointer_up(Point::new(2.0, 2.0), LEFT);
        assert!(session.scene().strokes()[0].is_finished);
        assert_eq!(session.history().len(), 1);

        // Moving without a fresh press adds nothing.
        session.pointer_move(Point::new(3.0, 3.0));
        assert_eq!(session.scene().strokes()[0].points.len(), 3);
    }

    #[test]
    fn test_shape_drag_creates_one_shape() {
        let mut session = EditorSession::new();
        session.set_mode(EditMode::Square);
        let mut dialogs = ScriptedDialogs::new();
        session.pointer_down(Point::ZERO, LEFT, &mut dialogs);
        session.pointer_move(Point::new(15.0, 5.0));
        assert!(session.preview().shape.is_some());
        assert!(session.scene().shapes().is_empty());
        session.pointer_up(Point::new(30.0, 10.0), LEFT);

        let Shape::Square(square) = &session.scene().shapes()[0] else {
            panic!("expected a square");
        };
        assert!((square.width - 30.0).abs() < f64::EPSILON);
        assert!((square.height - 30.0).abs() < f64::EPSILON);
        assert_eq!(session.history().len(), 1);
        assert!(session.preview().shape.is_none());
    }

    #[test]
    fn test_leave_drops_shape_and_finishes_stroke() {
        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new();
        session.set_mode(EditMode::Line);
        session.pointer_down(Point::ZERO, LEFT, &mut dialogs);
        session.pointer_leave();
        session.pointer_up(Point::new(50.0, 50.0), LEFT);
        assert!(session.scene().shapes().is_empty());

        session.set_mode(EditMode::Pen);
        session.pointer_down(Point::ZERO, LEFT, &mut dialogs);
        session.pointer_leave();
        assert!(session.scene().strokes()[0].is_finished);
        session.pointer_move(Point::new(9.0, 9.0));
        assert_eq!(session.scene().strokes()[0].points.len(), 1);
    }

    #[test]
    fn test_text_prompt_cancel_and_blank() {
        let mut session = EditorSession::new();
        session.set_mode(EditMode::Text);
        let mut dialogs = ScriptedDialogs::new().answer(None).answer(Some("   "));
        click(&mut session, Point::new(10.0, 10.0), &mut dialogs);
        click(&mut session, Point::new(10.0, 10.0), &mut dialogs);
        assert!(session.scene().texts().is_empty());
        assert!(!session.history().can_undo());
        assert_eq!(dialogs.shown, vec![PROMPT_NEW_TEXT, PROMPT_NEW_TEXT]);
    }

    #[test]
    fn test_click_on_text_selects_it() {
        let mut session = EditorSession::new();
        let id = add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let mut dialogs = ScriptedDialogs::new();
        click(&mut session, Point::new(105.0, 95.0), &mut dialogs);
        assert_eq!(session.selection(), Some(id));
        assert!(dialogs.shown.is_empty());
        assert_eq!(session.scene().texts().len(), 1);
    }

    #[test]
    fn test_edit_selected_text() {
        let mut session = EditorSession::new();
        let id = add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let mut dialogs = ScriptedDialogs::new().answer(Some("Lair"));
        click(&mut session, Point::new(105.0, 95.0), &mut dialogs);
        session.select_color(SerializableColor::white());
        assert_eq!(session.selection(), Some(id));
        assert!(session.edit_selected_text(&mut dialogs));

        let text = session.scene().text(id).unwrap();
        assert_eq!(text.content, "Lair");
        assert_eq!(text.color, SerializableColor::white());
        session.undo();
        assert_eq!(session.scene().text(id).unwrap().content, "Cave");
    }

    #[test]
    fn test_copy_selected_text() {
        let mut session = EditorSession::new();
        let id = add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let mut dialogs = ScriptedDialogs::new();
        click(&mut session, Point::new(105.0, 95.0), &mut dialogs);
        let copy = session.copy_selected_text().unwrap();
        assert_ne!(copy, id);
        let text = session.scene().text(copy).unwrap();
        assert_eq!(text.position(), Point::new(100.0, 120.0));
        assert!(session.copy_selected_text().is_none());
    }

    #[test]
    fn test_move_selected_text_is_one_undo_step() {
        let mut session = EditorSession::new();
        let id = add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let mut dialogs = ScriptedDialogs::new();
        click(&mut session, Point::new(105.0, 95.0), &mut dialogs);
        assert!(session.move_selected_text());
        let steps = session.history().len();

        // Grab offset is (5, -5): the label follows the pointer keeping it.
        session.pointer_move(Point::new(105.0, 95.0));
        session.pointer_move(Point::new(150.0, 150.0));
        session.pointer_move(Point::new(205.0, 195.0));
        // Presses are ignored while dragging.
        session.pointer_down(Point::new(0.0, 0.0), LEFT, &mut dialogs);
        session.pointer_up(Point::new(205.0, 195.0), LEFT);

        assert_eq!(session.scene().text(id).unwrap().position(), Point::new(200.0, 200.0));
        assert_eq!(session.history().len(), steps + 1);
        assert!(!session.is_dragging_text());

        session.undo();
        assert_eq!(session.scene().text(id).unwrap().position(), Point::new(100.0, 100.0));
        session.redo();
        assert_eq!(session.scene().text(id).unwrap().position(), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_drag_without_motion_records_nothing() {
        let mut session = EditorSession::new();
        add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let mut dialogs = ScriptedDialogs::new();
        click(&mut session, Point::new(105.0, 95.0), &mut dialogs);
        session.move_selected_text();
        let steps = session.history().len();
        session.pointer_leave();
        assert_eq!(session.history().len(), steps);
    }

    #[test]
    fn test_leave_during_text_drag_commits_one_move() {
        let mut session = EditorSession::new();
        let id = add_text(&mut session, "Ford", Point::new(100.0, 100.0));
        let steps = session.history().len();
        let mut dialogs = ScriptedDialogs::new();

        let gesture = [
            PointerEvent::Move { position: Point::new(104.0, 96.0) },
            PointerEvent::Down { position: Point::new(104.0, 96.0), button: LEFT },
            PointerEvent::Up { position: Point::new(104.0, 96.0), button: LEFT },
        ];
        for event in gesture {
            session.handle_event(event, &mut dialogs);
        }
        assert_eq!(session.selection(), Some(id));
        assert!(session.move_selected_text());

        let drag = [
            PointerEvent::Move { position: Point::new(104.0, 96.0) },
            PointerEvent::Move { position: Point::new(130.0, 120.0) },
            PointerEvent::Move { position: Point::new(154.0, 146.0) },
            PointerEvent::Leave,
        ];
        for event in drag {
            session.handle_event(event, &mut dialogs);
        }

        assert!(!session.is_dragging_text());
        assert_eq!(session.scene().text(id).unwrap().position(), Point::new(150.0, 150.0));
        assert_eq!(session.history().len(), steps + 1);
        assert!(matches!(session.history().last(), Some(Command::MoveText { .. })));

        session.undo();
        assert_eq!(session.scene().text(id).unwrap().position(), Point::new(100.0, 100.0));
        assert_eq!(session.history().len(), steps);
    }

    #[test]
    fn test_delete_selected_text() {
        let mut session = EditorSession::new();
        add_text(&mut session, "A", Point::new(10.0, 100.0));
        let id = add_text(&mut session, "B", Point::new(200.0, 100.0));
        add_text(&mut session, "C", Point::new(400.0, 100.0));
        let mut dialogs = ScriptedDialogs::new();
        click(&mut session, Point::new(202.0, 95.0), &mut dialogs);
        assert!(session.delete_selected_text());
        assert!(session.scene().text(id).is_none());

        session.undo();
        assert_eq!(session.scene().text_index(id), Some(1));
    }

    #[test]
    fn test_eraser_removes_one_entity_per_event() {
        let mut session = EditorSession::new();
        add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        session.set_mode(EditMode::Rectangle);
        drag(&mut session, &[Point::new(90.0, 80.0), Point::new(200.0, 120.0)]);

        session.select_eraser_size(16.0);
        let mut dialogs = ScriptedDialogs::new();
        session.pointer_down(Point::new(105.0, 95.0), LEFT, &mut dialogs);
        assert!(session.scene().texts().is_empty());
        assert_eq!(session.scene().shapes().len(), 1);

        session.pointer_move(Point::new(105.0, 95.0));
        assert!(session.scene().shapes().is_empty());

        session.pointer_move(Point::new(105.0, 95.0));
        session.pointer_move(Point::new(106.0, 95.0));
        session.pointer_up(Point::new(106.0, 95.0), LEFT);
        let stroke = &session.scene().strokes()[0];
        assert!(stroke.is_eraser);
        assert!((stroke.width - 16.0).abs() < f64::EPSILON);
        assert_eq!(stroke.points.len(), 2);
    }

    #[test]
    fn test_palette_in_background_and_eraser_modes() {
        let mut session = EditorSession::new();
        let drawing = session.selected_color();
        session.set_mode(EditMode::Background);
        session.select_color(SerializableColor::white());
        assert_eq!(session.scene().background(), SerializableColor::white());
        assert_eq!(session.selected_color(), drawing);
        session.undo();
        assert_eq!(session.scene().background(), SerializableColor::black());

        assert_eq!(session.select_eraser_size(32.0), CursorHint::Hidden);
        session.select_color(SerializableColor::white());
        assert_eq!(session.mode(), EditMode::Pen);
        assert_eq!(session.selected_color(), SerializableColor::white());
    }

    #[test]
    fn test_eraser_cursor_preview() {
        let mut session = EditorSession::new();
        assert!(session.preview().eraser_cursor.is_none());
        session.select_eraser_size(16.0);
        session.pointer_move(Point::new(50.0, 60.0));
        let cursor = session.preview().eraser_cursor.unwrap();
        assert_eq!(cursor.center, Point::new(50.0, 60.0));
        assert!((cursor.radius - 8.0).abs() < f64::EPSILON);

        session.pointer_leave();
        assert!(session.preview().eraser_cursor.is_none());
        session.pointer_move(Point::new(10.0, 10.0));
        assert!(session.preview().eraser_cursor.is_some());
    }

    #[test]
    fn test_eraser_presets() {
        let mut session = EditorSession::new();
        assert_eq!(session.eraser_presets(), &[8.0, 16.0, 32.0]);

        assert_eq!(session.select_eraser_preset(2), Some(CursorHint::Hidden));
        assert_eq!(session.mode(), EditMode::Eraser);
        assert!((session.eraser_size() - 32.0).abs() < f64::EPSILON);

        session.set_mode(EditMode::Pen);
        assert_eq!(session.select_eraser_preset(3), None);
        assert_eq!(session.mode(), EditMode::Pen);
        assert!((session.eraser_size() - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shortcuts_drive_history() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        assert!(session.handle_shortcut("z", Modifiers::CTRL));
        assert!(session.scene().cells().is_empty());
        assert!(session.handle_shortcut("Z", Modifiers::CTRL_SHIFT));
        assert_eq!(session.scene().cells().len(), 1);
        assert!(!session.handle_shortcut("q", Modifiers::CTRL));
    }

    #[test]
    fn test_undo_finishes_open_stroke() {
        let mut session = EditorSession::new();
        let mut dialogs = ScriptedDialogs::new();
        session.set_mode(EditMode::Pen);
        session.pointer_down(Point::ZERO, LEFT, &mut dialogs);
        session.pointer_move(Point::new(1.0, 0.0));
        assert!(session.undo());
        assert!(session.scene().strokes().is_empty());
        assert!(session.redo());
        let stroke = &session.scene().strokes()[0];
        assert!(stroke.is_finished);
        assert_eq!(stroke.points.len(), 2);
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        assert!(!session.clear(&mut ScriptedDialogs::new().confirming(false)));
        assert_eq!(session.scene().cells().len(), 1);

        let mut dialogs = ScriptedDialogs::new().confirming(true);
        assert!(session.clear(&mut dialogs));
        assert!(session.scene().is_empty());
        assert!(!session.history().can_undo());
        assert_eq!(dialogs.shown, vec![CONFIRM_CLEAR]);
    }

    #[test]
    fn test_load_replaces_scene_and_resets_history() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        let json = r##"{"texts":[{"id":41,"content":"Old","x":1,"y":20,"color":"#ffffff"}],
            "strokes":[{"points":[{"x":0,"y":0}],"color":"#ffffff","size":4,"isFinished":false}]}"##;
        session.load_json(json).unwrap();

        assert!(session.scene().cells().is_empty());
        assert!(session.scene().strokes()[0].is_finished);
        assert!(!session.history().can_undo());
        assert!(!session.undo());

        let id = add_text(&mut session, "New", Point::new(300.0, 300.0));
        assert!(id > 41);
    }

    #[test]
    fn test_failed_load_leaves_scene() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        let before = session.scene().clone();
        assert!(session.load_json("{\"cells\":").is_err());
        assert_eq!(session.scene(), &before);
        assert!(session.history().can_undo());
    }

    #[test]
    fn test_save_then_load() {
        let mut session = EditorSession::new();
        drag(&mut session, &[Point::new(5.0, 5.0)]);
        add_text(&mut session, "Cave", Point::new(100.0, 100.0));
        let json = session.save_json().unwrap();

        let mut other = EditorSession::new();
        other.load_json(&json).unwrap();
        assert_eq!(other.scene(), session.scene());
    }
}
