//! Edit modes and the drag state behind shape tools.

use crate::cell::CellOverlay;
use crate::color::SerializableColor;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A mode name that is not one of the known edit modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown edit mode: {0:?}")]
pub struct UnknownMode(pub String);

/// What pointer input currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Fill grid cells with the drawing color.
    #[default]
    Paint,
    PaintTriangle,
    PaintCircle,
    PaintX,
    Pen,
    Eraser,
    Line,
    Rectangle,
    Square,
    Circle,
    Text,
    /// Palette picks recolor the background instead of the pen.
    Background,
}

/// Pointer cursor to show for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// The eraser draws its own cursor.
    Hidden,
    Text,
    Crosshair,
}

impl EditMode {
    pub const ALL: [EditMode; 12] = [
        EditMode::Paint,
        EditMode::PaintTriangle,
        EditMode::PaintCircle,
        EditMode::PaintX,
        EditMode::Pen,
        EditMode::Eraser,
        EditMode::Line,
        EditMode::Rectangle,
        EditMode::Square,
        EditMode::Circle,
        EditMode::Text,
        EditMode::Background,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditMode::Paint => "paint",
            EditMode::PaintTriangle => "paint_triangle",
            EditMode::PaintCircle => "paint_circle",
            EditMode::PaintX => "paint_x",
            EditMode::Pen => "pen",
            EditMode::Eraser => "eraser",
            EditMode::Line => "line",
            EditMode::Rectangle => "rectangle",
            EditMode::Square => "square",
            EditMode::Circle => "circle",
            EditMode::Text => "text",
            EditMode::Background => "background",
        }
    }

    /// Whether pointer drags paint grid cells.
    pub fn paints_cells(self) -> bool {
        matches!(
            self,
            EditMode::Paint | EditMode::PaintTriangle | EditMode::PaintCircle | EditMode::PaintX
        )
    }

    /// Overlay glyph painted by this mode, if it is an overlay mode.
    pub fn overlay(self) -> Option<CellOverlay> {
        match self {
            EditMode::PaintTriangle => Some(CellOverlay::Triangle),
            EditMode::PaintCircle => Some(CellOverlay::Circle),
            EditMode::PaintX => Some(CellOverlay::Cross),
            _ => None,
        }
    }

    /// Shape produced by a drag in this mode.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            EditMode::Line => Some(ShapeKind::Line),
            EditMode::Rectangle => Some(ShapeKind::Rectangle),
            EditMode::Square => Some(ShapeKind::Square),
            EditMode::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }

    pub fn is_freehand(self) -> bool {
        matches!(self, EditMode::Pen | EditMode::Eraser)
    }

    pub fn cursor(self) -> CursorHint {
        match self {
            EditMode::Eraser => CursorHint::Hidden,
            EditMode::Text => CursorHint::Text,
            _ => CursorHint::Crosshair,
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A pointer drag is in progress.
    Active {
        /// Starting point of the interaction.
        start: Point,
        /// Current point of the interaction.
        current: Point,
    },
}

/// Manages the current mode and its drag state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected mode.
    pub mode: EditMode,
    /// Current state of the drag.
    pub state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current mode. Any drag in progress is dropped.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.state = ToolState::Idle;
    }

    /// Begin a drag.
    pub fn begin(&mut self, point: Point) {
        self.state = ToolState::Active {
            start: point,
            current: point,
        };
    }

    /// Update the current drag.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// End the drag at `point`, returning where it started.
    pub fn end(&mut self, point: Point) -> Option<(Point, Point)> {
        match std::mem::take(&mut self.state) {
            ToolState::Active { start, .. } => Some((start, point)),
            ToolState::Idle => None,
        }
    }

    /// Abandon the drag.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// The shape the current drag would produce, for live preview.
    pub fn preview_shape(&self, id: ShapeId, color: SerializableColor) -> Option<Shape> {
        let kind = self.mode.shape_kind()?;
        match self.state {
            ToolState::Active { start, current } => Some(Shape::from_drag(kind, id, color, start, current)),
            ToolState::Idle => None,
        }
    }
}
