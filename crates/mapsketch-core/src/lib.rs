//! MapSketch Core Library
//!
//! Platform-agnostic scene model, edit history and hit-testing for the MapSketch grid map
//! editor.

pub mod cell;
pub mod color;
pub mod config;
pub mod format;
pub mod geometry;
pub mod history;
pub mod input;
pub mod scene;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod stroke;
pub mod text;
pub mod tools;

pub use cell::{CellKey, CellOverlay, PaintedCell};
pub use color::SerializableColor;
pub use config::EditorConfig;
pub use format::LoadError;
pub use hit_test::{HitTarget, HitTester, TextHitRule};
pub use history::{Command, History};
pub use input::{InputState, Modifiers, MouseButton, PointerEvent, Shortcut};
pub use scene::Scene;
pub use session::{Dialogs, EditorSession, EraserCursor, Preview, ScriptedDialogs};
pub use shapes::{Shape, ShapeId, ShapeKind};
pub use stroke::Stroke;
pub use text::{MonospaceMetrics, TextId, TextLabel, TextMetrics};
pub use tools::{CursorHint, EditMode};
