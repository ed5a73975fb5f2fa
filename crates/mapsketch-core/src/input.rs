//! Pointer and keyboard input.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::CTRL
    };
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// The pointer left the canvas.
    Leave,
}

/// Keyboard commands the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

impl Shortcut {
    /// Ctrl+Z undoes; Ctrl+Y and Ctrl+Shift+Z redo. Keys match case-insensitively.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.ctrl {
            return None;
        }
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "z" if modifiers.shift => Some(Shortcut::Redo),
            "z" => Some(Shortcut::Undo),
            "y" => Some(Shortcut::Redo),
            _ => None,
        }
    }
}

/// Tracks pointer position and held buttons across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position.
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    /// Whether the pointer is over the canvas.
    pub inside: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                self.inside = true;
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                self.inside = true;
            }
            PointerEvent::Leave => {
                self.pressed_buttons.clear();
                self.inside = false;
            }
        }
    }

    /// The single button held down, if exactly one is.
    pub fn sole_button(&self) -> Option<MouseButton> {
        if self.pressed_buttons.len() == 1 {
            self.pressed_buttons.iter().next().copied()
        } else {
            None
        }
    }
}
