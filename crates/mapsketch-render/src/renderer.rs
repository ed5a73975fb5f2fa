//! Renderer trait abstraction.

use crate::frame::{DrawCmd, build_frame};
use kurbo::Size;
use mapsketch_core::config::EditorConfig;
use mapsketch_core::scene::Scene;
use mapsketch_core::session::{EditorSession, Preview};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid render context: {0}")]
    InvalidContext(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Interaction state drawn on top of the scene.
    pub preview: Preview,
    /// Canvas size in pixels. The grid covers exactly this area.
    pub canvas_size: Size,
    /// Grid cell edge length in pixels.
    pub grid_size: u32,
    /// Font size for text labels.
    pub font_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with the default grid and canvas size.
    pub fn new(scene: &'a Scene) -> Self {
        let config = EditorConfig::default();
        Self {
            scene,
            preview: Preview::default(),
            canvas_size: Size::new(config.canvas_width, config.canvas_height),
            grid_size: config.grid_size,
            font_size: config.line_height,
        }
    }

    /// Context for the current state of an editing session.
    pub fn for_session(session: &'a EditorSession) -> Self {
        let config = session.config();
        Self::new(session.scene())
            .with_preview(session.preview())
            .with_canvas_size(Size::new(config.canvas_width, config.canvas_height))
            .with_grid_size(config.grid_size)
            .with_font_size(config.line_height)
    }

    /// Set the interaction preview.
    pub fn with_preview(mut self, preview: Preview) -> Self {
        self.preview = preview;
        self
    }

    /// Set the canvas size.
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas_size = size;
        self
    }

    /// Set the grid size.
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the text font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Check that the canvas and grid can be drawn.
    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.canvas_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InvalidContext(format!(
                "canvas size {width}x{height}"
            )));
        }
        if self.grid_size == 0 {
            return Err(RendererError::InvalidContext("grid size 0".to_string()));
        }
        Ok(())
    }

    /// Background color as a peniko color.
    pub fn background_color(&self) -> Color {
        self.scene.background().into()
    }
}

/// Trait for rendering backends.
///
/// A backend receives the frame as a list of [`DrawCmd`]s in painting order.
pub trait Renderer: Send + Sync {
    /// Draw a single command.
    fn draw(&mut self, cmd: &DrawCmd) -> RenderResult<()>;

    /// Build and draw a whole frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        for cmd in build_frame(ctx) {
            self.draw(&cmd)?;
        }
        Ok(())
    }

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color()
    }
}

/// A renderer that keeps the commands of the last frame.
///
/// Useful for headless export and for inspecting what a frame contains.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCmd>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last frame started.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, cmd: &DrawCmd) -> RenderResult<()> {
        self.commands.push(cmd.clone());
        Ok(())
    }

    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.commands = build_frame(ctx);
        Ok(())
    }
}
