//! MapSketch Render Library
//!
//! Renderer abstraction for MapSketch. A frame is built as a backend-agnostic list of
//! draw commands that any 2D backend can replay.

mod frame;
mod renderer;

pub use frame::{DrawCmd, build_frame, grid_color};
pub use renderer::{RecordingRenderer, RenderContext, RenderResult, Renderer, RendererError};
