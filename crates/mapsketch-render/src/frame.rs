//! Display list for one frame of the map canvas.

use crate::renderer::RenderContext;
use kurbo::{BezPath, Cap, Circle, Join, Point, Rect, Shape as _, Stroke};
use mapsketch_core::cell::{CellKey, CellOverlay, PaintedCell};
use mapsketch_core::color::SerializableColor;
use peniko::Color;

/// Tolerance when flattening circles into paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Overlay inset as a fraction of the grid size.
const OVERLAY_INSET: f64 = 0.2;
const CROSS_WIDTH: f64 = 3.0;
const SHAPE_WIDTH: f64 = 4.0;
const GRID_WIDTH: f64 = 1.0;
const PREVIEW_WIDTH: f64 = 2.0;
const PREVIEW_DASH: [f64; 2] = [5.0, 5.0];
const ERASER_CURSOR_WIDTH: f64 = 1.0;

const DRAGGED_TEXT_COLOR: Color = Color::from_rgba8(0x00, 0xff, 0xcc, 0xff);
/// White at 70%.
const OUTLINE_COLOR: Color = Color::from_rgba8(255, 255, 255, 178);
const GRID_ON_BLACK: Color = Color::from_rgba8(255, 255, 255, 38);
const GRID_ON_COLOR: Color = Color::from_rgba8(0, 0, 0, 51);

/// A single drawing operation.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        style: Stroke,
        color: Color,
    },
    /// Text drawn with its baseline starting at `origin`.
    Text {
        content: String,
        origin: Point,
        font_size: f64,
        color: Color,
    },
}

/// Build the draw commands for a frame, back to front.
pub fn build_frame(ctx: &RenderContext) -> Vec<DrawCmd> {
    let scene = ctx.scene;
    let background = scene.background();
    let mut cmds = Vec::with_capacity(
        2 + scene.cells().len() * 2 + scene.strokes().len() + scene.shapes().len() + scene.texts().len(),
    );

    let canvas = Rect::from_origin_size(Point::ZERO, ctx.canvas_size);
    cmds.push(DrawCmd::Fill {
        path: canvas.to_path(PATH_TOLERANCE),
        color: background.into(),
    });

    for (key, cell) in scene.cells_sorted() {
        push_cell(&mut cmds, key, cell, ctx.grid_size, background);
    }

    for stroke in scene.strokes() {
        if stroke.points.is_empty() {
            continue;
        }
        let color = match stroke.color {
            Some(color) if !stroke.is_eraser => color,
            _ => background,
        };
        cmds.push(DrawCmd::Stroke {
            path: stroke.to_path(),
            style: Stroke::new(stroke.width)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
            color: color.into(),
        });
    }

    for shape in scene.shapes() {
        cmds.push(DrawCmd::Stroke {
            path: shape.to_path(),
            style: Stroke::new(SHAPE_WIDTH),
            color: shape.color().into(),
        });
    }

    cmds.push(DrawCmd::Stroke {
        path: grid_path(canvas, f64::from(ctx.grid_size)),
        style: Stroke::new(GRID_WIDTH),
        color: grid_color(background),
    });

    for text in scene.texts() {
        let color = if ctx.preview.dragging_text == Some(text.id) {
            DRAGGED_TEXT_COLOR
        } else {
            text.color.into()
        };
        cmds.push(DrawCmd::Text {
            content: text.content.clone(),
            origin: text.position(),
            font_size: ctx.font_size,
            color,
        });
    }

    if let Some(shape) = &ctx.preview.shape {
        cmds.push(DrawCmd::Stroke {
            path: shape.to_path(),
            style: Stroke::new(PREVIEW_WIDTH).with_dashes(0.0, PREVIEW_DASH),
            color: OUTLINE_COLOR,
        });
    }

    if let Some(cursor) = ctx.preview.eraser_cursor {
        cmds.push(DrawCmd::Stroke {
            path: Circle::new(cursor.center, cursor.radius).to_path(PATH_TOLERANCE),
            style: Stroke::new(ERASER_CURSOR_WIDTH),
            color: OUTLINE_COLOR,
        });
    }

    cmds
}

/// Grid lines are faint white on a black background and faint black on anything else.
pub fn grid_color(background: SerializableColor) -> Color {
    if background == SerializableColor::black() {
        GRID_ON_BLACK
    } else {
        GRID_ON_COLOR
    }
}

fn push_cell(
    cmds: &mut Vec<DrawCmd>,
    key: CellKey,
    cell: &PaintedCell,
    grid_size: u32,
    background: SerializableColor,
) {
    let rect = key.rect(grid_size);
    let fill = if cell.shows_background() { background } else { cell.fill };
    cmds.push(DrawCmd::Fill {
        path: rect.to_path(PATH_TOLERANCE),
        color: fill.into(),
    });

    let (Some(overlay), Some(color)) = (cell.overlay, cell.overlay_color) else {
        return;
    };
    let inner = rect.inset(-OVERLAY_INSET * f64::from(grid_size));
    let color: Color = color.into();
    let cmd = match overlay {
        CellOverlay::Triangle => {
            let mut path = BezPath::new();
            path.move_to(Point::new(rect.center().x, inner.y0));
            path.line_to(Point::new(inner.x1, inner.y1));
            path.line_to(Point::new(inner.x0, inner.y1));
            path.close_path();
            DrawCmd::Fill { path, color }
        }
        CellOverlay::Circle => DrawCmd::Fill {
            path: Circle::new(rect.center(), inner.width() / 2.0).to_path(PATH_TOLERANCE),
            color,
        },
        CellOverlay::Cross => {
            let mut path = BezPath::new();
            path.move_to(Point::new(inner.x0, inner.y0));
            path.line_to(Point::new(inner.x1, inner.y1));
            path.move_to(Point::new(inner.x1, inner.y0));
            path.line_to(Point::new(inner.x0, inner.y1));
            DrawCmd::Stroke {
                path,
                style: Stroke::new(CROSS_WIDTH),
                color,
            }
        }
    };
    cmds.push(cmd);
}

/// Vertical then horizontal lines every `grid_size` pixels, edges included.
fn grid_path(canvas: Rect, grid_size: f64) -> BezPath {
    let mut path = BezPath::new();
    if grid_size <= 0.0 {
        return path;
    }

    let mut x = canvas.x0;
    while x <= canvas.x1 {
        path.move_to(Point::new(x, canvas.y0));
        path.line_to(Point::new(x, canvas.y1));
        x += grid_size;
    }

    let mut y = canvas.y0;
    while y <= canvas.y1 {
        path.move_to(Point::new(canvas.x0, y));
        path.line_to(Point::new(canvas.x1, y));
        y += grid_size;
    }
    path
}
