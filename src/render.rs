// ============================================================================
// DRAW STEP — compositing the window, overlay, guides, and marquee
// ============================================================================

use crate::canvas::{Cell, CellBuffer, CELL_PX, GRID};
use crate::components::tools::{EditContext, GridEditor, Tool};

/// UI color index for the center cross guides.
const GUIDE_COLOR: Cell = 1;

/// UI color indices for the triple-ring selection marquee, outermost first.
const MARQUEE_COLORS: [Cell; 3] = [0, 15, 0];

/// Screen-drawing primitives the draw step composites through. Coordinates
/// are widget-local pixels; cell values and UI colors are passed raw and
/// mapped to actual screen colors (or tile art) by the implementation.
/// Consumed only by the display path — editing logic never draws.
pub trait DrawBackend {
    /// Fill the 8×8 pixel block of one grid cell with `value`'s appearance.
    fn cell_block(&mut self, px: i32, py: i32, value: Cell);
    /// One-pixel line between two points, in a UI palette color.
    fn ui_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell);
    /// One-pixel rectangle outline spanning the two corners inclusively.
    fn ui_rect_outline(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell);
}

/// Composite one frame of the editing window: backing cells with the
/// overlay's pending cells on top, then the center cross guides, then the
/// selection marquee when the select tool has an active rectangle.
pub fn draw_frame(
    editor: &GridEditor,
    ctx: &EditContext,
    buffer: &CellBuffer,
    backend: &mut dyn DrawBackend,
) {
    let (vx, vy) = editor.viewport().origin();

    for row in 0..GRID {
        for col in 0..GRID {
            let value = editor
                .overlay()
                .get(col, row)
                .unwrap_or_else(|| buffer.get(vx + col, vy + row));
            backend.cell_block(col * CELL_PX, row * CELL_PX, value);
        }
    }

    // Center cross, between cell rows/columns 7 and 8.
    let mid = (GRID / 2) * CELL_PX - 1;
    let extent = GRID * CELL_PX - 1;
    backend.ui_line(0, mid, extent, mid, GUIDE_COLOR);
    backend.ui_line(mid, 0, mid, extent, GUIDE_COLOR);

    if ctx.tool == Tool::Select {
        if let Some(sel) = editor.selection() {
            let x1 = sel.x1 * CELL_PX;
            let y1 = sel.y1 * CELL_PX;
            let x2 = sel.x2 * CELL_PX + CELL_PX - 1;
            let y2 = sel.y2 * CELL_PX + CELL_PX - 1;
            for (inset, color) in MARQUEE_COLORS.into_iter().enumerate() {
                let i = inset as i32;
                backend.ui_rect_outline(x1 + i, y1 + i, x2 - i, y2 - i, color);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
