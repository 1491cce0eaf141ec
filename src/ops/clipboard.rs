// ============================================================================
// SELECTION & CLIPBOARD — rectangular selection, copy/paste with clipping
// ============================================================================

use crate::canvas::{CellBuffer, CellPatch, GRID};

// ---------------------------------------------------------------------------
//  Selection rectangle
// ---------------------------------------------------------------------------

/// A rectangular selection in window (grid) coordinates.
///
/// Invariant: `x1 <= x2`, `y1 <= y2`, all four in [0, 15]. "No selection" is
/// represented by the editor holding `Option<SelectionRect>::None`, not by a
/// sentinel inside the rectangle; a malformed rectangle reaching copy/paste
/// is a programmer error and asserts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl SelectionRect {
    /// Single-cell selection, the pointer-down seed.
    pub fn cell(x: i32, y: i32) -> Self {
        let x = x.clamp(0, GRID - 1);
        let y = y.clamp(0, GRID - 1);
        Self { x1: x, y1: y, x2: x, y2: y }
    }

    /// Selection spanning two corners in any order. Each coordinate is
    /// clamped into the window, then the pair is normalized.
    pub fn span(ax: i32, ay: i32, bx: i32, by: i32) -> Self {
        let ax = ax.clamp(0, GRID - 1);
        let ay = ay.clamp(0, GRID - 1);
        let bx = bx.clamp(0, GRID - 1);
        let by = by.clamp(0, GRID - 1);
        Self {
            x1: ax.min(bx),
            y1: ay.min(by),
            x2: ax.max(bx),
            y2: ay.max(by),
        }
    }

    pub fn width(&self) -> usize {
        (self.x2 - self.x1 + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.y2 - self.y1 + 1) as usize
    }

    fn assert_well_formed(&self) {
        debug_assert!(
            self.x1 <= self.x2
                && self.y1 <= self.y2
                && self.x1 >= 0
                && self.y1 >= 0
                && self.x2 < GRID
                && self.y2 < GRID,
            "malformed selection {self:?}"
        );
    }
}

// ---------------------------------------------------------------------------
//  Copy / paste
// ---------------------------------------------------------------------------

/// Snapshot the buffer sub-rectangle under `sel`, offset by the viewport
/// `origin`. The returned patch is the clipboard's content: it owns its
/// cells and outlives both the selection and later viewport moves.
pub fn copy(buffer: &CellBuffer, origin: (i32, i32), sel: SelectionRect) -> CellPatch {
    sel.assert_well_formed();
    buffer.sub_rect(origin.0 + sel.x1, origin.1 + sel.y1, sel.width(), sel.height())
}

/// Blit `clip` at the selection's top-left corner in buffer coordinates.
/// The blit is clipped so it never writes outside the visible 16×16 window:
/// each dimension loses `max(0, sel_origin + clip_dimension - 16)` cells.
/// Returns `false` when the clipped region is empty and nothing was written.
pub fn paste(buffer: &mut CellBuffer, origin: (i32, i32), sel: SelectionRect, clip: &CellPatch) -> bool {
    sel.assert_well_formed();

    let w = clip.width() as i32 - (sel.x1 + clip.width() as i32 - GRID).max(0);
    let h = clip.height() as i32 - (sel.y1 + clip.height() as i32 - GRID).max(0);
    if w <= 0 || h <= 0 {
        return false;
    }

    let block = clip.crop(w as usize, h as usize);
    buffer.blit(origin.0 + sel.x1, origin.1 + sel.y1, &block);
    true
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BUFFER_CELLS, Cell};

    fn numbered_buffer() -> CellBuffer {
        let mut buf = CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS);
        for y in 0..GRID {
            for x in 0..GRID {
                buf.set(x, y, (y * GRID + x) as Cell);
            }
        }
        buf
    }

    #[test]
    fn span_clamps_and_normalizes() {
        // Drag from (0,0) off-grid to (20,20): clamps to the full window.
        let sel = SelectionRect::span(0, 0, 20, 20);
        assert_eq!(sel, SelectionRect { x1: 0, y1: 0, x2: 15, y2: 15 });

        // Reversed corners normalize.
        let sel = SelectionRect::span(9, 2, 3, 7);
        assert_eq!(sel, SelectionRect { x1: 3, y1: 2, x2: 9, y2: 7 });
    }

    #[test]
    fn copy_snapshots_the_selected_sub_rectangle() {
        let buf = numbered_buffer();
        let sel = SelectionRect::span(2, 3, 4, 5);
        let clip = copy(&buf, (0, 0), sel);
        assert_eq!(clip.width(), 3);
        assert_eq!(clip.height(), 3);
        assert_eq!(clip.get(0, 0), (3 * GRID + 2) as Cell);
        assert_eq!(clip.get(2, 2), (5 * GRID + 4) as Cell);
    }

    #[test]
    fn copy_respects_viewport_offset() {
        let mut buf = CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS);
        buf.set(40 + 1, 8 + 1, 9);
        let clip = copy(&buf, (40, 8), SelectionRect::span(0, 0, 2, 2));
        assert_eq!(clip.get(1, 1), 9);
    }

    #[test]
    fn paste_writes_at_selection_origin() {
        let mut buf = CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS);
        let clip = CellPatch::filled(2, 2, 6);
        assert!(paste(&mut buf, (0, 0), SelectionRect::cell(4, 5), &clip));
        assert_eq!(buf.get(4, 5), 6);
        assert_eq!(buf.get(5, 6), 6);
        assert_eq!(buf.get(6, 7), 0);
    }

    #[test]
    fn paste_clips_to_the_window_edge() {
        let mut buf = numbered_buffer();
        let pristine = buf.clone();
        let clip = CellPatch::filled(10, 10, 99);

        assert!(paste(&mut buf, (0, 0), SelectionRect::cell(14, 14), &clip));

        // Only the 2×2 corner lands; nothing outside the window is touched.
        for y in 0..BUFFER_CELLS {
            for x in 0..BUFFER_CELLS {
                let pasted = (14..GRID).contains(&x) && (14..GRID).contains(&y);
                let expect = if pasted { 99 } else { pristine.get(x, y) };
                assert_eq!(buf.get(x, y), expect, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn paste_clips_against_window_not_buffer() {
        // With the viewport away from the buffer edge, clipping still honors
        // the window boundary at grid coordinate 16.
        let mut buf = CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS);
        let clip = CellPatch::filled(4, 4, 5);
        assert!(paste(&mut buf, (64, 64), SelectionRect::cell(15, 15), &clip));
        assert_eq!(buf.get(64 + 15, 64 + 15), 5);
        assert_eq!(buf.get(64 + 16, 64 + 15), 0);
        assert_eq!(buf.get(64 + 15, 64 + 16), 0);
    }
}
