// ============================================================================
// FLOOD FILL — 4-connected bucket fill over a window snapshot
// ============================================================================

use crate::canvas::{Cell, CellPatch};

/// Flood-fill the connected region of `patch` around (`x`, `y`): every cell
/// reachable from the seed through 4-connected neighbors holding the seed's
/// original value is set to `color`.
///
/// Recoloring doubles as the visited mark — a filled cell no longer matches
/// the source value — so each cell is visited at most once and no separate
/// mask is needed. When `color` equals the seed's value the whole walk would
/// re-match itself forever; that case is a defined no-op. A seed outside the
/// patch is likewise a no-op.
///
/// The bucket tool runs this against a 16×16 snapshot of the viewport's
/// sub-rectangle and blits the result straight back; fills never stage
/// through the overlay because their result must be visible immediately.
pub fn flood_fill(patch: &mut CellPatch, x: i32, y: i32, color: Cell) {
    if !patch.contains(x, y) {
        return;
    }
    let source = patch.get(x, y);
    if source == color {
        return;
    }

    let mut stack = vec![(x, y)];
    patch.set(x, y, color);
    while let Some((x, y)) = stack.pop() {
        for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            if patch.contains(nx, ny) && patch.get(nx, ny) == source {
                patch.set(nx, ny, color);
                stack.push((nx, ny));
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
