// ============================================================================
// SHAPE RASTERIZERS — grid-space line / rect / ellipse into the overlay
// ============================================================================
//
// Every rasterizer takes two grid-space endpoints and writes cells into the
// overlay canvas; coordinates outside the 16×16 window clip silently through
// `OverlayCanvas::set`. The rect and ellipse rasterizers clear the overlay
// first — a drag re-renders the whole shape from the press point every step.
// `line` does not clear: the pencil chains segments from the previous drag
// point, and callers that re-render a straight-line preview clear first.
//
// With `guide` set, rect and ellipse snap to a square / circle: the driving
// edge or radius becomes max(|dx|, |dy|), anchored at the first endpoint
// with the drag direction's sign kept.

use crate::canvas::Cell;
use crate::ops::overlay::OverlayCanvas;

/// Snap the free endpoint so both axis deltas share one magnitude. A zero
/// delta anchors toward negative, matching a strict `b > a` direction test.
fn constrain(x1: i32, y1: i32, x2: i32, y2: i32, guide: bool) -> (i32, i32) {
    if !guide {
        return (x2, y2);
    }
    let size = (x2 - x1).abs().max((y2 - y1).abs());
    let cx = if x2 > x1 { x1 + size } else { x1 - size };
    let cy = if y2 > y1 { y1 + size } else { y1 - size };
    (cx, cy)
}

// ---- line ------------------------------------------------------------------

/// Rasterize the segment (`x1`, `y1`)–(`x2`, `y2`), both endpoints included.
/// The cell set is identical for a segment and its reverse: endpoints are
/// put in a canonical order before stepping, so rounding ties cannot differ
/// between the two directions.
pub fn line(overlay: &mut OverlayCanvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell) {
    let ((x1, y1), (x2, y2)) = if (y1, x1) <= (y2, x2) {
        ((x1, y1), (x2, y2))
    } else {
        ((x2, y2), (x1, y1))
    };

    let dx = x2 - x1;
    let dy = y2 - y1;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        overlay.set(x1, y1, color);
        return;
    }

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x1 as f64 + dx as f64 * t).round() as i32;
        let y = (y1 as f64 + dy as f64 * t).round() as i32;
        overlay.set(x, y, color);
    }
}

// ---- rectangle -------------------------------------------------------------

/// Filled rectangle over the normalized span of the two endpoints.
pub fn rect(overlay: &mut OverlayCanvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell, guide: bool) {
    overlay.clear();
    let (x2, y2) = constrain(x1, y1, x2, y2, guide);
    let (lx, rx) = (x1.min(x2), x1.max(x2));
    let (ty, by) = (y1.min(y2), y1.max(y2));
    for y in ty..=by {
        for x in lx..=rx {
            overlay.set(x, y, color);
        }
    }
}

/// One-cell border of the normalized rectangle.
pub fn rect_outline(overlay: &mut OverlayCanvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell, guide: bool) {
    overlay.clear();
    let (x2, y2) = constrain(x1, y1, x2, y2, guide);
    let (lx, rx) = (x1.min(x2), x1.max(x2));
    let (ty, by) = (y1.min(y2), y1.max(y2));
    for x in lx..=rx {
        overlay.set(x, ty, color);
        overlay.set(x, by, color);
    }
    for y in ty..=by {
        overlay.set(lx, y, color);
        overlay.set(rx, y, color);
    }
}

// ---- ellipse ---------------------------------------------------------------
//
// The ellipse is centered on the first endpoint with radii |dx| and |dy|;
// with `guide` both radii become max(|dx|, |dy|), a true circle. One octant
// sweep per axis is mirrored into all four quadrants, which makes the cell
// set exactly symmetric under reflection about either axis — and, for equal
// radii, under 90° rotation about the center.

fn plot4(overlay: &mut OverlayCanvas, cx: i32, cy: i32, dx: i32, dy: i32, color: Cell) {
    overlay.set(cx + dx, cy + dy, color);
    overlay.set(cx - dx, cy + dy, color);
    overlay.set(cx + dx, cy - dy, color);
    overlay.set(cx - dx, cy - dy, color);
}

/// Both axis sweeps of the ellipse border. Sweeping each axis keeps the
/// outline gap-free where the curve runs steeper than one cell per column.
fn sweep_outline(overlay: &mut OverlayCanvas, cx: i32, cy: i32, rx: i32, ry: i32, color: Cell) {
    for dx in 0..=rx {
        let t = dx as f64 / rx as f64;
        let dy = (ry as f64 * (1.0 - t * t).sqrt()).round() as i32;
        plot4(overlay, cx, cy, dx, dy, color);
    }
    for dy in 0..=ry {
        let t = dy as f64 / ry as f64;
        let dx = (rx as f64 * (1.0 - t * t).sqrt()).round() as i32;
        plot4(overlay, cx, cy, dx, dy, color);
    }
}

/// Radii from the constrained second endpoint. A zero radius on either axis
/// degenerates the ellipse to a line (or a single cell).
fn radii(x1: i32, y1: i32, x2: i32, y2: i32, guide: bool) -> (i32, i32) {
    let (x2, y2) = constrain(x1, y1, x2, y2, guide);
    ((x2 - x1).abs(), (y2 - y1).abs())
}

/// Ellipse border, centered on (`x1`, `y1`).
pub fn ellipse_outline(overlay: &mut OverlayCanvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell, guide: bool) {
    overlay.clear();
    let (rx, ry) = radii(x1, y1, x2, y2, guide);
    if rx == 0 || ry == 0 {
        for y in y1 - ry..=y1 + ry {
            for x in x1 - rx..=x1 + rx {
                overlay.set(x, y, color);
            }
        }
        return;
    }
    sweep_outline(overlay, x1, y1, rx, ry, color);
}

/// Filled ellipse, centered on (`x1`, `y1`). The interior is a superset of
/// the outline's cells: column spans cover the body and the outline sweeps
/// run on top of them.
pub fn ellipse(overlay: &mut OverlayCanvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell, guide: bool) {
    overlay.clear();
    let (rx, ry) = radii(x1, y1, x2, y2, guide);
    if rx == 0 || ry == 0 {
        for y in y1 - ry..=y1 + ry {
            for x in x1 - rx..=x1 + rx {
                overlay.set(x, y, color);
            }
        }
        return;
    }
    for dx in 0..=rx {
        let t = dx as f64 / rx as f64;
        let span = (ry as f64 * (1.0 - t * t).sqrt()).round() as i32;
        for dy in 0..=span {
            plot4(overlay, x1, y1, dx, dy, color);
        }
    }
    sweep_outline(overlay, x1, y1, rx, ry, color);
}

// ============================================================================
// TESTS
// ============================================================================
