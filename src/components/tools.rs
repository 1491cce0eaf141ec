// ============================================================================
// TOOL STATE MACHINE — pointer gestures → deterministic grid edits
// ============================================================================

use crate::canvas::{Cell, CellBuffer, CellPatch, Viewport, CELL_PX, GRID};
use crate::components::history::{EditRecord, EditTarget};
use crate::ops::clipboard::{self, SelectionRect};
use crate::ops::fill;
use crate::ops::overlay::OverlayCanvas;
use crate::ops::shapes;

// ---------------------------------------------------------------------------
//  Tools and the edit context
// ---------------------------------------------------------------------------

/// The editing tools, in toolbar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Select,
    Pencil,
    RectOutline,
    Rect,
    EllipseOutline,
    Ellipse,
    Bucket,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Pencil => "Pencil",
            Tool::RectOutline => "Rect outline",
            Tool::Rect => "Rect",
            Tool::EllipseOutline => "Ellipse outline",
            Tool::Ellipse => "Ellipse",
            Tool::Bucket => "Bucket",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::Pencil,
            Tool::RectOutline,
            Tool::Rect,
            Tool::EllipseOutline,
            Tool::Ellipse,
            Tool::Bucket,
        ]
    }

    /// Tools whose gestures stage in the overlay and commit on release.
    fn paints(&self) -> bool {
        matches!(
            self,
            Tool::Pencil | Tool::RectOutline | Tool::Rect | Tool::EllipseOutline | Tool::Ellipse
        )
    }
}

/// Externally-configured editing mode, passed into every state-machine step
/// by the host. The editor holds no ambient tool/color state of its own.
#[derive(Clone, Copy, Debug)]
pub struct EditContext {
    pub tool: Tool,
    pub color: Cell,
    pub target: EditTarget,
}

// ---------------------------------------------------------------------------
//  Input events
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Per-frame modifier snapshot delivered with [`InputEvent::Update`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Guide (shape constraint) key held this frame.
    pub guide_held: bool,
    /// Copy chord pressed this frame.
    pub copy: bool,
    /// Paste chord pressed this frame.
    pub paste: bool,
}

/// One discrete input step. Pointer coordinates are widget-local screen
/// pixels; the editor converts to grid cells itself (floor division by the
/// cell size, so positions left/above the widget land on negative cells and
/// clip or clamp downstream).
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    PointerDown { button: PointerButton, x: i32, y: i32 },
    PointerUp { button: PointerButton, x: i32, y: i32 },
    /// Press-and-release without meaningful movement.
    PointerClick { button: PointerButton, x: i32, y: i32 },
    PointerDrag { button: PointerButton, x: i32, y: i32, dx: i32, dy: i32 },
    /// Per-frame tick; drives guide-mode upgrades and the copy/paste chords.
    Update(FrameInput),
}

/// Side effect the host must carry out after a step.
#[derive(Clone, Debug)]
pub enum EditAction {
    /// A gesture committed; append the record to the history log. Dropping
    /// it would desynchronize undo, so the host must not ignore failures.
    Committed(EditRecord),
    /// The eyedropper sampled a cell; adopt it as the active draw value.
    ColorPicked(Cell),
}

// ---------------------------------------------------------------------------
//  The editor state machine
// ---------------------------------------------------------------------------

/// Gesture interpreter for the 16×16 editing window.
///
/// Owns the viewport, the overlay staging layer, the selection, and the
/// clipboard; the backing buffer and history log stay with the host and are
/// passed through [`GridEditor::handle`]. All processing is synchronous —
/// one event in, at most one action out.
///
/// Guide mode is sticky by contract: once the guide key upgrades a gesture,
/// the constraint holds until pointer-up even if the key is released. A
/// shape that snapped to square must not jump back while the button is
/// still down.
pub struct GridEditor {
    viewport: Viewport,
    overlay: OverlayCanvas,
    selection: Option<SelectionRect>,
    clipboard: Option<CellPatch>,
    press: (i32, i32),
    last: (i32, i32),
    dragging: bool,
    guide: bool,
}

impl Default for GridEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl GridEditor {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            overlay: OverlayCanvas::new(),
            selection: None,
            clipboard: None,
            press: (0, 0),
            last: (0, 0),
            dragging: false,
            guide: false,
        }
    }

    // ---- host accessors ---------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn overlay(&self) -> &OverlayCanvas {
        &self.overlay
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    /// Drop the selection (the host calls this on tool changes).
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    // ---- event entry point ------------------------------------------------

    /// Process one input step against the active context and the backing
    /// buffer the context's target names.
    pub fn handle(
        &mut self,
        event: InputEvent,
        ctx: &EditContext,
        buffer: &mut CellBuffer,
    ) -> Option<EditAction> {
        match event {
            InputEvent::PointerDown { button: PointerButton::Left, x, y } => {
                self.on_press(to_grid(x), to_grid(y), ctx, buffer)
            }
            InputEvent::PointerUp { button: PointerButton::Left, .. } => {
                self.on_release(ctx, buffer)
            }
            InputEvent::PointerClick { button: PointerButton::Right, x, y } => {
                self.on_sample(to_grid(x), to_grid(y), buffer)
            }
            InputEvent::PointerDrag { button: PointerButton::Left, x, y, .. } => {
                self.on_drag(to_grid(x), to_grid(y), ctx);
                None
            }
            InputEvent::PointerDrag { button: PointerButton::Right, dx, dy, .. } => {
                self.viewport.pan(dx, dy);
                None
            }
            InputEvent::Update(frame) => self.on_update(frame, ctx, buffer),
            _ => None,
        }
    }

    // ---- gesture stages ---------------------------------------------------

    fn on_press(
        &mut self,
        x: i32,
        y: i32,
        ctx: &EditContext,
        buffer: &mut CellBuffer,
    ) -> Option<EditAction> {
        self.press = (x, y);
        self.last = (x, y);
        self.dragging = true;
        self.guide = false;

        match ctx.tool {
            Tool::Select => {
                self.selection = Some(SelectionRect::cell(x, y));
                None
            }
            tool if tool.paints() => {
                self.overlay.set(x, y, ctx.color);
                None
            }
            Tool::Bucket => {
                // Bucket commits immediately: fill the window snapshot and
                // blit it back, no overlay staging.
                let origin = self.viewport.origin();
                let before = buffer.window(origin);
                let mut after = before.clone();
                fill::flood_fill(&mut after, x, y, ctx.color);
                buffer.blit(origin.0, origin.1, &after);
                Some(EditAction::Committed(EditRecord {
                    target: ctx.target,
                    origin,
                    before,
                    after,
                }))
            }
            _ => None,
        }
    }

    fn on_drag(&mut self, x: i32, y: i32, ctx: &EditContext) {
        if !self.dragging {
            return;
        }
        let (px, py) = self.press;

        match ctx.tool {
            Tool::Select => {
                self.selection = Some(SelectionRect::span(px, py, x, y));
            }
            Tool::Pencil => {
                if self.guide {
                    // Straight-line preview: re-render from the press point.
                    self.overlay.clear();
                    shapes::line(&mut self.overlay, px, py, x, y, ctx.color);
                } else {
                    // Continuous stroke: chain from the previous drag point.
                    let (lx, ly) = self.last;
                    shapes::line(&mut self.overlay, lx, ly, x, y, ctx.color);
                }
            }
            Tool::RectOutline => {
                shapes::rect_outline(&mut self.overlay, px, py, x, y, ctx.color, self.guide);
            }
            Tool::Rect => {
                shapes::rect(&mut self.overlay, px, py, x, y, ctx.color, self.guide);
            }
            Tool::EllipseOutline => {
                shapes::ellipse_outline(&mut self.overlay, px, py, x, y, ctx.color, self.guide);
            }
            Tool::Ellipse => {
                shapes::ellipse(&mut self.overlay, px, py, x, y, ctx.color, self.guide);
            }
            Tool::Bucket => {}
        }

        self.last = (x, y);
    }

    fn on_release(&mut self, ctx: &EditContext, buffer: &mut CellBuffer) -> Option<EditAction> {
        if !std::mem::replace(&mut self.dragging, false) {
            return None;
        }
        if !ctx.tool.paints() {
            // Select keeps its rectangle; bucket already committed on press.
            return None;
        }

        let origin = self.viewport.origin();
        let before = buffer.window(origin);
        self.overlay.merge_into(buffer, origin);
        self.overlay.clear();
        let after = buffer.window(origin);

        Some(EditAction::Committed(EditRecord {
            target: ctx.target,
            origin,
            before,
            after,
        }))
    }

    /// Right-button click: eyedrop the cell under the cursor.
    fn on_sample(&self, x: i32, y: i32, buffer: &CellBuffer) -> Option<EditAction> {
        let x = x.clamp(0, GRID - 1);
        let y = y.clamp(0, GRID - 1);
        let (vx, vy) = self.viewport.origin();
        Some(EditAction::ColorPicked(buffer.get(vx + x, vy + y)))
    }

    fn on_update(
        &mut self,
        frame: FrameInput,
        ctx: &EditContext,
        buffer: &mut CellBuffer,
    ) -> Option<EditAction> {
        // Guide upgrade: once per gesture, never downgraded until release.
        if self.dragging && !self.guide && frame.guide_held {
            self.guide = true;
            let (px, py) = self.press;
            let (lx, ly) = self.last;
            match ctx.tool {
                Tool::Pencil => {
                    self.overlay.clear();
                    shapes::line(&mut self.overlay, px, py, lx, ly, ctx.color);
                }
                Tool::RectOutline => {
                    shapes::rect_outline(&mut self.overlay, px, py, lx, ly, ctx.color, true);
                }
                Tool::Rect => {
                    shapes::rect(&mut self.overlay, px, py, lx, ly, ctx.color, true);
                }
                Tool::EllipseOutline => {
                    shapes::ellipse_outline(&mut self.overlay, px, py, lx, ly, ctx.color, true);
                }
                Tool::Ellipse => {
                    shapes::ellipse(&mut self.overlay, px, py, lx, ly, ctx.color, true);
                }
                Tool::Select | Tool::Bucket => {}
            }
        }

        // Copy / paste act on the current selection under the select tool.
        if ctx.tool == Tool::Select {
            if let Some(sel) = self.selection {
                if frame.copy {
                    self.clipboard = Some(clipboard::copy(buffer, self.viewport.origin(), sel));
                } else if frame.paste {
                    if let Some(clip) = &self.clipboard {
                        let origin = self.viewport.origin();
                        let before = buffer.window(origin);
                        if clipboard::paste(buffer, origin, sel, clip) {
                            let after = buffer.window(origin);
                            return Some(EditAction::Committed(EditRecord {
                                target: ctx.target,
                                origin,
                                before,
                                after,
                            }));
                        }
                    }
                }
            }
        }
        None
    }
}

/// Widget-local screen pixels → grid cell, flooring so that positions
/// left/above the window map to negative cells instead of sticking at zero.
fn to_grid(px: i32) -> i32 {
    px.div_euclid(CELL_PX)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::BUFFER_CELLS;

    fn ctx(tool: Tool) -> EditContext {
        EditContext {
            tool,
            color: 7,
            target: EditTarget::Image(0),
        }
    }

    fn buffer() -> CellBuffer {
        CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS)
    }

    fn press(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerDown { button: PointerButton::Left, x: x * CELL_PX, y: y * CELL_PX }
    }

    fn drag(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerDrag {
            button: PointerButton::Left,
            x: x * CELL_PX,
            y: y * CELL_PX,
            dx: 0,
            dy: 0,
        }
    }

    fn release() -> InputEvent {
        InputEvent::PointerUp { button: PointerButton::Left, x: 0, y: 0 }
    }

    fn tick(guide: bool) -> InputEvent {
        InputEvent::Update(FrameInput { guide_held: guide, copy: false, paste: false })
    }

    #[test]
    fn pencil_gesture_commits_a_line_record() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);

        assert!(editor.handle(press(2, 2), &ctx, &mut buf).is_none());
        assert!(editor.handle(drag(6, 9), &ctx, &mut buf).is_none());
        let action = editor.handle(release(), &ctx, &mut buf);

        let Some(EditAction::Committed(record)) = action else {
            panic!("paint release must commit");
        };
        assert_eq!(record.origin, (0, 0));

        // The after snapshot differs from before exactly at the line cells.
        let mut expected = OverlayCanvas::new();
        shapes::line(&mut expected, 2, 2, 6, 9, 7);
        for y in 0..GRID {
            for x in 0..GRID {
                match expected.get(x, y) {
                    Some(v) => assert_eq!(record.after.get(x, y), v),
                    None => assert_eq!(record.after.get(x, y), record.before.get(x, y)),
                }
            }
        }
        // Commit reached the buffer and the overlay is spent.
        assert_eq!(buf.get(2, 2), 7);
        assert_eq!(buf.get(6, 9), 7);
        assert!(editor.overlay().is_empty());
    }

    #[test]
    fn single_click_paints_one_cell() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);

        editor.handle(press(5, 5), &ctx, &mut buf);
        let action = editor.handle(release(), &ctx, &mut buf);
        assert!(matches!(action, Some(EditAction::Committed(_))));
        assert_eq!(buf.get(5, 5), 7);
    }

    #[test]
    fn shape_drag_rerenders_from_press_point() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Rect);

        editor.handle(press(3, 3), &ctx, &mut buf);
        editor.handle(drag(12, 12), &ctx, &mut buf);
        editor.handle(drag(5, 6), &ctx, &mut buf);

        // The second drag replaced the first shape entirely.
        assert!(editor.overlay().get(12, 12).is_none());
        assert!(editor.overlay().get(5, 6).is_some());
        assert!(editor.overlay().get(3, 3).is_some());
    }

    #[test]
    fn bucket_commits_once_on_press() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Bucket);

        let action = editor.handle(press(5, 5), &ctx, &mut buf);
        let Some(EditAction::Committed(record)) = action else {
            panic!("bucket must commit on press");
        };
        for y in 0..GRID {
            for x in 0..GRID {
                assert_eq!(buf.get(x, y), 7);
                assert_eq!(record.after.get(x, y), 7);
                assert_eq!(record.before.get(x, y), 0);
            }
        }
        // Release adds nothing.
        assert!(editor.handle(release(), &ctx, &mut buf).is_none());
    }

    #[test]
    fn bucket_fills_the_window_under_the_viewport() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Bucket);
        editor.viewport_mut().set_scroll_x(4); // offset (32, 0)

        editor.handle(press(0, 0), &ctx, &mut buf);
        assert_eq!(buf.get(32, 0), 7);
        assert_eq!(buf.get(47, 15), 7);
        assert_eq!(buf.get(31, 0), 0); // outside the window: untouched
        assert_eq!(buf.get(48, 0), 0);
    }

    #[test]
    fn selection_clamps_to_the_window() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Select);

        editor.handle(press(0, 0), &ctx, &mut buf);
        editor.handle(drag(20, 20), &ctx, &mut buf);
        assert_eq!(
            editor.selection(),
            Some(SelectionRect { x1: 0, y1: 0, x2: 15, y2: 15 })
        );

        // The selection persists after release.
        editor.handle(release(), &ctx, &mut buf);
        assert!(editor.selection().is_some());
    }

    #[test]
    fn guide_mode_is_sticky_for_the_gesture() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Rect);

        editor.handle(press(4, 4), &ctx, &mut buf);
        editor.handle(drag(9, 6), &ctx, &mut buf);
        editor.handle(tick(true), &ctx, &mut buf); // guide engages

        // Key released: the constraint must hold for the rest of the drag.
        editor.handle(tick(false), &ctx, &mut buf);
        editor.handle(drag(10, 5), &ctx, &mut buf);
        // max(|dx|, |dy|) = 6 → square spans (4,4)..(10,10).
        assert!(editor.overlay().get(10, 10).is_some());
        assert!(editor.overlay().get(10, 5).is_some());

        // A new gesture starts unconstrained.
        editor.handle(release(), &ctx, &mut buf);
        editor.handle(press(0, 0), &ctx, &mut buf);
        editor.handle(drag(3, 1), &ctx, &mut buf);
        assert!(editor.overlay().get(3, 3).is_none());
    }

    #[test]
    fn guide_upgrade_rerenders_the_pending_shape() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Rect);

        editor.handle(press(4, 4), &ctx, &mut buf);
        editor.handle(drag(9, 6), &ctx, &mut buf);
        assert!(editor.overlay().get(9, 9).is_none()); // free rect so far

        editor.handle(tick(true), &ctx, &mut buf);
        // Upgrade re-rendered from press + last with the constraint on.
        assert!(editor.overlay().get(9, 9).is_some());
    }

    #[test]
    fn eyedropper_samples_through_the_viewport() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);
        buf.set(32 + 3, 8 + 2, 11);
        editor.viewport_mut().set_scroll_x(4);
        editor.viewport_mut().set_scroll_y(1);

        let action = editor.handle(
            InputEvent::PointerClick { button: PointerButton::Right, x: 3 * CELL_PX, y: 2 * CELL_PX },
            &ctx,
            &mut buf,
        );
        assert!(matches!(action, Some(EditAction::ColorPicked(11))));
    }

    #[test]
    fn right_drag_pans_the_viewport() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);

        let pan = InputEvent::PointerDrag { button: PointerButton::Right, x: 0, y: 0, dx: -16, dy: -32 };
        editor.handle(pan, &ctx, &mut buf);
        assert_eq!(editor.viewport().origin(), (8, 16));
        // Panning never stages overlay content.
        assert!(editor.overlay().is_empty());
    }

    #[test]
    fn copy_then_paste_clips_at_the_edge() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Select);
        for y in 0..10 {
            for x in 0..10 {
                buf.set(x, y, 5);
            }
        }

        // Select the 10×10 block and copy it.
        editor.handle(press(0, 0), &ctx, &mut buf);
        editor.handle(drag(9, 9), &ctx, &mut buf);
        editor.handle(release(), &ctx, &mut buf);
        let copy_tick = InputEvent::Update(FrameInput { guide_held: false, copy: true, paste: false });
        assert!(editor.handle(copy_tick, &ctx, &mut buf).is_none());
        assert!(editor.has_clipboard());

        // Re-anchor the selection at (14,14) and paste: only 2×2 fits.
        editor.handle(press(14, 14), &ctx, &mut buf);
        editor.handle(release(), &ctx, &mut buf);
        let paste_tick = InputEvent::Update(FrameInput { guide_held: false, copy: false, paste: true });
        let action = editor.handle(paste_tick, &ctx, &mut buf);

        assert!(matches!(action, Some(EditAction::Committed(_))));
        assert_eq!(buf.get(14, 14), 5);
        assert_eq!(buf.get(15, 15), 5);
        assert_eq!(buf.get(12, 12), 0); // outside the pasted corner
    }

    #[test]
    fn paste_without_copy_is_a_no_op() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Select);

        editor.handle(press(2, 2), &ctx, &mut buf);
        editor.handle(release(), &ctx, &mut buf);
        let paste_tick = InputEvent::Update(FrameInput { guide_held: false, copy: false, paste: true });
        assert!(editor.handle(paste_tick, &ctx, &mut buf).is_none());
    }

    #[test]
    fn clipboard_outlives_the_selection() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Select);
        buf.set(1, 1, 9);

        editor.handle(press(1, 1), &ctx, &mut buf);
        editor.handle(release(), &ctx, &mut buf);
        let copy_tick = InputEvent::Update(FrameInput { guide_held: false, copy: true, paste: false });
        editor.handle(copy_tick, &ctx, &mut buf);

        editor.clear_selection();
        assert!(editor.has_clipboard());

        // A fresh selection pastes the old clipboard content.
        editor.handle(press(6, 6), &ctx, &mut buf);
        editor.handle(release(), &ctx, &mut buf);
        let paste_tick = InputEvent::Update(FrameInput { guide_held: false, copy: false, paste: true });
        assert!(editor.handle(paste_tick, &ctx, &mut buf).is_some());
        assert_eq!(buf.get(6, 6), 9);
    }

    #[test]
    fn pencil_chains_segments_without_clearing() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);

        editor.handle(press(0, 0), &ctx, &mut buf);
        editor.handle(drag(4, 0), &ctx, &mut buf);
        editor.handle(drag(4, 4), &ctx, &mut buf);

        // Both segments survive in the overlay.
        assert!(editor.overlay().get(2, 0).is_some());
        assert!(editor.overlay().get(4, 2).is_some());
    }

    #[test]
    fn off_window_drag_clips_the_stroke() {
        let mut editor = GridEditor::new();
        let mut buf = buffer();
        let ctx = ctx(Tool::Pencil);

        editor.handle(press(14, 0), &ctx, &mut buf);
        // Drag well past the right edge: cells beyond 15 clip silently.
        editor.handle(drag(25, 0), &ctx, &mut buf);
        let action = editor.handle(release(), &ctx, &mut buf);
        assert!(matches!(action, Some(EditAction::Committed(_))));
        assert_eq!(buf.get(15, 0), 7);
    }
}
