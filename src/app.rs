// ============================================================================
// GRIDFE APP — eframe host wiring pointer input into the editing core
// ============================================================================

use eframe::egui;
use egui::{Color32, Pos2, Sense, Stroke, Vec2};

use crate::canvas::{Cell, CellBuffer, BUFFER_CELLS, CELL_PX, GRID, VIEWPORT_MAX, VIEWPORT_STEP};
use crate::cli::CliArgs;
use crate::components::colors::{cell_color, PALETTE, PALETTE_SIZE};
use crate::components::history::{EditHistory, EditTarget};
use crate::components::tools::{
    EditAction, EditContext, FrameInput, GridEditor, InputEvent, PointerButton, Tool,
};
use crate::render::{draw_frame, DrawBackend};

/// Screen pixels per core pixel. The core works at 8 px per cell; the host
/// scales that up for a usable window.
const ZOOM: f32 = 3.0;

/// Canvas widget edge in screen pixels.
const CANVAS_PX: f32 = (GRID * CELL_PX) as f32 * ZOOM;

/// Palette swatch edge in screen pixels.
const SWATCH_PX: f32 = 22.0;

/// Right-button travel below this is a click (eyedropper), not a pan.
const CLICK_SLOP_PX: f32 = 4.0;

const SCROLL_MAX: i32 = VIEWPORT_MAX / VIEWPORT_STEP;

// ---------------------------------------------------------------------------
//  Pointer snapshot — per-frame egui input distilled for the core
// ---------------------------------------------------------------------------

struct PointerSnapshot {
    primary_pressed: bool,
    primary_down: bool,
    primary_released: bool,
    secondary_pressed: bool,
    secondary_down: bool,
    secondary_released: bool,
    pos: Option<Pos2>,
    delta: Vec2,
    frame: FrameInput,
}

// ---------------------------------------------------------------------------
//  Application state
// ---------------------------------------------------------------------------

pub struct GridFEApp {
    editor: GridEditor,
    image: CellBuffer,
    tilemap: CellBuffer,
    history: EditHistory,
    tool: Tool,
    color: Cell,
    tilemap_mode: bool,

    // Pointer bookkeeping between frames.
    left_active: bool,
    right_active: bool,
    right_travel: f32,
    pan_accum: Vec2,
}

impl GridFEApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &CliArgs) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        log::info!(
            "editing {} with {:?}",
            if args.tilemap { "tilemap 0" } else { "image bank 0" },
            args.initial_tool()
        );
        Self {
            editor: GridEditor::new(),
            image: CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS),
            tilemap: CellBuffer::new(BUFFER_CELLS, BUFFER_CELLS),
            history: EditHistory::new(),
            tool: args.initial_tool(),
            color: args.initial_color(),
            tilemap_mode: args.tilemap,
            left_active: false,
            right_active: false,
            right_travel: 0.0,
            pan_accum: Vec2::ZERO,
        }
    }

    fn target(&self) -> EditTarget {
        if self.tilemap_mode {
            EditTarget::Tilemap(0)
        } else {
            EditTarget::Image(0)
        }
    }

    fn edit_context(&self) -> EditContext {
        EditContext {
            tool: self.tool,
            color: self.color,
            target: self.target(),
        }
    }

    fn active_buffer(&self) -> &CellBuffer {
        if self.tilemap_mode { &self.tilemap } else { &self.image }
    }

    /// Run one core step and apply whatever side effect it asks for.
    fn dispatch(&mut self, event: InputEvent) {
        let ectx = self.edit_context();
        let buffer = if self.tilemap_mode { &mut self.tilemap } else { &mut self.image };
        match self.editor.handle(event, &ectx, buffer) {
            Some(EditAction::Committed(record)) => {
                if let Err(e) = self.history.push(record) {
                    log::error!("edit could not be recorded: {}", e);
                }
            }
            Some(EditAction::ColorPicked(value)) => {
                log::debug!("eyedropper picked {}", value);
                self.color = value;
            }
            None => {}
        }
    }

    fn undo(&mut self) {
        if let Some(target) = self.history.undo_target() {
            let buffer = match target {
                EditTarget::Image(_) => &mut self.image,
                EditTarget::Tilemap(_) => &mut self.tilemap,
            };
            self.history.undo(buffer);
        }
    }

    fn redo(&mut self) {
        if let Some(target) = self.history.redo_target() {
            let buffer = match target {
                EditTarget::Image(_) => &mut self.image,
                EditTarget::Tilemap(_) => &mut self.tilemap,
            };
            self.history.redo(buffer);
        }
    }

    // ---- input ------------------------------------------------------------

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::Z),
                i.modifiers.command && i.key_pressed(egui::Key::Y),
            )
        });
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }
    }

    /// Translate this frame's pointer state into core input events.
    fn pump_pointer(&mut self, ctx: &egui::Context, canvas: egui::Rect) {
        let input = ctx.input(|i| PointerSnapshot {
            primary_pressed: i.pointer.primary_pressed(),
            primary_down: i.pointer.primary_down(),
            primary_released: i.pointer.primary_released(),
            secondary_pressed: i.pointer.secondary_pressed(),
            secondary_down: i.pointer.secondary_down(),
            secondary_released: i.pointer.secondary_released(),
            pos: i.pointer.latest_pos(),
            delta: i.pointer.delta(),
            frame: FrameInput {
                guide_held: i.modifiers.shift,
                copy: i.modifiers.command && i.key_pressed(egui::Key::C),
                paste: i.modifiers.command && i.key_pressed(egui::Key::V),
            },
        });

        if let Some(pos) = input.pos {
            // Core coordinates: widget-local pixels at the core's own scale.
            let x = ((pos.x - canvas.min.x) / ZOOM).floor() as i32;
            let y = ((pos.y - canvas.min.y) / ZOOM).floor() as i32;

            if input.primary_pressed && canvas.contains(pos) {
                self.left_active = true;
                self.dispatch(InputEvent::PointerDown { button: PointerButton::Left, x, y });
            }
            if self.left_active && input.primary_down && input.delta != Vec2::ZERO {
                self.dispatch(InputEvent::PointerDrag {
                    button: PointerButton::Left,
                    x,
                    y,
                    dx: 0,
                    dy: 0,
                });
            }

            if input.secondary_pressed && canvas.contains(pos) {
                self.right_active = true;
                self.right_travel = 0.0;
                self.pan_accum = Vec2::ZERO;
            }
            if self.right_active && input.secondary_down && input.delta != Vec2::ZERO {
                self.right_travel += input.delta.length();
                // Panning works in whole core pixels; bank the fraction.
                self.pan_accum += input.delta / ZOOM;
                let dx = self.pan_accum.x.trunc() as i32;
                let dy = self.pan_accum.y.trunc() as i32;
                if dx != 0 || dy != 0 {
                    self.pan_accum -= Vec2::new(dx as f32, dy as f32);
                    self.dispatch(InputEvent::PointerDrag {
                        button: PointerButton::Right,
                        x,
                        y,
                        dx,
                        dy,
                    });
                }
            }
            if input.secondary_released && self.right_active {
                self.right_active = false;
                if self.right_travel < CLICK_SLOP_PX {
                    self.dispatch(InputEvent::PointerClick { button: PointerButton::Right, x, y });
                }
            }
        } else if input.secondary_released {
            self.right_active = false;
        }

        // Releases must reach the core even when the pointer left the
        // window, or a gesture would stay open forever.
        if input.primary_released && self.left_active {
            self.left_active = false;
            self.dispatch(InputEvent::PointerUp { button: PointerButton::Left, x: 0, y: 0 });
        }

        self.dispatch(InputEvent::Update(input.frame));
    }

    // ---- panels -----------------------------------------------------------

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for &tool in Tool::all() {
                if ui.selectable_label(self.tool == tool, tool.label()).clicked()
                    && self.tool != tool
                {
                    self.tool = tool;
                    // The marquee does not survive a tool change.
                    self.editor.clear_selection();
                }
            }
            ui.separator();
            if ui
                .add_enabled(self.history.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                self.undo();
            }
            if ui
                .add_enabled(self.history.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                self.redo();
            }
        });
    }

    fn palette_strip(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for i in 0..PALETTE_SIZE {
                let (rect, resp) = ui.allocate_exact_size(Vec2::splat(SWATCH_PX), Sense::click());
                ui.painter().rect_filled(rect, 2.0, PALETTE[i]);
                if self.color as usize == i {
                    ui.painter().rect_stroke(rect, 2.0, Stroke::new(2.0, Color32::WHITE));
                }
                if resp.clicked() {
                    self.color = i as Cell;
                }
            }
            if self.tilemap_mode {
                ui.separator();
                // Tile indices go past the swatch strip; allow direct entry.
                ui.add(egui::DragValue::new(&mut self.color).clamp_range(0..=1023).prefix("tile "));
            }
        });
    }

    fn status_line(&self, ui: &mut egui::Ui) {
        let (vx, vy) = self.editor.viewport().origin();
        ui.label(format!(
            "{} | {} | color {} | offset ({}, {}) | {} recorded edits",
            if self.tilemap_mode { "tilemap" } else { "image" },
            self.tool.label(),
            self.color,
            vx,
            vy,
            self.history.len(),
        ));
    }

    fn canvas_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::splat(CANVAS_PX), Sense::click_and_drag());
            self.pump_pointer(ctx, response.rect);

            let mut backend = PainterBackend { painter: &painter, origin: response.rect.min };
            draw_frame(&self.editor, &self.edit_context(), self.active_buffer(), &mut backend);

            // Vertical scrollbar mirrors the offset; dragging it jumps.
            let mut sy = self.editor.viewport().scroll_y();
            if ui
                .add(egui::Slider::new(&mut sy, 0..=SCROLL_MAX).vertical().show_value(false))
                .changed()
            {
                self.editor.viewport_mut().set_scroll_y(sy);
            }
        });

        let mut sx = self.editor.viewport().scroll_x();
        if ui
            .add(egui::Slider::new(&mut sx, 0..=SCROLL_MAX).show_value(false))
            .changed()
        {
            self.editor.viewport_mut().set_scroll_x(sx);
        }
    }
}

impl eframe::App for GridFEApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::top("palette").show(ctx, |ui| self.palette_strip(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_line(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas_panel(ctx, ui));
    }
}

// ---------------------------------------------------------------------------
//  Drawing backend over an egui painter
// ---------------------------------------------------------------------------

/// Implements the core's drawing primitives on the canvas painter, scaling
/// core pixels to screen pixels and mapping cell values through the palette.
struct PainterBackend<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
}

impl PainterBackend<'_> {
    fn at(&self, x: i32, y: i32) -> Pos2 {
        self.origin + Vec2::new(x as f32, y as f32) * ZOOM
    }
}

impl DrawBackend for PainterBackend<'_> {
    fn cell_block(&mut self, px: i32, py: i32, value: Cell) {
        let rect = egui::Rect::from_min_size(
            self.at(px, py),
            Vec2::splat(CELL_PX as f32 * ZOOM),
        );
        self.painter.rect_filled(rect, 0.0, cell_color(value));
    }

    fn ui_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell) {
        let offset = Vec2::splat(0.5 * ZOOM);
        self.painter.line_segment(
            [self.at(x1, y1) + offset, self.at(x2, y2) + offset],
            Stroke::new(ZOOM, cell_color(color)),
        );
    }

    fn ui_rect_outline(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Cell) {
        let rect = egui::Rect::from_min_max(self.at(x1, y1), self.at(x2 + 1, y2 + 1));
        self.painter.rect_stroke(rect, 0.0, Stroke::new(ZOOM, cell_color(color)));
    }
}
