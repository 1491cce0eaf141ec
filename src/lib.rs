// ============================================================================
// GRIDFE — interactive editing core for a fixed-window pixel/tilemap editor
// ============================================================================
//
//   canvas.rs     — cell buffers, patches, and the viewport model
//   ops/          — overlay, shape rasterizers, flood fill, clipboard
//   components/   — tool state machine, edit history, palette
//   render.rs     — drawing backend seam and the compositing draw step
//   app.rs        — eframe host application
//   cli.rs        — startup arguments
//   logger.rs     — session file logger behind the `log` facade
// ============================================================================

pub mod app;
pub mod canvas;
pub mod cli;
pub mod components;
pub mod logger;
pub mod ops;
pub mod render;
