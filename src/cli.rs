// ============================================================================
// GRIDFE CLI — startup configuration via command-line arguments
// ============================================================================

use clap::Parser;

use crate::canvas::Cell;
use crate::components::colors::PALETTE_SIZE;
use crate::components::tools::Tool;

/// GridFE — fixed-window pixel and tilemap editor.
#[derive(Parser, Debug)]
#[command(
    name = "gridfe",
    about = "Fixed-window pixel and tilemap editor",
    long_about = "Edit a 16×16 window onto an image bank or tilemap with\n\
                  pencil, shape, bucket, and selection tools.\n\n\
                  Left button draws, right drag pans, right click eyedrops.\n\
                  Shift locks shapes square; Ctrl+C/V copy and paste a\n\
                  selection; Ctrl+Z/Y undo and redo."
)]
pub struct CliArgs {
    /// Edit the tilemap instead of the image bank.
    #[arg(long)]
    pub tilemap: bool,

    /// Initial draw color (palette index).
    #[arg(short, long, default_value_t = 7, value_name = "0-15")]
    pub color: Cell,

    /// Initial tool: select, pencil, rect-outline, rect, ellipse-outline,
    /// ellipse, bucket.
    #[arg(short, long, default_value = "pencil", value_name = "TOOL")]
    pub tool: String,

    /// Log debug lines and mirror the whole session log to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Tool named by `--tool`, falling back to the pencil on a bad name.
    pub fn initial_tool(&self) -> Tool {
        match self.tool.as_str() {
            "select" => Tool::Select,
            "pencil" => Tool::Pencil,
            "rect-outline" => Tool::RectOutline,
            "rect" => Tool::Rect,
            "ellipse-outline" => Tool::EllipseOutline,
            "ellipse" => Tool::Ellipse,
            "bucket" => Tool::Bucket,
            other => {
                log::warn!("unknown tool {:?}, starting with the pencil", other);
                Tool::Pencil
            }
        }
    }

    /// `--color` folded into the palette range.
    pub fn initial_color(&self) -> Cell {
        if (self.color as usize) < PALETTE_SIZE {
            self.color
        } else {
            log::warn!("color {} is out of palette range, using 7", self.color);
            7
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
