// ============================================================================
// PALETTE — the 16-entry display palette for image cells
// ============================================================================

use egui::Color32;

use crate::canvas::Cell;

pub const PALETTE_SIZE: usize = 16;

/// Display colors for palette indices 0–15. Cell values only ever store the
/// index; these RGB values exist for the screen and the swatch strip.
pub const PALETTE: [Color32; PALETTE_SIZE] = [
    Color32::from_rgb(0x00, 0x00, 0x00), // 0  black
    Color32::from_rgb(0x1d, 0x2b, 0x53), // 1  navy
    Color32::from_rgb(0x7e, 0x25, 0x53), // 2  plum
    Color32::from_rgb(0x00, 0x87, 0x51), // 3  forest
    Color32::from_rgb(0xab, 0x52, 0x36), // 4  rust
    Color32::from_rgb(0x5f, 0x57, 0x4f), // 5  slate
    Color32::from_rgb(0xc2, 0xc3, 0xc7), // 6  silver
    Color32::from_rgb(0xff, 0xf1, 0xe8), // 7  shell
    Color32::from_rgb(0xff, 0x00, 0x4d), // 8  crimson
    Color32::from_rgb(0xff, 0xa3, 0x00), // 9  amber
    Color32::from_rgb(0xff, 0xec, 0x27), // 10 lemon
    Color32::from_rgb(0x00, 0xe4, 0x36), // 11 lime
    Color32::from_rgb(0x29, 0xad, 0xff), // 12 sky
    Color32::from_rgb(0x83, 0x76, 0x9c), // 13 lavender
    Color32::from_rgb(0xff, 0x77, 0xa8), // 14 rose
    Color32::from_rgb(0xff, 0xcc, 0xaa), // 15 sand
];

/// Screen color for a cell value. Image cells are palette indices already;
/// tilemap cells fold into the palette so every tile index gets a stable,
/// distinguishable swatch without real tile art.
pub fn cell_color(value: Cell) -> Color32 {
    PALETTE[value as usize % PALETTE_SIZE]
}
