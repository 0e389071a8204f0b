//! Color palette for grid color indices.

use crate::fb::Rgb;
use crate::types::{Cell, COLOR_COUNT};

/// Index 0 is the empty cell.
pub const PALETTE: [Rgb; COLOR_COUNT as usize] = [
    Rgb::new(128, 128, 128), // gray
    Rgb::new(144, 238, 144), // light green
    Rgb::new(255, 192, 203), // pink
    Rgb::new(0, 0, 255),     // blue
    Rgb::new(255, 165, 0),   // orange
    Rgb::new(128, 0, 128),   // purple
];

/// RGB for a color index; unknown indices render as empty.
pub fn color_rgb(index: Cell) -> Rgb {
    PALETTE
        .get(index as usize)
        .copied()
        .unwrap_or(PALETTE[0])
}
