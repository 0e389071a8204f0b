//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
use crate::palette::color_rgb;
use crate::types::{EMPTY, GRID_HEIGHT, GRID_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Largest board cell, in terminal columns or rows.
pub const MAX_CELL_SIZE: u16 = 8;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session information drawn next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud<'a> {
    pub player: &'a str,
    /// Best score on record, if any.
    pub best: Option<u32>,
    pub paused: bool,
}

impl Default for Hud<'_> {
    fn default() -> Self {
        Self {
            player: crate::types::DEFAULT_PLAYER,
            best: None,
            paused: false,
        }
    }
}

/// Board and side-panel layout.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Cell sizes are clamped to `1..=MAX_CELL_SIZE`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
        }
    }

    /// Outer size of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (GRID_WIDTH as u16).saturating_mul(self.cell_w).saturating_add(2),
            (GRID_HEIGHT as u16).saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Top-left corner of the board border, centered in `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Top-left terminal position of grid cell `(row, col)`.
    pub fn cell_origin(&self, viewport: Viewport, row: u16, col: u16) -> (u16, u16) {
        let (x, y) = self.frame_origin(viewport);
        (
            x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w)),
            y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h)),
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers reuse one framebuffer
    /// across frames.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(ScreenCell::default());

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let border = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        // Settled cells and the falling piece share one lookup; rows above the
        // field are never drawn.
        for row in 0..GRID_HEIGHT as u16 {
            for col in 0..GRID_WIDTH as u16 {
                let color = snap.color_at(row as i32, col as i32);
                let (px, py) = self.cell_origin(viewport, row, col);
                let (ch, style) = if color == EMPTY {
                    ('·', CellStyle::plain(color_rgb(EMPTY), BOARD_BG).dim())
                } else {
                    ('█', CellStyle::plain(color_rgb(color), BOARD_BG))
                };
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, start_x.saturating_add(frame_w), start_y);

        if snap.game_over {
            let lines = ["GAME OVER", "Press UP to reset"];
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &lines);
        } else if hud.paused {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        frame_right: u16,
        start_y: u16,
    ) {
        let panel_x = frame_right.saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let help = value.dim();

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "PLAYER", label);
        fb.put_str(panel_x, y + 1, hud.player, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "BEST", label);
        match hud.best {
            Some(best) => fb.put_u32(panel_x, y + 1, best, value),
            None => fb.put_str(panel_x, y + 1, "-", value),
        };
        y = y.saturating_add(3);

        for line in [
            "←/→  move",
            "↓    down",
            "↑    rotate",
            "SPC  drop",
            "P    pause",
            "R    restart",
            "Q    quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        for (i, line) in lines.iter().enumerate() {
            fb.put_str_centered(start_x, mid_y + i as u16, frame_w, line, style);
        }
    }
}
