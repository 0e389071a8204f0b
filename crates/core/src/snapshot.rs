//! Plain-data copy of the game for renderers and observers.

use crate::pieces::CellOffset;
use crate::state::ActivePiece;
use crate::types::{Cell, PieceKind, EMPTY, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Cell,
    /// Absolute `(row, col)` cells; rows may be negative while spawning.
    pub cells: [CellOffset; 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.game_over = false;
        self.piece_id = 0;
    }

    /// Same lookup as the engine: active piece first, then the grid.
    pub fn color_at(&self, row: i32, col: i32) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(row, col)) {
                return active.color;
            }
        }
        if row < 0 || col < 0 {
            return EMPTY;
        }
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(EMPTY)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            score: 0,
            level: 0,
            lines: 0,
            game_over: false,
            piece_id: 0,
        }
    }
}
