//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! used by the engine, the terminal view and the session glue alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn offset**: `(-2, 5)`, two rows above the visible field
//!
//! Rows above row 0 are a virtual spawn buffer. They are always free and are
//! never stored in the grid.
//!
//! # Colors
//!
//! Cells hold a color index. `0` is empty; `1..COLOR_COUNT` are settled piece
//! colors. The palette order is gray (empty), light green, pink, blue, orange,
//! purple.
//!
//! # Gravity
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 660ms |
//! | 2 | 435ms |
//! | 3 | 287ms |
//! | n | `1000 * 0.66^n` (floor 1ms) |
//!
//! # Examples
//!
//! ```
//! use stacker_types::{gravity_interval_ms, Command, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//!
//! assert_eq!(PieceKind::I.as_str(), "i");
//! assert_eq!(Command::MoveLeft.delta(), Some((0, -1)));
//!
//! assert_eq!(gravity_interval_ms(0), 1000);
//! assert_eq!(gravity_interval_ms(1), 660);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Number of palette entries, including the empty color at index 0.
pub const COLOR_COUNT: u8 = 6;

/// Color index of an empty cell.
pub const EMPTY: Cell = 0;

/// Row offset of a freshly spawned piece (two rows above the field).
pub const SPAWN_ROW: i32 = -2;

/// Column offset of a freshly spawned piece.
pub const SPAWN_COL: i32 = (GRID_WIDTH / 2) as i32;

/// Points per simultaneous line clear (0-4 lines), before the level multiplier.
pub const SCORE_TABLE: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 5;

/// Gravity interval at level 0.
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Per-level multiplier applied to the gravity interval.
pub const GRAVITY_DECAY: f64 = 0.66;

/// Smallest gravity interval the timer will ever use.
pub const GRAVITY_FLOOR_MS: u64 = 1;

/// Name recorded for a player who entered none.
pub const DEFAULT_PLAYER: &str = "Guest";

/// Longest player name accepted at the name prompt.
pub const MAX_PLAYER_NAME_LEN: usize = 16;

/// Color index stored in a grid cell (0 = empty).
pub type Cell = u8;

/// Gravity interval for a level, in milliseconds.
///
/// `1000 * 0.66^level`, truncated, never below [`GRAVITY_FLOOR_MS`].
pub fn gravity_interval_ms(level: u32) -> u64 {
    let exp = i32::try_from(level).unwrap_or(i32::MAX);
    let ms = BASE_GRAVITY_MS as f64 * GRAVITY_DECAY.powi(exp);
    (ms as u64).max(GRAVITY_FLOOR_MS)
}

/// Tetromino kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    L,
    J,
    Z,
    T,
    S,
    I,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::S,
        PieceKind::I,
    ];

    /// Lowercase name, as written to the event log.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::I => "i",
        }
    }
}

/// Player commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    InstantDrop,
    Pause,
    Restart,
    Quit,
}

impl Command {
    /// Row/column delta for the three translation commands.
    pub fn delta(&self) -> Option<(i32, i32)> {
        match self {
            Command::MoveLeft => Some((0, -1)),
            Command::MoveRight => Some((0, 1)),
            Command::MoveDown => Some((1, 0)),
            _ => None,
        }
    }
}
