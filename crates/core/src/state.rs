//! Game state module - the single-threaded rules of the game
//!
//! [`GameState`] ties together the grid, the falling piece, the random source
//! and the score/level counters. It is a plain state machine with no locking;
//! `stacker-engine` wraps it in a mutex for shared use.
//!
//! ```text
//! Spawning -> Falling -(blocked move down)-> Locking -> LineClearing -> Spawning
//!                 |                              |
//!                 +---- no room to spawn ----> GameOver <-+ top-out
//! GameOver -(rotate / restart)-> Spawning
//! ```

use crate::grid::Grid;
use crate::pieces::{wall_kick, CellOffset, PieceShape};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, PieceKind, EMPTY, SPAWN_COL, SPAWN_ROW};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: Cell,
    /// `(row, col)` of the shape's origin.
    pub offset: CellOffset,
}

impl ActivePiece {
    /// Catalog piece at the spawn offset, just above the visible field.
    pub fn spawn(kind: PieceKind, color: Cell) -> Self {
        Self {
            kind,
            shape: PieceShape::of(kind),
            color,
            offset: (SPAWN_ROW, SPAWN_COL),
        }
    }

    /// Same piece moved to `offset`.
    pub fn at(self, offset: CellOffset) -> Self {
        Self { offset, ..self }
    }

    /// Absolute `(row, col)` cells.
    pub fn cells(&self) -> [CellOffset; 4] {
        self.shape.place(self.offset)
    }

    pub fn covers(&self, row: i32, col: i32) -> bool {
        self.cells().contains(&(row, col))
    }
}

/// What a lock event did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Rows removed by this lock (0-4 in normal play).
    pub lines_cleared: u32,
    /// Points awarded for the clear.
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub total_lines: u32,
    /// The replacement piece had no room to spawn.
    pub game_over: bool,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece was translated.
    Moved,
    /// The move was rejected; nothing changed.
    Blocked,
    /// A blocked move down settled the piece into the grid.
    Locked(LockEvent),
    /// A blocked move down happened while the piece still reached into the
    /// spawn buffer; the game is over.
    ToppedOut,
    /// The game is over; moves are ignored.
    Halted,
}

/// Result of a rotate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The rotated shape was placed, shifted by a wall kick when `kicked`.
    Rotated { kicked: bool },
    /// No free placement; the piece is unchanged.
    Rejected,
    /// The game was over, so rotating started a fresh game.
    Reset,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    grid: Grid,
    active: ActivePiece,
    score: u32,
    level: u32,
    lines: u32,
    game_over: bool,
    /// Monotonic id of the active piece (increments on every spawn).
    piece_id: u32,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Start a game on an empty grid, drawing pieces from `rng`.
    pub fn new(rng: R) -> Self {
        Self::with_grid(Grid::new(), rng)
    }

    /// Start a game on a prepared grid.
    ///
    /// The first piece is spawned immediately, so a grid blocking the spawn
    /// area yields a game that is already over.
    pub fn with_grid(grid: Grid, mut rng: R) -> Self {
        let active = ActivePiece::spawn(rng.pick_kind(), rng.pick_color());
        let mut state = Self {
            grid,
            active,
            score: 0,
            level: 0,
            lines: 0,
            game_over: false,
            piece_id: 1,
            rng,
        };
        state.game_over = !state.fits(&active.cells());
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for scripted setups (tests, replays, tooling).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Replace the falling piece, for scripted setups.
    ///
    /// The game-over flag is recomputed the same way a spawn computes it.
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
        self.piece_id = self.piece_id.wrapping_add(1);
        self.game_over = !self.fits(&piece.cells());
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_cell_free(&self, row: i32, col: i32) -> bool {
        self.grid.is_cell_free(row, col)
    }

    fn fits(&self, cells: &[CellOffset; 4]) -> bool {
        cells.iter().all(|&(r, c)| self.grid.is_cell_free(r, c))
    }

    /// Color shown at `(row, col)`: the falling piece over the grid.
    pub fn color_at(&self, row: i32, col: i32) -> Cell {
        if self.active.covers(row, col) {
            return self.active.color;
        }
        self.grid.get(row, col).unwrap_or(EMPTY)
    }

    /// Draw a new piece and check that it has room.
    fn spawn(&mut self) {
        let kind = self.rng.pick_kind();
        let color = self.rng.pick_color();
        self.active = ActivePiece::spawn(kind, color);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.game_over = !self.fits(&self.active.cells());
    }

    /// Throw the current game away and start over on an empty grid.
    ///
    /// The random source keeps its stream.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.game_over = false;
        self.spawn();
    }

    /// Offset of the active piece shifted by a delta, saturating.
    fn shifted_offset(&self, d_row: i32, d_col: i32) -> CellOffset {
        let (row, col) = self.active.offset;
        (row.saturating_add(d_row), col.saturating_add(d_col))
    }

    /// Whether the active piece could be translated by the delta.
    pub fn can_move(&self, d_row: i32, d_col: i32) -> bool {
        if self.game_over {
            return false;
        }
        let offset = self.shifted_offset(d_row, d_col);
        self.fits(&self.active.shape.place(offset))
    }

    /// Translate the active piece, locking it when a move down is blocked.
    ///
    /// Only the gravity direction `(1, 0)` locks; any other rejected move is
    /// ignored.
    pub fn try_move(&mut self, d_row: i32, d_col: i32) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Halted;
        }

        let offset = self.shifted_offset(d_row, d_col);
        if self.fits(&self.active.shape.place(offset)) {
            self.active.offset = offset;
            return MoveOutcome::Moved;
        }

        if (d_row, d_col) != (1, 0) {
            return MoveOutcome::Blocked;
        }

        // Still poking into the spawn buffer: no room left in the field.
        if self.active.cells().iter().any(|&(r, _)| r < 0) {
            self.game_over = true;
            return MoveOutcome::ToppedOut;
        }

        MoveOutcome::Locked(self.lock_and_clear())
    }

    /// One instant-drop step: move down only if that cannot lock.
    pub fn drop_step(&mut self) -> bool {
        if !self.can_move(1, 0) {
            return false;
        }
        self.active.offset = self.shifted_offset(1, 0);
        true
    }

    /// Settle the active piece, clear full rows, score, and spawn the next one.
    fn lock_and_clear(&mut self) -> LockEvent {
        let piece = self.active;
        self.grid.fill_cells(&piece.cells(), piece.color);

        let cleared = self.grid.clear_full_rows().len();
        // Points use the level from before this clear.
        let points = line_clear_score(cleared, self.level);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self.score.saturating_add(points);
        self.level = level_for_lines(self.lines);

        self.spawn();

        LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points,
            score: self.score,
            level: self.level,
            total_lines: self.lines,
            game_over: self.game_over,
        }
    }

    /// Rotate the active piece a quarter turn, with wall-kick correction.
    ///
    /// After a game over this starts a new game instead.
    pub fn rotate(&mut self) -> RotateOutcome {
        if self.game_over {
            self.reset();
            return RotateOutcome::Reset;
        }

        let rotated = self.active.shape.rotated();
        let (d_row, d_col) = wall_kick(&rotated.place(self.active.offset));
        let offset = self.shifted_offset(d_row, d_col);

        if !self.fits(&rotated.place(offset)) {
            return RotateOutcome::Rejected;
        }

        self.active.shape = rotated;
        self.active.offset = offset;
        RotateOutcome::Rotated {
            kicked: (d_row, d_col) != (0, 0),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);
        out.active = Some(ActiveSnapshot::from(self.active));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.game_over = self.game_over;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}
