//! Shared game engine - one [`GameState`] behind one lock
//!
//! The gravity timer and the input loop run in different execution contexts
//! and both mutate the game. [`GameEngine`] serializes them: every command
//! holds a single, non-reentrant mutex for its whole duration, so each one
//! sees a consistent state and none interleave.
//!
//! Queries take the same lock briefly. Renderers should call
//! [`GameEngine::snapshot`] once per frame instead of issuing per-cell
//! queries.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use stacker_engine::GameEngine;
//!
//! let engine = Arc::new(GameEngine::seeded(7));
//!
//! let gravity = {
//!     let engine = Arc::clone(&engine);
//!     thread::spawn(move || {
//!         for _ in 0..10 {
//!             engine.move_by(1, 0);
//!         }
//!     })
//! };
//! engine.move_by(0, -1);
//! engine.rotate();
//! gravity.join().unwrap();
//!
//! assert!(!engine.game_over());
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use stacker_core as core;
pub use stacker_types as types;

use crate::core::{GameSnapshot, GameState, MoveOutcome, RandomSource, RotateOutcome, SimpleRng};
use crate::types::{Cell, Command, GRID_HEIGHT};

/// What an applied [`Command`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Move(MoveOutcome),
    Rotate(RotateOutcome),
    /// Rows travelled by an instant drop.
    Dropped(u32),
    Restarted,
    /// Not an engine command (pause, quit).
    Ignored,
}

/// Thread-safe handle to a single game.
#[derive(Debug)]
pub struct GameEngine<R = SimpleRng> {
    state: Mutex<GameState<R>>,
}

impl GameEngine<SimpleRng> {
    /// Create a new engine with the given RNG seed
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::from_state(GameState::new(rng))
    }

    /// Wrap a prepared state.
    pub fn from_state(state: GameState<R>) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    // Engine operations never panic mid-update; a poisoned lock still guards a
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, GameState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Translate the falling piece; a blocked `(1, 0)` locks it.
    pub fn move_by(&self, d_row: i32, d_col: i32) -> MoveOutcome {
        self.lock().try_move(d_row, d_col)
    }

    /// Rotate the falling piece, or start a new game after game over.
    pub fn rotate(&self) -> RotateOutcome {
        self.lock().rotate()
    }

    /// Discard the current game and start a fresh one.
    pub fn restart(&self) {
        self.lock().reset();
    }

    /// Drop the falling piece as far as it will go without locking it.
    ///
    /// Each row is a separate locked step, so a gravity tick may interleave.
    /// The loop stops when the piece cannot move down, when the game is over,
    /// or when a different piece has become active. Returns rows travelled.
    pub fn instant_drop(&self) -> u32 {
        let (piece_id, limit) = {
            let state = self.lock();
            let lowest = state
                .active()
                .cells()
                .iter()
                .map(|&(row, _)| row)
                .max()
                .unwrap_or(0);
            let limit = (GRID_HEIGHT as i64 - 1 - lowest as i64).max(0);
            (state.piece_id(), u32::try_from(limit).unwrap_or(u32::MAX))
        };

        let mut rows = 0;
        while rows < limit {
            let moved = {
                let mut state = self.lock();
                state.piece_id() == piece_id && state.drop_step()
            };
            if !moved {
                break;
            }
            rows += 1;
        }
        rows
    }

    /// Apply an input command. Pause and quit belong to the caller.
    pub fn apply(&self, command: Command) -> CommandOutcome {
        if let Some((d_row, d_col)) = command.delta() {
            return CommandOutcome::Move(self.move_by(d_row, d_col));
        }
        match command {
            Command::Rotate => CommandOutcome::Rotate(self.rotate()),
            Command::InstantDrop => CommandOutcome::Dropped(self.instant_drop()),
            Command::Restart => {
                self.restart();
                CommandOutcome::Restarted
            }
            _ => CommandOutcome::Ignored,
        }
    }

    pub fn color_at(&self, row: i32, col: i32) -> Cell {
        self.lock().color_at(row, col)
    }

    pub fn is_cell_free(&self, row: i32, col: i32) -> bool {
        self.lock().is_cell_free(row, col)
    }

    pub fn score(&self) -> u32 {
        self.lock().score()
    }

    pub fn level(&self) -> u32 {
        self.lock().level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lock().lines_cleared()
    }

    pub fn game_over(&self) -> bool {
        self.lock().game_over()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` against the state under the lock, for scripted setups.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut GameState<R>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn into_inner(self) -> GameState<R> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for GameEngine<SimpleRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivePiece, ScriptedRng};
    use crate::types::PieceKind;

    fn engine_with(pieces: &[(PieceKind, u8)]) -> GameEngine<ScriptedRng> {
        GameEngine::new(ScriptedRng::pieces(pieces))
    }

    #[test]
    fn test_instant_drop_stops_above_floor_without_locking() {
        let engine = engine_with(&[(PieceKind::I, 2)]);
        // I spans rows -2..=1; bottom cell can travel to row 19.
        assert_eq!(engine.instant_drop(), 18);
        assert_eq!(engine.snapshot().grid, GameSnapshot::default().grid);

        // The next gravity tick locks it.
        assert!(matches!(engine.move_by(1, 0), MoveOutcome::Locked(_)));
        assert_eq!(engine.color_at(19, 6), 2);
    }

    #[test]
    fn test_instant_drop_after_game_over_is_noop() {
        let engine = engine_with(&[(PieceKind::O, 1)]);
        engine.with_state(|s| {
            s.grid_mut().set(0, 5, 3);
        });
        assert_eq!(engine.move_by(1, 0), MoveOutcome::ToppedOut);
        assert_eq!(engine.instant_drop(), 0);
    }

    #[test]
    fn test_instant_drop_far_above_field_is_bounded() {
        let engine = engine_with(&[(PieceKind::O, 1)]);
        engine.with_state(|s| {
            let piece = s.active();
            s.set_active(piece.at((-40, 0)));
        });
        assert_eq!(engine.instant_drop(), 58);
        let snap = engine.snapshot();
        assert_eq!(snap.active.unwrap().cells[3], (19, 1));
    }

    #[test]
    fn test_apply_maps_commands() {
        let engine = engine_with(&[(PieceKind::T, 1)]);
        assert_eq!(
            engine.apply(Command::MoveLeft),
            CommandOutcome::Move(MoveOutcome::Moved)
        );
        assert!(matches!(
            engine.apply(Command::Rotate),
            CommandOutcome::Rotate(RotateOutcome::Rotated { .. })
        ));
        assert_eq!(engine.apply(Command::Pause), CommandOutcome::Ignored);
        assert_eq!(engine.apply(Command::Quit), CommandOutcome::Ignored);
        assert_eq!(engine.apply(Command::Restart), CommandOutcome::Restarted);
        assert!(matches!(
            engine.apply(Command::InstantDrop),
            CommandOutcome::Dropped(n) if n > 0
        ));
    }

    #[test]
    fn test_restart_resets_score() {
        let engine = engine_with(&[(PieceKind::O, 1)]);
        engine.with_state(|s| {
            for col in 0..8 {
                s.grid_mut().set(19, col, 2);
            }
            let piece = s.active();
            s.set_active(piece.at((18, 8)));
        });
        // O completes row 19 with cols 8..=9.
        assert!(matches!(engine.move_by(1, 0), MoveOutcome::Locked(_)));
        assert_eq!(engine.score(), 40);

        engine.restart();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.lines_cleared(), 0);
        assert!(!engine.game_over());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        use std::sync::Arc;

        let engine = Arc::new(GameEngine::seeded(5));
        let poison = Arc::clone(&engine);
        let _ = std::thread::spawn(move || {
            poison.with_state(|_| panic!("boom"));
        })
        .join();

        // Still usable.
        engine.move_by(0, 1);
        assert!(!engine.game_over());
    }

    #[test]
    fn test_into_inner_returns_state() {
        let engine = engine_with(&[(PieceKind::S, 4)]);
        engine.move_by(1, 0);
        let state = engine.into_inner();
        assert_eq!(state.active(), ActivePiece::spawn(PieceKind::S, 4).at((-1, 5)));
    }
}
