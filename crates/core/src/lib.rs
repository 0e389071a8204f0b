//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game with no UI, networking or I/O:
//!
//! - **Deterministic**: the random source is a type parameter; the same seed
//!   (or script) replays the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: no threads, no clocks, no allocation on the hot path
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 field of color indices, collision queries, line clearing
//! - [`pieces`]: the 7-shape catalog, bounding-box rotation and wall kicks
//! - [`rng`]: seedable random sources for piece and color selection
//! - [`scoring`]: line-clear points and leveling
//! - [`state`]: [`GameState`], the move/rotate/lock state machine
//! - [`snapshot`]: plain copies of the state for renderers
//!
//! # Game Rules
//!
//! - A new piece spawns two rows above the field, horizontally centered, with
//!   a random shape and color. If it overlaps settled cells the game is over.
//! - Moving down into an obstacle locks the piece; if it still reaches above
//!   the field, the game is over instead.
//! - Full rows vanish and the rows above drop to fill the gap.
//! - Clears score 40/100/300/1200 times `level + 1`; every 5 lines is a level.
//! - Rotating after game over starts a new game.
//!
//! # Example
//!
//! ```
//! use stacker_core::{GameState, MoveOutcome};
//!
//! let mut game = GameState::seeded(12345);
//!
//! game.try_move(0, -1);
//! game.rotate();
//!
//! // Fall until the piece locks.
//! while game.try_move(1, 0) == MoveOutcome::Moved {}
//!
//! assert_eq!(game.score(), 0);
//! assert!(game.grid().cells().iter().filter(|&&c| c != 0).count() == 4);
//! ```

pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod state;

pub use stacker_types as types;

// Re-export commonly used types for convenience
pub use grid::Grid;
pub use pieces::{wall_kick, CellOffset, PieceShape};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use state::{ActivePiece, GameState, LockEvent, MoveOutcome, RotateOutcome};
