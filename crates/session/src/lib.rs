//! Session glue: timing, persistence and logging around the engine.
//!
//! - [`config`]: `STACKER_*` environment configuration
//! - [`gravity`]: the tokio gravity task
//! - [`event_log`]: optional JSON-lines log of game events
//! - [`scores`]: the CSV score file
//! - [`runtime`]: [`Session`], which owns the runtime and ties the rest together
//!
//! # Environment Variables
//!
//! - `STACKER_SEED`: RNG seed (default: from the clock)
//! - `STACKER_PLAYER`: player name; skips the name prompt
//! - `STACKER_SCORES_PATH`: score file (default: `scores.csv`)
//! - `STACKER_LOG_PATH`: event log path (default: disabled)
//! - `STACKER_GRAVITY_DISABLED`: set to `1` or `true` to stop the timer

pub mod config;
pub mod event_log;
pub mod gravity;
pub mod runtime;
pub mod scores;

pub use stacker_core as core;
pub use stacker_engine as engine;
pub use stacker_types as types;

pub use config::SessionConfig;
pub use event_log::{EventLog, EventRecord};
pub use gravity::{level_interval, spawn_gravity};
pub use runtime::Session;
pub use scores::{append_score, best_score, load_scores, ScoreRecord};

use crate::core::{MoveOutcome, RandomSource};
use crate::engine::GameEngine;

/// Log what a move did, if it settled a piece or ended the game.
pub(crate) fn record_move<R: RandomSource>(
    log: &EventLog,
    engine: &GameEngine<R>,
    outcome: MoveOutcome,
) {
    match outcome {
        MoveOutcome::Locked(event) => log.record(EventRecord::from_lock(&event)),
        MoveOutcome::ToppedOut => {
            let snap = engine.snapshot();
            log.record(EventRecord::TopOut {
                score: snap.score,
                level: snap.level,
                lines: snap.lines,
            });
        }
        _ => {}
    }
}
