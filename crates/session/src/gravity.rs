//! Gravity timer.
//!
//! A tokio task sleeps for the current level's interval and then pushes the
//! falling piece down one row. The level is re-read every tick, so the pace
//! picks up as soon as a clear raises it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::RandomSource;
use crate::engine::GameEngine;
use crate::event_log::EventLog;
use crate::types::gravity_interval_ms;

/// Standard schedule: `gravity_interval_ms(level)`.
pub fn level_interval(level: u32) -> Duration {
    Duration::from_millis(gravity_interval_ms(level))
}

/// Spawn the gravity task on `handle`.
///
/// While `paused` is set, ticks elapse without moving the piece. Locks and
/// top-outs caused by gravity are recorded in `log`.
pub fn spawn_gravity<R, F>(
    handle: &Handle,
    engine: Arc<GameEngine<R>>,
    paused: Arc<AtomicBool>,
    log: EventLog,
    schedule: F,
) -> JoinHandle<()>
where
    R: RandomSource + Send + 'static,
    F: Fn(u32) -> Duration + Send + 'static,
{
    handle.spawn(async move {
        loop {
            tokio::time::sleep(schedule(engine.level())).await;
            if paused.load(Ordering::Acquire) {
                continue;
            }
            let outcome = engine.move_by(1, 0);
            crate::record_move(&log, &engine, outcome);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use crate::types::PieceKind;

    fn fast(_level: u32) -> Duration {
        Duration::from_millis(1)
    }

    #[test]
    fn level_interval_follows_table() {
        assert_eq!(level_interval(0), Duration::from_millis(1000));
        assert_eq!(level_interval(2), Duration::from_millis(435));
    }

    #[tokio::test]
    async fn gravity_moves_piece_down() {
        let engine = Arc::new(GameEngine::new(ScriptedRng::pieces(&[(PieceKind::O, 1)])));
        let paused = Arc::new(AtomicBool::new(false));
        let task = spawn_gravity(
            &Handle::current(),
            Arc::clone(&engine),
            Arc::clone(&paused),
            EventLog::disabled(),
            fast,
        );

        // Enough ticks to land and lock several pieces.
        tokio::time::sleep(Duration::from_millis(200)).await;
        task.abort();

        let snap = engine.snapshot();
        assert!(snap.piece_id > 1 || snap.game_over);
    }

    #[tokio::test]
    async fn paused_gravity_does_not_move() {
        let engine = Arc::new(GameEngine::new(ScriptedRng::pieces(&[(PieceKind::T, 2)])));
        let before = engine.snapshot();
        let paused = Arc::new(AtomicBool::new(true));
        let task = spawn_gravity(
            &Handle::current(),
            Arc::clone(&engine),
            Arc::clone(&paused),
            EventLog::disabled(),
            fast,
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(engine.snapshot(), before);

        paused.store(false, Ordering::Release);
        tokio::time::sleep(Duration::from_millis(30)).await;
        task.abort();
        assert_ne!(engine.snapshot(), before);
    }
}
