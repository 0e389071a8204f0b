//! Session runtime: the tokio runtime behind gravity and the event log.
//!
//! Bridges the synchronous terminal loop with the async timer. The input loop
//! calls [`Session::apply`]; the gravity task calls the same engine from the
//! runtime's worker threads.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::core::{RandomSource, RotateOutcome, SimpleRng};
use crate::engine::{CommandOutcome, GameEngine};
use crate::event_log::{EventLog, EventRecord};
use crate::gravity::{level_interval, spawn_gravity};
use crate::scores::{append_score, ScoreRecord};
use crate::types::Command;

/// Longest wait for the event log to drain at shutdown.
const LOG_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Running game session.
pub struct Session<R = SimpleRng> {
    rt: Runtime,
    engine: Arc<GameEngine<R>>,
    paused: Arc<AtomicBool>,
    player: String,
    scores_path: PathBuf,
    log: EventLog,
    log_task: Option<JoinHandle<()>>,
    gravity: Option<JoinHandle<()>>,
}

impl Session<SimpleRng> {
    /// Start a session with an engine seeded from `config`.
    pub fn start(config: &SessionConfig, player: &str) -> Result<Self> {
        Self::with_engine(config, player, Arc::new(GameEngine::seeded(config.seed)))
    }
}

impl<R: RandomSource + Send + 'static> Session<R> {
    pub fn with_engine(
        config: &SessionConfig,
        player: &str,
        engine: Arc<GameEngine<R>>,
    ) -> Result<Self> {
        let rt = Runtime::new().context("create tokio runtime")?;

        let (log, log_task) = match config.log_path.clone() {
            Some(path) => {
                let (log, task) = EventLog::spawn(rt.handle(), path);
                (log, Some(task))
            }
            None => (EventLog::disabled(), None),
        };
        log.record(EventRecord::Start {
            player: player.to_string(),
            seed: config.seed,
        });

        let paused = Arc::new(AtomicBool::new(false));
        let gravity = config.gravity_enabled.then(|| {
            spawn_gravity(
                rt.handle(),
                Arc::clone(&engine),
                Arc::clone(&paused),
                log.clone(),
                level_interval,
            )
        });

        Ok(Self {
            rt,
            engine,
            paused,
            player: player.to_string(),
            scores_path: config.scores_path.clone(),
            log,
            log_task,
            gravity,
        })
    }

    pub fn engine(&self) -> &Arc<GameEngine<R>> {
        &self.engine
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Flip the pause flag; returns the new state.
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.paused.fetch_xor(true, Ordering::AcqRel);
        self.log.record(EventRecord::Pause { paused });
        paused
    }

    /// Apply a player command.
    ///
    /// Pause toggles the pause flag. While paused every other command is
    /// ignored. Quit is left to the caller ([`Session::quit_and_save`]).
    pub fn apply(&self, command: Command) -> CommandOutcome {
        match command {
            Command::Pause => {
                self.toggle_pause();
                return CommandOutcome::Ignored;
            }
            Command::Quit => return CommandOutcome::Ignored,
            _ if self.is_paused() => return CommandOutcome::Ignored,
            _ => {}
        }

        let score_before = self.engine.score();
        let outcome = self.engine.apply(command);
        match outcome {
            CommandOutcome::Move(m) => crate::record_move(&self.log, &self.engine, m),
            CommandOutcome::Restarted | CommandOutcome::Rotate(RotateOutcome::Reset) => {
                self.log.record(EventRecord::Restart {
                    score: score_before,
                })
            }
            _ => {}
        }
        outcome
    }

    /// Record the final score, append it to the score file, and stop.
    pub fn quit_and_save(mut self) -> Result<ScoreRecord> {
        let record = ScoreRecord::new(self.player.clone(), self.engine.score());
        self.log.record(EventRecord::Quit {
            player: record.player.clone(),
            score: record.score,
        });
        let saved = append_score(&self.scores_path, &record);
        self.shutdown();
        saved.map(|()| record)
    }

    /// Stop gravity and flush the event log.
    pub fn shutdown(&mut self) {
        if let Some(gravity) = self.gravity.take() {
            gravity.abort();
        }
        // Closing the last sender ends the writer loop.
        self.log = EventLog::disabled();
        if let Some(task) = self.log_task.take() {
            let _ = self
                .rt
                .block_on(async { tokio::time::timeout(LOG_FLUSH_TIMEOUT, task).await });
        }
    }
}
