//! JSON-lines event log.
//!
//! Records are sent over an unbounded channel to a writer task, so logging
//! never blocks the game. A write failure ends the task; later records are
//! dropped.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::LockEvent;

/// One logged game event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Start {
        player: String,
        seed: u32,
    },
    Lock {
        piece: &'static str,
        lines_cleared: u32,
        points: u32,
        score: u32,
        level: u32,
        total_lines: u32,
        /// No room for the next piece.
        game_over: bool,
    },
    TopOut {
        score: u32,
        level: u32,
        lines: u32,
    },
    Restart {
        /// Score of the game that was discarded.
        score: u32,
    },
    Pause {
        paused: bool,
    },
    Quit {
        player: String,
        score: u32,
    },
}

impl EventRecord {
    pub fn from_lock(event: &LockEvent) -> Self {
        EventRecord::Lock {
            piece: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
            points: event.points,
            score: event.score,
            level: event.level,
            total_lines: event.total_lines,
            game_over: event.game_over,
        }
    }
}

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    record: &'a EventRecord,
}

/// Cloneable sender side of the log. A disabled log drops every record.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<EventRecord>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Spawn the writer task on `handle`, appending to `path`.
    pub fn spawn(handle: &Handle, path: PathBuf) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel::<EventRecord>();
        let task = handle.spawn(write_records(path, rx));
        (Self { tx: Some(tx) }, task)
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record(&self, record: EventRecord) {
        if let Some(tx) = self.tx.as_ref() {
            let _ = tx.send(record);
        }
    }
}

async fn write_records(path: PathBuf, mut rx: mpsc::UnboundedReceiver<EventRecord>) {
    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(_) => return,
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);
    while let Some(record) = rx.recv().await {
        buf.clear();
        let line = LogLine {
            ts_ms: now_ms(),
            record: &record,
        };
        if serde_json::to_writer(&mut buf, &line).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            break;
        }
    }

    let _ = file.flush().await;
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
