//! Terminal stacker runner (default binary).
//!
//! Reads `STACKER_*` configuration, asks for a player name, then runs the game
//! until the player quits. Gravity runs on the session's tokio runtime; this
//! loop only polls input and redraws.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;

use stacker::core::GameSnapshot;
use stacker::input::command_for_event;
use stacker::session::{best_score, load_scores, ScoreRecord, Session, SessionConfig};
use stacker::term::{
    FrameBuffer, GameView, Hud, NamePrompt, PromptStatus, TerminalRenderer, Viewport,
};
use stacker::types::Command;

/// Input poll timeout, which is also the redraw cadence.
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    let best = match load_scores(&config.scores_path) {
        Ok(records) => best_score(&records),
        Err(e) => {
            eprintln!("[Stacker] ignoring score file: {e:#}");
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, best);

    // Always try to restore terminal state.
    let _ = term.exit();

    match result? {
        Some(record) => println!(
            "[Stacker] saved score {} for {} to {}",
            record.score,
            record.player,
            config.scores_path.display()
        ),
        None => println!("[Stacker] quit before playing"),
    }
    Ok(())
}

fn viewport() -> Viewport {
    let (w, h) = terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(
    term: &mut TerminalRenderer,
    config: &SessionConfig,
    best: Option<u32>,
) -> Result<Option<ScoreRecord>> {
    let mut fb = FrameBuffer::new(0, 0);

    let player = match config.player.clone() {
        Some(player) => player,
        None => match prompt_name(term, &mut fb)? {
            Some(player) => player,
            None => return Ok(None),
        },
    };

    let session = Session::start(config, &player)?;
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        session.engine().snapshot_into(&mut snap);
        let hud = Hud {
            player: session.player(),
            best,
            paused: session.is_paused(),
        };
        view.render_into(&snap, &hud, viewport(), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match command_for_event(key) {
                Some(Command::Quit) => return session.quit_and_save().map(Some),
                Some(command) => {
                    session.apply(command);
                }
                None => {}
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

/// Show the name prompt until Enter or Esc. `None` means the player left.
fn prompt_name(term: &mut TerminalRenderer, fb: &mut FrameBuffer) -> Result<Option<String>> {
    let mut prompt = NamePrompt::new();
    loop {
        prompt.render_into(viewport(), fb);
        term.draw_swap(fb)?;

        match event::read()? {
            Event::Key(key) => match prompt.handle_key(key) {
                PromptStatus::Editing => {}
                PromptStatus::Submitted(name) => return Ok(Some(name)),
                PromptStatus::Cancelled => return Ok(None),
            },
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
