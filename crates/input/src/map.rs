//! Key mapping from terminal events to commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::MoveDown),

        // Rotation (also resets after game over)
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate),

        KeyCode::Char(' ') => Some(Command::InstantDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),

        _ => None,
    }
}

/// Map a key event, ignoring releases.
///
/// Terminals that report key releases would otherwise move the piece twice
/// per tap.
pub fn command_for_event(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => handle_key_event(key),
        KeyEventKind::Release => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
