//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]. Key repeat is
//! left to the terminal: auto-repeated presses map exactly like fresh ones, so
//! holding an arrow key keeps the piece moving.

pub mod map;

pub use stacker_types as types;

pub use map::{command_for_event, handle_key_event, should_quit};
