//! Terminal rendering for the stacker game.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! framebuffer, and [`TerminalRenderer`] flushes the cells that changed. No
//! widget toolkit is involved.
//!
//! - [`GameView`] draws the board from a [`core::GameSnapshot`]
//! - [`NamePrompt`] is the player-name screen shown before the first game
//! - [`palette`] maps grid color indices to RGB

pub mod fb;
pub mod game_view;
pub mod name_entry;
pub mod palette;
pub mod renderer;

pub use stacker_core as core;
pub use stacker_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
pub use game_view::{GameView, Hud, Viewport, MAX_CELL_SIZE};
pub use name_entry::{NamePrompt, PromptStatus};
pub use palette::{color_rgb, PALETTE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
