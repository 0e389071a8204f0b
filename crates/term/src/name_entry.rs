//! Player name prompt shown before the first game.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
use crate::game_view::Viewport;
use crate::types::{DEFAULT_PLAYER, MAX_PLAYER_NAME_LEN};

/// Result of feeding one key to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStatus {
    Editing,
    /// Enter pressed; the final name.
    Submitted(String),
    /// Esc or Ctrl-C; the player wants out.
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct NamePrompt {
    buffer: String,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStatus {
        if key.kind == KeyEventKind::Release {
            return PromptStatus::Editing;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PromptStatus::Cancelled;
        }
        match key.code {
            KeyCode::Enter => PromptStatus::Submitted(self.name()),
            KeyCode::Esc => PromptStatus::Cancelled,
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptStatus::Editing
            }
            KeyCode::Char(ch) => {
                self.push(ch);
                PromptStatus::Editing
            }
            _ => PromptStatus::Editing,
        }
    }

    /// Append a printable character, up to the length limit.
    pub fn push(&mut self, ch: char) {
        if ch.is_control() || self.buffer.chars().count() >= MAX_PLAYER_NAME_LEN {
            return;
        }
        self.buffer.push(ch);
    }

    /// Trimmed input, or [`DEFAULT_PLAYER`] when blank.
    pub fn name(&self) -> String {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            DEFAULT_PLAYER.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(ScreenCell::default());

        let box_w = (MAX_PLAYER_NAME_LEN as u16 + 6).max(26);
        let box_h = 6;
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let title = border.bold();
        let field = CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(30, 30, 40));
        let hint = border.dim();

        fb.draw_box(x, y, box_w, box_h, border);
        fb.put_str_centered(x, y + 1, box_w, "ENTER YOUR NAME", title);

        let field_w = MAX_PLAYER_NAME_LEN as u16 + 1;
        let field_x = x + (box_w - field_w) / 2;
        fb.fill_rect(field_x, y + 2, field_w, 1, ' ', field);
        let written = fb.put_str(field_x, y + 2, &self.buffer, field);
        fb.put_char(field_x + written, y + 2, '_', field);

        fb.put_str_centered(x, y + 4, box_w, "Enter to start", hint);
    }
}
