//! Input Modes
//!
//! Modal editing state machine for the console.

/// Input mode enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Table navigation
    Normal,
    /// Command line mode (:)
    Command,
    /// Record dialog is open
    Dialog,
    /// Delete confirmation
    Confirm,
    /// Help screen
    Help,
    /// Notification history
    History,
}

impl InputMode {
    /// Get mode indicator for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Command => "COMMAND",
            Self::Dialog => "DIALOG",
            Self::Confirm => "CONFIRM",
            Self::Help => "HELP",
            Self::History => "HISTORY",
        }
    }

    /// Check if mode accepts text input on the command line
    pub fn is_text_input(&self) -> bool {
        matches!(self, Self::Command)
    }
}

/// Mode state with associated data.
///
/// Only covers the modes the shell switches itself; `Dialog` and `Confirm`
/// follow the screen's visibility flags.
#[derive(Debug, Clone)]
pub struct ModeState {
    pub mode: InputMode,
    /// Command line buffer
    pub buffer: String,
    /// Cursor position in buffer, in bytes
    pub cursor: usize,
    /// Pending key sequence (for gg, dd)
    pub pending: Option<char>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            buffer: String::new(),
            cursor: 0,
            pending: None,
        }
    }
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
        self.cursor = 0;
        self.pending = None;
    }

    pub fn to_normal(&mut self) {
        self.set_mode(InputMode::Normal);
    }

    pub fn to_command(&mut self) {
        self.set_mode(InputMode::Command);
    }

    pub fn to_help(&mut self) {
        self.set_mode(InputMode::Help);
    }

    pub fn to_history(&mut self) {
        self.mode = InputMode::History;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if let Some(prev) = prev_boundary(&self.buffer, self.cursor) {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = prev_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }
}

/// Byte index of the char before `cursor`
pub fn prev_boundary(text: &str, cursor: usize) -> Option<usize> {
    text[..cursor].char_indices().next_back().map(|(i, _)| i)
}
