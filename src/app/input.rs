use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::keymap::{confirm_action, normal_mode_action, text_input_action, Action};
use crate::input::modes::InputMode;
use crate::screen::DialogMode;
use crate::ui::components::form::FieldKind;
use crate::ui::components::{HelpScreen, HistoryScreen, ScrollState};
use crate::ui::components::popup::popup_visible_height;

use super::App;

impl App {
    /// Returns true when the app should quit
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let action = match self.input_mode() {
            InputMode::Normal => self.resolve_normal_action(key),
            InputMode::Command => self.resolve_text_action(key),
            InputMode::Dialog => {
                self.handle_dialog_key(key);
                Action::None
            }
            InputMode::Confirm => confirm_action(key),
            InputMode::Help => self.help_key(key),
            InputMode::History => self.history_key(key),
        };
        self.execute_action(action)
    }

    fn resolve_normal_action(&mut self, key: KeyEvent) -> Action {
        let (action, pending) = normal_mode_action(key, self.mode_state.pending);
        self.mode_state.pending = pending;
        action
    }

    fn resolve_text_action(&mut self, key: KeyEvent) -> Action {
        match text_input_action(key) {
            Action::InsertChar(c) => self.mode_state.insert_char(c),
            Action::DeleteChar => self.mode_state.delete_char(),
            Action::CursorLeft => self.mode_state.cursor_left(),
            Action::CursorRight => self.mode_state.cursor_right(),
            Action::CursorHome => self.mode_state.cursor_home(),
            Action::CursorEnd => self.mode_state.cursor_end(),
            Action::ClearLine => self.mode_state.clear_buffer(),
            Action::Submit => {
                let buffer = self.mode_state.get_buffer().to_string();
                self.mode_state.to_normal();
                return Action::ExecuteCommand(buffer);
            }
            Action::Cancel => self.mode_state.to_normal(),
            other => return other,
        }
        Action::None
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.screen.close_dialog(),
            (KeyCode::Enter, KeyModifiers::NONE) => self.submit_dialog(),
            _ if self.screen.mode == DialogMode::View => self.handle_view_key(key),
            _ => self.dispatch_form_key(key.code, key.modifiers),
        }
    }

    /// Save for the current mode; ignored while a request is running
    fn submit_dialog(&mut self) {
        if self.loading.get() {
            return;
        }
        match self.screen.mode {
            DialogMode::New => {
                self.screen.submit_create();
            }
            DialogMode::Edit => {
                self.screen.submit_update(None);
            }
            DialogMode::View => self.screen.close_dialog(),
        }
    }

    fn handle_view_key(&mut self, key: KeyEvent) {
        let mode = self.screen.mode;
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) => self.screen.close_dialog(),
            (KeyCode::Char('y'), KeyModifiers::NONE) => self.copy_field(FieldKind::AppId),
            (KeyCode::Char('Y'), _) => self.copy_field(FieldKind::Secret),
            (KeyCode::Char('s'), _) => self.form.toggle_secret(),
            (KeyCode::Tab, _) | (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.form.next_field(mode, &self.screen.draft)
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.form.prev_field(mode, &self.screen.draft)
            }
            _ => {}
        }
    }

    fn dispatch_form_key(&mut self, code: KeyCode, mods: KeyModifiers) {
        let mode = self.screen.mode;
        let form = &mut self.form;
        let draft = &mut self.screen.draft;

        match (code, mods) {
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => form.next_field(mode, draft),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => form.prev_field(mode, draft),
            (KeyCode::Char(' '), _) if form.active_field(mode) == FieldKind::Status => form.toggle_status(mode, draft),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.insert_char(mode, draft, c),
            (KeyCode::Backspace, _) => form.delete_char(mode, draft),
            (KeyCode::Left, _) => form.cursor_left(mode, draft),
            (KeyCode::Right, _) => form.cursor_right(mode, draft),
            _ => {}
        }
    }

    fn help_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                self.mode_state.to_normal();
                return Action::None;
            }
            KeyCode::Char('i') => return Action::ShowHistory,
            _ => {}
        }

        let size = self.terminal_size;
        let max_v = HelpScreen::max_scroll(size);
        scroll_key(&mut self.help_state, key, popup_visible_height(size) as usize, max_v);
        Action::None
    }

    fn history_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('i') | KeyCode::Char('q') | KeyCode::Esc => {
                self.mode_state.to_normal();
                return Action::None;
            }
            KeyCode::Char('?') => return Action::ShowHelp,
            _ => {}
        }

        let size = self.terminal_size;
        let max_v = HistoryScreen::max_scroll(self.notifier.history_len(), size);
        scroll_key(&mut self.history_state, key, popup_visible_height(size) as usize, max_v);
        Action::None
    }
}

fn scroll_key(state: &mut ScrollState, key: KeyEvent, visible: usize, max_v: usize) {
    let was_pending = state.pending_g;
    state.pending_g = false;

    match (key.code, key.modifiers) {
        (KeyCode::Char('g'), KeyModifiers::NONE) if was_pending => state.home(),
        (KeyCode::Char('g'), KeyModifiers::NONE) => state.pending_g = true,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => state.scroll_down(1, max_v),
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => state.scroll_up(1),
        (KeyCode::Char('G'), _) => state.end(max_v),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => state.scroll_down(visible / 2, max_v),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => state.scroll_up(visible / 2),
        (KeyCode::PageDown, _) => state.scroll_down(visible.saturating_sub(1), max_v),
        (KeyCode::PageUp, _) => state.scroll_up(visible.saturating_sub(1)),
        _ => {}
    }
}
