use crate::api::AppRecord;
use crate::input::keymap::{parse_command, Action};
use crate::ui::components::form::FieldKind;
use crate::ui::components::{ListViewState, MessageType};

use super::App;

const NO_SELECTION: &str = "No application selected";

impl App {
    /// Returns true when the app should quit
    pub fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.list_state.move_up(),
            Action::MoveDown => self.list_state.move_down(),
            Action::MoveToTop => self.list_state.move_to_top(),
            Action::MoveToBottom => self.list_state.move_to_bottom(),
            Action::PageUp => self.page_move(|ls, h| ls.page_up(h)),
            Action::PageDown => self.page_move(|ls, h| ls.page_down(h)),

            Action::New => self.new_record(),
            Action::Edit => self.edit_selected(),
            Action::View => self.view_selected(),
            Action::ToggleStatus => self.toggle_selected(),
            Action::Delete => self.delete_selected(),
            Action::Refresh => self.screen.load_records(),

            Action::EnterCommand => self.mode_state.to_command(),
            Action::ShowHelp => self.show_help(),
            Action::ShowHistory => self.show_history(),

            Action::ExecuteCommand(cmd) => return self.execute_action(parse_command(&cmd)),

            Action::Confirm => self.screen.confirm_delete(),
            Action::Cancel => self.cancel(),

            Action::Clear => self.notifier.clear(),
            Action::Quit => return self.quit(),
            Action::Invalid(cmd) => self.set_message(&format!("Unknown command: {}", cmd), MessageType::Error),

            _ => {}
        }

        false
    }

    fn page_move(&mut self, f: impl FnOnce(&mut ListViewState, usize)) {
        let visible = self.list_visible_height();
        f(&mut self.list_state, visible.saturating_sub(1));
    }

    pub fn list_visible_height(&self) -> usize {
        // borders, header, status line and help bar
        (self.terminal_size.height as usize).saturating_sub(6)
    }

    fn new_record(&mut self) {
        self.mode_state.to_normal();
        self.screen.open_create_dialog();
    }

    fn edit_selected(&mut self) {
        let Some(record) = self.require_selection() else { return };
        self.mode_state.to_normal();
        self.screen.open_edit_dialog(&record);
    }

    fn view_selected(&mut self) {
        let Some(record) = self.require_selection() else { return };
        self.mode_state.to_normal();
        self.screen.open_view_dialog(&record.app_id);
    }

    fn toggle_selected(&mut self) {
        match self.list_state.selected().filter(|i| *i < self.screen.records.len()) {
            Some(index) => self.screen.toggle_status(index),
            None => self.set_message(NO_SELECTION, MessageType::Warning),
        }
    }

    fn delete_selected(&mut self) {
        let Some(record) = self.require_selection() else { return };
        self.mode_state.to_normal();
        self.screen.request_delete(&record.app_id);
    }

    fn require_selection(&self) -> Option<AppRecord> {
        let record = self.selected_record().cloned();
        if record.is_none() {
            self.set_message(NO_SELECTION, MessageType::Warning);
        }
        record
    }

    fn show_help(&mut self) {
        self.help_state.home();
        self.mode_state.to_help();
    }

    fn show_history(&mut self) {
        self.history_state.home();
        self.mode_state.to_history();
    }

    fn cancel(&mut self) {
        if self.screen.delete_confirm_visible {
            self.screen.cancel_delete();
        } else {
            self.mode_state.to_normal();
        }
    }

    fn quit(&mut self) -> bool {
        self.should_quit = true;
        true
    }

    /// Copy a field of the record shown in the view dialog
    pub(super) fn copy_field(&mut self, field: FieldKind) {
        let text = match field {
            FieldKind::AppId => self.screen.draft.app_id.clone(),
            FieldKind::Secret => self.screen.draft.secret.clone(),
            _ => return,
        };
        if text.is_empty() {
            return;
        }

        self.clipboard.copy_with_timeout(text);
        let msg = format!(
            "{}: {} ({}s)",
            self.translate("oper.copied"),
            self.translate(field.label_key()),
            self.config.clipboard_timeout_secs
        );
        self.set_message(&msg, MessageType::Info);
    }
}
