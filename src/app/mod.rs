//! Application State
//!
//! Terminal shell tying together the applications screen, UI, and input.

mod actions;
mod clipboard;
mod config;
mod input;
mod notifications;

use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::api::{AppRecord, HttpClient};
use crate::i18n::Catalog;
use crate::input::modes::ModeState;
use crate::input::InputMode;
use crate::screen::{ApplicationsScreen, LoadingFlag};
use crate::ui::components::{DialogForm, ListViewState, MessageType, ScrollState};
use crate::ui::renderer::{DialogView, Renderer, UiState};

use clipboard::Clipboard;

pub use config::AppConfig;
pub use notifications::{Notification, StatusNotifier};

pub struct App {
    pub config: AppConfig,
    pub screen: ApplicationsScreen,
    pub notifier: Rc<StatusNotifier>,
    pub loading: LoadingFlag,
    clipboard: Clipboard,
    pub mode_state: ModeState,
    pub terminal_size: Rect,
    pub list_state: ListViewState,
    pub form: DialogForm,
    pub help_state: ScrollState,
    pub history_state: ScrollState,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, client: Arc<dyn HttpClient>) -> Self {
        let notifier = Rc::new(StatusNotifier::new());
        let catalog = Rc::new(Catalog::new(config.language));
        let loading = LoadingFlag::new();
        let screen = ApplicationsScreen::new(client, notifier.clone(), catalog, loading.clone());

        Self {
            clipboard: Clipboard::new(config.clipboard_timeout()),
            config,
            screen,
            notifier,
            loading,
            mode_state: ModeState::new(),
            terminal_size: Rect::default(),
            list_state: ListViewState::new(),
            form: DialogForm::new(),
            help_state: ScrollState::new(),
            history_state: ScrollState::new(),
            should_quit: false,
        }
    }

    /// Effective input mode; the dialog and the delete confirmation follow
    /// the screen's visibility flags
    pub fn input_mode(&self) -> InputMode {
        if self.screen.delete_confirm_visible {
            InputMode::Confirm
        } else if self.screen.dialog_visible {
            InputMode::Dialog
        } else {
            self.mode_state.mode
        }
    }

    /// Apply finished requests and due timers
    pub fn update(&mut self, now: Instant) {
        self.screen.poll();
        self.screen.tick(now);

        if self.list_state.total != self.screen.records.len() {
            self.list_state.set_total(self.screen.records.len());
        }
        if self.screen.dialog_visible {
            self.form.sync(self.screen.mode, &self.screen.draft, self.screen.draft_revision());
        }
    }

    pub fn selected_record(&self) -> Option<&AppRecord> {
        self.list_state.selected().and_then(|i| self.screen.records.get(i))
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.terminal_size = frame.area();

        let mode = self.input_mode();
        let message = self.notifier.current(self.config.message_timeout());
        let history = self.notifier.history();
        let command_buffer = mode.is_text_input().then(|| self.mode_state.get_buffer());
        let docs_url = self.config.language.docs_url();
        let endpoint = self.config.api_url.as_str();

        let dialog = self.screen.dialog_visible.then(|| DialogView {
            form: &self.form,
            mode: self.screen.mode,
            draft: &self.screen.draft,
            errors: &self.screen.field_errors,
            docs_url,
        });
        let confirm_target = self
            .screen
            .delete_confirm_visible
            .then(|| self.screen.delete_target.as_deref().unwrap_or_default());

        let mut state = UiState {
            mode,
            records: &self.screen.records,
            list_state: &mut self.list_state,
            translator: self.screen.translator(),
            dialog,
            confirm_target,
            command_buffer,
            message: message.as_ref().map(|(m, t)| (m.as_str(), *t)),
            busy: self.screen.is_loading(),
            endpoint,
            help_state: &self.help_state,
            history_state: &self.history_state,
            history: &history,
        };

        Renderer::render(frame, &mut state);
    }

    pub fn set_message(&self, msg: &str, msg_type: MessageType) {
        self.notifier.push(msg, msg_type);
    }

    fn translate(&self, key: &str) -> String {
        self.screen.translator().translate(key)
    }
}

#[cfg(test)]
mod tests;
