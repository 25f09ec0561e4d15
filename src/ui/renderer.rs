//! Renderer
//!
//! Main rendering logic for the application.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, BorderType},
    Frame,
};

use super::components::{
    ConfirmDialog, DialogForm, DialogWidget, EmptyState, HelpBar, HelpScreen, HistoryScreen,
    ListViewState, MessageType, RecordTable, ScrollState, StatusLine,
};
use crate::api::AppRecord;
use crate::app::Notification;
use crate::input::InputMode;
use crate::screen::{DialogMode, Draft, FieldErrors, Translator};

/// Everything the open dialog needs to draw itself
pub struct DialogView<'a> {
    pub form: &'a DialogForm,
    pub mode: DialogMode,
    pub draft: &'a Draft,
    pub errors: &'a FieldErrors,
    pub docs_url: &'a str,
}

pub struct UiState<'a> {
    pub mode: InputMode,
    pub records: &'a [AppRecord],
    pub list_state: &'a mut ListViewState,
    pub translator: &'a dyn Translator,
    pub dialog: Option<DialogView<'a>>,
    /// App ID awaiting delete confirmation
    pub confirm_target: Option<&'a str>,
    pub command_buffer: Option<&'a str>,
    pub message: Option<(&'a str, MessageType)>,
    pub busy: bool,
    pub endpoint: &'a str,
    pub help_state: &'a ScrollState,
    pub history_state: &'a ScrollState,
    pub history: &'a [Notification],
}

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        render_table(frame, chunks[0], state);
        render_status_line(frame, chunks[1], state);
        frame.render_widget(HelpBar::for_mode(state.mode), chunks[2]);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode).endpoint(state.endpoint).busy(state.busy);

    if let Some(buffer) = state.command_buffer {
        status = status.command_buffer(buffer);
    } else if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }

    if let Some(selected) = state.list_state.selected() {
        status = status.item_count(selected, state.list_state.total);
    }

    frame.render_widget(status, area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let t = state.translator;
    let block = records_block(&t.translate("leftbar.applications"), state.busy);

    if state.records.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let message = t.translate("app.empty");
        let hint = t.translate("app.emptyHint");
        frame.render_widget(EmptyState::new(&message).hint(&hint), inner);
        return;
    }

    let table = RecordTable::new(state.records, t).block(block);
    frame.render_stateful_widget(table, area, state.list_state);
}

fn records_block(title: &str, busy: bool) -> Block<'static> {
    let title = if busy { format!(" {} ⟳ ", title) } else { format!(" {} ", title) };
    Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if busy { Color::Yellow } else { Color::Magenta }))
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    if let Some(dialog) = &state.dialog {
        let widget = DialogWidget::new(dialog.form, dialog.mode, dialog.draft, dialog.errors, state.translator)
            .docs_url(dialog.docs_url)
            .busy(state.busy);
        frame.render_widget(widget, area);
    }

    if let Some(target) = state.confirm_target {
        let message = state.translator.translate("oper.confirmDelete");
        let title = format!(" {} ", state.translator.translate("oper.delete"));
        frame.render_widget(ConfirmDialog::new(&title, &message).subject(target), area);
    }

    match state.mode {
        InputMode::Help => frame.render_widget(HelpScreen::new(state.help_state), area),
        InputMode::History => frame.render_widget(HistoryScreen::new(state.history, state.history_state), area),
        _ => {}
    }
}
