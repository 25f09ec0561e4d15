//! Records Table Component
//!
//! Displays application records in a scrollable table.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::api::AppRecord;
use crate::screen::Translator;
use crate::screen::expiry::format_expiry_for_display;

#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub selected: Option<usize>,
    pub total: usize,
    table_state: TableState,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        self.table_state.select(index);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.select(compute_selection_after_total_change(self.selected, total));
    }

    pub fn move_up(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(1);
        self.select(Some(new_index));
    }

    pub fn move_down(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + 1).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn move_to_top(&mut self) {
        if self.total > 0 {
            self.select(Some(0));
        }
    }

    pub fn move_to_bottom(&mut self) {
        if self.total > 0 {
            self.select(Some(self.total - 1));
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(page_size);
        self.select(Some(new_index));
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + page_size).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }
}

fn compute_selection_after_total_change(selected: Option<usize>, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    match selected {
        Some(sel) if sel >= total => Some(total - 1),
        Some(sel) => Some(sel),
        None => Some(0),
    }
}

/// Table of application records
pub struct RecordTable<'a> {
    records: &'a [AppRecord],
    translator: &'a dyn Translator,
    block: Option<Block<'a>>,
}

impl<'a> RecordTable<'a> {
    pub fn new(records: &'a [AppRecord], translator: &'a dyn Translator) -> Self {
        Self { records, translator, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

fn status_cell(status: bool, translator: &dyn Translator) -> Cell<'static> {
    let (marker, key, color) = if status {
        ("●", "app.enable", Color::Green)
    } else {
        ("○", "app.disable", Color::DarkGray)
    };
    Cell::from(Line::from(vec![
        Span::styled(format!("{} ", marker), Style::default().fg(color)),
        Span::styled(translator.translate(key), Style::default().fg(color)),
    ]))
}

fn build_row<'a>(record: &'a AppRecord, translator: &dyn Translator) -> Row<'a> {
    Row::new(vec![
        Cell::from(record.app_id.as_str()).style(Style::default().fg(Color::Cyan)),
        Cell::from(record.name.as_str()),
        Cell::from(format_expiry_for_display(&record.expired, translator)),
        Cell::from(record.desc.as_str()).style(Style::default().fg(Color::Gray)),
        status_cell(record.status, translator),
    ])
}

fn header_row(translator: &dyn Translator) -> Row<'static> {
    let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    Row::new(
        ["app.appId", "app.name", "app.expired", "app.desc", "app.status"]
            .into_iter()
            .map(|key| Cell::from(translator.translate(key))),
    )
    .style(style)
    .bottom_margin(1)
}

impl<'a> StatefulWidget for RecordTable<'a> {
    type State = ListViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let rows: Vec<Row> = self.records.iter().map(|r| build_row(r, self.translator)).collect();

        let widths = [
            Constraint::Length(18),
            Constraint::Percentage(20),
            Constraint::Length(20),
            Constraint::Fill(1),
            Constraint::Length(12),
        ];

        let mut table = Table::new(rows, widths)
            .header(header_row(self.translator))
            .column_spacing(2)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▌");

        if let Some(block) = self.block {
            table = table.block(block);
        }

        StatefulWidget::render(table, area, buf, state.table_state_mut());
    }
}

pub struct EmptyState<'a> {
    message: &'a str,
    hint: Option<&'a str>,
}

impl<'a> EmptyState<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message, hint: None }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let center_y = area.y + area.height / 2;
        let message = Line::from(self.message).style(Style::default().fg(Color::DarkGray)).centered();
        buf.set_line(area.x, center_y, &message, area.width);

        let Some(hint) = self.hint else { return };
        let hint = Line::from(hint)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .centered();
        buf.set_line(area.x, center_y + 1, &hint, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language};

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListViewState::new();
        state.set_total(5);

        assert_eq!(state.selected(), Some(0));

        state.move_down();
        assert_eq!(state.selected(), Some(1));

        state.move_up();
        assert_eq!(state.selected(), Some(0));

        state.move_to_bottom();
        assert_eq!(state.selected(), Some(4));

        state.page_up(2);
        assert_eq!(state.selected(), Some(2));

        state.move_to_top();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_list_state_empty() {
        let mut state = ListViewState::new();
        state.set_total(0);

        state.move_down();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut state = ListViewState::new();
        state.set_total(3);
        state.move_to_bottom();
        state.set_total(1);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_table_renders_records() {
        let catalog = Catalog::new(Language::En);
        let records = vec![AppRecord {
            app_id: "a1b2".into(),
            name: "billing".into(),
            status: false,
            ..Default::default()
        }];
        let area = Rect::new(0, 0, 100, 5);
        let mut buf = Buffer::empty(area);
        let mut state = ListViewState::new();
        state.set_total(records.len());

        RecordTable::new(&records, &catalog).render(area, &mut buf, &mut state);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("AppID"));
        assert!(text.contains("billing"));
        assert!(text.contains("Never Expire"));
        assert!(text.contains("Denied"));
    }
}
