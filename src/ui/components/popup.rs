//! Popup Components
//!
//! Confirmation dialog, help page, and notification history.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Widget, Wrap},
};

use crate::app::Notification;

/// Centered rectangle helper
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed size centered rectangle
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn popup_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black))
}

/// Confirmation dialog
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    subject: Option<&'a str>,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self { title, message, subject: None }
    }

    /// Record the confirmation is about
    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = Some(subject);
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(50, 7, area);
        Clear.render(popup_area, buf);

        let block = popup_block(self.title, Color::Yellow);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![Line::from(self.message)];
        if let Some(subject) = self.subject {
            lines.push(Line::from(Span::styled(subject, Style::default().fg(Color::Cyan))));
        }
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, inner.y, inner.width, 2), buf);

        let hint = Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes  "),
            Span::styled("[n]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]);
        buf.set_line(inner.x, inner.y + 3, &hint, inner.width);
    }
}

/// Vertical scroll position shared by the scrollable popups
#[derive(Debug, Default)]
pub struct ScrollState {
    pub scroll: usize,
    pub pending_g: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize, max_scroll: usize) {
        self.scroll = (self.scroll + amount).min(max_scroll);
    }

    pub fn home(&mut self) {
        self.scroll = 0;
        self.pending_g = false;
    }

    pub fn end(&mut self, max_scroll: usize) {
        self.scroll = max_scroll;
    }
}

/// Rows of a popup's content area, given the full frame
pub fn popup_visible_height(area: Rect) -> u16 {
    centered_rect(70, 70, area).height.saturating_sub(2)
}

/// Help screen widget
pub struct HelpScreen<'a> {
    state: &'a ScrollState,
}

impl<'a> HelpScreen<'a> {
    pub fn new(state: &'a ScrollState) -> Self {
        Self { state }
    }

    pub fn content_height() -> usize {
        build_help_lines(&help_sections()).len()
    }

    pub fn max_scroll(area: Rect) -> usize {
        Self::content_height().saturating_sub(popup_visible_height(area) as usize)
    }
}

impl Widget for HelpScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(70, 70, area);
        Clear.render(popup, buf);

        let block = popup_block(" Help Page ", Color::Magenta)
            .title_bottom(Line::from(" j/k scroll • q close ").centered());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let sections = help_sections();
        let lines = build_help_lines(&sections);
        let scroll = self.state.scroll;

        for (i, line) in lines.iter().enumerate().skip(scroll) {
            let y = inner.y + (i - scroll) as u16;
            if y >= inner.y + inner.height {
                break;
            }
            render_help_line(inner.x, y, inner.width, line, buf);
        }
    }
}

enum HelpLine<'a> {
    Header(&'a str),
    Binding(&'a str, &'a str),
    Empty,
}

type HelpSection = (&'static str, Vec<(&'static str, &'static str)>);

fn build_help_lines<'a>(sections: &'a [HelpSection]) -> Vec<HelpLine<'a>> {
    let mut lines = Vec::new();

    for (i, (header, bindings)) in sections.iter().enumerate() {
        lines.push(HelpLine::Header(header));
        for (key, desc) in bindings {
            lines.push(HelpLine::Binding(key, desc));
        }
        if i < sections.len() - 1 {
            lines.push(HelpLine::Empty);
        }
    }

    lines
}

fn render_help_line(x: u16, y: u16, width: u16, line: &HelpLine, buf: &mut Buffer) {
    match line {
        HelpLine::Header(title) => {
            buf.set_string(x, y, *title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        }
        HelpLine::Binding(key, desc) => {
            buf.set_string(x + 2, y, *key, Style::default().fg(Color::Cyan));
            let desc_width = width.saturating_sub(16) as usize;
            let truncated: String = desc.chars().take(desc_width).collect();
            buf.set_string(x + 16, y, &truncated, Style::default().fg(Color::Gray));
        }
        HelpLine::Empty => {}
    }
}

fn help_sections() -> Vec<HelpSection> {
    vec![
        (
            "Navigation",
            vec![
                ("j / ↓", "Move down"),
                ("k / ↑", "Move up"),
                ("gg", "Go to top"),
                ("G", "Go to bottom"),
                ("PgDn / PgUp", "Page down / up"),
            ],
        ),
        (
            "Applications",
            vec![
                ("n", "New application"),
                ("Enter / v", "View application"),
                ("e", "Edit application"),
                ("Space / t", "Enable or disable"),
                ("dd / x", "Delete application"),
                ("r / Ctrl-r", "Refresh list"),
            ],
        ),
        (
            "Dialog",
            vec![
                ("Tab / ↓", "Next field"),
                ("S-Tab / ↑", "Previous field"),
                ("Space", "Toggle status field"),
                ("Enter", "Save"),
                ("Esc", "Close"),
                ("y", "Copy AppID (view)"),
                ("Y", "Copy AppSecret (view)"),
                ("s", "Show AppSecret (view)"),
            ],
        ),
        (
            "Commands",
            vec![
                (":new", "New application"),
                (":edit", "Edit selected"),
                (":view", "View selected"),
                (":toggle", "Toggle selected"),
                (":delete", "Delete selected"),
                (":refresh", "Reload list"),
                (":log", "Notification history"),
                (":clear", "Clear message"),
                (":q", "Quit"),
            ],
        ),
        (
            "Other",
            vec![
                ("?", "Show this help"),
                ("i", "Notification history"),
                ("Ctrl-l", "Clear message"),
                ("q", "Quit"),
            ],
        ),
    ]
}

/// Notification history widget, newest first
pub struct HistoryScreen<'a> {
    entries: &'a [Notification],
    state: &'a ScrollState,
}

impl<'a> HistoryScreen<'a> {
    pub fn new(entries: &'a [Notification], state: &'a ScrollState) -> Self {
        Self { entries, state }
    }

    pub fn max_scroll(len: usize, area: Rect) -> usize {
        // header and separator take two rows
        len.saturating_sub(popup_visible_height(area).saturating_sub(2) as usize)
    }
}

impl Widget for HistoryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(70, 70, area);
        Clear.render(popup, buf);

        let block = popup_block(" Notifications ", Color::Magenta)
            .title_bottom(Line::from(" j/k scroll • q close ").centered());
        let inner = block.inner(popup);
        block.render(popup, buf);

        if self.entries.is_empty() {
            Paragraph::new("No notifications yet")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let header_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        buf.set_string(inner.x, inner.y, format!("{:<19}  {:<6}  {}", "TIME", "KIND", "MESSAGE"), header_style);
        let sep: String = "─".repeat(inner.width as usize);
        buf.set_string(inner.x, inner.y + 1, &sep, Style::default().fg(Color::DarkGray));

        let visible_height = inner.height.saturating_sub(2) as usize;
        let rows = self.entries.iter().rev().skip(self.state.scroll).take(visible_height);

        for (row, entry) in rows.enumerate() {
            let y = inner.y + 2 + row as u16;
            let line = Line::from(vec![
                Span::styled(entry.at.format("%Y-%m-%d %H:%M:%S").to_string(), Style::default().fg(Color::Gray)),
                Span::raw("  "),
                Span::styled(format!("{:<6}", entry.kind.label()), Style::default().fg(entry.kind.color())),
                Span::raw("  "),
                Span::styled(entry.text.as_str(), Style::default().fg(Color::White)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
