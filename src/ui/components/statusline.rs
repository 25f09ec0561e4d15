//! Status Line Component
//!
//! Displays mode indicator, notifications, and connection info.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::InputMode;

/// Message type for status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// Status line widget
pub struct StatusLine<'a> {
    mode: InputMode,
    command_buffer: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    endpoint: Option<&'a str>,
    item_count: Option<(usize, usize)>,
    busy: bool,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            command_buffer: None,
            message: None,
            endpoint: None,
            item_count: None,
            busy: false,
        }
    }

    pub fn command_buffer(mut self, buffer: &'a str) -> Self {
        self.command_buffer = Some(buffer);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn endpoint(mut self, endpoint: &'a str) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn item_count(mut self, selected: usize, total: usize) -> Self {
        self.item_count = Some((selected, total));
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => Color::Blue,
        InputMode::Command => Color::Red,
        InputMode::Dialog => Color::Green,
        InputMode::Confirm => Color::Red,
        InputMode::Help => Color::Yellow,
        InputMode::History => Color::Cyan,
    };
    Style::default().fg(Color::Black).bg(bg)
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mut x = area.x;

        let mode_text = format!(" {} ", self.mode.indicator());
        buf.set_string(x, area.y, &mode_text, mode_style(self.mode).add_modifier(Modifier::BOLD));
        x += mode_text.len() as u16 + 1;

        if let Some(buffer) = self.command_buffer {
            let cmd_text = format!(":{}", buffer);
            buf.set_string(x, area.y, &cmd_text, Style::default().fg(Color::White).bg(Color::DarkGray));
        } else if let Some((msg, msg_type)) = self.message {
            buf.set_string(x, area.y, msg, Style::default().fg(msg_type.color()).bg(Color::DarkGray));
        }

        let mut right_parts: Vec<String> = Vec::new();
        if self.busy {
            right_parts.push("⟳".to_string());
        }
        if let Some((selected, total)) = self.item_count {
            right_parts.push(format!("{}/{}", selected + 1, total));
        }
        if let Some(endpoint) = self.endpoint {
            right_parts.push(endpoint.to_string());
        }

        let right_line = Line::from(right_parts.join(" "));
        let right_x = area.x + area.width.saturating_sub(right_line.width() as u16 + 1);
        buf.set_line(right_x, area.y, &right_line.style(Style::default().fg(Color::Gray)), area.width);
    }
}

/// Help bar widget
pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl<'a> HelpBar<'a> {
    pub fn for_mode(mode: InputMode) -> Self {
        let hints = match mode {
            InputMode::Normal => vec![
                ("j/k", "navigate"),
                ("n", "new"),
                ("Enter", "view"),
                ("e", "edit"),
                ("Space", "toggle"),
                ("dd", "delete"),
                ("r", "refresh"),
                (":", "command"),
                ("?", "help"),
            ],
            InputMode::Command => vec![("Esc", "cancel"), ("Enter", "execute")],
            InputMode::Dialog => vec![("Tab", "next"), ("Enter", "save"), ("Esc", "close")],
            InputMode::Confirm => vec![("y", "yes"), ("n", "no")],
            InputMode::Help | InputMode::History => vec![("q", "close"), ("j/k", "scroll")],
        };
        Self { hints }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
