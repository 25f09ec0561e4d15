//! Keymap
//!
//! Vim-style key bindings mapped to actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // Records
    New,
    Edit,
    View,
    ToggleStatus,
    Delete,
    Refresh,

    // Mode changes
    EnterCommand,
    ShowHelp,
    ShowHistory,

    // Commands
    ExecuteCommand(String),

    // Confirmation
    Confirm,
    Cancel,

    // Application
    Clear,
    Quit,
    Invalid(String),

    // Text input
    InsertChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,
    Submit,

    None,
}

/// Map key event to action in normal mode
pub fn normal_mode_action(key: KeyEvent, pending: Option<char>) -> (Action, Option<char>) {
    match (key.code, key.modifiers, pending) {
        (KeyCode::Char('j') | KeyCode::Down, _, _) => (Action::MoveDown, None),
        (KeyCode::Char('k') | KeyCode::Up, _, _) => (Action::MoveUp, None),
        (KeyCode::Char('g'), _, None) => (Action::None, Some('g')),
        (KeyCode::Char('g'), _, Some('g')) => (Action::MoveToTop, None),
        (KeyCode::Char('G'), _, _) => (Action::MoveToBottom, None),
        (KeyCode::PageDown, _, _) => (Action::PageDown, None),
        (KeyCode::PageUp, _, _) => (Action::PageUp, None),

        (KeyCode::Char('l'), KeyModifiers::CONTROL, _) => (Action::Clear, None),
        (KeyCode::Char('r'), KeyModifiers::CONTROL, _) => (Action::Refresh, None),

        (KeyCode::Char('n'), _, _) => (Action::New, None),
        (KeyCode::Char('e'), _, _) => (Action::Edit, None),
        (KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('l'), _, _) => (Action::View, None),
        (KeyCode::Char(' ') | KeyCode::Char('t'), _, _) => (Action::ToggleStatus, None),
        (KeyCode::Char('d'), _, None) => (Action::None, Some('d')),
        (KeyCode::Char('d'), _, Some('d')) => (Action::Delete, None),
        (KeyCode::Char('x'), _, _) => (Action::Delete, None),
        (KeyCode::Char('r'), _, _) => (Action::Refresh, None),

        (KeyCode::Char(':'), _, _) => (Action::EnterCommand, None),
        (KeyCode::Char('?'), _, _) => (Action::ShowHelp, None),
        (KeyCode::Char('i'), _, _) => (Action::ShowHistory, None),

        (KeyCode::Char('q'), _, _) => (Action::Quit, None),

        _ => (Action::None, None),
    }
}

/// Map key event to action on the command line
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearLine,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map key event to action in the delete confirmation
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Parse command string into action
pub fn parse_command(cmd: &str) -> Action {
    match cmd.trim() {
        "" => Action::None,
        "cls" | "clear" => Action::Clear,
        "q" | "quit" => Action::Quit,
        "new" | "n" => Action::New,
        "edit" | "e" => Action::Edit,
        "view" | "v" => Action::View,
        "toggle" => Action::ToggleStatus,
        "delete" | "del" => Action::Delete,
        "refresh" | "r" => Action::Refresh,
        "log" | "history" => Action::ShowHistory,
        "help" | "h" => Action::ShowHelp,
        other => Action::Invalid(other.to_string()),
    }
}
