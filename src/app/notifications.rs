//! Notifications
//!
//! Status line messages and the session history behind `:log`.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::screen::Notifier;
use crate::ui::components::MessageType;

const HISTORY_LIMIT: usize = 500;

#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub kind: MessageType,
    pub at: DateTime<Local>,
}

/// Notifier backing the status line.
///
/// Shared between the screen and the shell on the UI thread.
#[derive(Debug, Default)]
pub struct StatusNotifier {
    current: RefCell<Option<(Notification, Instant)>>,
    history: RefCell<Vec<Notification>>,
}

impl StatusNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, text: &str, kind: MessageType) {
        let notification = Notification {
            text: text.to_string(),
            kind,
            at: Local::now(),
        };

        let mut history = self.history.borrow_mut();
        history.push(notification.clone());
        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }

        *self.current.borrow_mut() = Some((notification, Instant::now()));
    }

    pub fn clear(&self) {
        *self.current.borrow_mut() = None;
    }

    /// Message still within its display window
    pub fn current(&self, timeout: Duration) -> Option<(String, MessageType)> {
        let mut current = self.current.borrow_mut();
        if current.as_ref().is_some_and(|(_, shown)| shown.elapsed() > timeout) {
            *current = None;
        }
        current.as_ref().map(|(n, _)| (n.text.clone(), n.kind))
    }

    /// Oldest first
    pub fn history(&self) -> Vec<Notification> {
        self.history.borrow().clone()
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }
}

impl Notifier for StatusNotifier {
    fn success(&self, text: &str) {
        self.push(text, MessageType::Success);
    }

    fn error(&self, text: &str) {
        self.push(text, MessageType::Error);
    }
}
