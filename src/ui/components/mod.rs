//! UI Components
//!
//! Reusable TUI widgets for the applications console.

pub mod form;
pub mod popup;
pub mod statusline;
pub mod table;

// Re-exports
pub use form::{DialogForm, DialogWidget};
pub use popup::{ConfirmDialog, HelpScreen, HistoryScreen, ScrollState};
pub use statusline::{HelpBar, MessageType, StatusLine};
pub use table::{EmptyState, ListViewState, RecordTable};
