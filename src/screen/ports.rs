//! Screen Ports
//!
//! Capabilities the screen is handed at construction instead of reaching for globals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Localization lookup. Unknown keys come back unchanged.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Transient user-facing notifications
pub trait Notifier {
    fn success(&self, text: &str);
    fn error(&self, text: &str);
}

/// Process-wide busy flag.
///
/// Raised when a request starts and lowered when one finishes, by whichever
/// request touched it last. Readers only use it to gate affordances.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_flag_shared_between_clones() {
        let flag = LoadingFlag::new();
        let other = flag.clone();
        assert!(!flag.get());

        other.set(true);
        assert!(flag.get());

        flag.set(false);
        assert!(!other.get());
    }
}
