//! Clipboard
//!
//! Copies text and clears it after a timeout, unless something newer was
//! copied in the meantime.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use zeroize::Zeroizing;

#[derive(Debug, Clone)]
pub struct Clipboard {
    timeout: Duration,
    generation: Arc<AtomicU64>,
}

impl Clipboard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Copy in the background. Returns the copy id.
    pub fn copy_with_timeout(&self, text: String) -> u64 {
        let copy_id = self.next_copy_id();
        let generation = Arc::clone(&self.generation);
        let timeout = self.timeout;
        let text = Zeroizing::new(text);

        std::thread::spawn(move || copy_thread(text, timeout, copy_id, &generation));
        copy_id
    }

    fn next_copy_id(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn is_latest(generation: &AtomicU64, copy_id: u64) -> bool {
    generation.load(Ordering::SeqCst) == copy_id
}

fn copy_thread(text: Zeroizing<String>, timeout: Duration, copy_id: u64, generation: &AtomicU64) {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            return;
        }
    };

    if let Err(e) = clipboard.set_text(text.as_str()) {
        tracing::warn!(error = %e, "failed to set clipboard");
        return;
    }
    drop(text);

    std::thread::sleep(timeout);

    if !is_latest(generation, copy_id) {
        return;
    }
    if let Err(e) = clipboard.clear() {
        tracing::debug!(error = %e, "failed to clear clipboard");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_copy_clears() {
        let clipboard = Clipboard::new(Duration::from_secs(15));
        let first = clipboard.next_copy_id();
        let second = clipboard.next_copy_id();

        assert!(!is_latest(&clipboard.generation, first));
        assert!(is_latest(&clipboard.generation, second));
    }
}
