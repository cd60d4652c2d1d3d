//! Append-only event log.

use std::sync::Mutex;

/// Ordered, append-only sequence of display messages.
///
/// The log is unbounded and insertion order is display order. Entries are
/// never removed or mutated; the only operations are [`append`] and a full
/// ordered dump via [`entries`]. Every appended message is also mirrored to
/// the diagnostic channel (`tracing`), which does not affect the log's own
/// state.
///
/// [`append`]: EventLog::append
/// [`entries`]: EventLog::entries
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Mutex<Vec<String>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the log
    ///
    /// No validation, no deduplication, no size cap.
    pub fn append(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "core_view::event_log", "{message}");

        self.lock().push(message);
    }

    /// Ordered dump of all entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries appended so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned lock only means a writer panicked mid-push; the log
        // itself is still a valid Vec.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
