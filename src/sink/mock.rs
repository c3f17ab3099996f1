//! In-memory sink implementation for testing

use super::Sink;
use std::sync::{Arc, Mutex};

/// In-memory implementation of the Sink trait for testing
///
/// `MemorySink` captures both streams in shared buffers, so a test can keep
/// a clone and inspect everything the dispatcher wrote.
///
/// # Example
/// ```
/// use subcmd::sink::{MemorySink, Sink};
///
/// let sink = MemorySink::new();
/// sink.err_line("FATAL: bad input");
/// assert!(sink.err_text().contains("bad input"));
/// assert!(sink.out_text().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<SinkState>>,
}

#[derive(Default)]
struct SinkState {
    out: String,
    err: String,
}

impl MemorySink {
    /// Create a new `MemorySink` with empty buffers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the normal output stream so far
    #[must_use]
    pub fn out_text(&self) -> String {
        self.state.lock().map_or_else(|_| String::new(), |s| s.out.clone())
    }

    /// Everything written to the error/usage stream so far
    #[must_use]
    pub fn err_text(&self) -> String {
        self.state.lock().map_or_else(|_| String::new(), |s| s.err.clone())
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.out.clear();
            state.err.clear();
        }
    }
}

impl Sink for MemorySink {
    fn out(&self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.out.push_str(text);
        }
    }

    fn err(&self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.err.push_str(text);
        }
    }
}
