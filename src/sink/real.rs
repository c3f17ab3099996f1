//! Production sink writing to stdout and stderr

use super::Sink;
use std::io::Write as _;

/// Production implementation of the Sink trait
///
/// Delegates to the process's stdout and stderr. Write failures are
/// ignored, matching the usual behavior of diagnostic printing on a
/// closed pipe.
#[derive(Debug, Clone, Copy)]
pub struct StdSink;

impl StdSink {
    /// Create a new `StdSink` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for StdSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdSink {
    fn out(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn err(&self, text: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(text.as_bytes());
        let _ = stderr.flush();
    }
}
