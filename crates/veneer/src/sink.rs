//! Output channel
//!
//! Behaviors report through an opaque, ordered text channel: one message
//! per call, no format contract beyond that. The engine itself never
//! writes here; sinks are handed to caller-supplied behaviors.

use parking_lot::Mutex;

/// Ordered write-only text channel
pub trait Sink: Send + Sync {
    /// Write one message
    fn write(&self, message: &str);
}

/// Sink that prints each message to stdout
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write(&self, message: &str) {
        println!("{message}");
    }
}

/// Sink that drops every message
pub struct NullSink;

impl Sink for NullSink {
    fn write(&self, _message: &str) {}
}

/// Sink that captures messages in memory, for tests
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain and return the messages written so far
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Sink for MemorySink {
    fn write(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order() {
        let sink = MemorySink::new();
        sink.write("one");
        sink.write("two");
        assert_eq!(sink.lines(), ["one", "two"]);
        assert_eq!(sink.take(), ["one", "two"]);
        assert!(sink.lines().is_empty());
    }
}
