//! User-facing console output
//!
//! This module provides:
//! - The [`OutputSink`] seam the orchestrator reports through
//! - A colored terminal sink honouring silent mode
//! - An in-memory sink for tests and embedding

mod memory;
mod terminal;

pub use memory::MemorySink;
pub use terminal::TerminalSink;

/// Severity of a user-facing line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information
    Info,
    /// A completed step
    Success,
    /// Something was skipped or missing
    Warning,
    /// A failure
    Error,
}

/// Destination for user-facing messages
pub trait OutputSink {
    /// Emit one line
    fn emit(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Emit an empty separator line
    fn blank(&mut self) {
        self.emit(Level::Info, "");
    }
}
