//! In-memory output sink

use crate::output::{Level, OutputSink};

/// Sink that records every line
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<(Level, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines with their level
    pub fn lines(&self) -> &[(Level, String)] {
        &self.lines
    }

    /// Recorded messages without level
    pub fn messages(&self) -> Vec<&str> {
        self.lines.iter().map(|(_, message)| message.as_str()).collect()
    }

    /// Returns true if any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, message)| message.contains(needle))
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, level: Level, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut sink = MemorySink::new();
        sink.info("Updating left-pad to version 2.0.0...");
        sink.success("✔ Updated version in package.json");

        assert_eq!(
            sink.messages(),
            vec![
                "Updating left-pad to version 2.0.0...",
                "✔ Updated version in package.json"
            ]
        );
        assert!(sink.contains("Updated version"));
        assert!(!sink.contains("Removed entry"));
    }
}
