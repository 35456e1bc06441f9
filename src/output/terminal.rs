//! Colored terminal output

use crate::output::{Level, OutputSink};
use colored::Colorize;
use std::io::Write;

/// Sink writing to stdout, and errors to stderr
#[derive(Debug, Clone)]
pub struct TerminalSink {
    /// Suppress everything except errors
    silent: bool,
    /// Whether to use colors
    color: bool,
    /// Prefix lines with a dry-run marker
    dry_run: bool,
}

impl TerminalSink {
    /// Create a new terminal sink
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            color: true,
            dry_run: false,
        }
    }

    /// Set whether to use colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Set dry-run marking
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Render one line as it is printed
    fn format_line(&self, level: Level, message: &str) -> String {
        if message.is_empty() {
            return String::new();
        }

        let body = if self.color {
            match level {
                Level::Info => message.normal().to_string(),
                Level::Success => message.green().to_string(),
                Level::Warning => message.yellow().to_string(),
                Level::Error => message.red().to_string(),
            }
        } else {
            message.to_string()
        };

        match level {
            Level::Error => body,
            _ => format!("{}{}", self.dry_run_prefix(), body),
        }
    }
}

impl OutputSink for TerminalSink {
    fn emit(&mut self, level: Level, message: &str) {
        let line = self.format_line(level, message);
        // A closed stdout/stderr pipe is ignored
        if level == Level::Error {
            let _ = writeln!(std::io::stderr(), "{}", line);
        } else if !self.silent {
            let _ = writeln!(std::io::stdout(), "{}", line);
        }
    }
}
