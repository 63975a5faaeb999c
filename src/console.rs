//! In-memory log of the console sink.
//!
//! Entries arrive from the execution engine and are kept newest-first. The
//! list only grows: an entry is never changed once recorded. Fading the
//! highlight after a delay is left to whatever renders the list.

use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::Receiver;

/// Severity of a log entry as reported by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Error,
    Data,
    /// Any level the console does not recognise. Still recorded, never highlighted.
    Other(String),
}

impl LogLevel {
    pub fn parse(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "info" => LogLevel::Info,
            "error" => LogLevel::Error,
            "data" => LogLevel::Data,
            _ => LogLevel::Other(level.to_string()),
        }
    }

    /// Background colour a fresh entry is highlighted with.
    pub fn highlight(&self) -> Option<&'static str> {
        match self {
            LogLevel::Info => Some("#e5f6ff"),
            LogLevel::Error => Some("#ffd7d9"),
            LogLevel::Data => Some("white"),
            LogLevel::Other(_) => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Data => write!(f, "data"),
            LogLevel::Other(level) => write!(f, "{}", level),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub content: String,
}

impl LogEntry {
    pub fn new(timestamp: &str, level: &str, content: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            level: LogLevel::parse(level),
            content: content.to_string(),
        }
    }

    /// Content with HTML metacharacters escaped, for hosts that render markup.
    pub fn escaped_content(&self) -> String {
        escape_html(&self.content)
    }
}

/// Escapes `& < > " ' /` as HTML entities.
pub fn escape_html(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for c in source.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

/// Append-only, newest-first list of log entries.
#[derive(Debug, Clone, Default)]
pub struct LogConsole {
    entries: VecDeque<LogEntry>,
}

impl LogConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry at the front of the list.
    pub fn push(&mut self, timestamp: &str, level: &str, content: &str) {
        self.record(LogEntry::new(timestamp, level, content));
    }

    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    /// Records every entry sent on `entries` until the sending side closes.
    pub fn ingest(&mut self, entries: Receiver<LogEntry>) -> usize {
        let mut count = 0;
        for entry in entries {
            self.record(entry);
            count += 1;
        }
        count
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
