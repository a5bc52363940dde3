use crate::types::{LogEntry, Severity};
use chrono::Local;

/// Rendering surface driven by [`EventLog`].
///
/// Implementations append one visual row per entry, tagged by severity,
/// and reveal the newest row after each append.
pub trait DisplaySink {
    fn render_append(&mut self, entry: &LogEntry);
    fn render_clear(&mut self);
    fn scroll_to_latest(&mut self);
}

/// Append-only, ordered record of timestamped, categorized messages.
///
/// Owns both the entry sequence and the display sink, so an entry is never
/// added without a matching render call. All operations run synchronously
/// to completion and cannot fail.
pub struct EventLog {
    entries: Vec<LogEntry>,
    sink: Box<dyn DisplaySink>,
}

impl EventLog {
    pub fn new(sink: Box<dyn DisplaySink>) -> Self {
        Self {
            entries: Vec::new(),
            sink,
        }
    }

    /// Timestamp, record and render one entry.
    pub fn append(&mut self, message: impl Into<String>, severity: Severity) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let entry = LogEntry::new(timestamp, message.into(), severity);
        self.sink.render_append(&entry);
        self.sink.scroll_to_latest();
        self.entries.push(entry);
    }

    /// Append with the default `info` severity.
    pub fn info(&mut self, message: impl Into<String>) {
        self.append(message, Severity::Info);
    }

    /// Discard all entries, then record that the clear happened.
    ///
    /// After this returns the log holds exactly one entry, so a
    /// user-initiated clear is never observably empty.
    pub fn clear(&mut self) {
        self.sink.render_clear();
        self.entries.clear();
        self.append("Log cleared", Severity::Info);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
