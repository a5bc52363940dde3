use crate::event_log::DisplaySink;
use crate::types::LogEntry;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Renders entries as plain lines on stdout.
///
/// The terminal scrollback is the viewport, so scroll-to-latest reduces to
/// flushing the stream.
pub struct TerminalSink {
    out: io::Stdout,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalSink {
    fn render_append(&mut self, entry: &LogEntry) {
        // Rendering is infallible from the log's point of view; a closed
        // stdout is not worth tearing the probe down for.
        let _ = writeln!(
            self.out,
            "[{}] {:<7} {}",
            entry.timestamp,
            entry.severity.as_str().to_uppercase(),
            entry.message
        );
    }

    fn render_clear(&mut self) {
        let _ = writeln!(self.out, "{}", "-".repeat(60));
    }

    fn scroll_to_latest(&mut self) {
        let _ = self.out.flush();
    }
}

/// Accumulates entries as markup rows matching the original page:
/// a `log-entry <severity>` container with a `log-time` span.
pub struct HtmlSink {
    rows: Vec<String>,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// The rows rendered so far, one markup fragment per entry.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Wrap the accumulated rows in the scrollable log container.
    pub fn finish(&self) -> String {
        let mut html = String::from("<div id=\"log\" class=\"log\">\n");
        for row in &self.rows {
            html.push_str("  ");
            html.push_str(row);
            html.push('\n');
        }
        html.push_str("</div>\n");
        html
    }
}

impl Default for HtmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for HtmlSink {
    fn render_append(&mut self, entry: &LogEntry) {
        // Message content goes in raw; callers may embed inline markup,
        // matching the original page's innerHTML rendering.
        self.rows.push(format!(
            "<div class=\"log-entry {}\"><span class=\"log-time\">[{}]</span>{}</div>",
            entry.severity.as_str(),
            entry.timestamp,
            entry.message
        ));
    }

    fn render_clear(&mut self) {
        self.rows.clear();
    }

    fn scroll_to_latest(&mut self) {
        // Static markup has no viewport; the container scrolls client-side.
    }
}

/// Lets the caller keep a handle to the sink (e.g. to pull the rendered
/// markup after the run) while the log owns its boxed copy.
impl DisplaySink for Rc<RefCell<HtmlSink>> {
    fn render_append(&mut self, entry: &LogEntry) {
        self.borrow_mut().render_append(entry);
    }

    fn render_clear(&mut self) {
        self.borrow_mut().render_clear();
    }

    fn scroll_to_latest(&mut self) {
        self.borrow_mut().scroll_to_latest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn entry(message: &str, severity: Severity) -> LogEntry {
        LogEntry::new("12:34:56".into(), message.into(), severity)
    }

    #[test]
    fn html_row_carries_severity_class_and_time_span() {
        let mut sink = HtmlSink::new();
        sink.render_append(&entry("Window opened", Severity::Success));

        assert_eq!(sink.rows().len(), 1);
        let row = &sink.rows()[0];
        assert!(row.starts_with("<div class=\"log-entry success\">"));
        assert!(row.contains("<span class=\"log-time\">[12:34:56]</span>"));
        assert!(row.contains("Window opened"));
    }

    #[test]
    fn html_clear_removes_all_rows() {
        let mut sink = HtmlSink::new();
        sink.render_append(&entry("one", Severity::Info));
        sink.render_append(&entry("two", Severity::Error));
        sink.render_clear();
        assert!(sink.rows().is_empty());
    }

    #[test]
    fn html_message_content_is_inserted_raw() {
        let mut sink = HtmlSink::new();
        sink.render_append(&entry("Window name: <em>(unnamed)</em>", Severity::Info));
        let row = &sink.rows()[0];
        assert!(row.contains("<em>(unnamed)</em>"));
    }

    #[test]
    fn finish_wraps_rows_in_log_container() {
        let mut sink = HtmlSink::new();
        sink.render_append(&entry("one", Severity::Info));
        let html = sink.finish();
        assert!(html.starts_with("<div id=\"log\" class=\"log\">"));
        assert!(html.trim_end().ends_with("</div>"));
        assert!(html.contains("log-entry info"));
    }
}
