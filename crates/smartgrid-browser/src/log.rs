//! Append-only, human-readable record of what a session did.
//!
//! This is a user-facing artefact shown next to the browser UI, separate from
//! `tracing` output. Entries are never removed or rewritten.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// One log line. `at` is stored and serialized in UTC; [`Display`] renders it
/// in the machine's local time zone.
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let local = self.at.with_timezone(&Local);
        write!(f, "[{}] {}", local.format("%H:%M:%S"), self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DiagnosticLog {
    entries: Vec<LogEntry>,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` stamped with the current time.
    pub fn record(&mut self, message: impl Into<String>) {
        self.record_at(Utc::now(), message);
    }

    pub fn record_at(&mut self, at: DateTime<Utc>, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formatted lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn entries_format_with_local_time_prefix() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 3).unwrap();
        let mut log = DiagnosticLog::new();
        log.record_at(at, "Found 3 collections");

        let expected = at.with_timezone(&Local).format("%H:%M:%S").to_string();
        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            [format!("[{expected}] Found 3 collections")]
        );
    }

    #[test]
    fn serialized_timestamp_stays_utc() {
        let mut log = DiagnosticLog::new();
        log.record_at(Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 3).unwrap(), "x");
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["at"], "2024-06-01T09:05:03Z");
    }

    #[test]
    fn record_appends_in_order() {
        let mut log = DiagnosticLog::new();
        log.record("first");
        log.record("second");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "first");
        assert_eq!(log.last().map(|e| e.message.as_str()), Some("second"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut log = DiagnosticLog::new();
        log.record("hello");
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["message"], "hello");
    }
}
