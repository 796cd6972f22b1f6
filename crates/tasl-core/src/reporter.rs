//! User-facing progress reporting.
//!
//! Engine operations never print directly. They receive a `&dyn Reporter`
//! and describe what they did (or would do, in dry-run mode) through it. The
//! CLI hands in a [`LogReporter`]; tests hand in a [`RecordingReporter`] and
//! assert on the captured messages.

use std::fmt;
use std::sync::Mutex;

/// How prominent a reported message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Developer detail.
    Debug,
    /// Progress information.
    Info,
    /// An action completed, or a result the user asked for.
    Success,
    /// Something was skipped or not performed.
    Warning,
    /// An item failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Sink for user-facing messages.
pub trait Reporter {
    /// Report a message at the given severity.
    fn report(&self, severity: Severity, message: &str);

    /// Report developer detail.
    fn debug(&self, message: &str) {
        self.report(Severity::Debug, message);
    }

    /// Report progress information.
    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    /// Report a completed action or requested result.
    fn success(&self, message: &str) {
        self.report(Severity::Success, message);
    }

    /// Report something skipped or not performed.
    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    /// Report a failed item.
    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}

/// Reporter that forwards to the `log` facade under the `tasl` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => log::debug!(target: "tasl", "{message}"),
            Severity::Info | Severity::Success => log::info!(target: "tasl", "{message}"),
            Severity::Warning => log::warn!(target: "tasl", "{message}"),
            Severity::Error => log::error!(target: "tasl", "{message}"),
        }
    }
}

/// Reporter that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Recorded messages with the given severity.
    pub fn at(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, message.to_string()));
        }
    }
}
