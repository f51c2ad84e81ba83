//! Timestamped log lines produced by the watch loop, and the sinks that consume them.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::engine::StopReason;

/// `strftime` layout of log line timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// Scanning started under this root.
    Start(PathBuf),
    /// A file was claimed and its handler is about to run.
    Loaded(PathBuf),
    /// The handler returned normally.
    Finish(PathBuf),
    /// The handler failed; the loop carries on.
    Failure {
        kind: &'static str,
        path: PathBuf,
        message: String,
    },
    /// The loop left the running state.
    Stopped(StopReason),
}

impl LogEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Loaded(_) => "loaded",
            Self::Finish(_) => "finish",
            Self::Failure { kind, .. } => *kind,
            Self::Stopped(_) => "stopped",
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name())?;
        match self {
            Self::Start(root) => write!(f, "scanning {}", root.display()),
            Self::Loaded(path) | Self::Finish(path) => write!(f, "{}", path.display()),
            Self::Failure { path, message, .. } => write!(f, "{}: {message}", path.display()),
            Self::Stopped(reason) => write!(f, "{reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub event: LogEvent,
}

impl LogLine {
    #[must_use]
    pub fn now(event: LogEvent) -> Self {
        Self {
            timestamp: Local::now(),
            event,
        }
    }
}

/// Renders as `<timestamp> | <event>: <detail>`.
impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.event
        )
    }
}

/// Consumer of the loop's log lines.
///
/// Sinks are shared between the loop worker and the controlling thread.
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &LogLine);
}

/// Forwards every line to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &LogLine) {
        if line.event.is_failure() {
            warn!(event = line.event.name(), "{}", line.event);
        } else {
            info!(event = line.event.name(), "{}", line.event);
        }
    }
}

/// Keeps every line in memory; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered lines, in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lines().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, line: &LogLine) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
    }
}

/// Writes each rendered line to a writer, flushing after every line.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&self, line: &LogLine) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!(error = %e, "failed to write log line");
        }
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
