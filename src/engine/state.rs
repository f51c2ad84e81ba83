use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indexmap::IndexSet;
use tracing::warn;

use crate::error::HandlerError;
use crate::handler::Handler;
use crate::sink::{LogEvent, LogLine, LogSink};

/// Why a run left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stop signal was observed.
    Cancelled,
    ElapsedTime { limit: Duration },
    FileCount { limit: usize },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("stop requested"),
            Self::ElapsedTime { limit } => write!(
                f,
                "elapsed time budget of {}s exceeded",
                limit.as_secs_f64()
            ),
            Self::FileCount { limit } => write!(f, "file count budget of {limit} exceeded"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    /// Terminal for the current run state.
    Stopped(StopReason),
}

/// Summary returned when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub reason: StopReason,
    /// Files whose handler was invoked (including failures).
    pub dispatched: usize,
    pub failed: usize,
    pub passes: usize,
    pub elapsed: Duration,
}

/// Mutable state of one run, owned by the loop.
#[derive(Debug)]
pub struct RunState<T> {
    pub(super) history: IndexSet<PathBuf>,
    pub(super) last_result: Option<T>,
    pub(super) phase: Phase,
    pub(super) started: Option<Instant>,
    pub(super) failed: usize,
    pub(super) passes: usize,
}

impl<T> Default for RunState<T> {
    fn default() -> Self {
        Self {
            history: IndexSet::new(),
            last_result: None,
            phase: Phase::Idle,
            started: None,
            failed: 0,
            passes: 0,
        }
    }
}

impl<T> RunState<T> {
    /// Fresh state in the running phase, clock started now.
    pub(super) fn begin() -> Self {
        Self {
            phase: Phase::Running,
            started: Some(Instant::now()),
            ..Self::default()
        }
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.started.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Claim `path`, then run its handler.
    ///
    /// The path enters history before the handler runs, so a file whose handler
    /// fails or panics is never retried. Callers skip paths already in history.
    pub(super) fn dispatch(&mut self, handler: &dyn Handler<T>, path: PathBuf, sink: &dyn LogSink) {
        debug_assert_eq!(self.phase, Phase::Running);
        let claimed = self.history.insert(path.clone());
        debug_assert!(claimed, "{} dispatched twice", path.display());
        sink.emit(&LogLine::now(LogEvent::Loaded(path.clone())));

        match invoke(handler, &path) {
            Ok(result) => {
                self.last_result = Some(result);
                sink.emit(&LogLine::now(LogEvent::Finish(path)));
            }
            Err(e) => {
                self.failed += 1;
                warn!(path = %path.display(), kind = e.kind(), error = %e, "handler failed");
                sink.emit(&LogLine::now(LogEvent::Failure {
                    kind: e.kind(),
                    path,
                    message: e.to_string(),
                }));
            }
        }
    }

    pub(super) fn outcome(&self, reason: StopReason) -> RunOutcome {
        RunOutcome {
            reason,
            dispatched: self.history.len(),
            failed: self.failed,
            passes: self.passes,
            elapsed: self.elapsed(),
        }
    }
}

fn invoke<T>(handler: &dyn Handler<T>, path: &Path) -> Result<T, HandlerError> {
    panic::catch_unwind(AssertUnwindSafe(|| handler.process(path)))
        .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload.as_ref()))))
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
