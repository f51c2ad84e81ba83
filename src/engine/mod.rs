//! The polling/dispatch loop.
//!
//! Each pass enumerates the scanner's candidates, skips anything already in
//! the run's history or without a handler, and dispatches the rest one at a
//! time. Budgets are re-checked after every dispatched file, so a pass never
//! overshoots the file-count budget by more than one file. Between passes the
//! loop sleeps for the poll interval in short slices so that a stop request is
//! honoured promptly.

mod state;
mod watch;
mod worker;

pub use state::{Phase, RunOutcome, StopReason};
pub use watch::{Budget, DEFAULT_MAX_ELAPSED, DEFAULT_POLL_INTERVAL, WatchSpec};
pub use worker::WatchHandle;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::handler::{HandlerTable, Lookup};
use crate::scanner::{DirectoryScanner, FileScanner, PathMatcher};
use crate::signal::{NeverStop, StopSignal, sleep_interruptible};
use crate::sink::{LogEvent, LogLine, LogSink, TracingSink};
use state::RunState;

/// Polls a scanner and dispatches each new file to its handler, one at a time,
/// until a budget runs out or a stop is requested.
pub struct Engine<T, S: FileScanner = DirectoryScanner<PathMatcher>> {
    scanner: S,
    poll_interval: Duration,
    budget: Budget,
    sink: Arc<dyn LogSink>,
    state: RunState<T>,
}

impl<T> Engine<T> {
    /// Build an engine for a directory watch.
    ///
    /// # Errors
    /// Returns a configuration error if the watch settings are invalid or a pattern is malformed.
    pub fn new(spec: &WatchSpec) -> Result<Self> {
        spec.validate()?;
        let scanner = spec.scanner()?;
        Ok(Self::with_scanner(scanner, spec.poll_interval, spec.budget))
    }
}

impl<T, S: FileScanner> Engine<T, S> {
    pub fn with_scanner(scanner: S, poll_interval: Duration, budget: Budget) -> Self {
        Self {
            scanner,
            poll_interval,
            budget,
            sink: Arc::new(TracingSink),
            state: RunState::default(),
        }
    }

    #[must_use]
    pub fn with_sink(self, sink: impl LogSink + 'static) -> Self {
        self.with_shared_sink(Arc::new(sink))
    }

    #[must_use]
    pub fn with_shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Discard the previous run's state and return to idle.
    pub fn init(&mut self) {
        self.state = RunState::default();
    }

    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state.phase, Phase::Running)
    }

    /// Paths dispatched in the latest run, in dispatch order.
    pub const fn history(&self) -> &IndexSet<PathBuf> {
        &self.state.history
    }

    /// Return value of the most recent successful handler call.
    pub const fn last_result(&self) -> Option<&T> {
        self.state.last_result.as_ref()
    }

    pub const fn budget(&self) -> Budget {
        self.budget
    }

    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run on the calling thread until a budget is exhausted.
    pub fn run_blocking(&mut self, table: &HandlerTable<T>) -> RunOutcome {
        self.run(table, &NeverStop)
    }

    /// Run on the calling thread until a budget is exhausted or `stop` fires.
    ///
    /// Always starts from a fresh run state. A handler in flight when `stop`
    /// fires is allowed to finish.
    pub fn run<G: StopSignal + ?Sized>(
        &mut self,
        table: &HandlerTable<T>,
        stop: &G,
    ) -> RunOutcome {
        self.state = RunState::begin();
        let root = self.scanner.root().to_path_buf();
        info!(root = %root.display(), extensions = ?table.extensions(), "watch loop started");
        self.emit(LogEvent::Start(root));

        let reason = loop {
            if stop.should_stop() {
                break StopReason::Cancelled;
            }
            if let Some(reason) = self
                .budget
                .exceeded(self.state.elapsed(), self.state.history.len())
            {
                break reason;
            }
            if let Some(reason) = self.pass(table, stop) {
                break reason;
            }
            if self.pause(stop) {
                break StopReason::Cancelled;
            }
        };

        self.finish(reason)
    }

    /// One pass over the scanner's current candidates.
    fn pass<G: StopSignal + ?Sized>(
        &mut self,
        table: &HandlerTable<T>,
        stop: &G,
    ) -> Option<StopReason> {
        let Self {
            scanner,
            budget,
            sink,
            state,
            ..
        } = self;
        state.passes += 1;

        let mut dispatched = 0usize;
        for path in scanner.scan() {
            if state.history.contains(&path) {
                continue;
            }
            let Lookup::Present(handler) = table.lookup_path(&path) else {
                continue;
            };

            state.dispatch(handler, path, &**sink);
            dispatched += 1;

            if let Some(reason) = budget.exceeded(state.elapsed(), state.history.len()) {
                return Some(reason);
            }
            if stop.should_stop() {
                return Some(StopReason::Cancelled);
            }
        }

        debug!(pass = state.passes, dispatched, total = state.history.len(), "scan pass complete");
        None
    }

    /// Sleep until the next pass, never past the elapsed budget.
    ///
    /// Returns `true` if interrupted by a stop request.
    fn pause<G: StopSignal + ?Sized>(&self, stop: &G) -> bool {
        let remaining = self.budget.max_elapsed.saturating_sub(self.state.elapsed());
        sleep_interruptible(self.poll_interval.min(remaining), stop)
    }

    fn finish(&mut self, reason: StopReason) -> RunOutcome {
        self.state.phase = Phase::Stopped(reason);
        self.emit(LogEvent::Stopped(reason));

        let outcome = self.state.outcome(reason);
        info!(
            %reason,
            dispatched = outcome.dispatched,
            failed = outcome.failed,
            passes = outcome.passes,
            "watch loop stopped"
        );
        outcome
    }

    fn emit(&self, event: LogEvent) {
        self.sink.emit(&LogLine::now(event));
    }
}

impl<T, S: FileScanner + fmt::Debug> fmt::Debug for Engine<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("scanner", &self.scanner)
            .field("poll_interval", &self.poll_interval)
            .field("budget", &self.budget)
            .field("phase", &self.state.phase)
            .field("history", &self.state.history.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
