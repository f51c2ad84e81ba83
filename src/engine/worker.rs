use std::thread::{self, JoinHandle};

use tracing::debug;

use super::state::panic_message;
use super::{Engine, RunOutcome};
use crate::error::{AutoError, Result};
use crate::handler::HandlerTable;
use crate::scanner::FileScanner;
use crate::signal::CancellationToken;

const WORKER_THREAD_NAME: &str = "auto-analyzer-watch";

/// A watch loop running on its own thread.
///
/// The controlling thread talks to the loop only through the cancellation
/// token; the engine comes back through [`WatchHandle::join`].
#[derive(Debug)]
pub struct WatchHandle<T, S: FileScanner> {
    token: CancellationToken,
    thread: JoinHandle<(Engine<T, S>, RunOutcome)>,
}

impl<T, S> Engine<T, S>
where
    T: Send + 'static,
    S: FileScanner + Send + 'static,
{
    /// Move the engine onto a dedicated worker thread and start the loop.
    ///
    /// # Errors
    /// Returns an error if the worker thread cannot be spawned.
    pub fn spawn(self, table: HandlerTable<T>) -> Result<WatchHandle<T, S>> {
        self.spawn_with_token(table, CancellationToken::new())
    }

    /// Like [`Engine::spawn`], stopping when `token` is cancelled.
    ///
    /// # Errors
    /// Returns an error if the worker thread cannot be spawned.
    pub fn spawn_with_token(
        self,
        table: HandlerTable<T>,
        token: CancellationToken,
    ) -> Result<WatchHandle<T, S>> {
        let worker_token = token.clone();

        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut engine = self;
                let outcome = engine.run(&table, &worker_token);
                (engine, outcome)
            })?;

        debug!("watch worker spawned");
        Ok(WatchHandle { token, thread })
    }
}

impl<T, S: FileScanner> WatchHandle<T, S> {
    /// A token that stops this loop when cancelled.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the loop has already ended on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Request a stop and wait for the in-flight handler, if any, to finish.
    ///
    /// # Errors
    /// Returns an error if the worker thread panicked.
    pub fn stop(self) -> Result<(Engine<T, S>, RunOutcome)> {
        self.token.cancel();
        self.join()
    }

    /// Wait for the loop to end.
    ///
    /// # Errors
    /// Returns an error if the worker thread panicked.
    pub fn join(self) -> Result<(Engine<T, S>, RunOutcome)> {
        self.thread
            .join()
            .map_err(|payload| AutoError::WorkerPanicked(panic_message(payload.as_ref())))
    }
}
