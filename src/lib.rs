//! Poll a directory tree and dispatch each new file to a handler chosen by
//! its extension.

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod logging;
pub mod scanner;
pub mod signal;
pub mod sink;

pub use engine::{Engine, RunOutcome, StopReason, WatchHandle, WatchSpec};
pub use error::{AutoError, HandlerError, Result};
pub use handler::{Handler, HandlerTable, Lookup};
pub use scanner::{PathMatcher, PatternSyntax};
pub use signal::{CancellationToken, StopSignal};
pub use sink::{LogLine, LogSink, MemorySink};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
