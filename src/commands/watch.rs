use std::io::{self, BufRead};
use std::thread;

use tracing::{debug, warn};

use crate::cli::{Cli, WatchArgs};
use crate::engine::{Engine, RunOutcome};
use crate::handler::HandlerTable;
use crate::signal::CancellationToken;
use crate::sink::WriterSink;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{report_error, resolve_config};

const STDIN_THREAD_NAME: &str = "auto-analyzer-stdin";

#[must_use]
pub fn run_watch(args: &WatchArgs, cli: &Cli) -> i32 {
    match run_watch_impl(args, cli) {
        Ok(outcome) => {
            if !cli.quiet {
                println!(
                    "Watched {} file(s) in {} pass(es), {} failed: {}",
                    outcome.dispatched, outcome.passes, outcome.failed, outcome.reason
                );
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            report_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Resolve the configuration and run the watch loop until it ends.
///
/// # Errors
/// Returns an error if the configuration is invalid or the loop cannot be started.
pub fn run_watch_impl(args: &WatchArgs, cli: &Cli) -> Result<RunOutcome> {
    let config = resolve_config(args.config.as_deref(), cli.no_config, &args.overrides)?;
    let spec = config.watch_spec()?;
    let table = config.handler_table()?;
    if table.is_empty() {
        warn!("no handlers configured, files will be scanned but never dispatched");
    }

    let mut engine = Engine::new(&spec)?.with_sink(WriterSink::new(io::stdout()));
    if args.no_control {
        return Ok(engine.run_blocking(&table));
    }
    run_controlled(engine, table, install_controls)
}

/// Run the loop on a worker thread while the controls set up by `install`
/// can end it early.
///
/// The controls are installed before the worker starts, so nothing is
/// dispatched if `install` fails.
fn run_controlled<T, F>(
    engine: Engine<T>,
    table: HandlerTable<T>,
    install: F,
) -> Result<RunOutcome>
where
    T: Send + 'static,
    F: FnOnce(&CancellationToken) -> Result<()>,
{
    let token = CancellationToken::new();
    install(&token)?;

    let handle = engine.spawn_with_token(table, token)?;
    let (_, outcome) = handle.join()?;
    Ok(outcome)
}

/// Ctrl-C and a `stop` line on stdin both cancel `token`.
fn install_controls(token: &CancellationToken) -> Result<()> {
    let interrupt = token.clone();
    ctrlc::set_handler(move || interrupt.cancel())?;
    spawn_stdin_listener(token.clone())?;
    eprintln!("Watching; press Ctrl-C or type 'stop' and Enter to end early.");
    Ok(())
}

fn spawn_stdin_listener(token: CancellationToken) -> Result<()> {
    thread::Builder::new()
        .name(STDIN_THREAD_NAME.to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if is_stop_command(&line) {
                    debug!("stop requested from stdin");
                    token.cancel();
                    break;
                }
            }
        })?;
    Ok(())
}

/// Whether a line typed on stdin asks the loop to stop.
#[must_use]
pub fn is_stop_command(line: &str) -> bool {
    let line = line.trim();
    ["stop", "q", "quit"]
        .iter()
        .any(|cmd| line.eq_ignore_ascii_case(cmd))
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
