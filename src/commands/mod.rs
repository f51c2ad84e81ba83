pub mod init;
pub mod validate;
pub mod watch;

pub use init::{generate_config_template, run_init, run_init_impl};
pub use validate::{format_config_text, run_validate, run_validate_impl};
pub use watch::{is_stop_command, run_watch, run_watch_impl};

use std::error::Error as _;
use std::path::Path;

use crate::{AutoError, Result};
use crate::cli::WatchOverrides;
use crate::config::{Config, ConfigLoader, FileConfigLoader, validate_config};
use crate::scanner::PatternSyntax;

/// Load the configuration file, or defaults when `no_config` is set.
///
/// # Errors
/// Returns an error if a configuration file exists but cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Apply command-line overrides on top of a loaded configuration.
pub fn apply_overrides(config: &mut Config, overrides: &WatchOverrides) {
    let watch = &mut config.watch;
    if let Some(root) = &overrides.root {
        watch.root.clone_from(root);
    }
    if overrides.recursive {
        watch.recursive = true;
    }
    if overrides.include.is_some() {
        watch.include.clone_from(&overrides.include);
    }
    if overrides.exclude.is_some() {
        watch.exclude.clone_from(&overrides.exclude);
    }
    if overrides.glob {
        watch.syntax = PatternSyntax::Glob;
    }
    if let Some(secs) = overrides.interval {
        watch.poll_interval_secs = secs;
    }
    if let Some(secs) = overrides.max_time {
        watch.max_elapsed_secs = secs;
    }
    if overrides.max_files.is_some() {
        watch.max_files = overrides.max_files;
    }
    for spec in &overrides.handlers {
        config
            .handlers
            .insert(spec.extension.clone(), spec.argv.clone());
    }
}

/// Load, override and validate: the configuration a command actually runs with.
///
/// # Errors
/// Returns an error if loading fails or the result is semantically invalid.
pub fn resolve_config(
    config_path: Option<&Path>,
    no_config: bool,
    overrides: &WatchOverrides,
) -> Result<Config> {
    let mut config = load_config(config_path, no_config)?;
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

/// Print an error and its source chain to stderr.
pub fn report_error(error: &AutoError) {
    eprintln!("Error [{}]: {error}", error.error_type());
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
