//! Semantic checks run after parsing and CLI overrides, before any scanning.

use std::time::Duration;

use crate::config::Config;
use crate::handler::validate_extension_key;
use crate::scanner::PathMatcher;
use crate::{AutoError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a duration is not positive and finite, a handler key
/// is malformed, a handler argv is empty, or a pattern does not compile.
pub fn validate_config(config: &Config) -> Result<()> {
    let watch = &config.watch;
    duration_from_secs("watch.poll_interval_secs", watch.poll_interval_secs)?;
    duration_from_secs("watch.max_elapsed_secs", watch.max_elapsed_secs)?;

    PathMatcher::new(
        watch.include.as_deref(),
        watch.exclude.as_deref(),
        watch.syntax,
    )?;

    for (key, argv) in &config.handlers {
        validate_extension_key(key)?;
        if argv.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(AutoError::Config(format!(
                "handlers.{key} must name a command to run"
            )));
        }
    }
    Ok(())
}

/// Convert a seconds value from the configuration into a [`Duration`].
///
/// # Errors
/// Returns an error if `secs` is zero, negative, NaN, infinite or too large.
pub fn duration_from_secs(field: &str, secs: f64) -> Result<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(AutoError::Config(format!(
            "{field} must be a positive number of seconds, got {secs}"
        ))),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
