use std::fmt::Write as _;

use crate::cli::{Cli, ConfigOutputFormat, ValidateArgs};
use crate::config::Config;
use crate::scanner::PatternSyntax;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{report_error, resolve_config};

#[must_use]
pub fn run_validate(args: &ValidateArgs, cli: &Cli) -> i32 {
    match run_validate_impl(args, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            report_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Resolve and fully check the configuration, returning the formatted settings.
///
/// Everything a `watch` run would check before scanning is checked here,
/// including that the root exists.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run_validate_impl(args: &ValidateArgs, cli: &Cli) -> Result<String> {
    let config = resolve_config(args.config.as_deref(), cli.no_config, &args.overrides)?;
    let spec = config.watch_spec()?;
    spec.validate()?;
    config.handler_table()?;

    match args.format {
        ConfigOutputFormat::Text => Ok(format_config_text(&config)),
        ConfigOutputFormat::Json => Ok(serde_json::to_string_pretty(&config)? + "\n"),
    }
}

#[must_use]
pub fn format_config_text(config: &Config) -> String {
    let watch = &config.watch;
    let syntax = match watch.syntax {
        PatternSyntax::Regex => "regex",
        PatternSyntax::Glob => "glob",
    };

    let mut out = String::new();
    let _ = writeln!(out, "Root:          {}", watch.root.display());
    let _ = writeln!(out, "Recursive:     {}", if watch.recursive { "yes" } else { "no" });
    let _ = writeln!(out, "Include:       {}", watch.include.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Exclude:       {}", watch.exclude.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Syntax:        {syntax}");
    let _ = writeln!(out, "Poll interval: {}s", watch.poll_interval_secs);
    let _ = writeln!(out, "Max elapsed:   {}s", watch.max_elapsed_secs);
    let _ = match watch.max_files {
        Some(limit) => writeln!(out, "Max files:     {limit}"),
        None => writeln!(out, "Max files:     unlimited"),
    };

    if config.handlers.is_empty() {
        out.push_str("Handlers:      none\n");
    } else {
        out.push_str("Handlers:\n");
        for (ext, argv) in &config.handlers {
            let _ = writeln!(out, "  {ext:<8} {}", argv.join(" "));
        }
    }
    out
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
