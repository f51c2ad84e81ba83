use std::fs;

use crate::cli::InitArgs;
use crate::{AutoError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::report_error;

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            report_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes a template configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(AutoError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# auto-analyzer configuration file

[watch]
# Directory to poll for new files
root = "."

# Also look inside subdirectories
recursive = false

# Only dispatch files whose name starts with a match of this pattern
# include = "sample-"

# Skip files whose name starts with a match of this pattern
# exclude = "result-"

# Pattern flavour: "regex" (matched at the start of the file name)
# or "glob" (matched against the whole file name, e.g. "*.csv")
syntax = "regex"

# Seconds to wait between scan passes
poll_interval_secs = 10.0

# Stop watching after this many seconds (default: 3 hours)
max_elapsed_secs = 10800.0

# Stop once more than this many files have been dispatched
# max_files = 100

# One entry per file extension (without the dot). Each value is the command
# to run; "{path}" is replaced by the file path, otherwise the path is
# appended as the last argument.
[handlers]
# csv = ["wc", "-l"]
# tif = ["python", "analyze.py", "{path}"]
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
