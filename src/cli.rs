use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for `validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "auto-analyzer")]
#[command(author, version, about = "Watch a directory and run a handler on each new file")]
#[command(long_about = "Polls a directory for files, picks a handler by file extension \
    and runs it once per file until a time or file-count budget is used up.\n\n\
    Exit codes:\n  \
    0 - Watch ended normally\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch a directory and dispatch new files to their handlers
    Watch(WatchArgs),

    /// Check the configuration and print the resolved settings
    Validate(ValidateArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

/// Settings that override the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct WatchOverrides {
    /// Directory to watch (overrides config)
    pub root: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Only dispatch files whose name matches this pattern
    #[arg(long, value_name = "PATTERN")]
    pub include: Option<String>,

    /// Skip files whose name matches this pattern
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// Treat --include/--exclude as shell globs instead of regular expressions
    #[arg(long)]
    pub glob: bool,

    /// Seconds between scan passes
    #[arg(long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Stop after this many seconds
    #[arg(long = "max-time", value_name = "SECS")]
    pub max_time: Option<f64>,

    /// Stop once more than this many files have been dispatched
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Run COMMAND for files with extension EXT (repeatable, e.g. csv="wc -l")
    #[arg(long = "handler", value_name = "EXT=COMMAND", value_parser = parse_handler_spec)]
    pub handlers: Vec<HandlerSpec>,
}

/// One `--handler EXT=COMMAND` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSpec {
    pub extension: String,
    pub argv: Vec<String>,
}

/// Parse `EXT=COMMAND`; the command is split on whitespace.
///
/// # Errors
/// Returns a message if the `=` separator or the command is missing.
pub fn parse_handler_spec(value: &str) -> Result<HandlerSpec, String> {
    let (extension, command) = value
        .split_once('=')
        .ok_or_else(|| format!("expected EXT=COMMAND, got '{value}'"))?;
    let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    if argv.is_empty() {
        return Err(format!("missing command for extension '{extension}'"));
    }
    Ok(HandlerSpec {
        extension: extension.trim().to_string(),
        argv,
    })
}

#[derive(Parser, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub overrides: WatchOverrides,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run without the interactive stop control (no Ctrl-C or stdin handling)
    #[arg(long)]
    pub no_control: bool,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub overrides: WatchOverrides,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ConfigOutputFormat,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = ".auto-analyzer.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
