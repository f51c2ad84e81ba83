use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid regex pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid handler key '{key}': {reason}")]
    InvalidHandlerKey { key: String, reason: String },

    #[error("Watch root is not a directory: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Watch loop worker panicked: {0}")]
    WorkerPanicked(String),
}

impl AutoError {
    /// Short category name, used as the prefix of CLI error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::RootNotFound(_) => "Config",
            Self::InvalidPattern { .. } | Self::InvalidGlob { .. } => "Pattern",
            Self::InvalidHandlerKey { .. } => "Handler",
            Self::FileRead { .. } => "FileRead",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "Syntax",
            Self::JsonSerialize(_) => "Serialize",
            Self::Signal(_) | Self::WorkerPanicked(_) => "Worker",
        }
    }
}

pub type Result<T> = std::result::Result<T, AutoError>;

/// Failure raised by a handler while processing one file.
///
/// These never escape the watch loop: the engine logs them and moves on.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{program} exited with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Build a generic failure from any message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Failure kind shown as the event name of the error log line.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::CommandFailed { .. } => "command-failed",
            Self::Spawn { .. } => "spawn",
            Self::Failed(_) => "failed",
            Self::Panicked(_) => "panic",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
