use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use super::Handler;
use crate::error::{AutoError, HandlerError, Result};

/// Argument token replaced by the dispatched file's path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Captured result of a successful command run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
}

/// Runs an external program once per file.
///
/// Every `{path}` in the argument list is replaced by the file path. When no
/// argument contains the placeholder, the path is appended as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHandler {
    program: String,
    args: Vec<String>,
}

impl CommandHandler {
    /// # Errors
    /// Returns an error if `argv` is empty or its program name is blank.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AutoError::Config("handler command must not be empty".to_string()))?;
        Ok(Self {
            program,
            args: argv.collect(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one invocation against `path`.
    #[must_use]
    pub fn args_for(&self, path: &Path) -> Vec<String> {
        let path = path.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, &path))
            .collect();
        if !self.args.iter().any(|arg| arg.contains(PATH_PLACEHOLDER)) {
            args.push(path.into_owned());
        }
        args
    }
}

impl Handler<CommandOutput> for CommandHandler {
    fn process(&self, path: &Path) -> std::result::Result<CommandOutput, HandlerError> {
        let args = self.args_for(path);
        debug!(program = %self.program, ?args, "running handler command");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| HandlerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            return Err(HandlerError::CommandFailed {
                program: self.program.clone(),
                status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(CommandOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
