use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::validation::duration_from_secs;
use crate::Result;
use crate::engine::WatchSpec;
use crate::handler::{CommandHandler, CommandOutput, HandlerTable};
use crate::scanner::PatternSyntax;

pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 10.0;
pub const DEFAULT_MAX_ELAPSED_SECS: f64 = 10_800.0;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    /// Extension (without the dot) to command argv. `{path}` in the argv is
    /// replaced by the file path; without it the path is appended.
    #[serde(default)]
    pub handlers: BTreeMap<String, Vec<String>>,
}

/// The `[watch]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub recursive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default)]
    pub syntax: PatternSyntax,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: f64,

    #[serde(default = "default_max_elapsed")]
    pub max_elapsed_secs: f64,

    /// Absent means no file-count budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            recursive: false,
            include: None,
            exclude: None,
            syntax: PatternSyntax::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_elapsed_secs: DEFAULT_MAX_ELAPSED_SECS,
            max_files: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

const fn default_poll_interval() -> f64 {
    DEFAULT_POLL_INTERVAL_SECS
}

const fn default_max_elapsed() -> f64 {
    DEFAULT_MAX_ELAPSED_SECS
}

impl Config {
    /// Resolve the `[watch]` section into a [`WatchSpec`].
    ///
    /// # Errors
    /// Returns an error if a duration is not a positive, finite number of seconds.
    pub fn watch_spec(&self) -> Result<WatchSpec> {
        let watch = &self.watch;
        let mut spec = WatchSpec::new(watch.root.clone())
            .recursive(watch.recursive)
            .syntax(watch.syntax)
            .poll_interval(duration_from_secs(
                "watch.poll_interval_secs",
                watch.poll_interval_secs,
            )?)
            .max_elapsed(duration_from_secs(
                "watch.max_elapsed_secs",
                watch.max_elapsed_secs,
            )?)
            .max_files(watch.max_files);
        spec.include.clone_from(&watch.include);
        spec.exclude.clone_from(&watch.exclude);
        Ok(spec)
    }

    /// Build the command handler table from the `[handlers]` section.
    ///
    /// # Errors
    /// Returns an error if a key is not a bare extension or an argv is empty.
    pub fn handler_table(&self) -> Result<HandlerTable<CommandOutput>> {
        self.handlers
            .iter()
            .try_fold(HandlerTable::builder(), |builder, (ext, argv)| -> Result<_> {
                Ok(builder.handler(ext.clone(), CommandHandler::new(argv.clone())?))
            })?
            .build()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
