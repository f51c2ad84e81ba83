use std::path::PathBuf;
use std::time::Duration;

use super::StopReason;
use crate::error::{AutoError, Result};
use crate::scanner::{DirectoryScanner, PathMatcher, PatternSyntax};

/// Default delay between scan passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default elapsed-time budget (three hours).
pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(10_800);

/// Limits that end a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub max_elapsed: Duration,
    /// `None` disables the file-count budget.
    pub max_files: Option<usize>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_elapsed: DEFAULT_MAX_ELAPSED,
            max_files: None,
        }
    }
}

impl Budget {
    /// The budget crossed after `elapsed` time and `processed` dispatched files, if any.
    #[must_use]
    pub fn exceeded(&self, elapsed: Duration, processed: usize) -> Option<StopReason> {
        if elapsed >= self.max_elapsed {
            return Some(StopReason::ElapsedTime {
                limit: self.max_elapsed,
            });
        }
        match self.max_files {
            Some(limit) if processed > limit => Some(StopReason::FileCount { limit }),
            _ => None,
        }
    }
}

/// What to watch and for how long. Fixed once a run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSpec {
    pub root: PathBuf,
    pub recursive: bool,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub syntax: PatternSyntax,
    pub poll_interval: Duration,
    pub budget: Budget,
}

impl WatchSpec {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            include: None,
            exclude: None,
            syntax: PatternSyntax::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            budget: Budget::default(),
        }
    }

    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    #[must_use]
    pub const fn syntax(mut self, syntax: PatternSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub const fn max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.budget.max_elapsed = max_elapsed;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max_files: Option<usize>) -> Self {
        self.budget.max_files = max_files;
        self
    }

    /// Check the settings that cannot be caught by the type system.
    ///
    /// # Errors
    /// Returns an error if the poll interval or elapsed budget is zero, or
    /// the root is not an existing directory.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(AutoError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.budget.max_elapsed.is_zero() {
            return Err(AutoError::Config(
                "maximum elapsed time must be greater than zero".to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(AutoError::RootNotFound(self.root.clone()));
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if the include or exclude pattern is malformed.
    pub fn matcher(&self) -> Result<PathMatcher> {
        PathMatcher::new(self.include.as_deref(), self.exclude.as_deref(), self.syntax)
    }

    /// # Errors
    /// Returns an error if the include or exclude pattern is malformed.
    pub fn scanner(&self) -> Result<DirectoryScanner<PathMatcher>> {
        Ok(DirectoryScanner::new(&self.root, self.matcher()?).recursive(self.recursive))
    }
}
