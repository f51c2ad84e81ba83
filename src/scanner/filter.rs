use std::path::Path;

use globset::{Glob, GlobMatcher};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AutoError, Result};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// How include/exclude patterns are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSyntax {
    /// Regular expression matched at the start of the basename.
    #[default]
    Regex,
    /// Shell glob matched against the whole basename.
    Glob,
}

#[derive(Debug, Clone)]
enum Pattern {
    Regex(Regex),
    Glob(GlobMatcher),
}

impl Pattern {
    fn compile(pattern: &str, syntax: PatternSyntax) -> Result<Self> {
        match syntax {
            PatternSyntax::Regex => Regex::new(pattern)
                .map(Self::Regex)
                .map_err(|e| AutoError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                }),
            PatternSyntax::Glob => Glob::new(pattern)
                .map(|glob| Self::Glob(glob.compile_matcher()))
                .map_err(|e| AutoError::InvalidGlob {
                    pattern: pattern.to_string(),
                    source: e,
                }),
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            // Leftmost-first search: a match anchored at 0 exists iff the first match starts there.
            Self::Regex(re) => re.find(name).is_some_and(|m| m.start() == 0),
            Self::Glob(glob) => glob.is_match(name),
        }
    }
}

/// Include/exclude predicate over file basenames.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    include: Option<Pattern>,
    exclude: Option<Pattern>,
}

impl PathMatcher {
    /// Compile the include and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if either pattern is malformed for the chosen syntax.
    pub fn new(
        include: Option<&str>,
        exclude: Option<&str>,
        syntax: PatternSyntax,
    ) -> Result<Self> {
        let include = include.map(|p| Pattern::compile(p, syntax)).transpose()?;
        let exclude = exclude.map(|p| Pattern::compile(p, syntax)).transpose()?;
        Ok(Self { include, exclude })
    }

    /// A matcher that accepts every basename.
    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            include: None,
            exclude: None,
        }
    }

    #[must_use]
    pub fn matches(&self, basename: &str) -> bool {
        let included = self.include.as_ref().is_none_or(|p| p.is_match(basename));
        let excluded = self.exclude.as_ref().is_some_and(|p| p.is_match(basename));
        included && !excluded
    }
}

impl FileFilter for PathMatcher {
    fn should_include(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matches(&name.to_string_lossy()))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
