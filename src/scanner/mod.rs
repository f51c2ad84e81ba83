mod directory;
mod filter;

pub use directory::DirectoryScanner;
pub use filter::{FileFilter, PathMatcher, PatternSyntax};

use std::path::{Path, PathBuf};

/// Source of candidate files for the watch loop.
pub trait FileScanner {
    /// Directory being watched, for log output.
    fn root(&self) -> &Path;

    /// Enumerate the current candidate files.
    ///
    /// Every call walks the filesystem afresh; nothing is cached between passes.
    fn scan(&self) -> impl Iterator<Item = PathBuf> + '_;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
