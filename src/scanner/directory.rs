use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::{FileFilter, FileScanner};

/// Polls a directory (optionally its whole subtree) for regular files.
#[derive(Debug, Clone)]
pub struct DirectoryScanner<F: FileFilter> {
    root: PathBuf,
    recursive: bool,
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, filter: F) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            filter,
        }
    }

    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    fn walker(&self) -> WalkDir {
        let walker = WalkDir::new(&self.root).min_depth(1).sort_by_file_name();
        if self.recursive {
            walker
        } else {
            walker.max_depth(1)
        }
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn root(&self) -> &Path {
        &self.root
    }

    fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.walker()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(root = %self.root.display(), error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
    }
}
