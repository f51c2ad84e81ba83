#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the auto-analyzer binary.
#[macro_export]
macro_rules! auto_analyzer {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("auto-analyzer"))
    };
}

/// A temporary directory to watch.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, including missing parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path as a command-line argument.
    pub fn arg(&self) -> &str {
        self.dir.path().to_str().expect("temp path is not UTF-8")
    }

    /// Writes `.auto-analyzer.toml` into the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file(".auto-analyzer.toml", content);
    }
}
