use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::*;

struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    current_dir: PathBuf,
    config_dir: Option<PathBuf>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
            current_dir: PathBuf::from("/project"),
            config_dir: Some(PathBuf::from("/home/user/.config/auto-analyzer")),
        }
    }

    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    fn with_config_dir(mut self, path: Option<PathBuf>) -> Self {
        self.config_dir = path;
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }
}

#[test]
fn load_returns_default_when_no_config_exists() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    assert_eq!(loader.load().unwrap(), Config::default());
}

#[test]
fn load_returns_default_without_user_config_dir() {
    let fs = MockFileSystem::new().with_config_dir(None);
    let loader = FileConfigLoader::with_fs(fs);
    assert_eq!(loader.load().unwrap(), Config::default());
}

#[test]
fn load_reads_local_config() {
    let fs = MockFileSystem::new().with_file(
        "/project/.auto-analyzer.toml",
        "[watch]\nroot = \"incoming\"\n",
    );
    let config = FileConfigLoader::with_fs(fs).load().unwrap();
    assert_eq!(config.watch.root, PathBuf::from("incoming"));
}

#[test]
fn load_falls_back_to_user_config() {
    let fs = MockFileSystem::new().with_file(
        "/home/user/.config/auto-analyzer/config.toml",
        "[watch]\nrecursive = true\n",
    );
    let config = FileConfigLoader::with_fs(fs).load().unwrap();
    assert!(config.watch.recursive);
}

#[test]
fn local_config_takes_precedence_over_user_config() {
    let fs = MockFileSystem::new()
        .with_file("/project/.auto-analyzer.toml", "[watch]\nmax_files = 1\n")
        .with_file(
            "/home/user/.config/auto-analyzer/config.toml",
            "[watch]\nmax_files = 2\n",
        );
    let config = FileConfigLoader::with_fs(fs).load().unwrap();
    assert_eq!(config.watch.max_files, Some(1));
}

#[test]
fn load_from_path_reads_explicit_file() {
    let fs = MockFileSystem::new().with_file(
        "/etc/watch.toml",
        "[handlers]\ncsv = [\"wc\", \"-l\"]\n",
    );
    let config = FileConfigLoader::with_fs(fs)
        .load_from_path(Path::new("/etc/watch.toml"))
        .unwrap();
    assert_eq!(config.handlers["csv"], vec!["wc", "-l"]);
}

#[test]
fn load_from_missing_path_is_file_read_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let err = loader
        .load_from_path(Path::new("/missing.toml"))
        .unwrap_err();
    assert!(matches!(err, AutoError::FileRead { .. }));
    assert_eq!(err.error_type(), "FileRead");
}

#[test]
fn malformed_toml_is_syntax_error() {
    let fs = MockFileSystem::new().with_file("/project/.auto-analyzer.toml", "[watch\n");
    let err = FileConfigLoader::with_fs(fs).load().unwrap_err();
    assert!(matches!(err, AutoError::TomlParse(_)));
}
