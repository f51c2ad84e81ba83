use std::path::{Path, PathBuf};

use tracing::debug;

use super::Config;
use crate::{AutoError, Result};

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

const LOCAL_CONFIG_NAME: &str = ".auto-analyzer.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform configuration directory for auto-analyzer:
    /// - Windows: `%APPDATA%\auto-analyzer`
    /// - macOS: `~/Library/Application Support/auto-analyzer`
    /// - Linux: `~/.config/auto-analyzer` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "auto-analyzer")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.auto-analyzer.toml` in the current directory
/// 2. `config.toml` in the platform user config directory
/// 3. `Config::default()` if neither exists
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        let found = [self.local_config_path(), self.user_config_path()]
            .into_iter()
            .flatten()
            .find(|path| self.fs.exists(path));

        match found {
            Some(path) => self.load_from_path(&path),
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| AutoError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "loading configuration");
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
