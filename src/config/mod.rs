mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, RealFileSystem};
pub use model::{Config, DEFAULT_MAX_ELAPSED_SECS, DEFAULT_POLL_INTERVAL_SECS, WatchConfig};
pub use validation::{duration_from_secs, validate_config};
