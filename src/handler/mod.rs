//! Extension-keyed dispatch table.
//!
//! A [`HandlerTable`] maps a case-sensitive extension (without the leading dot)
//! to the [`Handler`] that processes files of that type. Looking up an
//! extension with no entry yields [`Lookup::Absent`]; there is no implicit
//! fallback handler.

mod command;

pub use command::{CommandHandler, CommandOutput, PATH_PLACEHOLDER};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::{AutoError, HandlerError, Result};

/// Processes one file.
pub trait Handler<T>: Send + Sync {
    /// # Errors
    /// Returns a [`HandlerError`] when the file cannot be processed.
    fn process(&self, path: &Path) -> std::result::Result<T, HandlerError>;
}

impl<T, F> Handler<T> for F
where
    F: Fn(&Path) -> std::result::Result<T, HandlerError> + Send + Sync,
{
    fn process(&self, path: &Path) -> std::result::Result<T, HandlerError> {
        self(path)
    }
}

/// Outcome of a table lookup.
pub enum Lookup<'a, T> {
    Present(&'a dyn Handler<T>),
    Absent,
}

impl<T> Lookup<'_, T> {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl<T> fmt::Debug for Lookup<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(_) => f.write_str("Present"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

pub struct HandlerTable<T> {
    handlers: HashMap<String, Box<dyn Handler<T>>>,
}

impl<T> HandlerTable<T> {
    #[must_use]
    pub fn builder() -> HandlerTableBuilder<T> {
        HandlerTableBuilder {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn lookup(&self, extension: &str) -> Lookup<'_, T> {
        self.handlers
            .get(extension)
            .map_or(Lookup::Absent, |h| Lookup::Present(h.as_ref()))
    }

    /// Look up the handler for a path's final extension.
    ///
    /// Paths without an extension (including dotfiles like `.env`) are absent.
    #[must_use]
    pub fn lookup_path(&self, path: &Path) -> Lookup<'_, T> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Lookup::Absent, |ext| self.lookup(ext))
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> fmt::Debug for HandlerTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("extensions", &self.extensions())
            .finish()
    }
}

pub struct HandlerTableBuilder<T> {
    entries: Vec<(String, Box<dyn Handler<T>>)>,
}

impl<T> HandlerTableBuilder<T> {
    #[must_use]
    pub fn handler(self, extension: impl Into<String>, handler: impl Handler<T> + 'static) -> Self {
        self.boxed(extension, Box::new(handler))
    }

    #[must_use]
    pub fn boxed(mut self, extension: impl Into<String>, handler: Box<dyn Handler<T>>) -> Self {
        self.entries.push((extension.into(), handler));
        self
    }

    /// Validate every key and freeze the table.
    ///
    /// # Errors
    /// Returns an error if a key is empty, contains a `.`, or is registered twice.
    pub fn build(self) -> Result<HandlerTable<T>> {
        let mut handlers = HashMap::with_capacity(self.entries.len());
        for (key, handler) in self.entries {
            validate_extension_key(&key)?;
            if handlers.insert(key.clone(), handler).is_some() {
                return Err(AutoError::InvalidHandlerKey {
                    key,
                    reason: "registered more than once".to_string(),
                });
            }
        }
        Ok(HandlerTable { handlers })
    }
}

/// Check that a dispatch key can ever match a file extension.
///
/// # Errors
/// Returns an error if the key is empty or contains a `.`.
pub fn validate_extension_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "must not be empty"
    } else if key.starts_with('.') {
        "must not start with '.'"
    } else if key.contains('.') {
        "must be a single extension without '.'"
    } else if key.contains(['/', '\\']) {
        "must not contain path separators"
    } else {
        return Ok(());
    };

    Err(AutoError::InvalidHandlerKey {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
