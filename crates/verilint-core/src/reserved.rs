//! Reserved-word resource interpolated into the prompt rules.

use std::path::Path;

use tracing::{debug, warn};

/// Verilog reserved words, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedWords(String);

impl ReservedWords {
    pub fn new(words: impl Into<String>) -> Self {
        Self(words.into())
    }

    /// Read the resource file. A missing or unreadable file is not fatal:
    /// the list degrades to empty and a warning is logged.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(words) => {
                debug!(path = %path.display(), bytes = words.len(), "loaded reserved words");
                Self(words)
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "reserved words file not readable, using empty list"
                );
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
