//! Flat property files.
//!
//! Reads `key=value` files such as `gradle.properties` and
//! `local.properties`. A missing file is an empty source.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

/// A parsed property file
#[derive(Debug, Clone)]
pub struct PropertiesFile {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl PropertiesFile {
    /// Parse a property file from disk
    ///
    /// Skips empty lines and comments (lines starting with `#` or `!`).
    /// Accepts `=` or `:` as the separator. Values are kept verbatim apart
    /// from surrounding whitespace. A repeated key keeps its last value,
    /// matching how Gradle reads the same file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&contents, path.to_path_buf()))
    }

    /// Load a property file, treating a missing or unreadable file as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            debug!(path = %path.display(), "property file not present");
            return Self::from_pairs(Vec::new(), path.to_path_buf());
        }

        match Self::load(path) {
            Ok(file) => {
                debug!(path = %path.display(), entries = file.len(), "property file loaded");
                file
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable property file");
                Self::from_pairs(Vec::new(), path.to_path_buf())
            }
        }
    }

    /// Parse property text that is already in memory
    pub fn parse(contents: &str, path: PathBuf) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let Some((key, value)) = split_entry(line) else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = value.trim().to_string();
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key.to_string(), value)),
            }
        }

        Self { entries, path }
    }

    /// Create from raw key-value pairs
    pub fn from_pairs(pairs: Vec<(String, String)>, path: PathBuf) -> Self {
        Self {
            entries: pairs,
            path,
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Split on the first `=` or `:`, whichever comes first.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(['=', ':'])?;
    Some((&line[..idx], &line[idx + 1..]))
}
