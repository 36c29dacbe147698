//! Structured configuration document.
//!
//! Handles locating and reading `project.toml`, addressed by dotted paths
//! such as `publish.maven.central.username`.
//!
//! ```toml
//! [project]
//! name = "mylib"
//! version = "1.2.3"
//!
//! [android]
//! abis = ["arm64-v8a", "x86_64"]
//!
//! [publish.maven.central]
//! username = "alice"
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// A parsed `project.toml`
#[derive(Debug, Clone)]
pub struct Document {
    root: toml::Table,
    path: PathBuf,
}

impl Document {
    /// Parse a document from disk
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading document");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, path.to_path_buf())
    }

    /// Parse document text that is already in memory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn parse(contents: &str, path: PathBuf) -> Result<Self> {
        let root: toml::Table = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { root, path })
    }

    /// Find the nearest document starting at `start` and walking up to
    /// [`constants::DOCUMENT_SEARCH_DEPTH`] parent directories.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .take(constants::DOCUMENT_SEARCH_DEPTH + 1)
            .map(|dir| dir.join(constants::DOCUMENT_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Locate and load the nearest document.
    ///
    /// Missing, unreadable and malformed documents all yield `None`; the
    /// latter two are logged.
    pub fn discover(start: &Path) -> Option<Self> {
        let Some(path) = Self::find(start) else {
            debug!(start = %start.display(), "no {} found", constants::DOCUMENT_FILE);
            return None;
        };

        match Self::load(&path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(error = %e, "ignoring structured configuration");
                None
            }
        }
    }

    /// Look up a dotted path.
    ///
    /// Strings are returned as-is, numbers and booleans in their display
    /// form, and arrays of scalars joined with `,`. Tables and missing
    /// paths yield `None`.
    pub fn get(&self, dotted: &str) -> Option<String> {
        let mut segments = dotted.split('.');
        let first = segments.next()?;
        let mut value = self.root.get(first)?;

        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }

        match value {
            toml::Value::Array(items) => {
                let parts: Option<Vec<String>> = items.iter().map(scalar).collect();
                parts.map(|p| p.join(","))
            }
            other => scalar(other),
        }
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the document.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

fn scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}
