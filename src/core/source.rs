//! Configuration sources.
//!
//! A source answers one question: does it hold a non-blank value for a
//! key? Sources are tried in a fixed order by the resolver.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::document::Document;
use crate::core::key::ConfigKey;
use crate::core::properties::PropertiesFile;

/// Where environment variables come from.
#[derive(Debug, Clone, Default)]
pub enum Environment {
    /// The real process environment.
    #[default]
    Process,
    /// A fixed set of variables.
    Fixed(BTreeMap<String, String>),
}

impl Environment {
    /// Build a fixed environment from pairs.
    pub fn fixed<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Read a variable.
    pub fn var(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// Property file tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Project,
    User,
}

/// One lookup strategy in the resolver chain.
#[derive(Debug, Clone)]
pub enum Source {
    Environment(Environment),
    Document(Document),
    Properties(Tier, PropertiesFile),
}

impl Source {
    /// Look up a key, returning only non-blank values.
    ///
    /// Whitespace only decides blankness; a non-blank value is returned
    /// exactly as stored.
    pub fn lookup(&self, key: ConfigKey) -> Option<String> {
        let raw = match self {
            Self::Environment(env) => env.var(key.env_var()),
            Self::Document(doc) => doc.get(key.structured_path()),
            Self::Properties(_, props) => props.get(key.property_key()).map(str::to_string),
        }?;

        if raw.trim().is_empty() {
            None
        } else {
            Some(raw)
        }
    }

    /// Describe where a value found in this source came from.
    pub fn origin(&self, key: ConfigKey) -> Origin {
        match self {
            Self::Environment(_) => Origin::Environment(key.env_var().to_string()),
            Self::Document(doc) => Origin::Document(doc.path().to_path_buf()),
            Self::Properties(Tier::Project, props) => {
                Origin::ProjectProperties(props.path().to_path_buf())
            }
            Self::Properties(Tier::User, props) => {
                Origin::UserProperties(props.path().to_path_buf())
            }
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "kebab-case")]
pub enum Origin {
    Environment(String),
    Document(PathBuf),
    ProjectProperties(PathBuf),
    UserProperties(PathBuf),
}

impl Origin {
    /// Short label for the source tier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Environment(_) => "env",
            Self::Document(_) => "document",
            Self::ProjectProperties(_) => "project properties",
            Self::UserProperties(_) => "user properties",
        }
    }

    fn location(&self) -> String {
        match self {
            Self::Environment(var) => var.clone(),
            Self::Document(p) | Self::ProjectProperties(p) | Self::UserProperties(p) => {
                display_path(p)
            }
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.location())
    }
}

fn display_path(p: &Path) -> String {
    p.display().to_string()
}
