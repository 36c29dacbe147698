//! Archive and artifact names.
//!
//! Pure string formatting. Empty components are skipped rather than
//! rejected, so bad input only ever produces a shorter name.

use crate::core::constants::NAME_SEPARATOR;

/// Components of an archive file name, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveName {
    project: String,
    qualifier: Option<String>,
    version: Option<String>,
    channel: Option<String>,
    build_type: Option<String>,
}

impl ArchiveName {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    /// Platform or ABI, e.g. `android-arm64-v8a`
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Release channel, e.g. `beta.4`
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Build type, e.g. `debug`
    pub fn build_type(mut self, build_type: impl Into<String>) -> Self {
        self.build_type = Some(build_type.into());
        self
    }

    /// Name without extension.
    pub fn stem(&self) -> String {
        join([
            Some(self.project.as_str()),
            self.qualifier.as_deref(),
            self.version.as_deref(),
            self.channel.as_deref(),
            self.build_type.as_deref(),
        ])
    }

    /// Name with `.ext` appended when `ext` is non-empty.
    pub fn file_name(&self, ext: &str) -> String {
        let stem = self.stem();
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, ext)
        }
    }
}

/// Maven artifact id for a platform variant, lower-cased.
pub fn artifact_id(project: &str, platform: &str) -> String {
    join([Some(project), Some(platform)]).to_lowercase()
}

/// Name under which the custom repository at `index` is registered.
pub fn repository_name(index: usize) -> String {
    format!("customMaven{}", index)
}

/// One archive file name per ABI.
pub fn per_abi_archives(project: &str, abis: &[String], version: &str, ext: &str) -> Vec<String> {
    abis.iter()
        .map(|abi| {
            ArchiveName::new(project)
                .qualifier(abi.as_str())
                .version(version)
                .file_name(ext)
        })
        .collect()
}

fn join<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}
