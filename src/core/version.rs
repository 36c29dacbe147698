//! Version, tag and publish suffix derivation.
//!
//! Everything here reads git state and degrades to a fixed default when
//! git is missing, the directory is not a repository, or a query fails.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::constants::{DIRTY_SUFFIX, GIT_TIMEOUT_SECS, PRERELEASE_CHANNEL, UNKNOWN};
use crate::core::process::run_with_deadline;

/// Version control queries used for versioning.
///
/// Every method is best-effort and returns `None` when the answer is
/// unavailable.
pub trait Vcs {
    /// Short hash of HEAD.
    fn revision(&self) -> Option<String>;

    /// Current branch name.
    fn branch(&self) -> Option<String>;

    /// Number of commits reachable from HEAD.
    fn commit_count(&self) -> Option<u32>;

    /// Commit date of HEAD as `YYYY-MM-DD`.
    fn head_date(&self) -> Option<String>;

    /// Most recent tag reachable from HEAD.
    fn last_tag(&self) -> Option<String>;

    /// Commits between `tag` and HEAD.
    fn commits_since(&self, tag: &str) -> Option<u32>;

    /// Whether the working tree has uncommitted changes.
    fn is_dirty(&self) -> Option<bool>;
}

/// [`Vcs`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    git: Option<PathBuf>,
    dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Query the repository containing `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let git = which::which("git").ok();
        if git.is_none() {
            debug!("git not found on PATH, using version defaults");
        }
        Self {
            git,
            dir: dir.as_ref().to_path_buf(),
            timeout: Duration::from_secs(GIT_TIMEOUT_SECS),
        }
    }

    /// Override the per-query deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run git and return its stdout when it exits successfully.
    fn run_raw(&self, args: &[&str]) -> Option<String> {
        let git = self.git.as_ref()?;
        trace!(?args, dir = %self.dir.display(), "running git");

        let mut command = Command::new(git);
        command.args(args).current_dir(&self.dir);

        let finished = run_with_deadline(&mut command, self.timeout)?;
        if !finished.status.success() {
            trace!(?args, code = ?finished.status.code(), "git exited unsuccessfully");
            return None;
        }
        Some(finished.stdout)
    }

    /// Like [`Self::run_raw`] but treats empty output as no answer.
    fn run(&self, args: &[&str]) -> Option<String> {
        let output = self.run_raw(args)?;
        let trimmed = output.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl Vcs for GitCli {
    fn revision(&self) -> Option<String> {
        self.run(&["rev-parse", "--short", "HEAD"])
    }

    fn branch(&self) -> Option<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn commit_count(&self) -> Option<u32> {
        self.run(&["rev-list", "--count", "HEAD"])?.parse().ok()
    }

    fn head_date(&self) -> Option<String> {
        self.run(&["log", "-1", "--format=%cd", "--date=short"])
    }

    fn last_tag(&self) -> Option<String> {
        self.run(&["describe", "--tags", "--abbrev=0"])
    }

    fn commits_since(&self, tag: &str) -> Option<u32> {
        let range = format!("{}..HEAD", tag);
        self.run(&["rev-list", "--count", &range])?.parse().ok()
    }

    fn is_dirty(&self) -> Option<bool> {
        self.run_raw(&["status", "--porcelain"])
            .map(|out| !out.trim().is_empty())
    }
}

/// Version details for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Version plus publish suffix, e.g. `1.2.3-beta.4`
    pub version_name: String,
    /// Commit count, used as a monotonically increasing build number
    pub version_code: u32,
    pub revision: String,
    pub branch: String,
    /// `YYYY-MM-DD`
    pub build_timestamp: String,
    pub publish_suffix: String,
    pub tag: String,
}

/// Derives version details from a [`Vcs`].
#[derive(Debug, Clone)]
pub struct VersionDeriver<V: Vcs> {
    vcs: V,
}

impl VersionDeriver<GitCli> {
    /// Deriver for the git repository containing `dir`.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(GitCli::new(dir))
    }
}

impl<V: Vcs> VersionDeriver<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    /// Short commit hash, or `unknown`.
    pub fn revision(&self) -> String {
        self.vcs.revision().unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Branch name, or `unknown`.
    pub fn branch(&self) -> String {
        self.vcs.branch().unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Commit count, or `0`.
    pub fn commit_count(&self) -> String {
        self.vcs.commit_count().unwrap_or(0).to_string()
    }

    /// HEAD commit date, or today.
    pub fn build_timestamp(&self) -> String {
        self.vcs
            .head_date()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
    }

    /// Publish suffix for the current tree.
    pub fn publish_suffix(&self, release: bool) -> String {
        if release {
            return String::new();
        }

        let tag = self.vcs.last_tag();
        let since = tag
            .as_deref()
            .and_then(|t| self.vcs.commits_since(t))
            .unwrap_or(0);
        let dirty = tag.is_some() && self.vcs.is_dirty().unwrap_or(false);

        publish_suffix(false, tag.as_deref(), since, dirty)
    }

    /// Everything at once.
    pub fn derive(&self, version: &str, release: bool) -> VersionInfo {
        let publish_suffix = self.publish_suffix(release);
        let info = VersionInfo {
            version_name: version_name(version, &publish_suffix),
            version_code: self.vcs.commit_count().unwrap_or(0),
            revision: self.revision(),
            branch: self.branch(),
            build_timestamp: self.build_timestamp(),
            tag: tag_name(version, &publish_suffix),
            publish_suffix,
        };

        debug!(
            version = %info.version_name,
            tag = %info.tag,
            revision = %info.revision,
            "version derived"
        );
        info
    }
}

/// Publish suffix from already-gathered facts.
///
/// - release: empty
/// - no tag yet: `beta.0`
/// - otherwise: `beta.<commits since tag>`, plus `-dirty` for a dirty tree
pub fn publish_suffix(release: bool, last_tag: Option<&str>, commits_since: u32, dirty: bool) -> String {
    if release {
        return String::new();
    }
    if last_tag.is_none() {
        return format!("{}.0", PRERELEASE_CHANNEL);
    }

    let mut suffix = format!("{}.{}", PRERELEASE_CHANNEL, commits_since);
    if dirty {
        suffix.push_str(DIRTY_SUFFIX);
    }
    suffix
}

/// `v<version>` or `v<version>-<suffix>`.
pub fn tag_name(version: &str, suffix: &str) -> String {
    format!("v{}", version_name(version, suffix))
}

/// `<version>` or `<version>-<suffix>`.
pub fn version_name(version: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        version.to_string()
    } else {
        format!("{}-{}", version, suffix)
    }
}
