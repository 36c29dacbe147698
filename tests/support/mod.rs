//! Test support utilities for buildprops integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir.
/// No process-global state is mutated; child processes use `.current_dir()`
/// and explicit environment variables so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a `project.toml`.
    pub fn with_document(contents: &str) -> Self {
        let t = Self::new();
        t.write_document(contents);
        t
    }

    /// Write `project.toml` in the project directory.
    pub fn write_document(&self, contents: &str) -> PathBuf {
        self.write("project.toml", contents)
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Write `~/.gradle/gradle.properties` in the temporary home.
    pub fn write_user_properties(&self, contents: &str) -> PathBuf {
        let dir = self.home.path().join(".gradle");
        fs::create_dir_all(&dir).expect("failed to create user gradle dir");
        let path = dir.join("gradle.properties");
        fs::write(&path, contents).expect("failed to write user properties");
        path
    }
}
