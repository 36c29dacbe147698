//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use buildprops::ConfigKey;
use std::process::Output;

impl Test {
    /// Create a buildprops command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - every configuration env var removed
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("buildprops").expect("failed to find buildprops binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("GRADLE_USER_HOME");
        cmd.env_remove("BUILDPROPS_DIR");
        cmd.env_remove("BUILDPROPS_LOG");
        for key in ConfigKey::ALL {
            cmd.env_remove(key.env_var());
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `buildprops get` command.
    pub fn get(&self, key: &str) -> Output {
        self.cmd()
            .args(["get", key])
            .output()
            .expect("failed to run buildprops get")
    }

    /// `buildprops get` with extra environment variables.
    pub fn get_with_env(&self, key: &str, env: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.args(["get", key])
            .output()
            .expect("failed to run buildprops get")
    }

    /// Shortcut for `buildprops show` command.
    pub fn show(&self) -> Output {
        self.cmd()
            .arg("show")
            .output()
            .expect("failed to run buildprops show")
    }

    /// Shortcut for `buildprops show --json` command.
    pub fn show_json(&self) -> Output {
        self.cmd()
            .args(["show", "--json"])
            .output()
            .expect("failed to run buildprops show --json")
    }

    /// Shortcut for `buildprops repos --json` command.
    pub fn repos_json(&self) -> Output {
        self.cmd()
            .args(["repos", "--json"])
            .output()
            .expect("failed to run buildprops repos --json")
    }

    /// Shortcut for `buildprops version --json` command.
    pub fn version_json(&self, release: bool) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["version", "--json"]);
        if release {
            cmd.arg("--release");
        }
        cmd.output().expect("failed to run buildprops version")
    }

    /// Shortcut for `buildprops signing` with extra environment variables.
    pub fn signing(&self, require: bool, env: &[(&str, &str)]) -> Output {
        let mut cmd = self.cmd();
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.arg("signing");
        if require {
            cmd.arg("--require");
        }
        cmd.output().expect("failed to run buildprops signing")
    }

    /// Shortcut for `buildprops name` command.
    pub fn name(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("name")
            .args(args)
            .output()
            .expect("failed to run buildprops name")
    }
}
