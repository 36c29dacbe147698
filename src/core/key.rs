//! Configuration keys.
//!
//! Every setting buildprops knows about, with the names it is looked up
//! under in each source.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// A configurable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigKey {
    CentralUsername,
    CentralPassword,
    SigningKey,
    SigningKeyId,
    SigningPassword,
    SignEnabled,
    LocalPath,
    CustomUrls,
    CustomUsernames,
    CustomPasswords,
    Release,
    ProjectName,
    ProjectGroup,
    ProjectVersion,
    AndroidAbis,
}

struct Names {
    name: &'static str,
    env_var: &'static str,
    property: &'static str,
    path: &'static str,
}

impl ConfigKey {
    /// All keys, in display order.
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::ProjectName,
        ConfigKey::ProjectGroup,
        ConfigKey::ProjectVersion,
        ConfigKey::Release,
        ConfigKey::AndroidAbis,
        ConfigKey::CentralUsername,
        ConfigKey::CentralPassword,
        ConfigKey::LocalPath,
        ConfigKey::CustomUrls,
        ConfigKey::CustomUsernames,
        ConfigKey::CustomPasswords,
        ConfigKey::SignEnabled,
        ConfigKey::SigningKey,
        ConfigKey::SigningKeyId,
        ConfigKey::SigningPassword,
    ];

    fn names(self) -> Names {
        let (name, env_var, property, path) = match self {
            Self::CentralUsername => (
                "central-username",
                "MAVEN_CENTRAL_USERNAME",
                "mavenCentralUsername",
                "publish.maven.central.username",
            ),
            Self::CentralPassword => (
                "central-password",
                "MAVEN_CENTRAL_PASSWORD",
                "mavenCentralPassword",
                "publish.maven.central.password",
            ),
            Self::SigningKey => (
                "signing-key",
                "SIGNING_KEY",
                "signingInMemoryKey",
                "publish.signing.key",
            ),
            Self::SigningKeyId => (
                "signing-key-id",
                "SIGNING_KEY_ID",
                "signingInMemoryKeyId",
                "publish.signing.key_id",
            ),
            Self::SigningPassword => (
                "signing-password",
                "SIGNING_PASSWORD",
                "signingInMemoryKeyPassword",
                "publish.signing.password",
            ),
            Self::SignEnabled => (
                "sign-enabled",
                "SIGNING_ENABLED",
                "signEnabled",
                "publish.signing.enabled",
            ),
            Self::LocalPath => (
                "local-path",
                "MAVEN_LOCAL_PATH",
                "mavenLocalPath",
                "publish.maven.local.path",
            ),
            Self::CustomUrls => (
                "custom-urls",
                "MAVEN_CUSTOM_URLS",
                "mavenCustomUrls",
                "publish.maven.custom.urls",
            ),
            Self::CustomUsernames => (
                "custom-usernames",
                "MAVEN_CUSTOM_USERNAMES",
                "mavenCustomUsernames",
                "publish.maven.custom.usernames",
            ),
            Self::CustomPasswords => (
                "custom-passwords",
                "MAVEN_CUSTOM_PASSWORDS",
                "mavenCustomPasswords",
                "publish.maven.custom.passwords",
            ),
            Self::Release => ("release", "RELEASE", "release", "publish.release"),
            Self::ProjectName => ("project-name", "PROJECT_NAME", "projectName", "project.name"),
            Self::ProjectGroup => (
                "project-group",
                "PROJECT_GROUP",
                "projectGroup",
                "project.group",
            ),
            Self::ProjectVersion => (
                "project-version",
                "PROJECT_VERSION",
                "projectVersion",
                "project.version",
            ),
            Self::AndroidAbis => ("android-abis", "ANDROID_ABIS", "androidAbis", "android.abis"),
        };
        Names {
            name,
            env_var,
            property,
            path,
        }
    }

    /// Kebab-case name used on the command line.
    pub fn name(self) -> &'static str {
        self.names().name
    }

    /// Environment variable checked first.
    pub fn env_var(self) -> &'static str {
        self.names().env_var
    }

    /// Key in the flat property files.
    pub fn property_key(self) -> &'static str {
        self.names().property
    }

    /// Dotted path into the structured document.
    pub fn structured_path(self) -> &'static str {
        self.names().path
    }

    /// Whether the value is a credential that must not be printed or logged.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Self::CentralPassword
                | Self::SigningKey
                | Self::SigningPassword
                | Self::CustomPasswords
        )
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    /// Accepts the kebab-case name, the env var or the property key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|k| {
                k.name().eq_ignore_ascii_case(s) || k.env_var() == s || k.property_key() == s
            })
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
