//! Layered configuration resolution.
//!
//! A [`ConfigResolver`] owns an ordered list of [`Source`]s and returns the
//! first non-blank value for a key. The standard chain is:
//!
//! 1. environment variables
//! 2. `project.toml` (nearest, up to three parents)
//! 3. `local.properties`, then `gradle.properties` in the project root
//! 4. `gradle.properties` in `$GRADLE_USER_HOME` or `~/.gradle`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::core::constants;
use crate::core::document::Document;
use crate::core::key::ConfigKey;
use crate::core::properties::PropertiesFile;
use crate::core::repository::CustomRepoEntry;
use crate::core::source::{Environment, Origin, Source, Tier};
use crate::error::{ConfigError, Result};

/// A value together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub value: String,
    pub origin: Origin,
}

/// Resolves configuration keys against an ordered source chain.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    sources: Vec<Source>,
    root: PathBuf,
}

impl ConfigResolver {
    /// Build the standard chain for a project directory using the process
    /// environment.
    pub fn discover(start: &Path) -> Self {
        Self::discover_with_env(start, Environment::Process)
    }

    /// Build the standard chain with an explicit environment.
    pub fn discover_with_env(start: &Path, env: Environment) -> Self {
        let document = Document::discover(start);
        let root = document
            .as_ref()
            .and_then(|doc| doc.dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| start.to_path_buf());

        let mut sources = vec![Source::Environment(env.clone())];

        if let Some(doc) = document {
            sources.push(Source::Document(doc));
        }

        for name in constants::PROJECT_PROPERTY_FILES {
            sources.push(Source::Properties(
                Tier::Project,
                PropertiesFile::open(root.join(name)),
            ));
        }

        if let Some(user_dir) = user_config_dir(&env) {
            sources.push(Source::Properties(
                Tier::User,
                PropertiesFile::open(user_dir.join(constants::USER_PROPERTY_FILE)),
            ));
        }

        debug!(root = %root.display(), sources = sources.len(), "resolver ready");

        Self { sources, root }
    }

    /// Build a resolver over an explicit chain, highest priority first.
    pub fn with_sources(sources: Vec<Source>, root: PathBuf) -> Self {
        Self { sources, root }
    }

    /// Project root: the directory holding `project.toml`, or the start
    /// directory when there is none.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sources in priority order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// First non-blank value for `key`, with its origin.
    pub fn resolve_with_origin(&self, key: ConfigKey) -> Option<Resolved> {
        let found = self.sources.iter().find_map(|source| {
            source.lookup(key).map(|value| Resolved {
                value,
                origin: source.origin(key),
            })
        });

        match &found {
            Some(resolved) => debug!(key = %key, source = %resolved.origin, "resolved"),
            None => debug!(key = %key, "not configured"),
        }

        found
    }

    /// Resolve `key`, falling back to `default`.
    pub fn resolve(&self, key: ConfigKey, default: &str) -> String {
        self.resolve_with_origin(key)
            .map(|r| r.value)
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolve a key the caller cannot do without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no source holds a value.
    pub fn require(&self, key: ConfigKey) -> Result<String> {
        self.resolve_with_origin(key).map(|r| r.value).ok_or_else(|| {
            ConfigError::Missing {
                key: key.name(),
                env_var: key.env_var(),
                property: key.property_key(),
            }
            .into()
        })
    }

    /// Resolve a comma-separated list, trimming items and dropping empties.
    pub fn resolve_list(&self, key: ConfigKey) -> Vec<String> {
        split_list(&self.resolve(key, ""))
    }

    /// Resolve a flag. Unset keys yield `default`.
    pub fn resolve_bool(&self, key: ConfigKey, default: bool) -> bool {
        match self.resolve_with_origin(key) {
            Some(resolved) => is_truthy(&resolved.value),
            None => default,
        }
    }

    /// Custom Maven repositories, zipped by position from the url,
    /// username and password lists.
    pub fn custom_repositories(&self) -> Vec<CustomRepoEntry> {
        CustomRepoEntry::zip(
            self.resolve_list(ConfigKey::CustomUrls),
            self.resolve_list(ConfigKey::CustomUsernames),
            self.resolve_list(ConfigKey::CustomPasswords),
        )
    }

    /// Resolve every key once.
    pub fn snapshot(&self) -> ResolvedConfig {
        let values = ConfigKey::ALL
            .iter()
            .filter_map(|&key| self.resolve_with_origin(key).map(|r| (key, r)))
            .collect();
        ResolvedConfig { values }
    }
}

/// Every configured key, resolved once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    values: BTreeMap<ConfigKey, Resolved>,
}

impl ResolvedConfig {
    /// Value for a key, if configured
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(&key).map(|r| r.value.as_str())
    }

    /// Value for a key, or `default`
    pub fn get_or(&self, key: ConfigKey, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Where a key's value came from
    pub fn origin(&self, key: ConfigKey) -> Option<&Origin> {
        self.values.get(&key).map(|r| &r.origin)
    }

    /// Comma-separated list value
    pub fn list(&self, key: ConfigKey) -> Vec<String> {
        split_list(self.get(key).unwrap_or_default())
    }

    /// Flag value, or `default` when unset
    pub fn flag(&self, key: ConfigKey, default: bool) -> bool {
        self.get(key).map(is_truthy).unwrap_or(default)
    }

    /// Custom repositories, zipped by position
    pub fn custom_repositories(&self) -> Vec<CustomRepoEntry> {
        CustomRepoEntry::zip(
            self.list(ConfigKey::CustomUrls),
            self.list(ConfigKey::CustomUsernames),
            self.list(ConfigKey::CustomPasswords),
        )
    }

    /// Number of configured keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key is configured
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split a comma-separated value, trimming items and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a value counts as `true`.
pub fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    constants::TRUTHY.contains(&lowered.as_str())
}

fn user_config_dir(env: &Environment) -> Option<PathBuf> {
    if let Some(dir) = env.var(constants::USER_HOME_ENV) {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::home_dir().map(|home| home.join(constants::USER_HOME_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn props(tier: Tier, name: &str, contents: &str) -> Source {
        Source::Properties(tier, PropertiesFile::parse(contents, PathBuf::from(name)))
    }

    fn doc(contents: &str) -> Source {
        Source::Document(Document::parse(contents, PathBuf::from("project.toml")).unwrap())
    }

    fn full_chain() -> ConfigResolver {
        ConfigResolver::with_sources(
            vec![
                Source::Environment(Environment::fixed([("MAVEN_CENTRAL_USERNAME", "from-env")])),
                doc("[publish.maven.central]\nusername = \"from-doc\"\npassword = \"doc-pass\"\n\n[project]\nname = \"doc-name\"\n"),
                props(
                    Tier::Project,
                    "gradle.properties",
                    "mavenCentralUsername=from-project\nmavenCentralPassword=project-pass\nprojectName=project-name\nprojectGroup=com.example\n",
                ),
                props(
                    Tier::User,
                    "user.properties",
                    "mavenCentralUsername=from-user\nprojectGroup=org.user\nprojectVersion=9.9.9\n",
                ),
            ],
            PathBuf::from("."),
        )
    }

    #[test]
    fn test_priority_order() {
        let resolver = full_chain();
        assert_eq!(resolver.resolve(ConfigKey::CentralUsername, ""), "from-env");
        assert_eq!(resolver.resolve(ConfigKey::CentralPassword, ""), "doc-pass");
        assert_eq!(resolver.resolve(ConfigKey::ProjectName, ""), "doc-name");
        assert_eq!(resolver.resolve(ConfigKey::ProjectGroup, ""), "com.example");
        assert_eq!(resolver.resolve(ConfigKey::ProjectVersion, ""), "9.9.9");
        assert_eq!(resolver.resolve(ConfigKey::LocalPath, "fallback"), "fallback");
    }

    #[test]
    fn test_value_returned_verbatim() {
        let resolver = ConfigResolver::with_sources(
            vec![Source::Environment(Environment::fixed([(
                "SIGNING_PASSWORD",
                " pass ",
            )]))],
            PathBuf::from("."),
        );
        assert_eq!(resolver.resolve(ConfigKey::SigningPassword, ""), " pass ");
        assert_eq!(
            resolver.snapshot().get(ConfigKey::SigningPassword),
            Some(" pass ")
        );
    }

    #[test]
    fn test_repeated_property_last_wins() {
        let resolver = ConfigResolver::with_sources(
            vec![props(
                Tier::Project,
                "gradle.properties",
                "projectVersion=1.0.0\nprojectVersion=2.0.0\n",
            )],
            PathBuf::from("."),
        );
        assert_eq!(resolver.resolve(ConfigKey::ProjectVersion, ""), "2.0.0");
    }

    #[test]
    fn test_origin_reported() {
        let resolver = full_chain();
        let resolved = resolver
            .resolve_with_origin(ConfigKey::ProjectGroup)
            .unwrap();
        assert_eq!(
            resolved.origin,
            Origin::ProjectProperties(PathBuf::from("gradle.properties"))
        );
        assert!(resolver.resolve_with_origin(ConfigKey::LocalPath).is_none());
    }

    #[test]
    fn test_blank_values_fall_through() {
        let resolver = ConfigResolver::with_sources(
            vec![
                Source::Environment(Environment::fixed([("SIGNING_KEY_ID", "   ")])),
                props(Tier::Project, "gradle.properties", "signingInMemoryKeyId=\n"),
                props(Tier::User, "user.properties", "signingInMemoryKeyId=ABCD1234\n"),
            ],
            PathBuf::from("."),
        );
        assert_eq!(resolver.resolve(ConfigKey::SigningKeyId, ""), "ABCD1234");
    }

    #[test]
    fn test_require_missing() {
        let resolver = ConfigResolver::with_sources(Vec::new(), PathBuf::from("."));
        let err = resolver.require(ConfigKey::CentralUsername).unwrap_err();
        assert!(err.to_string().contains("MAVEN_CENTRAL_USERNAME"));
    }

    #[test]
    fn test_resolve_list() {
        let resolver = ConfigResolver::with_sources(
            vec![Source::Environment(Environment::fixed([(
                "MAVEN_CUSTOM_URLS",
                "a, b ,,c",
            )]))],
            PathBuf::from("."),
        );
        assert_eq!(resolver.resolve_list(ConfigKey::CustomUrls), vec!["a", "b", "c"]);
        assert!(resolver.resolve_list(ConfigKey::CustomUsernames).is_empty());
    }

    #[test]
    fn test_resolve_bool() {
        for (value, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("yes", true),
            ("On", true),
            ("false", false),
            ("0", false),
            ("enabled", false),
        ] {
            let resolver = ConfigResolver::with_sources(
                vec![Source::Environment(Environment::fixed([("SIGNING_ENABLED", value)]))],
                PathBuf::from("."),
            );
            assert_eq!(
                resolver.resolve_bool(ConfigKey::SignEnabled, !expected),
                expected,
                "value {:?}",
                value
            );
        }

        let empty = ConfigResolver::with_sources(Vec::new(), PathBuf::from("."));
        assert!(empty.resolve_bool(ConfigKey::SignEnabled, true));
        assert!(!empty.resolve_bool(ConfigKey::SignEnabled, false));
    }

    #[test]
    fn test_custom_repositories_zip() {
        let resolver = ConfigResolver::with_sources(
            vec![Source::Environment(Environment::fixed([
                ("MAVEN_CUSTOM_URLS", "https://a.example, https://b.example"),
                ("MAVEN_CUSTOM_USERNAMES", "ua"),
            ]))],
            PathBuf::from("."),
        );
        let repos = resolver.custom_repositories();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].index, 1);
        assert_eq!(repos[0].url, "https://a.example");
        assert_eq!(repos[0].username, "ua");
        assert_eq!(repos[1].username, "");
        assert_eq!(repos[1].password, "");
    }

    #[test]
    fn test_snapshot_matches_resolve() {
        let resolver = full_chain();
        let snapshot = resolver.snapshot();
        for &key in ConfigKey::ALL {
            assert_eq!(snapshot.get(key).unwrap_or(""), resolver.resolve(key, ""));
        }
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot, resolver.snapshot());
    }

    #[test]
    fn test_discover_reads_files() {
        let tmp = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("project.toml"),
            "[project]\nname = \"mylib\"\n",
        )
        .unwrap();
        fs::write(tmp.path().join("local.properties"), "projectGroup=com.local\n").unwrap();
        fs::write(
            tmp.path().join("gradle.properties"),
            "projectGroup=com.gradle\nprojectVersion=1.0.0\n",
        )
        .unwrap();
        fs::write(home.path().join("gradle.properties"), "mavenLocalPath=/tmp/repo\n").unwrap();

        let nested = tmp.path().join("module");
        fs::create_dir_all(&nested).unwrap();

        let env = Environment::fixed([(
            "GRADLE_USER_HOME",
            home.path().to_string_lossy().to_string(),
        )]);
        let resolver = ConfigResolver::discover_with_env(&nested, env);

        assert_eq!(resolver.root(), tmp.path());
        assert_eq!(resolver.sources().len(), 5);
        assert!(matches!(resolver.sources()[0], Source::Environment(_)));
        assert!(matches!(resolver.sources()[1], Source::Document(_)));
        assert!(matches!(resolver.sources()[4], Source::Properties(Tier::User, _)));
        assert_eq!(resolver.resolve(ConfigKey::ProjectName, ""), "mylib");
        assert_eq!(resolver.resolve(ConfigKey::ProjectGroup, ""), "com.local");
        assert_eq!(resolver.resolve(ConfigKey::ProjectVersion, ""), "1.0.0");
        assert_eq!(resolver.resolve(ConfigKey::LocalPath, ""), "/tmp/repo");
    }

    #[test]
    fn test_discover_malformed_document_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("project.toml"), "[project\n").unwrap();
        fs::write(tmp.path().join("gradle.properties"), "projectName=fallback\n").unwrap();

        let home = TempDir::new().unwrap();
        let env = Environment::fixed([(
            "GRADLE_USER_HOME",
            home.path().to_string_lossy().to_string(),
        )]);
        let resolver = ConfigResolver::discover_with_env(tmp.path(), env);
        assert!(!resolver
            .sources()
            .iter()
            .any(|source| matches!(source, Source::Document(_))));
        assert_eq!(resolver.resolve(ConfigKey::ProjectName, ""), "fallback");
    }
}
