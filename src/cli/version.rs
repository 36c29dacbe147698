//! Version command.

use crate::cli::output;
use crate::core::constants::DEFAULT_VERSION;
use crate::core::key::ConfigKey;
use crate::core::resolver::ConfigResolver;
use crate::core::version::VersionDeriver;
use crate::error::Result;

/// Print version details derived from git.
pub fn execute(resolver: &ConfigResolver, release: bool, json: bool) -> Result<()> {
    let version = resolver.resolve(ConfigKey::ProjectVersion, DEFAULT_VERSION);
    let release = release || resolver.resolve_bool(ConfigKey::Release, false);

    let info = VersionDeriver::for_dir(resolver.root()).derive(&version, release);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    output::section("Version");
    output::kv("version", &info.version_name);
    output::kv("code", info.version_code);
    output::kv("tag", &info.tag);
    output::kv(
        "suffix",
        if info.publish_suffix.is_empty() {
            "(release)"
        } else {
            info.publish_suffix.as_str()
        },
    );
    output::kv("revision", &info.revision);
    output::kv("branch", &info.branch);
    output::kv("built", &info.build_timestamp);

    Ok(())
}
