//! Name command.

use crate::core::constants::DEFAULT_VERSION;
use crate::core::key::ConfigKey;
use crate::core::naming::{self, ArchiveName};
use crate::core::resolver::ConfigResolver;
use crate::core::version::VersionDeriver;
use crate::error::Result;

/// Options for the name command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub qualifier: Option<String>,
    pub channel: Option<String>,
    pub build_type: Option<String>,
    pub ext: String,
    pub all_abis: bool,
}

/// Print archive file names for the project.
///
/// Without `--channel`, pre-release builds use the publish suffix.
pub fn execute(resolver: &ConfigResolver, opts: Options) -> Result<()> {
    let config = resolver.snapshot();
    let project = config.get_or(ConfigKey::ProjectName, &default_project(resolver));
    let version = config.get_or(ConfigKey::ProjectVersion, DEFAULT_VERSION);

    let channel = match opts.channel {
        Some(channel) => channel,
        None => {
            let release = config.flag(ConfigKey::Release, false);
            VersionDeriver::for_dir(resolver.root()).publish_suffix(release)
        }
    };

    if opts.all_abis {
        let abis = config.list(ConfigKey::AndroidAbis);
        for file in naming::per_abi_archives(&project, &abis, &version, &opts.ext) {
            println!("{}", file);
        }
        return Ok(());
    }

    let mut name = ArchiveName::new(project).version(version).channel(channel);
    if let Some(qualifier) = opts.qualifier {
        name = name.qualifier(qualifier);
    }
    if let Some(build_type) = opts.build_type {
        name = name.build_type(build_type);
    }

    println!("{}", name.file_name(&opts.ext));
    Ok(())
}

/// Project root directory name, used when no project name is configured.
fn default_project(resolver: &ConfigResolver) -> String {
    resolver
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
