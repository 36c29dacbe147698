//! Command-line interface.

pub mod completions;
pub mod get;
pub mod name;
pub mod output;
pub mod repos;
pub mod show;
pub mod signing;
pub mod version;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::resolver::ConfigResolver;
use crate::error::Result;

/// buildprops - layered build configuration for library publishing.
#[derive(Parser)]
#[command(
    name = "buildprops",
    about = "Resolve build configuration, check signing keys and derive versions",
    version
)]
pub struct Cli {
    /// Project directory to resolve from (defaults to the current directory)
    #[arg(short = 'C', long, global = true, env = "BUILDPROPS_DIR")]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved value of a configuration key
    Get {
        /// Key name (e.g. signing-key, SIGNING_KEY or signingInMemoryKey)
        key: String,
        /// Value printed when nothing is configured
        #[arg(short, long, default_value = "")]
        default: String,
        /// Fail when no value is configured
        #[arg(long)]
        require: bool,
        /// Also print where the value came from
        #[arg(long)]
        origin: bool,
    },

    /// Show every configuration key with its source
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Print credentials instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// List custom Maven repositories
    Repos {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive version, tag and publish suffix from git
    Version {
        /// Treat this build as a release (overrides the release key)
        #[arg(long)]
        release: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the signing key and report whether artifacts will be signed
    Signing {
        /// Fail unless signing can go ahead
        #[arg(long)]
        require: bool,
    },

    /// Print archive file names
    Name {
        /// Platform or ABI qualifier
        #[arg(short, long)]
        qualifier: Option<String>,
        /// Release channel (defaults to the publish suffix)
        #[arg(long)]
        channel: Option<String>,
        /// Build type, e.g. debug or release
        #[arg(short, long)]
        build_type: Option<String>,
        /// File extension
        #[arg(short, long, default_value = "zip")]
        ext: String,
        /// One name per configured Android ABI
        #[arg(long, conflicts_with = "qualifier")]
        all_abis: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
///
/// The resolver is built once, by the command that needs it, and passed
/// down explicitly.
pub fn execute(command: Command, dir: Option<PathBuf>) -> Result<()> {
    use Command::*;

    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let resolver = || ConfigResolver::discover(&dir);

    match command {
        Get {
            key,
            default,
            require,
            origin,
        } => get::execute(&resolver(), &key, &default, require, origin),
        Show { json, reveal } => show::execute(&resolver(), json, reveal),
        Repos { json } => repos::execute(&resolver(), json),
        Version { release, json } => version::execute(&resolver(), release, json),
        Signing { require } => signing::execute(&resolver(), require),
        Name {
            qualifier,
            channel,
            build_type,
            ext,
            all_abis,
        } => name::execute(
            &resolver(),
            name::Options {
                qualifier,
                channel,
                build_type,
                ext,
                all_abis,
            },
        ),
        Completions { shell } => completions::execute(shell),
    }
}
