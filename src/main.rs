//! buildprops - layered build configuration for library publishing.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use buildprops::cli::output;
use buildprops::cli::{execute, Cli};
use buildprops::error::{ConfigError, Error, SigningError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("BUILDPROPS_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("buildprops=debug")
        } else {
            EnvFilter::new("buildprops=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.dir) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Config(ConfigError::UnknownKey(_)) => {
                Some("run: buildprops show to list known keys")
            }
            Error::Config(ConfigError::Missing { .. }) => {
                Some("add it to project.toml or gradle.properties")
            }
            Error::Signing(SigningError::Disabled) => Some("set SIGNING_ENABLED=true"),
            Error::Signing(SigningError::NotConfigured) => {
                Some("set SIGNING_KEY or signingInMemoryKey")
            }
            Error::Signing(_) => Some("export the key with: gpg --armor --export-secret-keys <id>"),
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
