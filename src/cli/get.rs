//! Get command.

use crate::core::key::ConfigKey;
use crate::core::resolver::ConfigResolver;
use crate::error::Result;

/// Print the resolved value of one key.
///
/// The value goes to stdout on its own line so scripts can capture it.
pub fn execute(
    resolver: &ConfigResolver,
    key: &str,
    default: &str,
    require: bool,
    origin: bool,
) -> Result<()> {
    let key: ConfigKey = key.parse()?;

    if require {
        resolver.require(key)?;
    }

    match resolver.resolve_with_origin(key) {
        Some(resolved) => {
            println!("{}", resolved.value);
            if origin {
                println!("origin: {}", resolved.origin);
            }
        }
        None => {
            println!("{}", default);
            if origin {
                println!("origin: default");
            }
        }
    }

    Ok(())
}
