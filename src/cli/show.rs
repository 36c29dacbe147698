//! Show command.
//!
//! Lists every configuration key with its value and where it came from.

use serde_json::json;

use crate::cli::output;
use crate::core::key::ConfigKey;
use crate::core::resolver::ConfigResolver;
use crate::error::Result;

/// Show all keys.
pub fn execute(resolver: &ConfigResolver, json: bool, reveal: bool) -> Result<()> {
    let config = resolver.snapshot();

    let display = |key: ConfigKey, value: &str| {
        if key.is_secret() && !reveal {
            output::mask(value)
        } else {
            value.to_string()
        }
    };

    if json {
        let entries: Vec<_> = ConfigKey::ALL
            .iter()
            .map(|&key| {
                json!({
                    "key": key.name(),
                    "env": key.env_var(),
                    "property": key.property_key(),
                    "path": key.structured_path(),
                    "value": config.get(key).map(|v| display(key, v)),
                    "origin": config.origin(key),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output::section("Configuration");
    output::kv("root", resolver.root().display());
    output::kv(
        "configured",
        format!("{} of {} keys", config.len(), ConfigKey::ALL.len()),
    );

    if config.is_empty() {
        println!();
        output::dimmed("nothing configured");
        output::hint(&format!(
            "Create project.toml or run {} for key names",
            output::cmd("buildprops show --json")
        ));
        return Ok(());
    }

    println!();
    for &key in ConfigKey::ALL {
        match (config.get(key), config.origin(key)) {
            (Some(value), Some(origin)) => {
                output::kv(key.name(), format!("{}  [{}]", display(key, value), origin));
            }
            _ => output::kv(key.name(), "-"),
        }
    }

    Ok(())
}
