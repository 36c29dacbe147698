//! Signing command.
//!
//! Runs the signing gate and reports what a publish would do.

use crate::cli::output;
use crate::core::key::ConfigKey;
use crate::core::resolver::ConfigResolver;
use crate::core::signing::{self, SigningPlan};
use crate::error::Result;

/// Check the signing configuration.
pub fn execute(resolver: &ConfigResolver, require: bool) -> Result<()> {
    let config = resolver.snapshot();
    let plan = signing::plan(&config, require)?;

    match plan {
        SigningPlan::Disabled => {
            output::warn("signing disabled");
            output::hint(&format!(
                "set {} or {} to enable it",
                ConfigKey::SignEnabled.env_var(),
                ConfigKey::SignEnabled.property_key()
            ));
        }
        SigningPlan::Skipped(reason) => {
            output::warn(&format!("signing skipped: {}", reason));
            output::hint(&format!(
                "set {} or {}",
                ConfigKey::SigningKey.env_var(),
                ConfigKey::SigningKey.property_key()
            ));
        }
        SigningPlan::Enabled {
            key,
            key_id,
            password,
        } => {
            output::success("signing key valid");
            output::kv("lines", key.line_count());
            if let Some(origin) = config.origin(ConfigKey::SigningKey) {
                output::kv("source", origin);
            }
            match key_id.as_deref() {
                Some(id) => {
                    output::kv("key id", id);
                    let in_keyring = signing::keyring_has_secret_key(id);
                    output::kv("keyring", if in_keyring { "present" } else { "not found" });
                }
                None => output::kv("key id", "-"),
            }
            output::kv(
                "password",
                if password.is_empty() { "not set" } else { "set" },
            );
        }
    }

    Ok(())
}
