//! Signing key preparation.
//!
//! Signing keys usually arrive through a single environment variable or
//! property line, so they are often quoted and use a literal `\n` in place
//! of line breaks. [`prepare`] turns such input back into an armored
//! block and checks its shape before anything tries to sign with it.

use std::fmt;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::constants::{GPG_TIMEOUT_SECS, KEY_BEGIN_MARKER, KEY_END_MARKER, KEY_MIN_LINES};
use crate::core::key::ConfigKey;
use crate::core::process::run_with_deadline;
use crate::core::resolver::ResolvedConfig;
use crate::error::{Result, SigningError};

/// An armored private key in canonical multi-line form.
#[derive(Clone)]
pub struct PreparedSigningKey {
    key_text: Zeroizing<String>,
}

impl PreparedSigningKey {
    /// Key text, newline-delimited
    pub fn as_str(&self) -> &str {
        self.key_text.as_str()
    }

    /// Number of lines in the key text
    pub fn line_count(&self) -> usize {
        self.key_text.lines().count()
    }

    /// Re-run the structural checks.
    pub fn is_valid(&self) -> bool {
        validate(&self.key_text).is_ok()
    }
}

impl fmt::Debug for PreparedSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedSigningKey")
            .field("lines", &self.line_count())
            .finish_non_exhaustive()
    }
}

/// Normalize and validate a raw signing key.
///
/// Strips surrounding whitespace and one layer of matching quotes, turns
/// `\r\n` and literal `\n` sequences into line breaks, then checks the
/// begin marker, the end marker and the line count, in that order.
///
/// # Errors
///
/// Returns the `SigningError` naming the first check that failed.
pub fn prepare(raw: &str) -> std::result::Result<PreparedSigningKey, SigningError> {
    let text = normalize(raw);
    validate(&text)?;

    debug!(lines = text.lines().count(), "signing key prepared");
    Ok(PreparedSigningKey {
        key_text: Zeroizing::new(text),
    })
}

fn normalize(raw: &str) -> String {
    let trimmed = strip_quotes(raw.trim()).trim();
    let mut text = trimmed.replace("\r\n", "\n");
    if text.contains("\\n") {
        text = text.replace("\\n", "\n");
    }
    text
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn validate(text: &str) -> std::result::Result<(), SigningError> {
    if text.trim().is_empty() {
        return Err(SigningError::Empty);
    }
    if !text.starts_with(KEY_BEGIN_MARKER) {
        return Err(SigningError::MissingBeginMarker);
    }
    if !text.contains(KEY_END_MARKER) {
        return Err(SigningError::MissingEndMarker);
    }

    let found = text.lines().count();
    if found < KEY_MIN_LINES {
        return Err(SigningError::TooFewLines {
            found,
            required: KEY_MIN_LINES,
        });
    }

    Ok(())
}

/// What a publishing run should do about signing.
pub enum SigningPlan {
    /// Signing turned off by configuration.
    Disabled,
    /// Signing wanted but not possible; the reason says why.
    Skipped(String),
    /// Sign with this key.
    Enabled {
        key: PreparedSigningKey,
        key_id: Option<String>,
        password: Zeroizing<String>,
    },
}

impl SigningPlan {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

impl fmt::Debug for SigningPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Skipped(reason) => f.debug_tuple("Skipped").field(reason).finish(),
            Self::Enabled { key, key_id, .. } => f
                .debug_struct("Enabled")
                .field("key", key)
                .field("key_id", key_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Decide whether artifacts get signed.
///
/// A missing or malformed key skips signing unless `required` is set, in
/// which case it is an error.
///
/// # Errors
///
/// Returns a `SigningError` only when `required` is true and signing
/// cannot go ahead.
pub fn plan(config: &ResolvedConfig, required: bool) -> Result<SigningPlan> {
    if !config.flag(ConfigKey::SignEnabled, true) {
        if required {
            return Err(SigningError::Disabled.into());
        }
        debug!("signing disabled by configuration");
        return Ok(SigningPlan::Disabled);
    }

    let Some(raw) = config.get(ConfigKey::SigningKey) else {
        if required {
            return Err(SigningError::NotConfigured.into());
        }
        return Ok(SigningPlan::Skipped(SigningError::NotConfigured.to_string()));
    };

    let key = match prepare(raw) {
        Ok(key) => key,
        Err(e) if required => return Err(e.into()),
        Err(e) => {
            warn!(error = %e, "skipping signing");
            return Ok(SigningPlan::Skipped(e.to_string()));
        }
    };

    Ok(SigningPlan::Enabled {
        key,
        key_id: config.get(ConfigKey::SigningKeyId).map(str::to_string),
        password: Zeroizing::new(config.get_or(ConfigKey::SigningPassword, "")),
    })
}

/// Whether the local GPG keyring holds a secret key for `key_id`.
///
/// Best-effort: a missing `gpg`, a non-zero exit or empty output all
/// count as "no".
pub fn keyring_has_secret_key(key_id: &str) -> bool {
    if key_id.trim().is_empty() || which::which("gpg").is_err() {
        return false;
    }

    trace!(key_id, "querying gpg keyring");
    let mut command = Command::new("gpg");
    command.args(["--batch", "--list-secret-keys", key_id]);

    run_with_deadline(&mut command, Duration::from_secs(GPG_TIMEOUT_SECS))
        .map(|out| out.status.success() && !out.stdout.trim().is_empty())
        .unwrap_or(false)
}
