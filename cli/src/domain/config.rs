//! Domain types and validators for gitprof configuration.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "service.host",
    "service.user",
    "service.keys_url",
    "probe.timeout_secs",
    "keygen.passphrase",
];
pub const VALID_PASSPHRASE_POLICIES: &[&str] = &["ask", "never"];
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 300;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.gitprof/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GitprofConfig {
    /// Code-hosting service settings.
    pub service: ServiceConfig,
    /// Connection probe settings.
    pub probe: ProbeConfig,
    /// Key generation settings.
    pub keygen: KeygenConfig,
}

/// The remote service every profile authenticates against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Real hostname behind every profile alias.
    pub host: String,
    /// SSH routing user.
    pub user: String,
    /// Page where users register a public key.
    pub keys_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            user: "git".to_string(),
            keys_url: "https://github.com/settings/ssh/new".to_string(),
        }
    }
}

/// Connection probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Seconds before a handshake counts as unreachable.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

/// Whether new keys get a passphrase prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PassphrasePolicy {
    #[default]
    Ask,
    Never,
}

/// Key generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct KeygenConfig {
    pub passphrase: PassphrasePolicy,
}

impl GitprofConfig {
    /// Current value of `key` rendered as text.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "service.host" => Some(self.service.host.clone()),
            "service.user" => Some(self.service.user.clone()),
            "service.keys_url" => Some(self.service.keys_url.clone()),
            "probe.timeout_secs" => Some(self.probe.timeout_secs.to_string()),
            "keygen.passphrase" => Some(
                match self.keygen.passphrase {
                    PassphrasePolicy::Ask => "ask",
                    PassphrasePolicy::Never => "never",
                }
                .to_string(),
            ),
            _ => None,
        }
    }

    /// Validates and applies `value` to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "service.host" => self.service.host = value.to_string(),
            "service.user" => self.service.user = value.to_string(),
            "service.keys_url" => self.service.keys_url = value.to_string(),
            "probe.timeout_secs" => self.probe.timeout_secs = value.parse()?,
            "keygen.passphrase" => {
                self.keygen.passphrase = if value == "never" {
                    PassphrasePolicy::Never
                } else {
                    PassphrasePolicy::Ask
                };
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn invalid(key: &str, value: &str, valid: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into()
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "service.host" => {
            let ok = !value.is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
                && !value.starts_with(['-', '.']);
            if !ok {
                return Err(invalid(key, value, "a hostname such as github.com"));
            }
        }
        "service.user" => {
            let ok = !value.is_empty()
                && value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !ok {
                return Err(invalid(key, value, "a login name such as git"));
            }
        }
        "service.keys_url" => {
            if !value.starts_with("https://") {
                return Err(invalid(key, value, "an https:// URL"));
            }
        }
        "probe.timeout_secs" => match value.parse::<u64>() {
            Ok(n) if (1..=MAX_PROBE_TIMEOUT_SECS).contains(&n) => {}
            _ => {
                return Err(invalid(
                    key,
                    value,
                    &format!("an integer from 1 to {MAX_PROBE_TIMEOUT_SECS}"),
                ));
            }
        },
        "keygen.passphrase" => {
            if !VALID_PASSPHRASE_POLICIES.contains(&value) {
                return Err(invalid(key, value, &VALID_PASSPHRASE_POLICIES.join(", ")));
            }
        }
        _ => {}
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
