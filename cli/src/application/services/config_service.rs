//! Reading and changing the settings file.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::GitprofConfig;

/// Effective settings: the file's values over the built-in defaults.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<GitprofConfig> {
    let config = store.load()?;
    tracing::debug!(path = %store.path().display(), host = %config.service.host, "config loaded");
    Ok(config)
}

/// Validate `key = value` against the current file and write it back.
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Fails on an unknown key, a value of the wrong shape, or a store error.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<GitprofConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    tracing::info!(key, "config updated");
    Ok(config)
}
