//! Default locations, each overridable through an environment variable.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;

/// Overrides the registry document path.
pub const REGISTRY_ENV: &str = "GITPROF_REGISTRY";
/// Overrides the SSH directory (keys, `config`, `known_hosts`).
pub const SSH_DIR_ENV: &str = "GITPROF_SSH_DIR";
/// Overrides the configuration file path.
pub const CONFIG_ENV: &str = "GITPROF_CONFIG";

/// Registry file name under the home directory.
pub const REGISTRY_FILE: &str = ".git_profiles.json";

/// The user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
}

fn from_env(var: &str) -> Option<PathBuf> {
    non_empty(std::env::var_os(var))
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// `$GITPROF_REGISTRY` or `~/.git_profiles.json`.
///
/// # Errors
///
/// Returns an error if no override is set and the home directory is unknown.
pub fn registry_path() -> Result<PathBuf> {
    match from_env(REGISTRY_ENV) {
        Some(path) => Ok(path),
        None => Ok(home_dir()?.join(REGISTRY_FILE)),
    }
}

/// `$GITPROF_SSH_DIR` or `~/.ssh`.
///
/// # Errors
///
/// Returns an error if no override is set and the home directory is unknown.
pub fn ssh_dir() -> Result<PathBuf> {
    match from_env(SSH_DIR_ENV) {
        Some(path) => Ok(path),
        None => Ok(home_dir()?.join(".ssh")),
    }
}

/// `$GITPROF_CONFIG` or `~/.gitprof/config.yaml`.
///
/// # Errors
///
/// Returns an error if no override is set and the home directory is unknown.
pub fn config_path() -> Result<PathBuf> {
    match from_env(CONFIG_ENV) {
        Some(path) => Ok(path),
        None => Ok(home_dir()?.join(".gitprof").join("config.yaml")),
    }
}
