//! Profile naming rules and the on-disk layout derived from a profile name.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ProfileError;

/// Longest handle the hosting service accepts.
pub const MAX_NAME_LEN: usize = 39;

/// Prefix of every generated private key file name.
pub const KEY_FILE_PREFIX: &str = "id_rsa_";

#[allow(clippy::expect_used)] // Patterns are compile-time constants
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").expect("valid name regex")
});

#[allow(clippy::expect_used)] // Patterns are compile-time constants
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Returns `true` if `name` follows the service's handle rules.
#[must_use]
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LEN && NAME_RE.is_match(name)
}

/// Validates a profile name: 1-39 chars, alphanumeric and hyphen, no
/// leading or trailing hyphen. Case-sensitive.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidName`] if the name breaks any rule.
pub fn validate_profile_name(name: &str) -> Result<(), ProfileError> {
    if is_valid_profile_name(name) {
        Ok(())
    } else {
        Err(ProfileError::InvalidName(name.to_string()))
    }
}

/// Validates the simple `local@domain.tld` shape.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidEmail`] if the address does not match.
pub fn validate_email(email: &str) -> Result<(), ProfileError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ProfileError::InvalidEmail(email.to_string()))
    }
}

/// Synthetic host alias that routes SSH traffic for `profile` through its key.
#[must_use]
pub fn host_alias(service_host: &str, profile: &str) -> String {
    format!("{service_host}-{profile}")
}

/// Extracts the profile name from an alias produced by [`host_alias`].
#[must_use]
pub fn profile_from_alias<'a>(service_host: &str, alias: &'a str) -> Option<&'a str> {
    alias
        .strip_prefix(service_host)
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|name| is_valid_profile_name(name))
}

/// Public key path for a private key: the same path with `.pub` appended.
#[must_use]
pub fn public_key_path(key_path: &Path) -> PathBuf {
    let mut os: OsString = key_path.as_os_str().to_owned();
    os.push(".pub");
    PathBuf::from(os)
}

/// File layout of the SSH client directory this tool manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshLayout {
    dir: PathBuf,
}

impl SshLayout {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The routing file (`config`).
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.dir.join("config")
    }

    #[must_use]
    pub fn known_hosts(&self) -> PathBuf {
        self.dir.join("known_hosts")
    }

    /// Deterministic private key path for `profile`.
    #[must_use]
    pub fn key_path(&self, profile: &str) -> PathBuf {
        self.dir.join(format!("{KEY_FILE_PREFIX}{profile}"))
    }
}
