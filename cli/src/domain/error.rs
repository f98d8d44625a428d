//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator; callers recover the variant with `downcast_ref`.

use thiserror::Error;

// ── Profile errors ────────────────────────────────────────────────────────────

/// Errors raised by profile registry operations and their collaborators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error(
        "Invalid profile name '{0}': use 1-39 letters, digits or hyphens, not starting or ending with a hyphen"
    )]
    InvalidName(String),

    #[error("Invalid email '{0}': expected local@domain.tld")]
    InvalidEmail(String),

    #[error("Profile '{0}' already exists. Remove it first: gitprof remove {0}")]
    DuplicateProfile(String),

    #[error("Profile '{0}' not found. List profiles with: gitprof list")]
    ProfileNotFound(String),

    #[error("SSH key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Could not edit SSH routing config: {0}")]
    RouteEditFailed(String),

    #[error("Could not save profiles: {0}")]
    PersistFailed(String),

    #[error("Unsupported remote URL format: {0}")]
    UnsupportedUrlFormat(String),

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Authentication rejected: {0}")]
    Rejected(String),

    #[error("Not inside a git repository.")]
    NotARepository,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
