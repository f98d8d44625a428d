//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{GitprofConfig, GlobalIdentity, HostRoute, Registry};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Synchronous.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Persistence Ports ─────────────────────────────────────────────────────────

/// Persisted profile registry document.
pub trait RegistryStore {
    /// Load the registry, returning `None` if the store does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Registry>>;
    /// Overwrite the store with the full registry.
    fn save(&self, registry: &Registry) -> Result<()>;
    /// Where the store lives, for messages.
    fn location(&self) -> PathBuf;
}

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults if no file exists.
    fn load(&self) -> Result<GitprofConfig>;
    /// Persist configuration.
    fn save(&self, config: &GitprofConfig) -> Result<()>;
    /// Path of the configuration file.
    fn path(&self) -> &Path;
}

// ── Identity Port ─────────────────────────────────────────────────────────────

/// The process-wide author identity, owned by the versioning tool.
#[allow(async_fn_in_trait)]
pub trait IdentityStore {
    /// Current identity, or `None` if either field is unset.
    async fn get(&self) -> Result<Option<GlobalIdentity>>;
    /// Replace the identity.
    async fn set(&self, identity: &GlobalIdentity) -> Result<()>;
    /// Unset both fields. Clearing an unset identity is not an error.
    async fn clear(&self) -> Result<()>;
}

// ── SSH Ports ─────────────────────────────────────────────────────────────────

/// Parameters for provisioning one profile's key pair.
pub struct KeyRequest<'a> {
    /// Profile name; determines the key path and alias.
    pub profile: &'a str,
    /// Embedded as the key comment.
    pub email: &'a str,
    /// Empty for an unencrypted key.
    pub passphrase: &'a str,
}

/// Produces (or finds) a profile's key pair and routes its alias.
#[allow(async_fn_in_trait)]
pub trait KeyGenerator {
    /// Provision keys for `request.profile`.
    ///
    /// An existing private key is reused as-is. A fresh key is routed before
    /// returning; a reused one is routed only if no stanza exists yet.
    ///
    /// # Errors
    ///
    /// `ProfileError::KeyGenerationFailed` or `ProfileError::RouteEditFailed`.
    async fn generate(&self, request: &KeyRequest<'_>) -> Result<KeyOutcome>;
}

/// What [`KeyGenerator::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Private key path.
    pub key_path: PathBuf,
    /// `false` when an existing key was reused.
    pub created: bool,
    /// Whether a routing stanza was appended for this request.
    pub route_added: bool,
}

/// Edits the shared SSH routing file.
pub trait RouteEditor {
    /// Append a stanza for `route`. Does not check for an existing one.
    fn add_route(&self, route: &HostRoute) -> Result<()>;
    /// Remove every stanza for `profile`, returning how many were removed.
    /// A missing file or missing stanza removes nothing and is not an error.
    fn remove_route(&self, profile: &str) -> Result<usize>;
    /// All managed stanzas currently in the file.
    fn routes(&self) -> Result<Vec<HostRoute>>;
}

/// Local host-key trust store.
pub trait KnownHostsStore {
    /// Whether any entry names `host`.
    fn is_trusted(&self, host: &str) -> Result<bool>;
    /// Append scanned host-key lines. Never rewrites existing content.
    fn append(&self, entries: &str) -> Result<()>;
    /// Path of the trust store.
    fn path(&self) -> PathBuf;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Raw filesystem operations on key material.
pub trait LocalFs {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Create `path` (and parents) with owner-only access where supported.
    fn create_private_dir(&self, path: &Path) -> Result<()>;
    /// Remove a file, returning `false` if it was already absent.
    fn remove_file(&self, path: &Path) -> Result<bool>;
    /// Apply POSIX mode bits; a no-op on platforms without them.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
    /// Read a text file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

// ── Repository Port ───────────────────────────────────────────────────────────

/// Remote configuration of the repository in the working directory.
#[allow(async_fn_in_trait)]
pub trait RepositoryRemote {
    /// Whether the working directory is inside a repository.
    async fn is_repository(&self) -> Result<bool>;
    /// URL of `remote`, or `None` if no such remote exists.
    async fn remote_url(&self, remote: &str) -> Result<Option<String>>;
    /// Point `remote` at `url`.
    async fn set_remote_url(&self, remote: &str, url: &str) -> Result<()>;
}
