//! SSH key provisioning.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, KeyGenerator, KeyOutcome, KeyRequest, LocalFs, RouteEditor,
};
use crate::domain::profile::public_key_path;
use crate::domain::{HostRoute, ProfileError, ServiceConfig, SshLayout};

/// Upper bound for `ssh-keygen`; 4096-bit RSA can take a while on slow hosts.
pub const KEYGEN_TIMEOUT: Duration = Duration::from_secs(120);

/// RSA modulus size for generated keys.
pub const KEY_BITS: &str = "4096";

const PRIVATE_KEY_MODE: u32 = 0o600;
const PUBLIC_KEY_MODE: u32 = 0o644;

/// Stanzas store identity paths with forward slashes.
fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Production `KeyGenerator`: runs `ssh-keygen` and appends a routing stanza.
pub struct SshKeyProvisioner<'a, C, F, R> {
    runner: &'a C,
    fs: &'a F,
    routes: &'a R,
    layout: &'a SshLayout,
    service: &'a ServiceConfig,
}

impl<'a, C, F, R> SshKeyProvisioner<'a, C, F, R>
where
    C: CommandRunner,
    F: LocalFs,
    R: RouteEditor,
{
    #[must_use]
    pub fn new(
        runner: &'a C,
        fs: &'a F,
        routes: &'a R,
        layout: &'a SshLayout,
        service: &'a ServiceConfig,
    ) -> Self {
        Self {
            runner,
            fs,
            routes,
            layout,
            service,
        }
    }

    fn route_for(&self, profile: &str, key_path: &Path) -> HostRoute {
        HostRoute::for_profile(profile, &self.service.host, &self.service.user, key_path)
    }

    /// Make sure the stanzas for `profile` route through `key_path`.
    /// Returns whether a stanza was written.
    fn ensure_route(&self, profile: &str, key_path: &Path) -> Result<bool> {
        let existing: Vec<HostRoute> = self
            .routes
            .routes()?
            .into_iter()
            .filter(|route| route.profile == profile)
            .collect();
        let wanted = slashed(key_path);
        if !existing.is_empty()
            && existing
                .iter()
                .all(|route| slashed(&route.identity_file) == wanted)
        {
            return Ok(false);
        }
        if !existing.is_empty() {
            tracing::warn!(
                profile,
                expected = %key_path.display(),
                "routing stanza names a different identity file, rewriting it"
            );
            self.routes.remove_route(profile)?;
        }
        self.routes.add_route(&self.route_for(profile, key_path))?;
        Ok(true)
    }

    async fn run_keygen(&self, request: &KeyRequest<'_>, key_path: &Path) -> Result<()> {
        let path = key_path.to_string_lossy();
        let args = [
            "-q",
            "-t",
            "rsa",
            "-b",
            KEY_BITS,
            "-C",
            request.email,
            "-f",
            path.as_ref(),
            "-N",
            request.passphrase,
        ];
        let output = self
            .runner
            .run_with_timeout("ssh-keygen", &args, KEYGEN_TIMEOUT)
            .await
            .map_err(|e| ProfileError::KeyGenerationFailed(format!("{e:#}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("ssh-keygen exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ProfileError::KeyGenerationFailed(detail).into());
        }
        Ok(())
    }

    fn discard_keys(&self, key_path: &Path) {
        for path in [key_path.to_path_buf(), public_key_path(key_path)] {
            if let Err(e) = self.fs.remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not discard key file");
            }
        }
    }
}

impl<C, F, R> KeyGenerator for SshKeyProvisioner<'_, C, F, R>
where
    C: CommandRunner,
    F: LocalFs,
    R: RouteEditor,
{
    async fn generate(&self, request: &KeyRequest<'_>) -> Result<KeyOutcome> {
        let key_path = self.layout.key_path(request.profile);

        if self.fs.exists(&key_path) {
            tracing::info!(path = %key_path.display(), "reusing existing key");
            let route_added = self
                .ensure_route(request.profile, &key_path)
                .map_err(|e| ProfileError::RouteEditFailed(format!("{e:#}")))?;
            return Ok(KeyOutcome {
                key_path,
                created: false,
                route_added,
            });
        }

        self.fs
            .create_private_dir(self.layout.dir())
            .map_err(|e| ProfileError::KeyGenerationFailed(format!("{e:#}")))?;
        self.run_keygen(request, &key_path).await?;

        for (path, mode) in [
            (key_path.clone(), PRIVATE_KEY_MODE),
            (public_key_path(&key_path), PUBLIC_KEY_MODE),
        ] {
            if let Err(e) = self.fs.set_permissions(&path, mode) {
                tracing::warn!(path = %path.display(), error = %e, "could not restrict key permissions");
            }
        }

        if let Err(e) = self.routes.add_route(&self.route_for(request.profile, &key_path)) {
            self.discard_keys(&key_path);
            return Err(ProfileError::RouteEditFailed(format!("{e:#}")).into());
        }

        Ok(KeyOutcome {
            key_path,
            created: true,
            route_added: true,
        })
    }
}
