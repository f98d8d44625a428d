//! Git CLI adapter - global identity and repository remotes.
//!
//! Implements `IdentityStore` and `RepositoryRemote` by shelling out to `git`
//! through an injected `CommandRunner`.

use anyhow::Result;

use crate::application::ports::{CommandRunner, IdentityStore, RepositoryRemote};
use crate::domain::GlobalIdentity;

/// `git config` exits 1 when a key is unset on `--get`.
const EXIT_KEY_MISSING: i32 = 1;
/// `git config --unset-all` exits 5 when the key does not exist.
const EXIT_NOTHING_TO_UNSET: i32 = 5;

/// `git` invoked through a `CommandRunner`.
pub struct GitCli<'a, C> {
    runner: &'a C,
}

impl<'a, C: CommandRunner> GitCli<'a, C> {
    #[must_use]
    pub fn new(runner: &'a C) -> Self {
        Self { runner }
    }

    async fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        self.runner.run("git", args).await
    }

    async fn global_get(&self, key: &str) -> Result<Option<String>> {
        let out = self.git(&["config", "--global", "--get", key]).await?;
        if out.status.success() {
            let value = String::from_utf8_lossy(&out.stdout).trim().to_string();
            return Ok(Some(value).filter(|v| !v.is_empty()));
        }
        if out.status.code() == Some(EXIT_KEY_MISSING) {
            return Ok(None);
        }
        anyhow::bail!(
            "git config --get {key} failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )
    }

    /// Every existing value of `key` is replaced, so a multi-valued key
    /// ends up with exactly `value`.
    async fn global_set(&self, key: &str, value: &str) -> Result<()> {
        let out = self
            .git(&["config", "--global", "--replace-all", key, value])
            .await?;
        anyhow::ensure!(
            out.status.success(),
            "git config {key} failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        );
        Ok(())
    }

    /// Removes every value of `key`; a plain `--unset` refuses (also with
    /// exit 5) when the key has several values.
    async fn global_unset(&self, key: &str) -> Result<()> {
        let out = self
            .git(&["config", "--global", "--unset-all", key])
            .await?;
        anyhow::ensure!(
            out.status.success() || out.status.code() == Some(EXIT_NOTHING_TO_UNSET),
            "git config --unset-all {key} failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        );
        Ok(())
    }
}

impl<C: CommandRunner> IdentityStore for GitCli<'_, C> {
    async fn get(&self) -> Result<Option<GlobalIdentity>> {
        let name = self.global_get("user.name").await?;
        let email = self.global_get("user.email").await?;
        Ok(name
            .zip(email)
            .map(|(name, email)| GlobalIdentity::new(name, email)))
    }

    async fn set(&self, identity: &GlobalIdentity) -> Result<()> {
        self.global_set("user.name", &identity.name).await?;
        self.global_set("user.email", &identity.email).await
    }

    async fn clear(&self) -> Result<()> {
        self.global_unset("user.name").await?;
        self.global_unset("user.email").await
    }
}

impl<C: CommandRunner> RepositoryRemote for GitCli<'_, C> {
    async fn is_repository(&self) -> Result<bool> {
        let out = self.git(&["rev-parse", "--is-inside-work-tree"]).await?;
        Ok(out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
    }

    async fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let out = self.git(&["remote", "get-url", remote]).await?;
        if !out.status.success() {
            tracing::debug!(remote, "no such remote");
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&out.stdout).trim().to_string()))
    }

    async fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        let out = self.git(&["remote", "set-url", remote, url]).await?;
        anyhow::ensure!(
            out.status.success(),
            "git remote set-url {remote} failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        );
        Ok(())
    }
}
