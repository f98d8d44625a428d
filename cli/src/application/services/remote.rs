//! Point a repository remote at a profile alias.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::RepositoryRemote;
use crate::domain::remote_url::rewrite;
use crate::domain::{ProfileError, ServiceConfig};

/// Outcome of [`update_remote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpdate {
    pub remote: String,
    pub old_url: String,
    pub new_url: String,
    /// The repository was modified (not a dry run, and the URL changed).
    pub applied: bool,
}

impl RemoteUpdate {
    #[must_use]
    pub fn unchanged(&self) -> bool {
        self.old_url == self.new_url
    }
}

/// Rewrite `remote` of the current repository to go through `profile`'s alias.
///
/// # Errors
///
/// `NotARepository` outside a repository, an error naming the remote if it
/// does not exist, `UnsupportedUrlFormat` for URLs that cannot be rewritten,
/// or the underlying git failure when applying the new URL.
pub async fn update_remote(
    repo: &impl RepositoryRemote,
    service: &ServiceConfig,
    remote: &str,
    profile: &str,
    dry_run: bool,
) -> Result<RemoteUpdate> {
    if !repo.is_repository().await? {
        return Err(ProfileError::NotARepository.into());
    }
    let Some(old_url) = repo.remote_url(remote).await? else {
        anyhow::bail!("Remote '{remote}' not found in this repository.");
    };
    let new_url = rewrite(&old_url, profile, &service.host, &service.user)?;

    let applied = !dry_run && new_url != old_url;
    if applied {
        repo.set_remote_url(remote, &new_url).await?;
        tracing::info!(remote, "remote URL rewritten");
    }
    Ok(RemoteUpdate {
        remote: remote.to_string(),
        old_url,
        new_url,
        applied,
    })
}
