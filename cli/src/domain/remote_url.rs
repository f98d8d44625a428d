//! Remote URL parsing and rewriting through a profile's host alias.
//!
//! Pure functions only; applying the URL to a repository is the caller's job.

use crate::domain::error::ProfileError;
use crate::domain::profile::{host_alias, profile_from_alias, validate_profile_name};

/// The two remote URL shapes this tool understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteUrl<'a> {
    /// `user@host:path`
    Scp {
        user: &'a str,
        host: &'a str,
        path: &'a str,
    },
    /// `https://[userinfo@]host/path`
    Https { host: &'a str, path: &'a str },
}

impl<'a> RemoteUrl<'a> {
    /// Parses `url` into one of the supported shapes.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnsupportedUrlFormat`] for anything else,
    /// including `ssh://` URLs and local paths.
    pub fn parse(url: &'a str) -> Result<Self, ProfileError> {
        let unsupported = || ProfileError::UnsupportedUrlFormat(url.to_string());
        let url = url.trim();

        if let Some(rest) = url.strip_prefix("https://") {
            let (authority, path) = rest.split_once('/').ok_or_else(unsupported)?;
            let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
            if host.is_empty() || path.is_empty() {
                return Err(unsupported());
            }
            return Ok(Self::Https { host, path });
        }

        if url.contains("://") {
            return Err(unsupported());
        }

        let (user_host, path) = url.split_once(':').ok_or_else(unsupported)?;
        let (user, host) = user_host.split_once('@').ok_or_else(unsupported)?;
        if user.is_empty() || host.is_empty() || path.is_empty() || user_host.contains('/') {
            return Err(unsupported());
        }
        Ok(Self::Scp { user, host, path })
    }
}

/// Rewrites `current` so it routes through the alias of `profile`.
///
/// - `user@<service_host>:path` gains the alias.
/// - `user@<service_host>-<old>:path` has `<old>` replaced.
/// - `https://<service_host>/path` becomes `<default_user>@<alias>:path`.
///
/// The path is preserved verbatim in every case.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidName`] if `profile` is not a valid name and
/// [`ProfileError::UnsupportedUrlFormat`] if the URL has another shape or
/// points at a different host.
pub fn rewrite(
    current: &str,
    profile: &str,
    service_host: &str,
    default_user: &str,
) -> Result<String, ProfileError> {
    validate_profile_name(profile)?;
    let alias = host_alias(service_host, profile);

    match RemoteUrl::parse(current)? {
        RemoteUrl::Scp { user, host, path }
            if host == service_host || profile_from_alias(service_host, host).is_some() =>
        {
            Ok(format!("{user}@{alias}:{path}"))
        }
        RemoteUrl::Https { host, path } if host.eq_ignore_ascii_case(service_host) => {
            Ok(format!("{default_user}@{alias}:{path}"))
        }
        _ => Err(ProfileError::UnsupportedUrlFormat(current.to_string())),
    }
}

/// Profile name encoded in a remote URL's host alias, if any.
#[must_use]
pub fn profile_in_url<'a>(url: &'a str, service_host: &str) -> Option<&'a str> {
    match RemoteUrl::parse(url).ok()? {
        RemoteUrl::Scp { host, .. } => profile_from_alias(service_host, host),
        RemoteUrl::Https { .. } => None,
    }
}
