//! SSH client routing stanzas: one `Host` block per profile, tagged with a
//! marker comment so it can be found and removed again.
//!
//! Pure text functions only - reading and writing the file lives in
//! `crate::infra::ssh_config`.

use std::path::PathBuf;

use crate::domain::profile::host_alias;

/// Marker comment prefix that opens every managed stanza.
pub const MARKER_PREFIX: &str = "# Git profile: ";

/// One managed routing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRoute {
    /// Profile name written into the marker comment.
    pub profile: String,
    /// Synthetic `Host` alias.
    pub alias: String,
    /// Real host the alias resolves to.
    pub host_name: String,
    /// Routing user (`User`).
    pub user: String,
    /// Identity file presented for this alias.
    pub identity_file: PathBuf,
}

impl HostRoute {
    /// Route for `profile` on `service_host`, authenticating with `identity_file`.
    #[must_use]
    pub fn for_profile(
        profile: &str,
        service_host: &str,
        user: &str,
        identity_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            profile: profile.to_string(),
            alias: host_alias(service_host, profile),
            host_name: service_host.to_string(),
            user: user.to_string(),
            identity_file: identity_file.into(),
        }
    }
}

/// Marker line for `profile`.
#[must_use]
pub fn marker_line(profile: &str) -> String {
    format!("{MARKER_PREFIX}{profile}")
}

/// Renders a stanza, terminated by a blank line.
///
/// Backslashes in the identity path are written as forward slashes; the SSH
/// client accepts both on Windows and only the latter elsewhere.
#[must_use]
pub fn render_stanza(route: &HostRoute) -> String {
    let identity = route.identity_file.to_string_lossy().replace('\\', "/");
    format!(
        "{marker}\nHost {alias}\n    HostName {host}\n    User {user}\n    IdentityFile {identity}\n    IdentitiesOnly yes\n\n",
        marker = marker_line(&route.profile),
        alias = route.alias,
        host = route.host_name,
        user = route.user,
    )
}

/// Text to append to a routing file whose current content is `existing` so
/// that the new stanza starts on its own line.
#[must_use]
pub fn append_text(existing: &str, route: &HostRoute) -> String {
    let mut out = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&render_stanza(route));
    out
}

fn is_marker_for(line: &str, profile: &str) -> bool {
    line.trim()
        .strip_prefix(MARKER_PREFIX.trim_end())
        .is_some_and(|rest| rest.trim() == profile)
}

/// Result of stripping a profile's stanzas from routing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Remaining text.
    pub text: String,
    /// Number of stanzas removed.
    pub removed: usize,
}

/// Removes every stanza whose marker names `profile`.
///
/// A stanza is the marker line plus all following lines up to the next blank
/// line; that blank terminator goes with it, so stripping a freshly appended
/// stanza restores the original text. Text without a matching marker comes
/// back unchanged.
#[must_use]
pub fn strip_stanzas(text: &str, profile: &str) -> Stripped {
    let mut kept = String::with_capacity(text.len());
    let mut removed = 0;
    let mut skipping = false;

    for line in text.split_inclusive('\n') {
        if is_marker_for(line, profile) {
            skipping = true;
            removed += 1;
            continue;
        }
        if skipping {
            if line.trim().is_empty() {
                skipping = false;
            }
            continue;
        }
        kept.push_str(line);
    }

    Stripped {
        text: kept,
        removed,
    }
}

/// Parses every managed stanza out of routing text. Unmanaged blocks and
/// stanzas missing `Host` or `IdentityFile` are skipped.
#[must_use]
pub fn parse_routes(text: &str) -> Vec<HostRoute> {
    let mut routes = Vec::new();
    let mut current: Option<PartialRoute> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(profile) = trimmed
            .strip_prefix(MARKER_PREFIX.trim_end())
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            routes.extend(current.take().and_then(PartialRoute::finish));
            current = Some(PartialRoute::new(profile));
            continue;
        }
        if trimmed.is_empty() {
            routes.extend(current.take().and_then(PartialRoute::finish));
            continue;
        }
        if let Some(partial) = current.as_mut() {
            partial.apply(trimmed);
        }
    }
    routes.extend(current.and_then(PartialRoute::finish));
    routes
}

#[derive(Default)]
struct PartialRoute {
    profile: String,
    alias: Option<String>,
    host_name: Option<String>,
    user: Option<String>,
    identity_file: Option<PathBuf>,
}

impl PartialRoute {
    fn new(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            ..Self::default()
        }
    }

    fn apply(&mut self, line: &str) {
        // ssh_config accepts `Key value` and `Key=value`.
        let (key, value) = match line.split_once(|c: char| c.is_whitespace() || c == '=') {
            Some((k, v)) => (k, v.trim_start_matches(|c: char| c.is_whitespace() || c == '=').trim()),
            None => return,
        };
        match key.to_ascii_lowercase().as_str() {
            "host" => self.alias = Some(value.to_string()),
            "hostname" => self.host_name = Some(value.to_string()),
            "user" => self.user = Some(value.to_string()),
            "identityfile" => self.identity_file = Some(PathBuf::from(value)),
            _ => {}
        }
    }

    fn finish(self) -> Option<HostRoute> {
        let alias = self.alias?;
        let identity_file = self.identity_file?;
        Some(HostRoute {
            host_name: self.host_name.unwrap_or_else(|| alias.clone()),
            user: self.user.unwrap_or_default(),
            profile: self.profile,
            alias,
            identity_file,
        })
    }
}
