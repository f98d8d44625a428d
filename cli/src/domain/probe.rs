//! Classification of an SSH authentication handshake.

use crate::domain::error::ProfileError;

/// Text the service prints on stderr after a successful key handshake.
pub const AUTHENTICATED_MARKER: &str = "successfully authenticated";

/// Client diagnostics that mean the host could not be reached at all.
const UNREACHABLE_MARKERS: &[&str] = &[
    "could not resolve hostname",
    "connection timed out",
    "operation timed out",
    "connection refused",
    "network is unreachable",
    "no route to host",
    "connection closed by remote host",
];

/// Outcome of a connection probe. Purely informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Authenticated,
    Rejected(String),
    Unreachable(String),
}

impl ProbeOutcome {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// The equivalent [`ProfileError`], if the probe did not authenticate.
    #[must_use]
    pub fn as_error(&self) -> Option<ProfileError> {
        match self {
            Self::Authenticated => None,
            Self::Rejected(d) => Some(ProfileError::Rejected(d.clone())),
            Self::Unreachable(d) => Some(ProfileError::Unreachable(d.clone())),
        }
    }
}

/// Classifies a finished handshake from its exit code and stderr.
///
/// The service closes the session with a non-zero status even on success,
/// so the marker text decides, not the exit code.
#[must_use]
pub fn classify(exit_code: Option<i32>, stderr: &str) -> ProbeOutcome {
    let lowered = stderr.to_lowercase();
    if lowered.contains(AUTHENTICATED_MARKER) {
        return ProbeOutcome::Authenticated;
    }
    let detail = stderr.trim().to_string();
    if exit_code == Some(255) && UNREACHABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return ProbeOutcome::Unreachable(detail);
    }
    if detail.is_empty() {
        let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
        return ProbeOutcome::Rejected(format!("no authentication message (exit {code})"));
    }
    ProbeOutcome::Rejected(detail)
}
