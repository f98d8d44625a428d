//! Consistency checks between the registry and the routing file.
//!
//! Pure functions only; the doctor service gathers the inputs.

use std::collections::BTreeMap;

use gitprof_common::Registry;

use crate::domain::routing::HostRoute;

/// Severity of a doctor finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warn,
    Fail,
}

/// One line of doctor output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Ok,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fail,
            message: message.into(),
        }
    }
}

/// Checks the routing invariant: every profile with a key has exactly one
/// stanza whose `IdentityFile` equals its key path, and every stanza belongs
/// to a registered profile.
#[must_use]
pub fn check_routes(registry: &Registry, routes: &[HostRoute]) -> Vec<Finding> {
    let mut by_profile: BTreeMap<&str, Vec<&HostRoute>> = BTreeMap::new();
    for route in routes {
        by_profile.entry(route.profile.as_str()).or_default().push(route);
    }

    let mut findings = Vec::new();
    for (name, profile) in registry.iter() {
        let Some(key) = profile.key_path() else {
            continue;
        };
        match by_profile.get(name.as_str()).map(Vec::as_slice) {
            None | Some([]) => {
                findings.push(Finding::fail(format!("{name}: no routing stanza")));
            }
            Some([route]) if route.identity_file == key => {
                findings.push(Finding::ok(format!("{name}: routed via {}", route.alias)));
            }
            Some([route]) => findings.push(Finding::fail(format!(
                "{name}: stanza uses {} but profile key is {}",
                route.identity_file.display(),
                key.display()
            ))),
            Some(many) => findings.push(Finding::warn(format!(
                "{name}: {} duplicate routing stanzas",
                many.len()
            ))),
        }
    }

    for name in by_profile.keys() {
        if !registry.contains(name) {
            findings.push(Finding::warn(format!(
                "{name}: routing stanza without a registered profile"
            )));
        }
    }
    findings
}

/// Worst severity among `findings` (`Ok` when empty).
#[must_use]
pub fn worst(findings: &[Finding]) -> Severity {
    findings
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or(Severity::Ok)
}
