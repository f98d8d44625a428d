//! Doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, RouteEditor};
use crate::domain::Registry;
use crate::domain::health::{Finding, Severity, check_routes, worst};
use crate::domain::profile::public_key_path;

/// External programs gitprof shells out to, with a harmless argument each.
pub const REQUIRED_TOOLS: &[(&str, &[&str])] = &[
    ("git", &["--version"]),
    ("ssh", &["-V"]),
    ("ssh-keygen", &["-?"]),
    ("ssh-keyscan", &["-?"]),
];

/// Grouped doctor findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub tools: Vec<Finding>,
    pub keys: Vec<Finding>,
    pub routes: Vec<Finding>,
}

impl DoctorReport {
    /// Worst severity across every section.
    #[must_use]
    pub fn severity(&self) -> Severity {
        worst(&self.tools)
            .max(worst(&self.keys))
            .max(worst(&self.routes))
    }
}

/// Run every doctor check against `registry`.
///
/// # Errors
///
/// Never fails on a check; failing checks become findings.
pub async fn run_doctor(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    routes: &impl RouteEditor,
    reporter: &impl ProgressReporter,
    registry: &Registry,
) -> Result<DoctorReport> {
    reporter.step("checking required tools...");
    let tools = check_tools(runner).await;

    reporter.step("checking key files...");
    let keys = check_keys(fs, registry);

    reporter.step("checking routing stanzas...");
    let routes = match routes.routes() {
        Ok(parsed) => check_routes(registry, &parsed),
        Err(e) => vec![Finding::fail(format!("cannot read routing file: {e:#}"))],
    };

    reporter.success("diagnostics complete");
    Ok(DoctorReport {
        tools,
        keys,
        routes,
    })
}

async fn check_tools(runner: &impl CommandRunner) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(REQUIRED_TOOLS.len());
    for (tool, args) in REQUIRED_TOOLS {
        // Usage output exits non-zero for the ssh tools; spawning is enough.
        match runner.run(tool, args).await {
            Ok(output) => {
                let text = if output.stdout.is_empty() {
                    String::from_utf8_lossy(&output.stderr).into_owned()
                } else {
                    String::from_utf8_lossy(&output.stdout).into_owned()
                };
                let first = text.lines().next().unwrap_or_default().trim();
                if *tool == "git" || *tool == "ssh" {
                    findings.push(Finding::ok(format!("{tool}: {first}")));
                } else {
                    findings.push(Finding::ok(format!("{tool}: found")));
                }
            }
            Err(e) => {
                tracing::debug!(tool, error = %e, "tool probe failed");
                findings.push(Finding::fail(format!("{tool}: not found on PATH")));
            }
        }
    }
    findings
}

fn check_keys(fs: &impl LocalFs, registry: &Registry) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, profile) in registry.iter() {
        let Some(key) = profile.key_path() else {
            findings.push(Finding::warn(format!("{name}: no SSH key recorded")));
            continue;
        };
        let public = public_key_path(key);
        match (fs.exists(key), fs.exists(&public)) {
            (true, true) => findings.push(Finding::ok(format!("{name}: {}", key.display()))),
            (false, _) => findings.push(Finding::fail(format!(
                "{name}: private key missing at {}",
                key.display()
            ))),
            (true, false) => findings.push(Finding::warn(format!(
                "{name}: public key missing at {}",
                public.display()
            ))),
        }
    }
    findings
}
