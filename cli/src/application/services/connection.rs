//! Connection probing.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Probing is diagnostics only: it may append to the known-hosts file but
//! never touches the registry, keys or routing file.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, KnownHostsStore, ProgressReporter};
use crate::domain::probe::{ProbeOutcome, classify};
use crate::domain::profile::host_alias;
use crate::domain::{GitprofConfig, Registry, SshLayout};

const KEYSCAN_TIMEOUT: Duration = Duration::from_secs(15);
const KEYSCAN_TYPES: &str = "rsa,ecdsa,ed25519";

/// Make sure `host` has an entry in the known-hosts store, scanning and
/// appending its keys if not.
///
/// Returns `true` if entries were appended.
///
/// # Errors
///
/// Returns an error if the store cannot be read or appended, or the scan
/// fails or returns nothing.
pub async fn ensure_host_trusted(
    runner: &impl CommandRunner,
    known_hosts: &impl KnownHostsStore,
    host: &str,
) -> Result<bool> {
    if known_hosts.is_trusted(host)? {
        return Ok(false);
    }
    let output = runner
        .run_with_timeout("ssh-keyscan", &["-t", KEYSCAN_TYPES, host], KEYSCAN_TIMEOUT)
        .await?;
    let entries = String::from_utf8_lossy(&output.stdout);
    anyhow::ensure!(
        !entries.trim().is_empty(),
        "ssh-keyscan returned no keys for {host}"
    );
    known_hosts.append(&entries)?;
    tracing::info!(host, path = %known_hosts.path().display(), "host keys added to known_hosts");
    Ok(true)
}

/// Attempt an authentication handshake as `profile` and classify the result.
///
/// `identity_file` is passed explicitly so the probe does not depend on the
/// routing stanza alone.
pub async fn probe_profile(
    runner: &impl CommandRunner,
    known_hosts: &impl KnownHostsStore,
    reporter: &impl ProgressReporter,
    layout: &SshLayout,
    config: &GitprofConfig,
    profile: &str,
    identity_file: Option<&Path>,
) -> ProbeOutcome {
    if let Err(e) = ensure_host_trusted(runner, known_hosts, &config.service.host).await {
        reporter.warn(&format!(
            "could not add {} to known_hosts: {e:#}",
            config.service.host
        ));
    }

    let ssh_config = layout.config_file().to_string_lossy().into_owned();
    let known = format!("UserKnownHostsFile={}", known_hosts.path().to_string_lossy());
    let connect_timeout = format!("ConnectTimeout={}", config.probe.timeout_secs);
    let target = format!(
        "{}@{}",
        config.service.user,
        host_alias(&config.service.host, profile)
    );
    let identity = identity_file.map(|p| p.to_string_lossy().into_owned());

    let mut args: Vec<&str> = vec![
        "-T",
        "-F",
        &ssh_config,
        "-o",
        &known,
        "-o",
        "StrictHostKeyChecking=accept-new",
        "-o",
        &connect_timeout,
    ];
    if let Some(identity) = identity.as_deref() {
        args.extend(["-i", identity, "-o", "IdentitiesOnly=yes"]);
    }
    args.push(&target);

    let timeout = Duration::from_secs(config.probe.timeout_secs);
    let outcome = match runner.run_with_timeout("ssh", &args, timeout).await {
        Ok(output) => classify(
            output.status.code(),
            &String::from_utf8_lossy(&output.stderr),
        ),
        Err(e) => ProbeOutcome::Unreachable(format!("{e:#}")),
    };
    tracing::debug!(profile, ?outcome, "probe classified");
    outcome
}

/// Probe every profile in name order.
pub async fn probe_all(
    runner: &impl CommandRunner,
    known_hosts: &impl KnownHostsStore,
    reporter: &impl ProgressReporter,
    layout: &SshLayout,
    config: &GitprofConfig,
    registry: &Registry,
) -> Vec<(String, ProbeOutcome)> {
    let mut results = Vec::with_capacity(registry.len());
    for (name, profile) in registry.iter() {
        reporter.step(&format!("testing '{name}'..."));
        let outcome = probe_profile(
            runner,
            known_hosts,
            reporter,
            layout,
            config,
            name,
            profile.key_path(),
        )
        .await;
        results.push((name.clone(), outcome));
    }
    results
}
