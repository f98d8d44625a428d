//! Tests for the connection prober: host-key scanning and outcome
//! classification of the `ssh -T` handshake.

#![allow(clippy::expect_used)]

use std::path::Path;
use std::process::Output;

use gitprof_cli::application::services::connection::{
    ensure_host_trusted, probe_all, probe_profile,
};
use gitprof_cli::domain::{GitprofConfig, ProbeOutcome, Profile, Registry, SshLayout};

use crate::helpers::{err_output, ok_output};
use crate::mocks::{FnRunner, MemoryKnownHosts, NoopReporter, RecordingReporter};

const SCANNED: &[u8] = b"github.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n";
const GREETING: &[u8] =
    b"Hi alice! You've successfully authenticated, but GitHub does not provide shell access.\n";

fn layout() -> SshLayout {
    SshLayout::new("/home/u/.ssh")
}

/// Runner whose `ssh-keyscan` succeeds and whose `ssh` answers with `ssh`.
fn runner_with_ssh(
    ssh: Output,
) -> FnRunner<impl Fn(&str, &[&str]) -> anyhow::Result<Output>> {
    FnRunner::new(
        move |program: &str, _: &[&str]| -> anyhow::Result<Output> {
            match program {
                "ssh-keyscan" => Ok(ok_output(SCANNED)),
                "ssh" => Ok(ssh.clone()),
                other => anyhow::bail!("unexpected program {other}"),
            }
        },
    )
}

// ── Host trust ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ensure_host_trusted_scans_and_appends_once() {
    let runner = runner_with_ssh(ok_output(b""));
    let known = MemoryKnownHosts::default();

    assert!(ensure_host_trusted(&runner, &known, "github.com").await.expect("scan"));
    assert!(known.text.borrow().starts_with("github.com ssh-ed25519"));

    assert!(!ensure_host_trusted(&runner, &known, "github.com").await.expect("again"));
    assert_eq!(runner.programs(), vec!["ssh-keyscan"]);
    let argv = runner.call_for("ssh-keyscan").expect("called");
    assert_eq!(argv[1..], ["-t", "rsa,ecdsa,ed25519", "github.com"]);
}

#[tokio::test]
async fn test_ensure_host_trusted_rejects_empty_scan() {
    let runner = FnRunner::new(|_: &str, _: &[&str]| Ok(ok_output(b"")));
    let known = MemoryKnownHosts::default();

    let err = ensure_host_trusted(&runner, &known, "github.com")
        .await
        .expect_err("nothing scanned");
    assert!(err.to_string().contains("no keys"), "got: {err}");
    assert!(known.text.borrow().is_empty());
}

// ── Probe ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_success_marker_is_authenticated() {
    let runner = runner_with_ssh(err_output(1, GREETING));
    let known = MemoryKnownHosts::default();
    let config = GitprofConfig::default();
    let key = layout().key_path("alice");

    let outcome = probe_profile(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &config,
        "alice",
        Some(key.as_path()),
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Authenticated);
    let argv = runner.call_for("ssh").expect("ssh called");
    assert_eq!(argv.last().map(String::as_str), Some("git@github.com-alice"));
    assert!(argv.iter().any(|a| a == "-T"));
    assert!(argv.iter().any(|a| a == "StrictHostKeyChecking=accept-new"));
    assert!(argv.iter().any(|a| a == "ConnectTimeout=15"));
    assert!(argv.iter().any(|a| a == "IdentitiesOnly=yes"));
    assert!(argv.iter().any(|a| *a == key.to_string_lossy()));
    assert!(
        argv.iter()
            .any(|a| *a == "UserKnownHostsFile=/mem/.ssh/known_hosts")
    );
}

#[tokio::test]
async fn test_probe_permission_denied_is_rejected() {
    let runner = runner_with_ssh(err_output(
        255,
        b"git@github.com: Permission denied (publickey).\n",
    ));
    let known = MemoryKnownHosts::default();

    let outcome = probe_profile(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &GitprofConfig::default(),
        "alice",
        None,
    )
    .await;

    assert_eq!(
        outcome,
        ProbeOutcome::Rejected("git@github.com: Permission denied (publickey).".to_string())
    );
    let argv = runner.call_for("ssh").expect("ssh called");
    assert!(!argv.iter().any(|a| a == "-i"));
}

#[tokio::test]
async fn test_probe_dns_failure_is_unreachable() {
    let runner = runner_with_ssh(err_output(
        255,
        b"ssh: Could not resolve hostname github.com: Name or service not known\n",
    ));
    let known = MemoryKnownHosts::default();

    let outcome = probe_profile(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &GitprofConfig::default(),
        "alice",
        None,
    )
    .await;

    assert!(matches!(outcome, ProbeOutcome::Unreachable(_)), "got: {outcome:?}");
}

#[tokio::test]
async fn test_probe_timeout_is_unreachable() {
    let runner = FnRunner::new(|program: &str, _: &[&str]| -> anyhow::Result<Output> {
        match program {
            "ssh-keyscan" => Ok(ok_output(SCANNED)),
            _ => anyhow::bail!("ssh timed out after 15s"),
        }
    });
    let known = MemoryKnownHosts::default();

    let outcome = probe_profile(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &GitprofConfig::default(),
        "alice",
        None,
    )
    .await;

    match outcome {
        ProbeOutcome::Unreachable(detail) => assert!(detail.contains("timed out"), "got: {detail}"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_probe_continues_when_host_scan_fails() {
    let runner = FnRunner::new(|program: &str, _: &[&str]| -> anyhow::Result<Output> {
        match program {
            "ssh-keyscan" => anyhow::bail!("ssh-keyscan not found"),
            _ => Ok(err_output(1, GREETING)),
        }
    });
    let known = MemoryKnownHosts::default();
    let reporter = RecordingReporter::default();

    let outcome = probe_profile(
        &runner,
        &known,
        &reporter,
        &layout(),
        &GitprofConfig::default(),
        "alice",
        None,
    )
    .await;

    assert!(outcome.is_authenticated());
    let warnings = reporter.warnings.borrow();
    assert!(
        warnings.iter().any(|w| w.contains("known_hosts")),
        "got: {warnings:?}"
    );
}

#[tokio::test]
async fn test_probe_uses_configured_timeout() {
    let runner = runner_with_ssh(err_output(1, GREETING));
    let known = MemoryKnownHosts::default();
    let mut config = GitprofConfig::default();
    config.set("probe.timeout_secs", "42").expect("valid");

    probe_profile(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &config,
        "alice",
        None,
    )
    .await;

    let argv = runner.call_for("ssh").expect("ssh called");
    assert!(argv.iter().any(|a| a == "ConnectTimeout=42"));
}

#[tokio::test]
async fn test_probe_all_visits_profiles_in_name_order() {
    let runner = runner_with_ssh(err_output(1, GREETING));
    let known = MemoryKnownHosts::default();
    let mut registry = Registry::new();
    registry.insert("work", Profile::new("Jo", "jo@corp.io").with_key("/k/id_rsa_work"));
    registry.insert("home", Profile::new("Jo", "jo@home.net"));

    let results = probe_all(
        &runner,
        &known,
        &NoopReporter,
        &layout(),
        &GitprofConfig::default(),
        &registry,
    )
    .await;

    let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["home", "work"]);
    assert!(results.iter().all(|(_, o)| o.is_authenticated()));

    let targets: Vec<String> = runner
        .calls
        .borrow()
        .iter()
        .filter(|argv| argv[0] == "ssh")
        .filter_map(|argv| argv.last().cloned())
        .collect();
    assert_eq!(targets, vec!["git@github.com-home", "git@github.com-work"]);
    assert!(
        runner
            .calls
            .borrow()
            .iter()
            .any(|argv| argv.iter().any(|a| *a == Path::new("/k/id_rsa_work").to_string_lossy()))
    );
}
