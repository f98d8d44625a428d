//! Integration tests for `gitprof config`.
//!
//! `GITPROF_CONFIG` always points into a temp dir so the real
//! `~/.gitprof/config.yaml` is never read or written.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::env::Sandbox;

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_github_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service.host:"))
        .stdout(predicate::str::contains("github.com"))
        .stdout(predicate::str::contains("probe.timeout_secs:"))
        .stdout(predicate::str::contains("GITPROF_CONFIG:"));
    assert!(!sandbox.config().exists(), "show must not create the file");
}

#[test]
fn test_config_set_persists_and_show_reflects_it() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "set", "probe.timeout_secs", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("probe.timeout_secs = 30"));

    let content = std::fs::read_to_string(sandbox.config()).expect("config written");
    assert!(content.contains("timeout_secs: 30"), "got:\n{content}");

    sandbox
        .gitprof()
        .args(["config", "set", "service.host", "git.example.org"])
        .assert()
        .success();
    sandbox
        .gitprof()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git.example.org"))
        .stdout(predicate::str::contains("30"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "set", "keygen.passphrase", "never"])
        .assert()
        .success();
    let mode = std::fs::metadata(sandbox.config())
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "set", "security.level", "strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!sandbox.config().exists());
}

#[test]
fn test_config_set_out_of_range_timeout_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["config", "set", "probe.timeout_secs", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value"));
}
