//! CLI surface: help, version and top-level flags.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::env::Sandbox;

#[test]
fn test_help_lists_every_command() {
    let sandbox = Sandbox::new();
    let assert = sandbox.gitprof().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for command in [
        "add", "switch", "current", "list", "remove", "test", "remote-url", "doctor", "config",
        "version",
    ] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn test_version_command_prints_package_version() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "gitprof {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_flag_matches_command() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_quiet_version_prints_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .args(["--quiet", "version"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_command_fails() {
    let sandbox = Sandbox::new();
    sandbox.gitprof().arg("frobnicate").assert().failure();
}

#[test]
fn test_menu_refuses_to_run_non_interactively() {
    let sandbox = Sandbox::new();
    sandbox
        .gitprof()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No command given"));
}
