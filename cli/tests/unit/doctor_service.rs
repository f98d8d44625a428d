//! Tests for the doctor service: tool, key and routing checks.

#![allow(clippy::expect_used)]

use std::process::Output;

use gitprof_cli::application::services::doctor::run_doctor;
use gitprof_cli::domain::health::Severity;
use gitprof_cli::domain::profile::public_key_path;
use gitprof_cli::domain::routing::render_stanza;
use gitprof_cli::domain::{HostRoute, Profile, Registry};

use crate::helpers::{err_output, ok_output};
use crate::mocks::{FnRunner, MemoryFs, MemoryRoutes, NoopReporter};

const KEY: &str = "/home/u/.ssh/id_rsa_alice";

fn alice_registry() -> Registry {
    let mut registry = Registry::new();
    registry.insert("alice", Profile::new("alice", "a@x.com").with_key(KEY));
    registry
}

fn all_tools_present() -> FnRunner<impl Fn(&str, &[&str]) -> anyhow::Result<Output>> {
    FnRunner::new(|program: &str, _: &[&str]| -> anyhow::Result<Output> {
        match program {
            "git" => Ok(ok_output(b"git version 2.43.0\n")),
            "ssh" => Ok(err_output(0, b"OpenSSH_9.6p1, OpenSSL 3.0.13\n")),
            _ => Ok(err_output(1, b"usage: ...\n")),
        }
    })
}

fn healthy_fs() -> MemoryFs {
    let fs = MemoryFs::default();
    fs.touch(KEY, "PRIVATE");
    fs.touch(format!("{KEY}.pub"), "ssh-rsa AAAA");
    fs
}

fn alice_routes() -> MemoryRoutes {
    MemoryRoutes::with_text(&render_stanza(&HostRoute::for_profile(
        "alice",
        "github.com",
        "git",
        KEY,
    )))
}

#[tokio::test]
async fn test_consistent_setup_is_ok() {
    let runner = all_tools_present();

    let report = run_doctor(
        &runner,
        &healthy_fs(),
        &alice_routes(),
        &NoopReporter,
        &alice_registry(),
    )
    .await
    .expect("doctor");

    assert_eq!(report.severity(), Severity::Ok, "report: {report:?}");
    assert_eq!(report.tools.len(), 4);
    assert!(report.tools[0].message.contains("git version 2.43.0"));
    assert!(report.tools[1].message.contains("OpenSSH_9.6p1"));
    assert_eq!(
        runner.programs(),
        vec!["git", "ssh", "ssh-keygen", "ssh-keyscan"]
    );
}

#[tokio::test]
async fn test_missing_tool_fails() {
    let runner = FnRunner::new(|program: &str, _: &[&str]| -> anyhow::Result<Output> {
        match program {
            "ssh-keyscan" => anyhow::bail!("No such file or directory (os error 2)"),
            _ => Ok(ok_output(b"ok\n")),
        }
    });

    let report = run_doctor(
        &runner,
        &healthy_fs(),
        &alice_routes(),
        &NoopReporter,
        &alice_registry(),
    )
    .await
    .expect("doctor");

    assert_eq!(report.severity(), Severity::Fail);
    let failed: Vec<&str> = report
        .tools
        .iter()
        .filter(|f| f.severity == Severity::Fail)
        .map(|f| f.message.as_str())
        .collect();
    assert_eq!(failed, vec!["ssh-keyscan: not found on PATH"]);
}

#[tokio::test]
async fn test_missing_private_key_fails_and_missing_public_key_warns() {
    let runner = all_tools_present();

    let fs = MemoryFs::default();
    let report = run_doctor(&runner, &fs, &alice_routes(), &NoopReporter, &alice_registry())
        .await
        .expect("doctor");
    assert_eq!(report.keys[0].severity, Severity::Fail);
    assert!(report.keys[0].message.contains("private key missing"));

    fs.touch(KEY, "PRIVATE");
    let report = run_doctor(&runner, &fs, &alice_routes(), &NoopReporter, &alice_registry())
        .await
        .expect("doctor");
    assert_eq!(report.keys[0].severity, Severity::Warn);
    assert!(
        report.keys[0]
            .message
            .contains(&public_key_path(std::path::Path::new(KEY)).display().to_string())
    );
}

#[tokio::test]
async fn test_missing_stanza_fails() {
    let runner = all_tools_present();

    let report = run_doctor(
        &runner,
        &healthy_fs(),
        &MemoryRoutes::default(),
        &NoopReporter,
        &alice_registry(),
    )
    .await
    .expect("doctor");

    assert_eq!(report.severity(), Severity::Fail);
    assert_eq!(report.routes[0].message, "alice: no routing stanza");
}

#[tokio::test]
async fn test_orphan_stanza_warns() {
    let runner = all_tools_present();
    let routes = alice_routes();
    routes
        .text
        .borrow_mut()
        .push_str(&render_stanza(&HostRoute::for_profile(
            "ghost",
            "github.com",
            "git",
            "/home/u/.ssh/id_rsa_ghost",
        )));

    let report = run_doctor(
        &runner,
        &healthy_fs(),
        &routes,
        &NoopReporter,
        &alice_registry(),
    )
    .await
    .expect("doctor");

    assert_eq!(report.severity(), Severity::Warn);
    assert!(
        report
            .routes
            .iter()
            .any(|f| f.message.contains("ghost") && f.severity == Severity::Warn)
    );
}
