//! Tests for the SSH key provisioner: key reuse, the `ssh-keygen` call,
//! permissions and cleanup when routing fails.

#![allow(clippy::expect_used)]

use std::process::Output;

use gitprof_cli::application::ports::{KeyGenerator, KeyRequest};
use gitprof_cli::application::services::keygen::SshKeyProvisioner;
use gitprof_cli::domain::profile::public_key_path;
use gitprof_cli::domain::routing::{parse_routes, render_stanza};
use gitprof_cli::domain::{HostRoute, ProfileError, ServiceConfig, SshLayout};

use crate::helpers::{err_output, ok_output};
use crate::mocks::{FnRunner, KeygenRunner, MemoryFs, MemoryRoutes};

fn alice() -> KeyRequest<'static> {
    KeyRequest {
        profile: "alice",
        email: "a@x.com",
        passphrase: "",
    }
}

#[tokio::test]
async fn test_generate_runs_ssh_keygen_and_routes_alias() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = FnRunner::new(|_: &str, _: &[&str]| Ok(ok_output(b"")));
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    let outcome = keys.generate(&alice()).await.expect("generate");

    let key = layout.key_path("alice");
    assert!(outcome.created);
    assert!(outcome.route_added);
    assert_eq!(outcome.key_path, key);

    let argv = runner.call_for("ssh-keygen").expect("ssh-keygen called");
    let key_str = key.to_string_lossy().into_owned();
    let expected: Vec<&str> = vec![
        "ssh-keygen", "-q", "-t", "rsa", "-b", "4096", "-C", "a@x.com", "-f", &key_str, "-N", "",
    ];
    assert_eq!(argv, expected);

    assert!(fs.dirs.borrow().contains(layout.dir()));
    let modes = fs.modes.borrow();
    assert!(modes.contains(&(key.clone(), 0o600)));
    assert!(modes.contains(&(public_key_path(&key), 0o644)));

    let expected_stanza =
        render_stanza(&HostRoute::for_profile("alice", "github.com", "git", &key));
    assert_eq!(routes.content(), expected_stanza);
}

#[tokio::test]
async fn test_generate_passes_passphrase_through() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = FnRunner::new(|_: &str, _: &[&str]| Ok(ok_output(b"")));
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    keys.generate(&KeyRequest {
        passphrase: "s3cret",
        ..alice()
    })
    .await
    .expect("generate");

    let argv = runner.call_for("ssh-keygen").expect("called");
    assert_eq!(argv.last().map(String::as_str), Some("s3cret"));
}

#[tokio::test]
async fn test_existing_key_is_reused_and_routed_once() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = KeygenRunner::new(&fs);
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);
    fs.touch(layout.key_path("alice"), "EXISTING");

    let first = keys.generate(&alice()).await.expect("first");
    assert!(!first.created);
    assert!(first.route_added);

    let second = keys.generate(&alice()).await.expect("second");
    assert!(!second.created);
    assert!(!second.route_added);

    assert_eq!(runner.calls.get(), 0);
    assert_eq!(routes.content().matches("# Git profile: alice").count(), 1);
    assert_eq!(
        fs.files
            .borrow()
            .get(&layout.key_path("alice"))
            .map(String::as_str),
        Some("EXISTING")
    );
}

#[tokio::test]
async fn test_reused_key_rewrites_stanza_naming_another_identity_file() {
    let fs = MemoryFs::default();
    let layout = SshLayout::new("/home/u/.ssh");
    let stale = HostRoute::for_profile("alice", "github.com", "git", "/old/id_rsa_alice");
    let routes = MemoryRoutes::with_text(&render_stanza(&stale));
    let runner = KeygenRunner::new(&fs);
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);
    fs.touch(layout.key_path("alice"), "EXISTING");

    let outcome = keys.generate(&alice()).await.expect("generate");

    assert!(!outcome.created);
    assert!(outcome.route_added);
    let parsed = parse_routes(&routes.content());
    assert_eq!(parsed.len(), 1, "got:\n{}", routes.content());
    assert_eq!(parsed[0].identity_file, layout.key_path("alice"));
    assert!(!routes.content().contains("/old/id_rsa_alice"));
}

#[tokio::test]
async fn test_reused_key_keeps_matching_stanza_untouched() {
    let fs = MemoryFs::default();
    let layout = SshLayout::new("/home/u/.ssh");
    let current =
        HostRoute::for_profile("alice", "github.com", "git", layout.key_path("alice"));
    let routes = MemoryRoutes::with_text(&render_stanza(&current));
    let runner = KeygenRunner::new(&fs);
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);
    fs.touch(layout.key_path("alice"), "EXISTING");

    let outcome = keys.generate(&alice()).await.expect("generate");

    assert!(!outcome.route_added);
    assert_eq!(routes.content(), render_stanza(&current));
}

#[tokio::test]
async fn test_keygen_failure_reports_stderr_and_adds_no_route() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = FnRunner::new(|_: &str, _: &[&str]| {
        Ok(err_output(1, b"Saving key \"/home/u/.ssh/id_rsa_alice\" failed: Permission denied\n"))
    });
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    let err = keys.generate(&alice()).await.expect_err("keygen fails");

    match err.downcast_ref::<ProfileError>() {
        Some(ProfileError::KeyGenerationFailed(detail)) => {
            assert!(detail.contains("Permission denied"), "got: {detail}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(routes.content().is_empty());
}

#[tokio::test]
async fn test_keygen_spawn_failure_is_key_generation_failed() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = FnRunner::new(|_: &str, _: &[&str]| -> anyhow::Result<Output> {
        anyhow::bail!("No such file or directory")
    });
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    let err = keys.generate(&alice()).await.expect_err("spawn fails");
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::KeyGenerationFailed(_))
    ));
}

#[tokio::test]
async fn test_route_failure_discards_fresh_keys() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::failing();
    let runner = KeygenRunner::new(&fs);
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig::default();
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    let err = keys.generate(&alice()).await.expect_err("route fails");

    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::RouteEditFailed(_))
    ));
    assert_eq!(runner.calls.get(), 1);
    assert!(fs.files.borrow().is_empty());
}

#[tokio::test]
async fn test_alias_follows_configured_host() {
    let fs = MemoryFs::default();
    let routes = MemoryRoutes::default();
    let runner = KeygenRunner::new(&fs);
    let layout = SshLayout::new("/home/u/.ssh");
    let service = ServiceConfig {
        host: "git.example.org".to_string(),
        user: "gitea".to_string(),
        ..ServiceConfig::default()
    };
    let keys = SshKeyProvisioner::new(&runner, &fs, &routes, &layout, &service);

    keys.generate(&alice()).await.expect("generate");

    let text = routes.content();
    assert!(text.contains("Host git.example.org-alice"), "got: {text}");
    assert!(text.contains("HostName git.example.org"), "got: {text}");
    assert!(text.contains("User gitea"), "got: {text}");
}
