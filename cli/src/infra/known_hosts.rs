//! `KnownHostsFile`: append-only access to the SSH `known_hosts` trust store.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::KnownHostsStore;

/// The `known_hosts` file the connection probe trusts.
pub struct KnownHostsFile {
    path: PathBuf,
}

impl KnownHostsFile {
    /// Creates a store pointing at an arbitrary path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Whether a `known_hosts` line lists `host` in its host field.
///
/// Hashed entries (`|1|...`) cannot be matched and are ignored.
fn line_names_host(line: &str, host: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return false;
    }
    let mut fields = line.split_whitespace();
    let mut hosts = fields.next().unwrap_or_default();
    if hosts.starts_with('@') {
        hosts = fields.next().unwrap_or_default();
    }
    hosts.split(',').any(|h| {
        let h = h
            .strip_prefix('[')
            .and_then(|rest| rest.split_once(']'))
            .map_or(h, |(name, _port)| name);
        h.eq_ignore_ascii_case(host)
    })
}

impl KnownHostsStore for KnownHostsFile {
    fn is_trusted(&self, host: &str) -> Result<bool> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.lines().any(|line| line_names_host(line, host))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("read {}", self.path.display())),
        }
    }

    fn append(&self, entries: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
                set_permissions(parent, 0o700)?;
            }
        }
        let needs_newline = std::fs::read(&self.path)
            .map(|bytes| bytes.last().is_some_and(|b| *b != b'\n'))
            .unwrap_or(false);
        let created = !self.path.exists();

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        if needs_newline {
            file.write_all(b"\n")
                .with_context(|| format!("write {}", self.path.display()))?;
        }
        file.write_all(entries.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        if !entries.ends_with('\n') {
            file.write_all(b"\n")
                .with_context(|| format!("write {}", self.path.display()))?;
        }
        if created {
            set_permissions(&self.path, 0o600)?;
        }
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
