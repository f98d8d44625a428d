//! Infrastructure implementation of the `RouteEditor` port over the SSH
//! client config file.
//!
//! Every operation is a whole-file read followed by an append or a full
//! rewrite. There is no locking; concurrent gitprof runs can interleave.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::RouteEditor;
use crate::domain::HostRoute;
use crate::domain::routing::{append_text, parse_routes, strip_stanzas};

/// The SSH client config file (`~/.ssh/config` by default).
pub struct SshConfigFile {
    path: PathBuf,
}

impl SshConfigFile {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }
}

impl RouteEditor for SshConfigFile {
    fn add_route(&self, route: &HostRoute) -> Result<()> {
        let existing = self.read()?;
        if parse_routes(&existing)
            .iter()
            .any(|r| r.profile == route.profile)
        {
            tracing::warn!(
                profile = %route.profile,
                path = %self.path.display(),
                "routing stanza already present; appending a duplicate"
            );
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let created = !self.path.exists();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(append_text(&existing, route).as_bytes())
            .with_context(|| format!("appending to {}", self.path.display()))?;

        #[cfg(unix)]
        if created {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", self.path.display()))?;
        }
        #[cfg(not(unix))]
        let _ = created;

        tracing::debug!(profile = %route.profile, alias = %route.alias, "routing stanza appended");
        Ok(())
    }

    fn remove_route(&self, profile: &str) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = self.read()?;
        let stripped = strip_stanzas(&text, profile);
        if stripped.removed == 0 {
            return Ok(0);
        }
        if stripped.removed > 1 {
            tracing::warn!(
                profile,
                count = stripped.removed,
                "removed duplicate routing stanzas"
            );
        }
        std::fs::write(&self.path, stripped.text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(stripped.removed)
    }

    fn routes(&self) -> Result<Vec<HostRoute>> {
        Ok(parse_routes(&self.read()?))
    }
}
