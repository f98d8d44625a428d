//! Local filesystem access: the `LocalFs` port and the owner-only atomic
//! write shared by the registry and configuration files.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::LocalFs;

/// Replace `path` with `contents`, readable by the owner only.
///
/// The bytes go to a temp file next to `path` that is then renamed over it,
/// so readers see the old document or the new one and never a prefix.
/// Missing parent directories are created.
///
/// # Errors
///
/// Fails when the directory cannot be created or the temp file cannot be
/// written, restricted or renamed.
pub fn write_private(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
            dir
        }
        None => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("writing {}", temp.path().display()))?;
    StdFs.set_permissions(temp.path(), 0o600)?;
    temp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

pub struct StdFs;

impl LocalFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_private_dir(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))?;
        self.set_permissions(path, 0o700)
    }

    fn remove_file(&self, path: &Path) -> Result<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("removing file {}", path.display())),
        }
    }

    #[cfg_attr(not(unix), allow(unused_variables))]
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
                .with_context(|| format!("setting permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading file {}", path.display()))
    }
}
