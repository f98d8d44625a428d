//! YAML settings file behind the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::GitprofConfig;
use crate::infra::fs::write_private;
use crate::infra::paths;

/// Settings at `$GITPROF_CONFIG`, else `~/.gitprof/config.yaml`. A missing
/// or blank file yields the built-in defaults.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// # Errors
    ///
    /// Fails when no override is set and the home directory is unknown.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(paths::config_path()?))
    }

    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<GitprofConfig> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read {}", self.path.display()));
            }
        };
        if text.trim().is_empty() {
            return Ok(GitprofConfig::default());
        }
        serde_yaml::from_str(&text).with_context(|| format!("cannot parse {}", self.path.display()))
    }

    fn save(&self, config: &GitprofConfig) -> Result<()> {
        let text = serde_yaml::to_string(config).context("cannot serialize config")?;
        write_private(&self.path, &text)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
