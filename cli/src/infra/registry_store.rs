//! Infrastructure implementation of the `RegistryStore` port.
//!
//! The registry is one JSON object keyed by profile name, rewritten
//! atomically on every save.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::RegistryStore;
use crate::domain::Registry;
use crate::infra::fs::write_private;
use crate::infra::paths;

/// JSON file store for the profile registry.
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    /// Store at `$GITPROF_REGISTRY` or `~/.git_profiles.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(paths::registry_path()?))
    }

    /// Store at an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RegistryStore for JsonRegistryStore {
    fn load(&self) -> Result<Option<Registry>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(Registry::new()));
        }
        let registry = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(registry))
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        let mut content = serde_json::to_string_pretty(registry).context("serializing registry")?;
        content.push('\n');
        write_private(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), profiles = registry.len(), "registry saved");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
