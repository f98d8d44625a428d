//! Command implementations

pub mod add;
pub mod config;
pub mod current;
pub mod doctor;
pub mod list;
pub mod menu;
pub mod remote_url;
pub mod remove;
pub mod switch;
pub mod version;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::profile_registry::ProfileRegistry;
use crate::infra::registry_store::JsonRegistryStore;

/// Load the registry now, surfacing a fallback-to-empty as a warning.
///
/// # Errors
///
/// Returns an error if the registry location cannot be determined.
pub(crate) fn load_registry(app: &AppContext) -> Result<ProfileRegistry<JsonRegistryStore>> {
    let mut registry = app.registry()?;
    registry.registry();
    if let Some(warning) = registry.take_load_warning() {
        app.output.warn(&warning);
    }
    Ok(registry)
}

/// `name` if given, otherwise an interactive pick among registered profiles.
///
/// # Errors
///
/// Returns an error if there are no profiles or the prompt fails.
pub(crate) fn name_or_pick(
    app: &AppContext,
    registry: &mut ProfileRegistry<JsonRegistryStore>,
    name: Option<String>,
    prompt: &str,
) -> Result<String> {
    if let Some(name) = name {
        return Ok(name);
    }
    let names = registry.registry().names();
    anyhow::ensure!(
        !names.is_empty(),
        "No profiles configured. Add one: gitprof add <name>"
    );
    let idx = app.select(prompt, &names)?;
    Ok(names[idx].clone())
}

/// Whether `err` is the user pressing Ctrl-C inside a prompt.
#[must_use]
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(dialoguer::Error::IO(io)) = cause.downcast_ref::<dialoguer::Error>() {
            return io.kind() == std::io::ErrorKind::Interrupted;
        }
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::Interrupted)
    })
}
