//! `gitprof remove`: delete a profile, its keys and its routing stanza.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::profile_registry::remove_profile;
use crate::commands::{load_registry, name_or_pick};
use crate::domain::ProfileError;

/// Arguments for the remove command.
#[derive(Args, Debug, Default)]
pub struct RemoveArgs {
    /// Profile to remove
    pub name: Option<String>,
}

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the profile does not exist or the registry cannot be saved.
pub async fn run(app: &AppContext, args: RemoveArgs) -> Result<()> {
    let mut registry = load_registry(app)?;
    let name = name_or_pick(app, &mut registry, args.name, "Profile to remove")?;
    if !registry.registry().contains(&name) {
        return Err(ProfileError::ProfileNotFound(name).into());
    }

    if !app.non_interactive
        && !app.confirm(
            &format!("Remove profile '{name}' with its SSH keys and routing stanza?"),
            false,
        )?
    {
        app.output.info("Cancelled.");
        return Ok(());
    }

    let report = remove_profile(
        &mut registry,
        &app.routes,
        &app.fs,
        &app.git(),
        &app.reporter(),
        &name,
    )
    .await?;
    app.renderer().render_removal(&name, &report);
    Ok(())
}
