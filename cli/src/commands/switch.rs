//! `gitprof switch`: make a profile the global git identity.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::profile_registry::switch_profile;
use crate::application::services::remote::update_remote;
use crate::commands::{load_registry, name_or_pick};
use crate::domain::ProfileError;

/// Arguments for the switch command.
#[derive(Args, Debug, Default)]
pub struct SwitchArgs {
    /// Profile to switch to
    pub name: Option<String>,

    /// Leave the current repository's `origin` untouched
    #[arg(long)]
    pub skip_remote: bool,
}

/// Run the switch command.
///
/// # Errors
///
/// Returns an error if the profile does not exist or the identity cannot be set.
pub async fn run(app: &AppContext, args: SwitchArgs) -> Result<()> {
    let mut registry = load_registry(app)?;
    let name = name_or_pick(app, &mut registry, args.name, "Switch to profile")?;
    let git = app.git();
    let profile = switch_profile(&mut registry, &git, &name).await?;
    app.output.success(&format!(
        "Switched to '{name}' ({} <{}>)",
        profile.display_name, profile.email
    ));

    if args.skip_remote {
        return Ok(());
    }
    match update_remote(&git, &app.config.service, "origin", &name, false).await {
        Ok(update) => app.renderer().render_remote_update(&update),
        Err(e) => match e.downcast_ref::<ProfileError>() {
            Some(ProfileError::NotARepository) => {
                tracing::debug!("not in a repository; remote left alone");
            }
            _ => app.output.warn(&format!("origin not updated: {e}")),
        },
    }
    Ok(())
}
