//! `gitprof remote-url`: route a repository remote through a profile alias.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::profile_registry::current_identity;
use crate::application::services::remote::update_remote;
use crate::commands::{load_registry, name_or_pick};
use crate::domain::ProfileError;

/// Arguments for the remote-url command.
#[derive(Args, Debug)]
pub struct RemoteUrlArgs {
    /// Profile whose alias to use (defaults to the active profile)
    pub profile: Option<String>,

    /// Remote to rewrite
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Show the new URL without changing the repository
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for RemoteUrlArgs {
    fn default() -> Self {
        Self {
            profile: None,
            remote: "origin".to_string(),
            dry_run: false,
        }
    }
}

/// Run the remote-url command.
///
/// # Errors
///
/// Returns an error outside a repository, for unknown profiles or remotes,
/// and for URLs that cannot be rewritten.
pub async fn run(app: &AppContext, args: RemoteUrlArgs) -> Result<()> {
    let mut registry = load_registry(app)?;
    let git = app.git();

    let name = match args.profile {
        Some(name) => name,
        None => match current_identity(&mut registry, &git)
            .await?
            .and_then(|c| c.profile)
        {
            Some(active) => active,
            None => name_or_pick(app, &mut registry, None, "Profile for this remote")?,
        },
    };
    if !registry.registry().contains(&name) {
        return Err(ProfileError::ProfileNotFound(name).into());
    }

    let update = update_remote(&git, &app.config.service, &args.remote, &name, args.dry_run).await?;
    app.renderer().render_remote_update(&update);
    Ok(())
}
