//! `gitprof list`: show every profile.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::profile_registry::list_profiles;
use crate::commands::load_registry;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the registry location cannot be determined.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut registry = load_registry(app)?;
    let entries = list_profiles(&mut registry, &app.git()).await?;
    app.renderer().render_profiles(&entries);
    Ok(())
}
