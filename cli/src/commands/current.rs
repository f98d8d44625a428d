//! `gitprof current`: show the global identity.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::profile_registry::current_identity;
use crate::commands::load_registry;

/// Run the current command.
///
/// # Errors
///
/// Returns an error if git cannot be queried.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut registry = load_registry(app)?;
    let current = current_identity(&mut registry, &app.git()).await?;
    app.renderer().render_current(current.as_ref());
    Ok(())
}
