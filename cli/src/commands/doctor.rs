//! `gitprof doctor`: check tools, key files and routing stanzas.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::doctor::run_doctor;
use crate::commands::load_registry;

/// Run the doctor command.
///
/// # Errors
///
/// Returns an error if the registry location cannot be determined.
pub async fn run(app: &AppContext) -> Result<()> {
    let mut registry = load_registry(app)?;
    let report = run_doctor(
        &app.runner,
        &app.fs,
        &app.routes,
        &app.reporter(),
        registry.registry(),
    )
    .await?;
    app.renderer().render_doctor(&report);
    Ok(())
}
