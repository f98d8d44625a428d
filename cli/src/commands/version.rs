//! Version command

use crate::output::HumanRenderer;

/// Run the version command.
pub fn run(renderer: &HumanRenderer<'_>) {
    renderer.render_version(env!("CARGO_PKG_VERSION"));
}
