//! `gitprof config`: print or change settings.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service::{load_config, set_value};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings and the environment overrides
    Show,
    /// Change one setting, e.g. `service.host git.example.org`
    Set {
        /// Dotted setting name
        key: String,
        value: String,
    },
}

/// # Errors
///
/// Fails on an unknown key, an invalid value or an unwritable file.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    let store = &app.config_store;
    match cmd {
        ConfigCommand::Show => {
            let config = load_config(store)?;
            app.renderer().render_config(&config, store.path());
        }
        ConfigCommand::Set { key, value } => {
            set_value(store, &key, &value)?;
            app.output.success(&format!("Set {key} = {value}"));
        }
    }
    Ok(())
}
