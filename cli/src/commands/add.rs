//! `gitprof add`: create a profile with its own SSH key and host alias.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::LocalFs;
use crate::application::services::profile_registry::{NewProfile, add_profile};
use crate::commands::{load_registry, test};
use crate::domain::profile::{host_alias, public_key_path};
use crate::domain::{PassphrasePolicy, ProfileError, validate_email, validate_profile_name};

/// Arguments for the add command.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Profile name (letters, digits and hyphens)
    pub name: Option<String>,

    /// Commit email for this profile
    #[arg(long)]
    pub email: Option<String>,

    /// Commit author name (defaults to the profile name)
    #[arg(long)]
    pub display_name: Option<String>,

    /// Protect the new key with a passphrase (prompted, hidden)
    #[arg(long)]
    pub passphrase: bool,

    /// Do not offer a connection test afterwards
    #[arg(long)]
    pub no_test: bool,
}

/// Run the add command.
///
/// # Errors
///
/// Returns an error if validation, key generation, routing or saving fails.
pub async fn run(app: &AppContext, args: AddArgs) -> Result<()> {
    let mut registry = load_registry(app)?;

    let name = app.text_or_prompt(args.name, "Profile name", |v| {
        validate_profile_name(v).map_err(|e| e.to_string())
    })?;
    validate_profile_name(&name)?;
    if registry.registry().contains(&name) {
        return Err(ProfileError::DuplicateProfile(name).into());
    }
    let email = app.text_or_prompt(args.email, "Email", |v| {
        validate_email(v).map_err(|e| e.to_string())
    })?;
    validate_email(&email)?;
    let display_name = match args.display_name {
        Some(display_name) => Some(display_name),
        None => app.optional_text("Display name (blank for the profile name)")?,
    };

    let key_exists = app.fs.exists(&app.layout.key_path(&name));
    let passphrase = if key_exists {
        String::new()
    } else if args.passphrase
        || (app.config.keygen.passphrase == PassphrasePolicy::Ask
            && !app.non_interactive
            && app.confirm("Protect the new key with a passphrase?", false)?)
    {
        app.password("Passphrase")?
    } else {
        String::new()
    };

    let keygen = app.keygen();
    let added = add_profile(
        &mut registry,
        &keygen,
        &app.routes,
        &app.fs,
        &app.git(),
        &app.reporter(),
        &NewProfile {
            name: &name,
            email: &email,
            display_name: display_name.as_deref(),
            passphrase: &passphrase,
        },
    )
    .await?;

    let key_path = added
        .profile
        .key_path()
        .map_or_else(|| app.layout.key_path(&name), Path::to_path_buf);
    let public_key = app.fs.read_to_string(&public_key_path(&key_path)).ok();
    app.renderer().render_added(
        &added,
        &host_alias(&app.config.service.host, &name),
        &app.config.service.user,
        &app.config.service.keys_url,
        public_key.as_deref(),
    );

    if !args.no_test
        && !app.non_interactive
        && app.confirm(
            "Test the connection now? (add the public key to your account first)",
            false,
        )?
    {
        test::probe_one(app, &name, Some(&key_path)).await?;
    }
    Ok(())
}
