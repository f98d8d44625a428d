//! Interactive menu shown when `gitprof` runs without a subcommand.
//!
//! Every entry dispatches to the same handler as its subcommand.

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{
    add, current, doctor, is_interrupted, list, load_registry, remote_url, remove, switch, test,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Switch,
    Current,
    List,
    Remove,
    Test,
    RemoteUrl,
    Doctor,
    Exit,
}

const ACTIONS: &[(Action, &str)] = &[
    (Action::Add, "Add a new profile"),
    (Action::Switch, "Switch profile"),
    (Action::Current, "Show current identity"),
    (Action::List, "List profiles"),
    (Action::Remove, "Remove a profile"),
    (Action::Test, "Test SSH connection"),
    (Action::RemoteUrl, "Update remote URL of this repository"),
    (Action::Doctor, "Run diagnostics"),
    (Action::Exit, "Exit"),
];

/// Run the menu loop until the user picks Exit.
///
/// Failures of individual actions are printed and the loop continues;
/// an interrupt ends the loop.
///
/// # Errors
///
/// Returns an error when running non-interactively or when a prompt is
/// interrupted.
pub async fn run(app: &AppContext) -> Result<()> {
    anyhow::ensure!(
        !app.non_interactive,
        "No command given. Run `gitprof --help` to see the available commands."
    );
    let labels: Vec<String> = ACTIONS.iter().map(|(_, label)| (*label).to_string()).collect();

    loop {
        println!();
        let idx = app.select("gitprof", &labels)?;
        let action = ACTIONS[idx].0;
        if action == Action::Exit {
            app.output.info("Goodbye!");
            return Ok(());
        }
        if let Err(e) = dispatch(app, action).await {
            if is_interrupted(&e) {
                return Err(e);
            }
            app.output.error(&format!("{e:#}"));
        }
    }
}

async fn dispatch(app: &AppContext, action: Action) -> Result<()> {
    match action {
        Action::Add => add::run(app, add::AddArgs::default()).await,
        Action::Switch => switch::run(app, switch::SwitchArgs::default()).await,
        Action::Current => current::run(app).await,
        Action::List => list::run(app).await,
        Action::Remove => remove::run(app, remove::RemoveArgs::default()).await,
        Action::Test => test_menu(app).await,
        Action::RemoteUrl => remote_url::run(app, remote_url::RemoteUrlArgs::default()).await,
        Action::Doctor => doctor::run(app).await,
        Action::Exit => Ok(()),
    }
}

async fn test_menu(app: &AppContext) -> Result<()> {
    let mut registry = load_registry(app)?;
    let mut choices = registry.registry().names();
    anyhow::ensure!(
        !choices.is_empty(),
        "No profiles configured. Add one: gitprof add <name>"
    );
    choices.push("All profiles".to_string());
    let idx = app.select("Profile to test", &choices)?;
    let args = if idx + 1 == choices.len() {
        test::TestArgs {
            name: None,
            all: true,
        }
    } else {
        test::TestArgs {
            name: Some(choices[idx].clone()),
            all: false,
        }
    };
    test::run(app, args).await
}
